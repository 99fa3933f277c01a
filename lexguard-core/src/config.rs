//! Configuration management for `lexguard-core`.
//!
//! This module defines where lexicons come from: a table of raw word-list files,
//! each mapped to the category id it is served under, plus the transport and
//! redaction defaults. Configurations are YAML; the built-in table is embedded
//! in the binary and user files are merged on top of it.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};

/// Replacement marker used when the caller does not supply one.
pub const DEFAULT_REPLACEMENT: &str = "***";

/// One raw word-list file and the category it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LexiconSource {
    /// File name relative to `base_url` (or to the local lexicon directory).
    pub file: String,
    /// Category id the file's terms are loaded under.
    pub category: String,
}

/// Top-level lexicon configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Base URL the source file names are appended to.
    pub base_url: String,
    /// Default replacement marker for filtering.
    pub replacement: String,
    /// Per-request timeout for remote fetches.
    pub request_timeout_secs: u64,
    /// Sources in load order.
    pub sources: Vec<LexiconSource>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
            request_timeout_secs: 30,
            sources: Vec::new(),
        }
    }
}

/// Partial configuration as written by users; absent fields keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserLexiconConfig {
    pub base_url: Option<String>,
    pub replacement: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub sources: Vec<LexiconSource>,
}

impl LexiconConfig {
    /// Loads the built-in source table.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default lexicon sources from embedded string...");
        let default_yaml = include_str!("../config/default_sources.yaml");
        let config: LexiconConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default lexicon sources")?;

        debug!("Loaded {} default lexicon sources.", config.sources.len());
        Ok(config)
    }

    /// Loads a complete configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading lexicon configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: LexiconConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} lexicon sources from file {}.", config.sources.len(), path.display());
        Ok(config)
    }

    /// Checks source integrity and transport settings.
    pub fn validate(&self) -> Result<()> {
        let mut errors = validate_sources(&self.sources);
        if self.request_timeout_secs == 0 {
            errors.push("`request_timeout_secs` must be greater than zero.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Lexicon configuration validation failed:\n{}", errors.join("\n")))
        }
    }

    /// Keeps only the sources selected by enable/disable lists of category ids.
    ///
    /// An empty `enable` list means "every source"; `disable` always wins.
    pub fn set_active_sources(&mut self, enable: &[String], disable: &[String]) {
        let enable_set: HashSet<&str> = enable.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable.iter().map(String::as_str).collect();

        debug!("Initial source count before filtering: {}", self.sources.len());

        let all_categories: HashSet<&str> = self.sources.iter().map(|s| s.category.as_str()).collect();

        for category in enable_set.difference(&all_categories) {
            warn!("Category '{}' in `enable` list is not a configured source.", category);
        }

        for category in disable_set.difference(&all_categories) {
            warn!("Category '{}' in `disable` list is not a configured source.", category);
        }

        self.sources.retain(|source| {
            let category = source.category.as_str();
            !disable_set.contains(category) && (enable_set.is_empty() || enable_set.contains(category))
        });

        debug!("Final active source count after filtering: {}", self.sources.len());
    }

    /// Category ids in configured order.
    pub fn categories(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.category.as_str()).collect()
    }
}

impl UserLexiconConfig {
    /// Loads a partial user configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading user lexicon configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UserLexiconConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let errors = validate_sources(&config.sources);
        if !errors.is_empty() {
            return Err(anyhow!("Lexicon configuration validation failed:\n{}", errors.join("\n")));
        }
        Ok(config)
    }
}

/// Merges a user configuration over the defaults.
///
/// User sources replace default sources with the same category in place;
/// new categories are appended in the user's order.
pub fn merge_config(default_config: LexiconConfig, user_config: Option<UserLexiconConfig>) -> LexiconConfig {
    debug!("merge_config called. Initial default source count: {}", default_config.sources.len());

    let mut merged = default_config;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user sources.", user_cfg.sources.len());
        for user_source in user_cfg.sources {
            match merged.sources.iter_mut().find(|s| s.category == user_source.category) {
                Some(existing) => *existing = user_source,
                None => merged.sources.push(user_source),
            }
        }

        if let Some(base_url) = user_cfg.base_url {
            debug!("Overriding base URL with user value: {}", base_url);
            merged.base_url = base_url;
        }

        if let Some(replacement) = user_cfg.replacement {
            merged.replacement = replacement;
        }

        if let Some(timeout) = user_cfg.request_timeout_secs {
            debug!("Overriding request timeout with user value: {}s", timeout);
            merged.request_timeout_secs = timeout;
        }
    }

    debug!("Final total sources after merge: {}", merged.sources.len());
    merged
}

/// Locations searched for a user configuration when none is given explicitly.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".lexguard").join("config.yaml")),
        dirs::config_dir().map(|p| p.join("lexguard").join("config.yaml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Loads the defaults merged with the first user configuration found.
///
/// `explicit` takes precedence over the candidate paths and must exist.
pub fn resolve_config(explicit: Option<&Path>) -> Result<LexiconConfig> {
    let default_config = LexiconConfig::load_default()?;

    let user_config = match explicit {
        Some(path) => Some(UserLexiconConfig::load_from_file(path)?),
        None => match config_candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Some(UserLexiconConfig::load_from_file(&path)?),
            None => None,
        },
    };

    let merged = merge_config(default_config, user_config);
    merged.validate()?;
    Ok(merged)
}

fn validate_sources(sources: &[LexiconSource]) -> Vec<String> {
    let mut categories = HashSet::new();
    let mut errors = Vec::new();

    for source in sources {
        if source.category.trim().is_empty() {
            errors.push(format!("Source '{}' has an empty `category` field.", source.file));
        } else if !categories.insert(source.category.as_str()) {
            errors.push(format!("Duplicate category found: '{}'.", source.category));
        }

        if source.file.trim().is_empty() {
            errors.push(format!("Category '{}' has an empty `file` field.", source.category));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(file: &str, category: &str) -> LexiconSource {
        LexiconSource { file: file.to_string(), category: category.to_string() }
    }

    #[test]
    fn test_default_config_has_fifteen_categories() {
        let config = LexiconConfig::load_default().unwrap();
        assert_eq!(config.sources.len(), 15);
        assert_eq!(config.replacement, DEFAULT_REPLACEMENT);
        assert_eq!(config.categories()[0], "covid19");
        assert!(config.categories().contains(&"illegal-urls"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_set_active_sources() {
        let mut config = LexiconConfig {
            sources: vec![source("a.txt", "a"), source("b.txt", "b"), source("c.txt", "c")],
            ..LexiconConfig::default()
        };
        config.set_active_sources(&["a".to_string(), "b".to_string()], &["b".to_string()]);
        assert_eq!(config.categories(), vec!["a"]);
    }

    #[test]
    fn test_set_active_sources_empty_enable_keeps_all() {
        let mut config = LexiconConfig {
            sources: vec![source("a.txt", "a"), source("b.txt", "b")],
            ..LexiconConfig::default()
        };
        config.set_active_sources(&[], &[]);
        assert_eq!(config.categories(), vec!["a", "b"]);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_zero_timeout() {
        let config = LexiconConfig {
            request_timeout_secs: 0,
            sources: vec![source("a.txt", "a"), source("a2.txt", "a"), source("", "b")],
            ..LexiconConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Duplicate category found: 'a'"));
        assert!(err.contains("empty `file`"));
        assert!(err.contains("request_timeout_secs"));
    }
}
