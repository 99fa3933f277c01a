// lexguard-core/src/acquisition/http.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::acquisition::LexiconFetcher;
use crate::config::LexiconConfig;

/// Fetches lexicon files over HTTP(S) relative to a base URL.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid lexicon base URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Lexicon base URL '{}' cannot be used as a base", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lexguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.request_timeout_secs))
    }

    /// The URL a file is fetched from; the file name is percent-encoded as one
    /// path segment.
    pub fn url_for(&self, file: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Lexicon base URL '{}' cannot be used as a base", self.base_url))?
            .pop_if_empty()
            .push(file);
        Ok(url)
    }
}

#[async_trait]
impl LexiconFetcher for HttpFetcher {
    fn name(&self) -> &str { "http" }

    async fn fetch(&self, file: &str) -> Result<String> {
        let url = self.url_for(file)?;
        log::debug!("Fetching lexicon from {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP {}: {}", status.as_u16(), status.canonical_reason().unwrap_or("Unknown"));
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_encodes_file_name() {
        let fetcher = HttpFetcher::new("https://example.com/lists/Vocabulary/", Duration::from_secs(5)).unwrap();
        let url = fetcher.url_for("政治 类型.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/lists/Vocabulary/%E6%94%BF%E6%B2%BB%20%E7%B1%BB%E5%9E%8B.txt"
        );
    }

    #[test]
    fn test_url_for_without_trailing_slash() {
        let fetcher = HttpFetcher::new("https://example.com/lists", Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.url_for("a.txt").unwrap().as_str(), "https://example.com/lists/a.txt");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpFetcher::new("not a url", Duration::from_secs(5)).is_err());
        assert!(HttpFetcher::new("mailto:someone@example.com", Duration::from_secs(5)).is_err());
    }
}
