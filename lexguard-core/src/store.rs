// lexguard-core/src/store.rs
//! Categorized term storage.
//!
//! A [`LexiconStore`] maps category ids to sets of terms. It is filled once by
//! the acquisition layer (one [`LexiconStore::load`] call per retrieved
//! category) and then handed to an engine, after which it is only read.
//!
//! Iteration order is part of the contract: categories come back in load order
//! and terms in first-insertion order, which makes detection output and the
//! sequential redaction passes reproducible.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use log::debug;
use serde::Serialize;

/// One category and its unique terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub name: String,
    pub terms: Vec<String>,
}

/// Mapping from category id to its term set, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexiconStore {
    partitions: Vec<Partition>,
}

impl LexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the term set for `category`.
    ///
    /// Terms are trimmed, empties dropped, and duplicates collapse onto their
    /// first occurrence. Replacing a category keeps its original load position.
    pub fn load<I, S>(&mut self, category: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<String> = terms
            .into_iter()
            .filter_map(|t| {
                let trimmed = t.as_ref().trim();
                (!trimmed.is_empty() && seen.insert(trimmed.to_string())).then(|| trimmed.to_string())
            })
            .collect();

        debug!("Loaded category '{}' with {} unique terms.", category, unique.len());

        match self.partitions.iter_mut().find(|p| p.name == category) {
            Some(existing) => existing.terms = unique,
            None => self.partitions.push(Partition { name: category.to_string(), terms: unique }),
        }
    }

    /// All loaded category ids, in load order.
    pub fn categories(&self) -> Vec<String> {
        self.partitions.iter().map(|p| p.name.clone()).collect()
    }

    /// Unique terms in one category, or across all categories when `None`.
    ///
    /// An unknown category counts as zero.
    pub fn term_count(&self, category: Option<&str>) -> usize {
        match category {
            Some(name) => self.partition(name).map_or(0, |p| p.terms.len()),
            None => self.partitions.iter().map(|p| p.terms.len()).sum(),
        }
    }

    pub fn terms(&self, category: &str) -> Option<&[String]> {
        self.partition(category).map(|p| p.terms.as_slice())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.partition(category).is_some()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    fn partition(&self, category: &str) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.name == category)
    }
}
