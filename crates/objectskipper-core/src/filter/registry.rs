//! Pattern and object registries
//!
//! Both registries are ordered maps so listings come out sorted without
//! an extra pass.

use super::matcher;
use std::collections::{BTreeMap, BTreeSet};

/// Comment prefixes that mark an object boundary
///
/// The enabled flag is recorded and listed but not consulted when
/// matching: every registered prefix matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternRegistry {
    patterns: BTreeMap<String, bool>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or update a prefix
    pub fn set(&mut self, prefix: impl Into<String>, enabled: bool) {
        self.patterns.insert(prefix.into(), enabled);
    }

    /// All registered prefixes, sorted, regardless of enabled flag
    pub fn list(&self) -> Vec<&str> {
        self.patterns.keys().map(String::as_str).collect()
    }

    /// Whether no prefix is registered
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every prefix
    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    /// Find the registered prefix that marks `comment` as an object boundary
    ///
    /// `comment` is expected to be trimmed already. The longest matching
    /// prefix wins.
    pub fn match_comment(&self, comment: &str) -> Option<&str> {
        matcher::longest_matching_prefix(self.patterns.keys().map(String::as_str), comment)
    }
}

/// Objects the operator asked to filter, plus every object id seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectRegistry {
    objects_to_filter: BTreeMap<String, bool>,
    known_ids: BTreeSet<String>,
}

impl ObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable filtering for an object id
    pub fn set_filtered(&mut self, id: impl Into<String>, enabled: bool) {
        self.objects_to_filter.insert(id.into(), enabled);
    }

    /// Whether commands of `id` should be suppressed
    pub fn is_filtered(&self, id: &str) -> bool {
        self.objects_to_filter.get(id).copied().unwrap_or(false)
    }

    /// Every id with an explicit filter entry, sorted, enabled or not
    pub fn filtered_ids(&self) -> Vec<&str> {
        self.objects_to_filter.keys().map(String::as_str).collect()
    }

    /// Whether no id has a filter entry
    pub fn is_empty(&self) -> bool {
        self.objects_to_filter.is_empty()
    }

    /// Record an id seen in the command stream
    pub fn record_known(&mut self, id: impl Into<String>) {
        self.known_ids.insert(id.into());
    }

    /// Every id seen in the command stream, sorted
    pub fn known_ids(&self) -> Vec<&str> {
        self.known_ids.iter().map(String::as_str).collect()
    }

    /// Drop every filter entry
    ///
    /// Known ids are diagnostic only and survive.
    pub fn clear(&mut self) {
        self.objects_to_filter.clear();
    }
}
