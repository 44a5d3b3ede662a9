//! High-level Lexicon API
//!
//! This module provides the main entry point: a string index with exact,
//! prefix and typo-tolerant lookup, where entries may carry associated
//! values.

use crate::config::Config;
use crate::fuzzy::{levenshtein_str, FuzzySearcher};
use crate::trie::{NodeId, RadixTrie};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// One fuzzy lookup hit
///
/// Ordered by distance, then key, so a `BTreeSet` of matches lists the
/// closest first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FuzzyMatch {
    /// Edit distance between the query and `key`
    pub distance: usize,
    pub key: String,
    /// Strings associated with `key`
    pub values: BTreeSet<String>,
}

/// Counts describing a lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Distinct stored strings (keys and values alike)
    pub entries: usize,
    /// Trie nodes, including pure branch points
    pub nodes: usize,
    /// Key/value associations
    pub pairs: usize,
}

/// A string index with key/value associations
///
/// Both sides of an `insert(key, value)` are indexed as ordinary entries and
/// linked to each other, so either side finds the other through `values`.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    trie: RadixTrie,
    config: Config,
}

impl Lexicon {
    /// Create an empty lexicon with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty lexicon with the given settings
    pub fn with_config(config: Config) -> Self {
        Lexicon {
            trie: RadixTrie::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying trie
    pub fn trie(&self) -> &RadixTrie {
        &self.trie
    }

    /// Index `key`, and `value` too when it is non-empty, linking the two
    ///
    /// An empty key makes the whole call a no-op. Re-inserting existing
    /// strings only adds the link if it is new.
    pub fn insert(&mut self, key: &str, value: &str) {
        let Some(key_node) = self.trie.insert(key) else {
            return;
        };
        if let Some(value_node) = self.trie.insert(value) {
            self.trie.link_pair(key_node, value_node);
        }
    }

    /// The stored form of `key`, if present
    ///
    /// This returns the key itself, not its values; see `values`.
    pub fn lookup_exact(&self, key: &str) -> Option<String> {
        self.terminal(key).map(|id| self.trie.reconstruct(id))
    }

    /// Strings associated with `key`, if `key` is present
    pub fn values(&self, key: &str) -> Option<BTreeSet<String>> {
        self.terminal(key).map(|id| self.values_of(id))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.trie.contains(key)
    }

    /// Entries within `max_edits` edits of `query`, at most `max_results`
    ///
    /// An empty query matches nothing.
    pub fn fuzzy_lookup(
        &self,
        query: &str,
        max_edits: usize,
        max_results: usize,
    ) -> Result<BTreeSet<FuzzyMatch>> {
        if max_results == 0 {
            return Err(Error::InvalidArgument(
                "max_results must be at least 1".into(),
            ));
        }

        let found = FuzzySearcher::new(&self.trie, query, max_edits, max_results).search();
        let matches: BTreeSet<FuzzyMatch> = found
            .into_iter()
            .map(|id| {
                let key = self.trie.reconstruct(id);
                FuzzyMatch {
                    distance: levenshtein_str(query, &key),
                    values: self.values_of(id),
                    key,
                }
            })
            .collect();

        debug!(query, max_edits, found = matches.len(), "fuzzy lookup");
        Ok(matches)
    }

    /// `fuzzy_lookup` with the configured budget and result cap
    pub fn fuzzy(&self, query: &str) -> Result<BTreeSet<FuzzyMatch>> {
        self.fuzzy_lookup(query, self.config.max_edits, self.config.max_results)
    }

    /// Stored strings starting with `prefix`, sorted, optionally truncated
    pub fn prefix_search(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let mut keys = self.trie.keys_with_prefix(prefix);
        if let Some(limit) = limit {
            keys.truncate(limit);
        }
        keys
    }

    /// Remove one stored string and its associations
    pub fn remove(&mut self, key: &str) -> bool {
        self.trie.remove(key)
    }

    /// Number of distinct stored strings
    pub fn size(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    pub fn pair_count(&self) -> usize {
        self.trie.pair_count()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            entries: self.size(),
            nodes: self.node_count(),
            pairs: self.pair_count(),
        }
    }

    /// Read entries from a word list, one per line
    ///
    /// Lines are `key`, or `key<separator>value`. Blank lines and lines
    /// starting with `#` are skipped. Returns the number of entries read.
    pub fn load_from_reader(&mut self, reader: impl BufRead) -> Result<usize> {
        let separator = self.config.separator;
        let mut count = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once(separator).unwrap_or((line, ""));
            if key.is_empty() {
                return Err(Error::Parse {
                    line: index + 1,
                    message: "empty key".into(),
                });
            }
            self.insert(key, value);
            count += 1;
        }

        debug!(entries = count, size = self.size(), "loaded word list");
        Ok(count)
    }

    /// Read entries from a word-list file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let file = File::open(path.as_ref())?;
        self.load_from_reader(BufReader::new(file))
    }

    // === Internal helpers ===

    fn terminal(&self, key: &str) -> Option<NodeId> {
        self.trie
            .find_exact(key)
            .filter(|id| self.trie.node(*id).is_terminal())
    }

    fn values_of(&self, id: NodeId) -> BTreeSet<String> {
        self.trie
            .node(id)
            .pairs()
            .iter()
            .map(|p| self.trie.reconstruct(*p))
            .collect()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for Lexicon {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value.as_ref());
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        lexicon.extend(iter);
        lexicon
    }
}
