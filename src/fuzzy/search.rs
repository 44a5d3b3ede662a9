//! Bounded edit-distance search over the radix trie.
//!
//! The search state is `(node, p2, p1, typos)`: `p1` chars of the query and
//! `p2` chars of the node's prefix are consumed, with `typos` edits left.
//! Equal characters are consumed in lock-step for free. On a mismatch the
//! search branches three ways (substitution, extra query char, missing
//! query char), each costing one edit. Leaves are finished in one step with
//! the trimmed Levenshtein helper, since a leaf's remaining prefix is the
//! whole rest of its key.

use super::edit_distance::levenshtein_within;
use crate::collections::ResultSet;
use crate::trie::{NodeId, RadixTrie};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Collects the terminal nodes within `max_edits` of a query
///
/// The descent recurses once per trie level, so the deepest key chain
/// bounds the stack use. Chains many thousands of nodes deep need a thread
/// with a larger stack.
pub struct FuzzySearcher<'t> {
    trie: &'t RadixTrie,
    query: Vec<char>,
    max_edits: usize,
    limit: usize,
    results: HashSet<NodeId>,
    /// Best remaining budget seen per `(node, p2, p1)`
    visited: HashMap<(NodeId, usize, usize), usize>,
}

impl<'t> FuzzySearcher<'t> {
    /// Prepare a search returning at most `limit` nodes
    pub fn new(trie: &'t RadixTrie, query: &str, max_edits: usize, limit: usize) -> Self {
        FuzzySearcher {
            trie,
            query: query.chars().collect(),
            max_edits,
            limit,
            results: HashSet::new(),
            visited: HashMap::new(),
        }
    }

    /// Run the search, returning matching terminal nodes sorted by id
    pub fn search(mut self) -> Vec<NodeId> {
        debug!(
            query = %self.query.iter().collect::<String>(),
            max_edits = self.max_edits,
            limit = self.limit,
            "fuzzy search"
        );
        if self.query.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let trie = self.trie;
        for (_, root) in trie.roots() {
            if self.is_full() {
                break;
            }
            self.lookup(root, 0, 0, self.max_edits);
        }

        debug!(
            results = self.results.count(),
            states = self.visited.len(),
            "fuzzy search finished"
        );
        let mut found = self.results.into_members();
        found.sort();
        found
    }

    /// Advance through matching characters, then hand off to the boundary
    /// or mismatch handling
    fn lookup(&mut self, node: NodeId, mut p2: usize, mut p1: usize, typos: usize) {
        if self.is_full() {
            return;
        }
        let prefix = self.trie.node(node).prefix();
        while p2 < prefix.len() && p1 < self.query.len() && prefix[p2] == self.query[p1] {
            p1 += 1;
            p2 += 1;
        }

        if p2 == prefix.len() {
            self.boundary(node, p1, typos);
        } else {
            self.branch(node, p2, p1, typos);
        }
    }

    /// The whole prefix of `node` is consumed
    fn boundary(&mut self, node: NodeId, p1: usize, typos: usize) {
        let trie = self.trie;
        let current = trie.node(node);
        if !self.visit(node, current.prefix().len(), p1, typos) {
            return;
        }

        // Any unconsumed query suffix is absorbed as deletions
        if current.is_terminal() && p1.saturating_add(typos) >= self.query.len() {
            self.record(node);
        }
        for &child in current.successors() {
            if self.is_full() {
                return;
            }
            self.lookup(child, 0, p1, typos);
        }
    }

    /// Mismatch, or query exhausted, at offset `p2` inside `node`'s prefix
    fn branch(&mut self, node: NodeId, p2: usize, p1: usize, typos: usize) {
        if !self.visit(node, p2, p1, typos) {
            return;
        }
        let trie = self.trie;
        let current = trie.node(node);

        if current.is_leaf() {
            let rest = &current.prefix()[p2..];
            if levenshtein_within(&self.query[p1..], rest, typos).is_some() && current.is_terminal()
            {
                self.record(node);
            }
            return;
        }

        let Some(typos) = typos.checked_sub(1) else {
            return;
        };
        if p1 < self.query.len() {
            // Substitution
            self.lookup(node, p2 + 1, p1 + 1, typos);
            // Extra char in the query
            self.lookup(node, p2, p1 + 1, typos);
        }
        // Char missing from the query
        self.lookup(node, p2 + 1, p1, typos);
    }

    /// Mark a state as explored; false if it was already explored with at
    /// least this much budget
    fn visit(&mut self, node: NodeId, p2: usize, p1: usize, typos: usize) -> bool {
        match self.visited.get(&(node, p2, p1)) {
            Some(&best) if best >= typos => false,
            _ => {
                self.visited.insert((node, p2, p1), typos);
                true
            }
        }
    }

    fn record(&mut self, node: NodeId) {
        if self.results.add(node) {
            trace!(?node, "fuzzy match");
        }
    }

    fn is_full(&self) -> bool {
        self.results.count() >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(keys: &[&str]) -> RadixTrie {
        let mut trie = RadixTrie::new();
        for key in keys {
            trie.insert(key);
        }
        trie
    }

    fn search(trie: &RadixTrie, query: &str, max_edits: usize) -> Vec<String> {
        let mut keys: Vec<String> = FuzzySearcher::new(trie, query, max_edits, usize::MAX)
            .search()
            .into_iter()
            .map(|id| trie.reconstruct(id))
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_exact_with_zero_budget() {
        let trie = trie_of(&["qwerty", "qwertz", "query"]);
        assert_eq!(search(&trie, "qwerty", 0), vec!["qwerty"]);
        assert!(search(&trie, "qwert", 0).is_empty());
    }

    #[test]
    fn test_missing_trailing_char() {
        let trie = trie_of(&["qwerty"]);
        assert_eq!(search(&trie, "qwert", 1), vec!["qwerty"]);
    }

    #[test]
    fn test_extra_trailing_char() {
        let trie = trie_of(&["qwerty"]);
        assert_eq!(search(&trie, "qwertyy", 1), vec!["qwerty"]);
        assert!(search(&trie, "qwertyyy", 1).is_empty());
    }

    #[test]
    fn test_substitution_reaches_siblings() {
        let trie = trie_of(&["abc", "abd"]);
        assert_eq!(search(&trie, "abx", 1), vec!["abc", "abd"]);
    }

    #[test]
    fn test_first_char_typo() {
        // "xbc" has its own subtree, but "abc" is still one edit away
        let trie = trie_of(&["abc", "xbcdef"]);
        assert_eq!(search(&trie, "xbc", 1), vec!["abc"]);
        assert_eq!(search(&trie, "bc", 1), vec!["abc"]);
    }

    #[test]
    fn test_inner_terminal_and_deep_keys() {
        let trie = trie_of(&["te", "tea", "team", "test", "toast"]);
        assert_eq!(search(&trie, "tea", 0), vec!["tea"]);
        assert_eq!(search(&trie, "tea", 1), vec!["te", "tea", "team"]);
        assert_eq!(search(&trie, "tast", 1), vec!["test", "toast"]);
        assert_eq!(search(&trie, "tam", 1), vec!["team"]);
        assert_eq!(search(&trie, "tam", 2), vec!["te", "tea", "team"]);
    }

    #[test]
    fn test_transposition_costs_two() {
        let trie = trie_of(&["form"]);
        assert!(search(&trie, "from", 1).is_empty());
        assert_eq!(search(&trie, "from", 2), vec!["form"]);
    }

    #[test]
    fn test_limit_stops_early() {
        let trie = trie_of(&["cat", "car", "cab", "can", "cap"]);
        let found = FuzzySearcher::new(&trie, "cax", 1, 2).search();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_unbounded_budget() {
        let trie = trie_of(&["abc", "te", "team", "qwerty"]);
        assert_eq!(search(&trie, "abcd", usize::MAX), vec!["abc", "qwerty", "te", "team"]);
        assert_eq!(search(&trie, "x", usize::MAX).len(), 4);
    }

    #[test]
    fn test_empty_query() {
        let trie = trie_of(&["a", "ab"]);
        assert!(search(&trie, "", 2).is_empty());
    }

    #[test]
    fn test_empty_trie() {
        let trie = RadixTrie::new();
        assert!(search(&trie, "anything", 3).is_empty());
    }
}
