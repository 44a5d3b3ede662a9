//! Compressed radix trie
//!
//! Keys are stored as chains of `Node`s whose prefixes concatenate to the
//! key. Siblings never share a leading character, and every non-terminal
//! node branches at least two ways, so each stored key has exactly one path.

use super::node::{Node, NodeArena, NodeId};
use crate::collections::{CharMap, Sequence};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A radix trie over `char` strings with optional pair links between keys
#[derive(Clone, Debug, Default)]
pub struct RadixTrie {
    /// Root dispatch by leading character
    roots: BTreeMap<char, NodeId>,
    arena: NodeArena,
    /// Number of terminal nodes
    len: usize,
}

impl RadixTrie {
    /// Create a new empty trie
    pub fn new() -> Self {
        RadixTrie {
            roots: BTreeMap::new(),
            arena: NodeArena::new(),
            len: 0,
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, terminal or not
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.roots.clear();
        self.arena.clear();
        self.len = 0;
    }

    /// Borrow a node by id
    ///
    /// Panics if the id does not refer to a live node of this trie.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Top-level subtrees as `(leading char, node)` pairs
    pub fn roots(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.roots.pairs()
    }

    /// Find the node whose accumulated prefix equals `key`
    ///
    /// The node is returned whether or not it is terminal.
    pub fn find_exact(&self, key: &str) -> Option<NodeId> {
        let key: Vec<char> = key.chars().collect();
        let first = *key.first()?;

        let mut node = self.roots.find(first)?;
        let mut pos = 0;
        loop {
            let prefix = self.arena.get(node).prefix();
            let common = common_prefix_len(&key[pos..], prefix);
            if common < prefix.len() {
                return None;
            }
            pos += common;
            if pos == key.len() {
                return Some(node);
            }
            node = self.child_starting_with(node, key[pos])?;
        }
    }

    /// Whether `key` was inserted (and not removed)
    pub fn contains(&self, key: &str) -> bool {
        self.find_exact(key)
            .is_some_and(|id| self.arena.get(id).is_terminal())
    }

    /// Rebuild the full string at `id` by walking parent links
    pub fn reconstruct(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.arena.get(id);
            segments.push(node.prefix());
            current = node.parent();
        }
        segments.iter().rev().flat_map(|s| s.iter()).collect()
    }

    /// Insert `key`, returning its terminal node
    ///
    /// Returns `None` for the empty string, which is never stored. Inserting
    /// a key that is already present only returns its node.
    pub fn insert(&mut self, key: &str) -> Option<NodeId> {
        let key: Vec<char> = key.chars().collect();
        let first = *key.first()?;

        let Some(mut node) = self.roots.find(first) else {
            let id = self.arena.alloc(Node::new(key, None, true));
            self.roots.put(first, id);
            self.len += 1;
            trace!(?id, "new root subtree");
            return Some(id);
        };

        let mut pos = 0;
        let id = loop {
            let prefix_len = self.arena.get(node).prefix.len();
            let common = common_prefix_len(&key[pos..], self.arena.get(node).prefix());

            if common < prefix_len {
                // Diverged or ran out of key inside this node's prefix
                let upper = self.split(node, common);
                pos += common;
                if pos == key.len() {
                    self.mark_terminal(upper);
                    break upper;
                }
                break self.add_child(upper, key[pos..].to_vec());
            }

            pos += common;
            if pos == key.len() {
                self.mark_terminal(node);
                break node;
            }

            match self.child_starting_with(node, key[pos]) {
                Some(child) => node = child,
                None => break self.add_child(node, key[pos..].to_vec()),
            }
        };

        Some(id)
    }

    /// Remove `key`, merging nodes so the tree stays fully compressed
    ///
    /// Pair links to the removed key are dropped on both sides. Returns
    /// whether the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(id) = self.find_exact(key) else {
            return false;
        };
        if !self.arena.get(id).is_terminal() {
            return false;
        }

        self.unlink_pairs(id);
        self.arena.get_mut(id).terminal = false;
        self.len -= 1;

        match self.arena.get(id).successors.len() {
            0 => {
                let parent = self.detach(id);
                self.arena.free(id);
                if let Some(parent) = parent {
                    let p = self.arena.get(parent);
                    if !p.is_terminal() && p.successors.len() == 1 {
                        self.merge_with_child(parent);
                    }
                }
            }
            1 => self.merge_with_child(id),
            _ => {}
        }

        debug!(key, "removed key");
        true
    }

    /// Associate two terminal nodes with each other
    ///
    /// Links are symmetric and deduplicated; linking a node with itself
    /// stores a single self-link.
    pub fn link_pair(&mut self, a: NodeId, b: NodeId) {
        assert!(
            self.arena.get(a).is_terminal() && self.arena.get(b).is_terminal(),
            "pair links must join terminal nodes"
        );
        if self.arena.get(a).pairs.index_of(&b).is_none() {
            self.arena.get_mut(a).pairs.push_back(b);
        }
        if self.arena.get(b).pairs.index_of(&a).is_none() {
            self.arena.get_mut(b).pairs.push_back(a);
        }
    }

    /// Number of distinct pair links
    pub fn pair_count(&self) -> usize {
        let mut count = 0;
        self.walk(|id, node| {
            count += node.pairs.items().filter(|other| *other >= id).count();
        });
        count
    }

    /// All stored keys starting with `prefix`, sorted
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix: Vec<char> = prefix.chars().collect();
        let mut out = Vec::new();

        let Some(&first) = prefix.first() else {
            return self.keys();
        };
        let Some(mut node) = self.roots.find(first) else {
            return out;
        };

        let mut pos = 0;
        loop {
            let node_prefix = self.arena.get(node).prefix();
            let common = common_prefix_len(&prefix[pos..], node_prefix);
            if pos + common == prefix.len() {
                break;
            }
            if common < node_prefix.len() {
                return out;
            }
            pos += common;
            match self.child_starting_with(node, prefix[pos]) {
                Some(child) => node = child,
                None => return out,
            }
        }

        let mut path: Vec<char> = match self.arena.get(node).parent() {
            Some(parent) => self.reconstruct(parent).chars().collect(),
            None => Vec::new(),
        };
        self.collect_keys(node, &mut path, &mut out);
        out.sort();
        out
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        for (_, root) in self.roots.pairs() {
            self.collect_keys(root, &mut path, &mut out);
        }
        out.sort();
        out
    }

    /// Verify the structural invariants of the whole tree
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut terminals = 0;
        let mut reachable = 0;
        let mut stack: Vec<(NodeId, Option<NodeId>)> = Vec::new();

        for (ch, root) in self.roots.pairs() {
            if self.arena.get(root).first_char() != ch {
                return Err(format!("root {:?} filed under {:?}", root, ch));
            }
            stack.push((root, None));
        }

        while let Some((id, expected_parent)) = stack.pop() {
            let node = self.arena.get(id);
            reachable += 1;

            if node.prefix.is_empty() {
                return Err(format!("node {:?} has an empty prefix", id));
            }
            if node.parent != expected_parent {
                return Err(format!(
                    "node {:?} has parent {:?}, expected {:?}",
                    id, node.parent, expected_parent
                ));
            }
            if node.terminal {
                terminals += 1;
            } else if node.successors.len() < 2 {
                return Err(format!(
                    "non-terminal node {:?} ({:?}) has {} children",
                    id,
                    node.label(),
                    node.successors.len()
                ));
            }

            let mut leading = Vec::with_capacity(node.successors.len());
            for child in node.successors.items() {
                let ch = self.arena.get(child).first_char();
                if leading.contains(&ch) {
                    return Err(format!(
                        "node {:?} has two children starting with {:?}",
                        id, ch
                    ));
                }
                leading.push(ch);
                stack.push((child, Some(id)));
            }

            for other in node.pairs.items() {
                let partner = self.arena.get(other);
                if !node.terminal || !partner.terminal {
                    return Err(format!("pair {:?} <-> {:?} joins a non-terminal", id, other));
                }
                if partner.pairs.index_of(&id).is_none() {
                    return Err(format!("pair {:?} -> {:?} is not symmetric", id, other));
                }
            }
        }

        if terminals != self.len {
            return Err(format!(
                "len is {} but {} terminal nodes are reachable",
                self.len, terminals
            ));
        }
        if reachable != self.arena.len() {
            return Err(format!(
                "{} live nodes but {} reachable",
                self.arena.len(),
                reachable
            ));
        }
        Ok(())
    }

    // === Internal helpers ===

    fn child_starting_with(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.arena
            .get(node)
            .successors
            .items()
            .find(|child| self.arena.get(*child).first_char() == ch)
    }

    fn mark_terminal(&mut self, id: NodeId) {
        let node = self.arena.get_mut(id);
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    fn add_child(&mut self, parent: NodeId, suffix: Vec<char>) -> NodeId {
        let id = self.arena.alloc(Node::new(suffix, Some(parent), true));
        self.arena.get_mut(parent).successors.push_back(id);
        self.len += 1;
        id
    }

    /// Split `id` after `at` chars, returning the new upper node
    ///
    /// The upper node takes `id`'s place under its parent and holds the
    /// first `at` chars; `id` keeps the rest and becomes its only child.
    fn split(&mut self, id: NodeId, at: usize) -> NodeId {
        let node = self.arena.get_mut(id);
        assert!(
            at > 0 && at < node.prefix.len(),
            "split offset {} out of range for prefix of length {}",
            at,
            node.prefix.len()
        );
        let tail = node.prefix.split_off(at);
        let head = std::mem::replace(&mut node.prefix, tail);
        let parent = node.parent;

        let first = head[0];
        let mut upper = Node::new(head, parent, false);
        upper.successors.push_back(id);
        let upper = self.arena.alloc(upper);
        self.arena.get_mut(id).parent = Some(upper);

        match parent {
            Some(parent) => {
                let successors = &mut self.arena.get_mut(parent).successors;
                let slot = successors
                    .index_of(&id)
                    .unwrap_or_else(|| panic!("node {:?} missing from its parent", id));
                successors[slot] = upper;
            }
            None => {
                self.roots.put(first, upper);
            }
        }

        trace!(?id, ?upper, at, "split node");
        upper
    }

    /// Unhook a node from its parent or the root map, returning the parent
    fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id);
        let (parent, first) = (node.parent, node.first_char());
        match parent {
            Some(parent) => {
                let removed = self.arena.get_mut(parent).successors.delete_value(&id);
                assert!(removed, "node {:?} missing from its parent", id);
            }
            None => {
                self.roots.delete(first);
            }
        }
        parent
    }

    /// Fold the only child of `id` into `id`
    fn merge_with_child(&mut self, id: NodeId) {
        let child = {
            let node = self.arena.get(id);
            assert_eq!(node.successors.len(), 1, "merge needs exactly one child");
            node.successors[0]
        };
        let Node {
            prefix,
            successors,
            terminal,
            pairs,
            ..
        } = self.arena.free(child);

        for grandchild in successors.items() {
            self.arena.get_mut(grandchild).parent = Some(id);
        }
        let pairs: Vec<NodeId> = pairs
            .items()
            .map(|p| if p == child { id } else { p })
            .collect();
        for partner in pairs.items().filter(|p| *p != id) {
            let links = &mut self.arena.get_mut(partner).pairs;
            if let Some(slot) = links.index_of(&child) {
                links[slot] = id;
            }
        }

        let node = self.arena.get_mut(id);
        node.prefix.extend(prefix);
        node.successors = successors;
        node.terminal = terminal;
        node.pairs = pairs;

        trace!(?id, ?child, "merged node with its only child");
    }

    fn unlink_pairs(&mut self, id: NodeId) {
        let partners = std::mem::take(&mut self.arena.get_mut(id).pairs);
        for partner in partners.items().filter(|p| *p != id) {
            self.arena.get_mut(partner).pairs.delete_value(&id);
        }
    }

    /// Push every key in `id`'s subtree, with `path` spelling its parent
    ///
    /// Uses an explicit stack so deeply nested keys cannot exhaust the
    /// thread stack.
    fn collect_keys(&self, id: NodeId, path: &mut Vec<char>, out: &mut Vec<String>) {
        let base = path.len();
        // (node, length of the path spelling its parent)
        let mut stack = vec![(id, base)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.arena.get(id);
            path.truncate(depth);
            path.extend_from_slice(node.prefix());
            if node.is_terminal() {
                out.push(path.iter().collect());
            }
            let depth = path.len();
            stack.extend(node.successors.items().map(|child| (child, depth)));
        }
        path.truncate(base);
    }

    fn walk(&self, mut visit: impl FnMut(NodeId, &Node)) {
        let mut stack: Vec<NodeId> = self.roots.pairs().map(|(_, id)| id).collect();
        while let Some(id) = stack.pop() {
            let node = self.arena.get(id);
            visit(id, node);
            stack.extend(node.successors.items());
        }
    }
}

/// Find the length of the common prefix between two char slices
pub(crate) fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
