//! Trie node types and the arena that owns them

use std::fmt;

/// Index of a node inside its trie's arena
///
/// Ids are only meaningful for the trie that produced them, and an id is
/// invalidated when its node is removed or merged into its parent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the compressed trie
///
/// Concatenating `prefix` from the root down to a node yields the string
/// represented at that node.
#[derive(Clone, Debug)]
pub struct Node {
    /// Non-empty segment owned by this node
    pub(crate) prefix: Vec<char>,
    /// Children, selected by the first char of their prefix
    pub(crate) successors: Vec<NodeId>,
    /// `None` for nodes hanging directly off the root map
    pub(crate) parent: Option<NodeId>,
    /// Whether the string ending here was inserted
    pub(crate) terminal: bool,
    /// Nodes associated with this one through a key/value insert
    pub(crate) pairs: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(prefix: Vec<char>, parent: Option<NodeId>, terminal: bool) -> Self {
        assert!(!prefix.is_empty(), "node prefix must not be empty");
        Node {
            prefix,
            successors: Vec::new(),
            parent,
            terminal,
            pairs: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &[char] {
        &self.prefix
    }

    /// The prefix as an owned string
    pub fn label(&self) -> String {
        self.prefix.iter().collect()
    }

    pub fn first_char(&self) -> char {
        self.prefix[0]
    }

    pub fn successors(&self) -> &[NodeId] {
        &self.successors
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_leaf(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn pairs(&self) -> &[NodeId] {
        &self.pairs
    }
}

/// Slot storage for nodes, addressed by `NodeId`
///
/// Freed slots are recycled before the vector grows.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            return id;
        }
        let id = NodeId(u32::try_from(self.slots.len()).expect("node arena exhausted"));
        self.slots.push(Some(node));
        id
    }

    /// Take the node out of its slot and mark the slot reusable
    pub fn free(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.index()]
            .take()
            .unwrap_or_else(|| panic!("double free of node {:?}", id));
        self.free.push(id);
        node
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.slots[id.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("dangling node id {:?}", id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("dangling node id {:?}", id))
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_arena_reuses_freed_slots() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(chars("a"), None, true));
        let b = arena.alloc(Node::new(chars("b"), None, true));
        assert_eq!(arena.len(), 2);

        let freed = arena.free(a);
        assert_eq!(freed.label(), "a");
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(Node::new(chars("c"), None, false));
        assert_eq!(c, a);
        assert_eq!(arena.get(c).label(), "c");
        assert_eq!(arena.get(b).label(), "b");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "dangling node id")]
    fn test_arena_dangling_id_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(chars("a"), None, true));
        arena.free(a);
        arena.get(a);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_prefix_rejected() {
        Node::new(Vec::new(), None, true);
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::new(chars("héllo"), None, true);
        assert_eq!(node.first_char(), 'h');
        assert_eq!(node.prefix().len(), 5);
        assert!(node.is_leaf());
        assert!(node.is_terminal());
        assert!(node.parent().is_none());
    }
}
