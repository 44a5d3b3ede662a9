//! Compressed prefix tree
//!
//! This implements a radix trie where:
//! - Each node owns a non-empty run of characters
//! - Nodes live in an arena and refer to each other by `NodeId`
//! - Parent links allow rebuilding a key from any node
//! - Terminal nodes can be linked to each other as key/value pairs

mod node;
mod tree;

pub use node::{Node, NodeId};
pub use tree::RadixTrie;

pub(crate) use tree::common_prefix_len;
