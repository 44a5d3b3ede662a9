//! # fuzzy_trie
//!
//! A compressed prefix tree (radix trie) with typo-tolerant lookup.
//!
//! fuzzy_trie indexes strings with shared-prefix compression and answers
//! exact, prefix and bounded edit-distance queries. Strings can be inserted
//! as key/value pairs; both sides are indexed and linked to each other.
//!
//! ## Core Concepts
//!
//! - **RadixTrie**: arena-backed compressed trie with edge splitting and merging
//! - **FuzzySearcher**: edit-distance traversal under a shared typo budget
//! - **Lexicon**: key/value facade over the trie
//!
//! ## Example
//!
//! ```
//! use fuzzy_trie::Lexicon;
//!
//! let mut lex = Lexicon::new();
//! lex.insert("qwerty", "keyboard");
//!
//! let matches = lex.fuzzy_lookup("qwert", 1, 10)?;
//! assert_eq!(matches.iter().next().unwrap().key, "qwerty");
//! # Ok::<(), fuzzy_trie::Error>(())
//! ```

pub mod collections;
pub mod config;
pub mod fuzzy;
pub mod trie;

mod error;
mod lexicon;

pub use config::Config;
pub use error::{Error, Result};
pub use fuzzy::{levenshtein, levenshtein_str, FuzzySearcher};
pub use lexicon::{FuzzyMatch, Lexicon, Stats};
pub use trie::{Node, NodeId, RadixTrie};
