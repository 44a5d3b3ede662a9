//! Fuzzy search: typo tolerance via edit distance.
//!
//! `edit_distance` holds the plain distance helpers, `search` walks the trie
//! under a shared edit budget.

mod edit_distance;
mod search;

pub use edit_distance::{levenshtein, levenshtein_str, levenshtein_within};
pub use search::FuzzySearcher;
