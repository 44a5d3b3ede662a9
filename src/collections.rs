//! Narrow container interfaces the trie is written against
//!
//! The trie only ever needs a handful of operations from its containers:
//! a char-keyed map for root dispatch, a growable sequence for children and
//! pair links, and a deduplicating set for search results. Each trait has a
//! single std-backed implementation.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Map from a leading character to a value (root dispatch)
pub trait CharMap<V: Copy> {
    /// Value stored under `ch`
    fn find(&self, ch: char) -> Option<V>;

    /// Store `value` under `ch`, returning the previous value
    fn put(&mut self, ch: char, value: V) -> Option<V>;

    /// Remove the value under `ch`
    fn delete(&mut self, ch: char) -> Option<V>;

    fn contains_char(&self, ch: char) -> bool {
        self.find(ch).is_some()
    }

    /// Iterate `(char, value)` pairs
    fn pairs(&self) -> impl Iterator<Item = (char, V)> + '_;
}

impl<V: Copy> CharMap<V> for BTreeMap<char, V> {
    fn find(&self, ch: char) -> Option<V> {
        self.get(&ch).copied()
    }

    fn put(&mut self, ch: char, value: V) -> Option<V> {
        self.insert(ch, value)
    }

    fn delete(&mut self, ch: char) -> Option<V> {
        self.remove(&ch)
    }

    fn pairs(&self) -> impl Iterator<Item = (char, V)> + '_ {
        self.iter().map(|(ch, v)| (*ch, *v))
    }
}

/// Ordered, growable, indexable sequence
pub trait Sequence<T: Copy + PartialEq> {
    fn push_back(&mut self, item: T);

    fn at(&self, index: usize) -> Option<T>;

    fn index_of(&self, item: &T) -> Option<usize>;

    /// Remove the first element equal to `item`; returns whether one was found
    fn delete_value(&mut self, item: &T) -> bool;

    fn items(&self) -> impl Iterator<Item = T> + '_;
}

impl<T: Copy + PartialEq> Sequence<T> for Vec<T> {
    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn at(&self, index: usize) -> Option<T> {
        self.get(index).copied()
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|x| x == item)
    }

    fn delete_value(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(i) => {
                self.remove(i);
                true
            }
            None => false,
        }
    }

    fn items(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

/// Set of unique elements (search result accumulator)
pub trait ResultSet<T> {
    /// Add `item`; returns false if it was already present
    fn add(&mut self, item: T) -> bool;

    fn has(&self, item: &T) -> bool;

    fn count(&self) -> usize;

    /// Consume the set, yielding its elements in unspecified order
    fn into_members(self) -> Vec<T>
    where
        Self: Sized;
}

impl<T: Hash + Eq> ResultSet<T> for HashSet<T> {
    fn add(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn has(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn into_members(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_map() {
        let mut map: BTreeMap<char, u32> = BTreeMap::new();
        assert_eq!(map.put('a', 1), None);
        assert_eq!(map.put('a', 2), Some(1));
        map.put('b', 3);

        assert_eq!(map.find('a'), Some(2));
        assert!(map.contains_char('b'));
        assert_eq!(map.pairs().collect::<Vec<_>>(), vec![('a', 2), ('b', 3)]);

        assert_eq!(map.delete('a'), Some(2));
        assert!(!map.contains_char('a'));
    }

    #[test]
    fn test_sequence() {
        let mut seq: Vec<u32> = Vec::new();
        seq.push_back(10);
        seq.push_back(20);
        seq.push_back(30);

        assert_eq!(seq.at(1), Some(20));
        assert_eq!(seq.at(3), None);
        assert_eq!(seq.index_of(&30), Some(2));

        assert!(seq.delete_value(&20));
        assert!(!seq.delete_value(&20));
        assert_eq!(seq.items().collect::<Vec<_>>(), vec![10, 30]);
    }

    #[test]
    fn test_result_set_dedups() {
        let mut set: HashSet<&'static str> = HashSet::new();
        assert!(set.add("a"));
        assert!(!set.add("a"));
        assert!(set.add("b"));

        assert!(set.has(&"a"));
        assert_eq!(set.count(), 2);
        let mut members = set.into_members();
        members.sort();
        assert_eq!(members, vec!["a", "b"]);
    }
}
