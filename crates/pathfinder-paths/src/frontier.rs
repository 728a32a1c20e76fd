//! The open list: a sequence kept sorted by key.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Entry<T, K> {
    key: K,
    seq: u64,
    item: T,
}

impl<T, K: Ord> Entry<T, K> {
    #[inline]
    fn cmp_key(&self, key: &K, seq: u64) -> Ordering {
        self.key.cmp(key).then(self.seq.cmp(&seq))
    }
}

/// A collection of items always sorted ascending by a key.
///
/// Keys are captured when an item is inserted. To change the key of an item
/// already present, call [`reinsert`](Self::reinsert); mutating whatever the
/// key was derived from has no effect on the ordering.
///
/// Items with equal keys leave in insertion order (first in, first out).
/// Storage is kept in descending order so the minimum is the last element
/// and [`remove_min`](Self::remove_min) is O(1). Insertion locates its slot
/// by bisection.
#[derive(Debug, Clone)]
pub struct Frontier<T, K> {
    entries: Vec<Entry<T, K>>,
    next_seq: u64,
}

impl<T, K> Default for Frontier<T, K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T: PartialEq, K: Ord> Frontier<T, K> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    /// Insert `item` at the position that keeps the sequence sorted.
    pub fn insert(&mut self, item: T, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self
            .entries
            .partition_point(|e| e.cmp_key(&key, seq) == Ordering::Greater);
        self.entries.insert(at, Entry { key, seq, item });
    }

    /// Remove and return the item with the lowest key.
    #[inline]
    pub fn remove_min(&mut self) -> Option<(T, K)> {
        self.entries.pop().map(|e| (e.item, e.key))
    }

    /// The item with the lowest key, without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<(&T, &K)> {
        self.entries.last().map(|e| (&e.item, &e.key))
    }

    /// Whether `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Remove `item` and return the key it was stored with.
    pub fn remove(&mut self, item: &T) -> Option<K> {
        let i = self.position(item)?;
        Some(self.entries.remove(i).key)
    }

    /// Move `item` to the position for its new `key`.
    ///
    /// Returns `false`, inserting nothing, if `item` is not present.
    pub fn reinsert(&mut self, item: T, key: K) -> bool {
        match self.position(&item) {
            Some(i) => {
                self.entries.remove(i);
                self.insert(item, key);
                true
            }
            None => false,
        }
    }

    /// Items with their keys, lowest key first.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &K)> {
        self.entries.iter().rev().map(|e| (&e.item, &e.key))
    }

    #[inline]
    fn position(&self, item: &T) -> Option<usize> {
        self.entries.iter().position(|e| e.item == *item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn keys<T: PartialEq, K: Ord + Copy>(f: &Frontier<T, K>) -> Vec<K> {
        f.iter().map(|(_, k)| *k).collect()
    }

    fn is_sorted<K: Ord>(keys: &[K]) -> bool {
        keys.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut f = Frontier::new();
        for (item, key) in [('a', 5), ('b', 1), ('c', 9), ('d', 3), ('e', 7)] {
            f.insert(item, key);
        }
        assert_eq!(keys(&f), vec![1, 3, 5, 7, 9]);
        assert_eq!(f.peek_min(), Some((&'b', &1)));
    }

    #[test]
    fn remove_min_on_empty() {
        let mut f: Frontier<u32, u32> = Frontier::new();
        assert_eq!(f.remove_min(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn remove_min_drains_in_order() {
        let mut f = Frontier::new();
        for k in [4, 2, 8, 6] {
            f.insert(k * 10, k);
        }
        let drained: Vec<_> = std::iter::from_fn(|| f.remove_min()).collect();
        assert_eq!(drained, vec![(20, 2), (40, 4), (60, 6), (80, 8)]);
    }

    #[test]
    fn equal_keys_are_first_in_first_out() {
        let mut f = Frontier::new();
        f.insert("first", 3);
        f.insert("low", 1);
        f.insert("second", 3);
        f.insert("third", 3);
        assert_eq!(f.remove_min(), Some(("low", 1)));
        assert_eq!(f.remove_min(), Some(("first", 3)));
        assert_eq!(f.remove_min(), Some(("second", 3)));
        assert_eq!(f.remove_min(), Some(("third", 3)));
    }

    #[test]
    fn reinsert_moves_by_identity() {
        let mut f = Frontier::new();
        f.insert(1u32, 10);
        f.insert(2u32, 10);
        f.insert(3u32, 20);
        // Item 3 shares no key with the others; identity, not key, locates it.
        assert!(f.reinsert(3, 5));
        assert_eq!(f.len(), 3);
        assert_eq!(f.peek_min(), Some((&3, &5)));
        assert_eq!(keys(&f), vec![5, 10, 10]);
    }

    #[test]
    fn reinsert_among_equal_keys_picks_right_item() {
        let mut f = Frontier::new();
        f.insert('x', 4);
        f.insert('y', 4);
        f.insert('z', 4);
        assert!(f.reinsert('y', 2));
        let order: Vec<char> = f.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec!['y', 'x', 'z']);
    }

    #[test]
    fn reinsert_missing_item_is_noop() {
        let mut f = Frontier::new();
        f.insert(1, 1);
        assert!(!f.reinsert(9, 0));
        assert_eq!(f.len(), 1);
        assert!(!f.contains(&9));
    }

    #[test]
    fn remove_returns_stored_key() {
        let mut f = Frontier::new();
        f.insert('a', 3);
        f.insert('b', 1);
        assert_eq!(f.remove(&'a'), Some(3));
        assert_eq!(f.remove(&'a'), None);
        assert_eq!(keys(&f), vec![1]);
    }

    #[test]
    fn tuple_keys_break_ties_on_second_component() {
        let mut f = Frontier::new();
        f.insert('a', (10, 6));
        f.insert('b', (10, 2));
        f.insert('c', (8, 9));
        let order: Vec<char> = f.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec!['c', 'b', 'a']);
    }

    #[test]
    fn random_operations_stay_sorted() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut f = Frontier::new();
        let mut next_item = 0u32;
        for _ in 0..2_000 {
            match rng.random_range(0..4u32) {
                0 | 1 => {
                    f.insert(next_item, rng.random_range(0..50i32));
                    next_item += 1;
                }
                2 => {
                    if let Some((_, k)) = f.remove_min() {
                        assert!(f.iter().all(|(_, rest)| *rest >= k));
                    }
                }
                _ => {
                    if next_item > 0 {
                        let target = rng.random_range(0..next_item);
                        f.reinsert(target, rng.random_range(0..50i32));
                    }
                }
            }
            assert!(is_sorted(&keys(&f)));
        }
    }

    #[test]
    fn clear_empties() {
        let mut f = Frontier::new();
        f.insert(1, 1);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.peek_min(), None);
    }
}
