//! Recency-ordered cache with pinning.
//!
//! Nodes live in one dense vector. Recency is an intrusive doubly-linked list
//! of vector indices (head is most recent), and a hash index maps keys to
//! positions. Removal swap-removes the node and relinks the one that moved
//! into its slot, so every operation stays O(1) without pointer cycles.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Entries that must not be evicted while pinned.
pub trait Pinned {
    fn is_pinned(&self) -> bool;
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct RecencyCache<K, V> {
    nodes: Vec<Node<K, V>>,
    index: FxHashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K: Eq + Hash + Clone, V> Default for RecencyCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> RecencyCache<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert as most recent, replacing any entry under `key`.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let old = self.remove(&key);
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.link_front(idx);
        old
    }

    /// Lookup that moves a hit to the most recent position.
    pub fn get(&mut self, key: &K) -> Option<&mut V> {
        let idx = *self.index.get(key)?;
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
        Some(&mut self.nodes[idx].value)
    }

    /// Lookup without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.nodes[idx].value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let node = self.nodes.swap_remove(idx);
        if idx < self.nodes.len() {
            // The former last node now lives at `idx`.
            let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
            match prev {
                Some(p) => self.nodes[p].next = Some(idx),
                None => self.head = Some(idx),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(idx),
                None => self.tail = Some(idx),
            }
            if let Some(slot) = self.index.get_mut(&self.nodes[idx].key) {
                *slot = idx;
            }
        }
        Some(node.value)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Entries from most to least recent.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Values in storage order; recency is unaffected.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.nodes.iter_mut().map(|n| &mut n.value)
    }

    /// Least recent entry.
    pub fn lru(&self) -> Option<(&K, &V)> {
        self.tail.map(|idx| {
            let node = &self.nodes[idx];
            (&node.key, &node.value)
        })
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(h) => self.nodes[h].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl<K: Eq + Hash + Clone, V: Pinned> RecencyCache<K, V> {
    /// Evict least recent entries until `len() <= capacity`, stopping at the
    /// first pinned one. Returns the number evicted.
    ///
    /// Pinned entries are never skipped over, so the bound is soft.
    pub fn shrink_to_size(&mut self, capacity: usize) -> usize {
        let mut evicted = 0;
        while self.nodes.len() > capacity {
            let Some(lru) = self.tail else { break };
            if self.nodes[lru].value.is_pinned() {
                break;
            }
            let key = self.nodes[lru].key.clone();
            self.remove(&key);
            evicted += 1;
        }
        evicted
    }

    pub fn pinned_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.value.is_pinned()).count()
    }
}

pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.nodes[idx];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Slot(bool);

    impl Pinned for Slot {
        fn is_pinned(&self) -> bool {
            self.0
        }
    }

    fn keys(cache: &RecencyCache<char, Slot>) -> String {
        cache.keys().collect()
    }

    #[test]
    fn put_orders_most_recent_first() {
        let mut c = RecencyCache::new();
        for k in ['a', 'b', 'c'] {
            c.put(k, Slot(false));
        }
        assert_eq!(keys(&c), "cba");
        assert_eq!(c.lru().map(|(k, _)| *k), Some('a'));
    }

    #[test]
    fn put_replaces_and_touches() {
        let mut c = RecencyCache::new();
        c.put('a', Slot(false));
        c.put('b', Slot(false));
        assert_eq!(c.put('a', Slot(true)), Some(Slot(false)));
        assert_eq!(c.len(), 2);
        assert_eq!(keys(&c), "ab");
        assert_eq!(c.peek(&'a'), Some(&Slot(true)));
    }

    #[test]
    fn peek_leaves_order_alone() {
        let mut c = RecencyCache::new();
        c.put('a', Slot(false));
        c.put('b', Slot(false));
        assert!(c.peek(&'a').is_some());
        assert_eq!(keys(&c), "ba");
        assert!(c.get(&'a').is_some());
        assert_eq!(keys(&c), "ab");
        assert!(c.get(&'z').is_none());
        assert_eq!(keys(&c), "ab");
    }

    #[test]
    fn remove_relinks_moved_node() {
        let mut c = RecencyCache::new();
        for k in ['a', 'b', 'c', 'd'] {
            c.put(k, Slot(false));
        }
        // 'a' sits at storage slot 0; removing it moves 'd' down.
        assert_eq!(c.remove(&'a'), Some(Slot(false)));
        assert_eq!(keys(&c), "dcb");
        assert!(c.get(&'d').is_some());
        assert!(c.get(&'b').is_some());
        assert_eq!(keys(&c), "bdc");
        assert_eq!(c.remove(&'a'), None);
        assert_eq!(c.iter().len(), 3);
    }

    #[test]
    fn shrink_evicts_from_the_tail() {
        let mut c = RecencyCache::new();
        for k in ['a', 'b', 'c', 'd'] {
            c.put(k, Slot(false));
        }
        assert_eq!(c.shrink_to_size(2), 2);
        assert_eq!(keys(&c), "dc");
    }

    #[test]
    fn shrink_stops_at_pinned_lru() {
        let mut c = RecencyCache::new();
        c.put('a', Slot(true));
        for k in ['b', 'c', 'd'] {
            c.put(k, Slot(false));
        }
        assert_eq!(c.shrink_to_size(2), 0);
        assert_eq!(c.len(), 4);
        assert_eq!(c.pinned_count(), 1);
    }

    #[test]
    fn clear_resets_links() {
        let mut c = RecencyCache::new();
        c.put('a', Slot(false));
        c.put('b', Slot(true));
        c.clear();
        assert!(c.is_empty());
        assert!(c.lru().is_none());
        c.put('z', Slot(false));
        assert_eq!(keys(&c), "z");
    }
}
