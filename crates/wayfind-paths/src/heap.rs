//! Binary min-heap with a key → slot index, supporting `O(log n)` priority
//! updates for keys already in the queue.
//!
//! The heap array and the position map are only ever changed together
//! (in `swap`, `push` and `pop`), so `positions[key]` is always the slot
//! holding `key`.

use std::collections::HashMap;
use std::hash::Hash;

/// A queued `(priority, key)` pair. Ordering uses `priority` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapEntry<K, P> {
    pub priority: P,
    pub key: K,
}

impl<K, P> HeapEntry<K, P> {
    /// Create a new entry.
    #[inline]
    pub const fn new(priority: P, key: K) -> Self {
        Self { priority, key }
    }

    /// Split into `(priority, key)`.
    #[inline]
    pub fn into_parts(self) -> (P, K) {
        (self.priority, self.key)
    }
}

/// Min-priority queue over unique keys with decrease/increase-key.
///
/// Each key may be queued at most once; use [`update`](Self::update) to
/// change the priority of a key that is already present.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, P> {
    heap: Vec<HeapEntry<K, P>>,
    positions: HashMap<K, usize>,
}

impl<K: Hash + Eq + Clone, P: PartialOrd> Default for IndexedMinHeap<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, P: PartialOrd> IndexedMinHeap<K, P> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Build a queue from unordered `(priority, key)` pairs.
    ///
    /// Heap order is established bottom-up, sifting down from the last
    /// parent toward the root.
    ///
    /// # Panics
    ///
    /// Panics if two pairs share a key.
    pub fn build(entries: impl IntoIterator<Item = (P, K)>) -> Self {
        let entries = entries.into_iter();
        let mut q = Self::with_capacity(entries.size_hint().0);
        for (priority, key) in entries {
            let idx = q.heap.len();
            let dup = q.positions.insert(key.clone(), idx);
            assert!(dup.is_none(), "IndexedMinHeap::build: duplicate key");
            q.heap.push(HeapEntry::new(priority, key));
        }
        if q.heap.len() > 1 {
            let first_parent = (q.heap.len() - 2) / 2;
            for idx in (0..=first_parent).rev() {
                q.sift_down(idx);
            }
        }
        q
    }

    /// Whether no entries remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// The minimum entry, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&HeapEntry<K, P>> {
        self.heap.first()
    }

    /// Current priority of `key`, if queued.
    pub fn priority(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&i| &self.heap[i].priority)
    }

    /// Insert a new key.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already queued; use [`update`](Self::update)
    /// instead.
    pub fn push(&mut self, priority: P, key: K) {
        let idx = self.heap.len();
        let dup = self.positions.insert(key.clone(), idx);
        assert!(dup.is_none(), "IndexedMinHeap::push: key already queued");
        self.heap.push(HeapEntry::new(priority, key));
        self.sift_up(idx);
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<HeapEntry<K, P>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.key);
        self.sift_down(0);
        Some(entry)
    }

    /// Replace the priority of a queued key and restore heap order, whether
    /// the priority went down or up.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not queued.
    pub fn update(&mut self, key: &K, priority: P) {
        let Some(&idx) = self.positions.get(key) else {
            panic!("IndexedMinHeap::update: key not found");
        };
        self.heap[idx].priority = priority;
        let idx = self.sift_up(idx);
        self.sift_down(idx);
    }

    /// Whether the heap order and the position map both hold.
    ///
    /// Runs in `O(n)`; meant for tests and debug checks.
    pub fn is_consistent(&self) -> bool {
        let ordered = (1..self.heap.len())
            .all(|i| !(self.heap[i].priority < self.heap[(i - 1) / 2].priority));
        let indexed = self.positions.len() == self.heap.len()
            && self
                .heap
                .iter()
                .enumerate()
                .all(|(i, e)| self.positions.get(&e.key) == Some(&i));
        ordered && indexed
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Exchange two slots and their position-map entries.
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(pos) = self.positions.get_mut(&self.heap[a].key) {
            *pos = a;
        }
        if let Some(pos) = self.positions.get_mut(&self.heap[b].key) {
            *pos = b;
        }
        debug_assert_eq!(self.positions.get(&self.heap[a].key), Some(&a));
        debug_assert_eq!(self.positions.get(&self.heap[b].key), Some(&b));
    }

    /// Move the entry at `idx` down until neither child is smaller.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let first = 2 * idx + 1;
            if first >= len {
                return;
            }
            let second = first + 1;
            // Ties go to the first child.
            let child = if second < len && self.heap[second].priority < self.heap[first].priority {
                second
            } else {
                first
            };
            if self.heap[idx].priority > self.heap[child].priority {
                self.swap(idx, child);
                idx = child;
            } else {
                return;
            }
        }
    }

    /// Move the entry at `idx` up while it is smaller than its parent.
    /// Returns its final slot.
    fn sift_up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx].priority < self.heap[parent].priority {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
        idx
    }
}

impl<K: Hash + Eq + Clone, P: PartialOrd> FromIterator<(P, K)> for IndexedMinHeap<K, P> {
    fn from_iter<I: IntoIterator<Item = (P, K)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn drain<K: Hash + Eq + Clone, P: PartialOrd>(q: &mut IndexedMinHeap<K, P>) -> Vec<(P, K)> {
        let mut out = Vec::new();
        while let Some(e) = q.pop() {
            assert!(q.is_consistent());
            out.push(e.into_parts());
        }
        out
    }

    #[test]
    fn empty_heap() {
        let mut q: IndexedMinHeap<char, i32> = IndexedMinHeap::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.pop(), None);
        assert!(IndexedMinHeap::<char, i32>::build([]).is_empty());
    }

    #[test]
    fn build_pops_in_order() {
        let mut q = IndexedMinHeap::build([(3, 'A'), (2, 'B'), (1, 'C')]);
        assert!(!q.is_empty());
        assert!(q.is_consistent());
        assert_eq!(q.pop(), Some(HeapEntry::new(1, 'C')));
        assert_eq!(q.pop(), Some(HeapEntry::new(2, 'B')));
        assert_eq!(q.pop(), Some(HeapEntry::new(3, 'A')));
        assert!(q.is_empty());
    }

    #[test]
    fn push_pops_in_order() {
        let mut q = IndexedMinHeap::new();
        q.push(3, 'A');
        q.push(2, 'B');
        q.push(1, 'C');
        assert!(!q.is_empty());
        assert_eq!(drain(&mut q), vec![(1, 'C'), (2, 'B'), (3, 'A')]);
        assert!(q.is_empty());
    }

    #[test]
    fn update_decreases_priority() {
        let mut q = IndexedMinHeap::build([(3, 'A'), (2, 'B'), (1, 'C')]);
        q.update(&'B', 0);
        assert_eq!(drain(&mut q), vec![(0, 'B'), (1, 'C'), (3, 'A')]);
        assert!(q.is_empty());
    }

    #[test]
    fn update_increases_priority() {
        let mut q: IndexedMinHeap<&str, i32> =
            [(1, "a"), (2, "b"), (3, "c"), (4, "d")].into_iter().collect();
        q.update(&"a", 10);
        assert_eq!(q.priority(&"a"), Some(&10));
        assert_eq!(q.peek(), Some(&HeapEntry::new(2, "b")));
        assert_eq!(
            drain(&mut q),
            vec![(2, "b"), (3, "c"), (4, "d"), (10, "a")]
        );
    }

    #[test]
    fn contains_tracks_membership() {
        let mut q = IndexedMinHeap::new();
        q.push(5, 1u32);
        q.push(4, 2u32);
        assert!(q.contains(&1));
        assert_eq!(q.pop().map(|e| e.key), Some(2));
        assert!(!q.contains(&2));
        assert_eq!(q.priority(&2), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn float_priorities() {
        let mut q = IndexedMinHeap::build([(2.5, 'x'), (0.5, 'y'), (1.5, 'z')]);
        q.update(&'x', 0.25);
        assert_eq!(q.pop(), Some(HeapEntry::new(0.25, 'x')));
        assert_eq!(q.pop(), Some(HeapEntry::new(0.5, 'y')));
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn update_missing_key_panics() {
        let mut q = IndexedMinHeap::build([(1, 'A')]);
        q.update(&'Z', 0);
    }

    #[test]
    #[should_panic(expected = "key already queued")]
    fn push_duplicate_panics() {
        let mut q = IndexedMinHeap::new();
        q.push(1, 'A');
        q.push(2, 'A');
    }

    #[test]
    #[should_panic(expected = "duplicate key")]
    fn build_duplicate_panics() {
        let _ = IndexedMinHeap::build([(1, 'A'), (2, 'A')]);
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let initial: Vec<(i32, u32)> =
                (0..rng.random_range(0..20)).map(|k| (rng.random_range(0..50), k)).collect();
            let mut expected: HashMap<u32, i32> = initial.iter().map(|&(p, k)| (k, p)).collect();
            let mut q = IndexedMinHeap::build(initial);
            let mut next_key = 100u32;
            // Lowest priority popped since the last push or update.
            let mut last_popped = i32::MIN;

            for _ in 0..200 {
                assert!(q.is_consistent());
                assert_eq!(q.len(), expected.len());
                match rng.random_range(0..3) {
                    0 => {
                        let p = rng.random_range(0..50);
                        q.push(p, next_key);
                        expected.insert(next_key, p);
                        next_key += 1;
                        last_popped = i32::MIN;
                    }
                    1 if !expected.is_empty() => {
                        let keys: Vec<u32> = expected.keys().copied().collect();
                        let k = keys[rng.random_range(0..keys.len())];
                        let p = rng.random_range(0..50);
                        q.update(&k, p);
                        expected.insert(k, p);
                        last_popped = i32::MIN;
                    }
                    _ => match q.pop() {
                        Some(e) => {
                            assert!(e.priority >= last_popped);
                            assert_eq!(q.priority(&e.key), None);
                            last_popped = e.priority;
                            assert_eq!(expected.remove(&e.key), Some(e.priority));
                        }
                        None => assert!(expected.is_empty()),
                    },
                }
            }
        }
    }
}
