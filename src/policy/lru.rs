//! # Least Recently Used (LRU) core
//!
//! Single-threaded recency index used inside every cache shard. Thread
//! safety is supplied by the owning [`Shard`](crate::shard::Shard), which
//! wraps one `LruCore` in its own lock.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCore<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │    "user:1" ─────────────────────────────┐                   │   │
//!   │   │    "user:2" ───────────────────┐         │                   │   │
//!   │   │    "user:3" ─────────┐         │         │                   │   │
//!   │   └──────────────────────┼─────────┼─────────┼───────────────────┘   │
//!   │                          ▼         ▼         ▼                       │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<Entry<K, V>>  (order)                         │   │
//!   │   │  head ──► [user:3] ◄──► [user:2] ◄──► [user:1] ◄── tail      │   │
//!   │   │           MRU                          LRU                   │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   insert(D) on a full cache (capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop [C] from tail, drop "C" from index
//!     2. push [D] at head, index "D"
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!     1. index lookup: O(1)
//!     2. move_to_front: O(1)
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! An entry is never repositioned in place: re-inserting a key removes the
//! old node and pushes a fresh one at the head.
//!
//! | Method             | Complexity | Description                           |
//! |--------------------|------------|---------------------------------------|
//! | `get(&k)`          | O(1)       | Value + move to MRU                   |
//! | `peek(&k)`         | O(1)       | Value, order untouched                |
//! | `insert(k, v)`     | O(1)       | Insert at MRU, evicts LRU when full   |
//! | `pop_lru()`        | O(1)       | Remove the tail entry                 |
//! | `recency_rank(&k)` | O(n)       | Position from MRU (0 = head)          |
//! | `check_invariants` | O(n)       | Index/list consistency                |

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;

/// Key/value pair stored in the recency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// Hash index plus recency list with a fixed entry capacity.
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty core holding at most `capacity` entries.
    ///
    /// A capacity of 0 accepts nothing: every insert hands its entry back.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Nodes in the recency list. Equal to [`len`](Self::len) whenever
    /// the core is observable.
    pub fn list_len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without touching recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Inserts `key` at the MRU position.
    ///
    /// An existing node for `key` is unlinked first. When the insert would
    /// exceed capacity, the LRU entry is evicted and returned. With capacity
    /// 0 the new entry itself is returned and nothing is stored.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return Some((key, value));
        }

        if let Some(old) = self.index.remove(&key) {
            self.order.remove(old);
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        evicted
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Position of `key` counted from the MRU end.
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.index.contains_key(key) {
            return None;
        }
        self.order
            .iter()
            .position(|entry| Borrow::<Q>::borrow(&entry.key) == key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|entry| &entry.key)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Checks that the index and the list describe the same key set, that
    /// every handle resolves to its own key and that capacity holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_links()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but list has {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a different key than its index entry",
                        id.index()
                    )))
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at missing slot {}",
                        id.index()
                    )))
                },
            }
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
