use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::CellId;
use fxhash::FxHashMap;
use num_traits::Zero;

struct SmallestCostHolder<K> {
    priority: K,
    sequence: u64,
    cell: CellId,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest priority first; among equal priorities the earliest insertion wins.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Priority frontier holding at most one live entry per cell, ordered by `(priority, insertion
/// sequence)`. Re-keying a cell pushes a fresh heap entry and leaves the old one behind; stale
/// entries are discarded when they surface.
pub struct OpenList<K> {
    heap: BinaryHeap<SmallestCostHolder<K>>,
    live: FxHashMap<CellId, (K, u64)>,
    next_sequence: u64,
}

impl<K: Zero + Ord + Copy> Default for OpenList<K> {
    fn default() -> Self {
        OpenList {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_sequence: 0,
        }
    }
}

impl<K: Zero + Ord + Copy> OpenList<K> {
    pub fn new() -> OpenList<K> {
        OpenList::default()
    }

    /// Inserts the start cell with zero priority.
    pub fn seed(&mut self, cell: CellId) -> bool {
        self.push(cell, K::zero())
    }

    /// Inserts `cell` unless it already has a live entry.
    pub fn push(&mut self, cell: CellId, priority: K) -> bool {
        if self.live.contains_key(&cell) {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.live.insert(cell, (priority, sequence));
        self.heap.push(SmallestCostHolder {
            priority,
            sequence,
            cell,
        });
        true
    }

    /// Changes the priority of a live entry, keeping its original insertion sequence.
    pub fn reprioritize(&mut self, cell: CellId, priority: K) -> bool {
        let Some(entry) = self.live.get_mut(&cell) else {
            return false;
        };
        if entry.0 == priority {
            return true;
        }
        entry.0 = priority;
        let sequence = entry.1;
        self.heap.push(SmallestCostHolder {
            priority,
            sequence,
            cell,
        });
        true
    }

    pub fn pop(&mut self) -> Option<(CellId, K)> {
        while let Some(SmallestCostHolder {
            priority,
            sequence,
            cell,
        }) = self.heap.pop()
        {
            if self.live.get(&cell) == Some(&(priority, sequence)) {
                self.live.remove(&cell);
                return Some((cell, priority));
            }
        }
        None
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.live.contains_key(&cell)
    }

    pub fn priority(&self, cell: CellId) -> Option<K> {
        self.live.get(&cell).map(|&(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
