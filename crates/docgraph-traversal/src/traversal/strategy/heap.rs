//! Binary min-heap for the shortest-path strategies.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Total order over `f64` keys.
#[derive(Debug, Clone, Copy)]
struct OrderedFloat(f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Ordered by key, then by push order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    key: OrderedFloat,
    seq: u64,
    node: usize,
}

/// An entry taken off the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Popped {
    pub seq: u64,
    pub node: usize,
}

/// Min-heap of arena indices. Equal keys pop in FIFO order.
#[derive(Debug, Default)]
pub(crate) struct MinHeap {
    entries: BinaryHeap<Reverse<HeapEntry>>,
    next_seq: u64,
}

impl MinHeap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues `node` under `key` and returns the sequence number of the entry.
    pub(crate) fn push(&mut self, key: f64, node: usize) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Reverse(HeapEntry {
            key: OrderedFloat(key),
            seq,
            node,
        }));
        seq
    }

    pub(crate) fn pop(&mut self) -> Option<Popped> {
        self.entries.pop().map(|Reverse(entry)| Popped {
            seq: entry.seq,
            node: entry.node,
        })
    }
}
