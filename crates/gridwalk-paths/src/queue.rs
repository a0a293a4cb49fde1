use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridwalk_core::Point;

/// Heap entry ordered by `(priority, seq)`, smallest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    priority: i32,
    seq: u64,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys so the max-heap pops the lowest priority,
        // and among equals the earliest enqueued.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue that breaks ties by insertion order.
///
/// Equal-priority nodes come out in the order they were pushed, which makes
/// every search replay identically.
#[derive(Debug, Default)]
pub(crate) struct StableQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl StableQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, pos: Point, priority: i32) {
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            pos,
        });
        self.next_seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<Point> {
        self.heap.pop().map(|e| e.pos)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
