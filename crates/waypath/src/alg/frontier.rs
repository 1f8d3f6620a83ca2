//! Min-priority frontier for Dijkstra.
//!
//! `BinaryHeap` has no decrease-key, so improved distances are pushed as fresh entries and the
//! old ones are left behind. Callers must skip entries that are stale on extraction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry<'g> {
    pub(crate) dist: f64,
    pub(crate) node: usize,
    id: &'g str,
}

// Reversed so the max-heap pops the smallest distance, ties going to the smaller id.
impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

#[derive(Debug)]
pub(crate) struct Frontier<'g> {
    heap: BinaryHeap<FrontierEntry<'g>>,
}

impl<'g> Frontier<'g> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn push(&mut self, node: usize, id: &'g str, dist: f64) {
        self.heap.push(FrontierEntry { dist, node, id });
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry<'g>> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
