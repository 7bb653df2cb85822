// src/store.rs
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{Edge, Timestamp};

/// Active edges of the trailing window, ordered by timestamp for expiry.
///
/// A min-heap keyed on timestamp gives O(log n) insert for out-of-order
/// arrivals and amortized O(1) per expired edge across repeated expiry
/// calls, since each edge is pushed and popped exactly once.
#[derive(Debug, Default)]
pub struct WindowedEdgeStore {
    heap: BinaryHeap<Reverse<Edge>>,
}

impl WindowedEdgeStore {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn add(&mut self, edge: Edge) {
        self.heap.push(Reverse(edge));
    }

    /// Remove and return, in ascending-timestamp order, every edge with
    /// `timestamp < floor`. An edge exactly at the floor stays in.
    pub fn expire_older_than(&mut self, floor: Timestamp) -> Vec<Edge> {
        let mut expired = Vec::new();
        while let Some(Reverse(oldest)) = self.heap.peek() {
            if oldest.timestamp >= floor {
                break;
            }
            if let Some(Reverse(edge)) = self.heap.pop() {
                expired.push(edge);
            }
        }
        expired
    }

    /// Oldest active edge, if any.
    pub fn oldest(&self) -> Option<&Edge> {
        self.heap.peek().map(|Reverse(edge)| edge)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.heap.iter().map(|Reverse(edge)| edge)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
