// src/median.rs
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{GraphError, GraphResult};
use crate::types::DegreeChange;

/// Minimum physical heap size before a compaction pass is worth running.
const COMPACT_MIN: usize = 64;

/// Maintains the multiset of active node degrees and answers the median in
/// sub-linear time per update.
///
/// The multiset is split into two balanced halves: `lower` is a max-heap
/// holding the smaller values (at most one more element than `upper`),
/// `upper` is a min-heap holding the larger ones. The median candidates are
/// the two heap tops, so the query is a pair of peeks.
///
/// Arbitrary-value removal from a heap is not O(log n), so removals use
/// lazy invalidation: the value is tagged stale on whichever side it
/// logically lives in (`stale_lower` / `stale_upper`) and skipped when it
/// surfaces at a heap top. Balancing runs on the logical sizes
/// (`lower_len` / `upper_len`), never on the raw heap sizes. Equal values
/// are interchangeable, so a stale tag cancels against any physical copy
/// of that value on its side.
///
/// A stale entry buried deep in a heap may never surface, so once stale
/// entries outnumber live ones both heaps are rebuilt without them, keeping
/// memory proportional to the live multiset over unbounded streams.
#[derive(Debug, Default)]
pub struct MedianTracker {
    lower: BinaryHeap<u32>,
    upper: BinaryHeap<Reverse<u32>>,
    stale_lower: HashMap<u32, usize>,
    stale_upper: HashMap<u32, usize>,
    lower_len: usize,
    upper_len: usize,
}

impl MedianTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one degree transition: insertion (`None -> d`), removal
    /// (`d -> None`), or a changed value (`d1 -> d2`).
    pub fn value_changed(&mut self, change: DegreeChange) -> GraphResult<()> {
        if let Some(old) = change.old {
            self.remove(old)?;
        }
        if let Some(new) = change.new {
            self.insert(new);
        }
        Ok(())
    }

    /// Median of the current multiset: the middle order statistic for odd
    /// sizes, the mean of the two middle ones for even sizes, 0.0 when the
    /// window holds no nodes.
    pub fn median(&mut self) -> f64 {
        let n = self.lower_len + self.upper_len;
        let Some(lo) = self.lower_max() else {
            return 0.0;
        };
        if n % 2 == 1 {
            lo as f64
        } else {
            match self.upper_min() {
                Some(hi) => (lo as f64 + hi as f64) / 2.0,
                None => lo as f64,
            }
        }
    }

    /// Number of live values in the multiset.
    pub fn len(&self) -> usize {
        self.lower_len + self.upper_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, value: u32) {
        match self.lower_max() {
            Some(max) if value > max => {
                self.upper.push(Reverse(value));
                self.upper_len += 1;
            }
            _ => {
                self.lower.push(value);
                self.lower_len += 1;
            }
        }
        self.rebalance();
    }

    fn remove(&mut self, value: u32) -> GraphResult<()> {
        let in_lower = match self.lower_max() {
            Some(max) => value <= max,
            None => false,
        };
        if in_lower {
            *self.stale_lower.entry(value).or_insert(0) += 1;
            self.lower_len -= 1;
        } else if self.upper_len > 0 {
            *self.stale_upper.entry(value).or_insert(0) += 1;
            self.upper_len -= 1;
        } else {
            return Err(GraphError::TrackerOutOfSync(format!(
                "removal of {value} from an empty degree multiset"
            )));
        }
        self.rebalance();
        self.maybe_compact();
        Ok(())
    }

    /// Largest live value of the lower half. Prunes stale tops first.
    fn lower_max(&mut self) -> Option<u32> {
        self.prune_lower();
        if self.lower_len == 0 {
            None
        } else {
            self.lower.peek().copied()
        }
    }

    /// Smallest live value of the upper half. Prunes stale tops first.
    fn upper_min(&mut self) -> Option<u32> {
        self.prune_upper();
        if self.upper_len == 0 {
            None
        } else {
            self.upper.peek().map(|Reverse(value)| *value)
        }
    }

    fn prune_lower(&mut self) {
        while let Some(&top) = self.lower.peek() {
            if take_stale(&mut self.stale_lower, top) {
                self.lower.pop();
            } else {
                break;
            }
        }
    }

    fn prune_upper(&mut self) {
        while let Some(&Reverse(top)) = self.upper.peek() {
            if take_stale(&mut self.stale_upper, top) {
                self.upper.pop();
            } else {
                break;
            }
        }
    }

    fn pop_lower(&mut self) -> Option<u32> {
        self.prune_lower();
        let value = self.lower.pop()?;
        self.lower_len -= 1;
        Some(value)
    }

    fn pop_upper(&mut self) -> Option<u32> {
        self.prune_upper();
        let Reverse(value) = self.upper.pop()?;
        self.upper_len -= 1;
        Some(value)
    }

    /// Restore the size invariant `upper_len <= lower_len <= upper_len + 1`
    /// by shuttling boundary elements. Each mutation changes a logical size
    /// by one, so at most one element moves.
    fn rebalance(&mut self) {
        while self.lower_len > self.upper_len + 1 {
            match self.pop_lower() {
                Some(value) => {
                    self.upper.push(Reverse(value));
                    self.upper_len += 1;
                }
                None => break,
            }
        }
        while self.upper_len > self.lower_len {
            match self.pop_upper() {
                Some(value) => {
                    self.lower.push(value);
                    self.lower_len += 1;
                }
                None => break,
            }
        }
    }

    fn maybe_compact(&mut self) {
        let physical = self.lower.len() + self.upper.len();
        let logical = self.lower_len + self.upper_len;
        if physical >= COMPACT_MIN && physical > 2 * logical {
            self.compact();
        }
    }

    /// Rebuild both heaps without their stale entries.
    fn compact(&mut self) {
        let mut kept = BinaryHeap::with_capacity(self.lower_len);
        for value in std::mem::take(&mut self.lower) {
            if !take_stale(&mut self.stale_lower, value) {
                kept.push(value);
            }
        }
        self.lower = kept;

        let mut kept = BinaryHeap::with_capacity(self.upper_len);
        for Reverse(value) in std::mem::take(&mut self.upper) {
            if !take_stale(&mut self.stale_upper, value) {
                kept.push(Reverse(value));
            }
        }
        self.upper = kept;
    }
}

/// Consume one stale tag for `value` if present.
fn take_stale(stale: &mut HashMap<u32, usize>, value: u32) -> bool {
    match stale.get_mut(&value) {
        Some(count) => {
            *count -= 1;
            if *count == 0 {
                stale.remove(&value);
            }
            true
        }
        None => false,
    }
}
