// src/lib.rs
pub mod clock;
pub mod degree;
pub mod error;
pub mod median;
pub mod output;
pub mod parser;
pub mod store;
pub mod types;

use tracing::{debug, trace};

use crate::clock::EventClock;
use crate::degree::DegreeTable;
use crate::error::GraphResult;
use crate::median::MedianTracker;
use crate::store::WindowedEdgeStore;
use crate::types::{Edge, Event, ProcessorConfig};

/// Streaming median-degree engine over a trailing event-time window.
///
/// Feeds each incoming transaction through the window check, the edge
/// store, the degree table, and the median tracker, keeping all four
/// consistent within a single event before the next is read.
pub struct StreamProcessor {
    clock: EventClock,
    store: WindowedEdgeStore,
    degrees: DegreeTable,
    median: MedianTracker,
}

impl StreamProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            clock: EventClock::new(config.window()),
            store: WindowedEdgeStore::new(),
            degrees: DegreeTable::new(),
            median: MedianTracker::new(),
        }
    }

    /// Apply one event and return the median degree after it.
    ///
    /// A late event (strictly older than the window floor at arrival)
    /// leaves the graph untouched and returns the unchanged median, which
    /// still gets its own output line.
    ///
    /// A self-referential event (`actor == target`) is accepted as one edge
    /// and bumps that node's degree twice.
    pub fn process(&mut self, event: Event) -> GraphResult<f64> {
        if self.clock.is_late(event.timestamp) {
            trace!(ts = %event.timestamp, "late event rejected");
            return Ok(self.median.median());
        }
        self.clock.observe(event.timestamp);

        let edge = Edge::from(event);
        let actor = self.degrees.increment(&edge.actor);
        self.median.value_changed(actor)?;
        let target = self.degrees.increment(&edge.target);
        self.median.value_changed(target)?;
        self.store.add(edge);

        if let Some(floor) = self.clock.window_floor() {
            let expired = self.store.expire_older_than(floor);
            if !expired.is_empty() {
                debug!(count = expired.len(), floor = %floor, "expired stale edges");
            }
            for edge in expired {
                let actor = self.degrees.decrement(&edge.actor)?;
                self.median.value_changed(actor)?;
                let target = self.degrees.decrement(&edge.target)?;
                self.median.value_changed(target)?;
            }
        }

        Ok(self.median.median())
    }

    /// Median without applying anything.
    pub fn current_median(&mut self) -> f64 {
        self.median.median()
    }

    pub fn active_edges(&self) -> usize {
        self.store.len()
    }

    pub fn active_nodes(&self) -> usize {
        self.degrees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn ts(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn event(secs: i64, actor: &str, target: &str) -> Event {
        Event {
            timestamp: ts(secs),
            actor: actor.to_string(),
            target: target.to_string(),
        }
    }

    fn processor() -> StreamProcessor {
        StreamProcessor::new(ProcessorConfig::default())
    }

    #[test]
    fn test_expiry_sequence_from_long_gap() {
        let mut p = processor();
        assert_eq!(p.process(event(0, "a", "b")).unwrap(), 1.0);
        assert_eq!(p.process(event(10, "a", "c")).unwrap(), 1.0);

        // Window floor moves to 10: the t=0 edge expires, b disappears.
        assert_eq!(p.process(event(70, "a", "d")).unwrap(), 1.0);
        assert_eq!(p.active_edges(), 2);
        assert_eq!(p.degrees.degree("a"), Some(2));
        assert_eq!(p.degrees.degree("b"), None);
        assert_eq!(p.degrees.degree("c"), Some(1));
        assert_eq!(p.degrees.degree("d"), Some(1));
    }

    #[test]
    fn test_identical_timestamps() {
        let mut p = processor();
        assert_eq!(p.process(event(0, "a", "b")).unwrap(), 1.0);
        assert_eq!(p.process(event(0, "c", "d")).unwrap(), 1.0);
        assert_eq!(p.active_nodes(), 4);
        assert_eq!(p.active_edges(), 2);
    }

    #[test]
    fn test_edge_exactly_one_window_old_survives() {
        let mut p = processor();
        p.process(event(0, "a", "b")).unwrap();
        // Floor becomes 0: the t=0 edge sits exactly on it and stays.
        assert_eq!(p.process(event(60, "c", "d")).unwrap(), 1.0);
        assert_eq!(p.active_edges(), 2);
        // One second later it is out.
        p.process(event(61, "c", "e")).unwrap();
        assert_eq!(p.degrees.degree("a"), None);
        assert_eq!(p.degrees.degree("b"), None);
    }

    #[test]
    fn test_late_event_leaves_state_untouched() {
        let mut p = processor();
        p.process(event(0, "a", "b")).unwrap();
        p.process(event(10, "a", "c")).unwrap();
        let before = p.process(event(70, "a", "d")).unwrap();

        let degrees_before: HashMap<String, u32> = p
            .degrees
            .iter()
            .map(|(node, degree)| (node.to_string(), degree))
            .collect();
        let edges_before = p.active_edges();

        // t=5 is strictly older than the floor (10): rejected.
        let median = p.process(event(5, "x", "y")).unwrap();
        assert_eq!(median, before);
        assert_eq!(p.active_edges(), edges_before);
        let degrees_after: HashMap<String, u32> = p
            .degrees
            .iter()
            .map(|(node, degree)| (node.to_string(), degree))
            .collect();
        assert_eq!(degrees_after, degrees_before);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut p = processor();
        assert_eq!(p.process(event(0, "a", "a")).unwrap(), 2.0);
        assert_eq!(p.degrees.degree("a"), Some(2));
        assert_eq!(p.active_nodes(), 1);

        // Its expiry symmetrically removes both increments.
        p.process(event(100, "b", "c")).unwrap();
        assert_eq!(p.degrees.degree("a"), None);
    }

    #[test]
    fn test_repeated_pair_counts_with_multiplicity() {
        let mut p = processor();
        p.process(event(0, "a", "b")).unwrap();
        let median = p.process(event(1, "a", "b")).unwrap();
        assert_eq!(median, 2.0);
        assert_eq!(p.active_edges(), 2);
        assert_eq!(p.degrees.degree("a"), Some(2));
        assert_eq!(p.degrees.degree("b"), Some(2));
    }

    #[test]
    fn test_out_of_order_within_window_is_accepted() {
        let mut p = processor();
        p.process(event(50, "a", "b")).unwrap();
        // Older than the clock but inside the window: accepted, clock holds.
        let median = p.process(event(20, "c", "d")).unwrap();
        assert_eq!(median, 1.0);
        assert_eq!(p.active_edges(), 2);
        assert_eq!(p.clock.latest(), Some(ts(50)));
    }

    #[test]
    fn test_window_empties_out_completely() {
        let mut p = processor();
        p.process(event(0, "a", "b")).unwrap();
        // The only prior edge expires; the new one stands alone.
        assert_eq!(p.process(event(1000, "c", "d")).unwrap(), 1.0);
        assert_eq!(p.active_edges(), 1);
        assert_eq!(p.active_nodes(), 2);
    }

    /// Degree consistency, window invariant, and median correctness over a
    /// randomized stream, checked against from-scratch recomputation.
    #[test]
    fn test_invariants_under_random_stream() {
        let mut rng = fastrand::Rng::with_seed(0xdeadbeef);
        let mut p = processor();
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut clock_floor = None;

        for step in 0..2000i64 {
            // Mostly forward motion with occasional out-of-order jitter.
            let base = step / 2;
            let jitter = rng.i64(0..90);
            let secs = (base + 30 - jitter).max(0);
            let actor = names[rng.usize(0..names.len())];
            let target = names[rng.usize(0..names.len())];

            let median = p.process(event(secs, actor, target)).unwrap();

            // Monotonic clock.
            let floor = p.clock.window_floor();
            if let (Some(prev), Some(cur)) = (clock_floor, floor) {
                assert!(cur >= prev);
            }
            clock_floor = floor;

            // Window invariant: nothing older than the floor remains.
            let floor = floor.unwrap();
            assert!(p.store.iter().all(|edge| edge.timestamp >= floor));

            // Degree consistency: table matches a recount from the store.
            let mut recount: HashMap<&str, u32> = HashMap::new();
            for edge in p.store.iter() {
                *recount.entry(edge.actor.as_str()).or_insert(0) += 1;
                *recount.entry(edge.target.as_str()).or_insert(0) += 1;
            }
            assert_eq!(recount.len(), p.active_nodes());
            for (node, expected) in &recount {
                assert_eq!(p.degrees.degree(node), Some(*expected));
            }

            // Median correctness against a sorted recomputation.
            let mut degrees: Vec<u32> = recount.values().copied().collect();
            degrees.sort_unstable();
            let expected = if degrees.is_empty() {
                0.0
            } else if degrees.len() % 2 == 1 {
                degrees[degrees.len() / 2] as f64
            } else {
                (degrees[degrees.len() / 2 - 1] as f64 + degrees[degrees.len() / 2] as f64)
                    / 2.0
            };
            assert_eq!(median, expected);
        }
    }
}
