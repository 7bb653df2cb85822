// src/types.rs
use chrono::{DateTime, Duration, Utc};

pub type Timestamp = DateTime<Utc>;

/// One parsed transaction: `actor` paid `target` at `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub actor: String,
    pub target: String,
}

/// One accepted event's participation in the graph.
///
/// Edges between the same pair of nodes are distinct entities, each with
/// its own timestamp and independent expiry (multi-graph). Ordering is by
/// timestamp first, which is what the edge store's heap relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    pub timestamp: Timestamp,
    pub actor: String,
    pub target: String,
}

impl From<Event> for Edge {
    fn from(event: Event) -> Self {
        Self {
            timestamp: event.timestamp,
            actor: event.actor,
            target: event.target,
        }
    }
}

/// One node's degree transition, as reported to the median tracker.
/// `None` means the node did not exist before / was removed after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeChange {
    pub old: Option<u32>,
    pub new: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Trailing event-time window length in seconds.
    pub window_secs: i64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { window_secs: 60 }
    }
}

impl ProcessorConfig {
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }
}

/// Output formatting contract: medians are truncated toward zero (never
/// rounded) to `decimals` fractional digits. The original challenge format
/// used two digits; the default here is one.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    pub decimals: usize,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}
