// src/parser.rs
use serde::Deserialize;

use crate::error::{GraphError, GraphResult};
use crate::types::{Event, Timestamp};

/// Wire format of one input line, e.g.
/// `{"created_time": "2016-03-28T23:23:12Z", "target": "Jamie-Korn", "actor": "Jordan-Gruber"}`.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    created_time: Timestamp,
    target: String,
    actor: String,
}

/// Parse one input line into an event.
///
/// A line that is not valid JSON, carries an unparseable timestamp, or
/// names an empty participant is a data error: the caller skips it and it
/// produces no output line.
pub fn parse_line(line: &str) -> GraphResult<Event> {
    let raw: RawTransaction = serde_json::from_str(line)
        .map_err(|err| GraphError::MalformedRecord(err.to_string()))?;
    if raw.actor.is_empty() || raw.target.is_empty() {
        return Err(GraphError::MissingParticipant(line.trim().to_string()));
    }
    Ok(Event {
        timestamp: raw.created_time,
        actor: raw.actor,
        target: raw.target,
    })
}
