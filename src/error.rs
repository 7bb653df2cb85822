// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    // Input errors
    #[error("malformed transaction record: {0}")]
    MalformedRecord(String),

    #[error("record missing participant: {0}")]
    MissingParticipant(String),

    // Bookkeeping invariant violations
    #[error("degree underflow for node: {0}")]
    DegreeUnderflow(String),

    #[error("median tracker out of sync: {0}")]
    TrackerOutOfSync(String),

    // System errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GraphError {
    /// Bad input that should be skipped, not aborted on.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            GraphError::MalformedRecord(_) | GraphError::MissingParticipant(_)
        )
    }

    /// Bookkeeping bug: the graph state can no longer be trusted.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            GraphError::DegreeUnderflow(_) | GraphError::TrackerOutOfSync(_)
        )
    }

    /// Get error category for logging/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            GraphError::MalformedRecord(_) | GraphError::MissingParticipant(_) => "input",

            GraphError::DegreeUnderflow(_) | GraphError::TrackerOutOfSync(_) => "bookkeeping",

            GraphError::IoError(_) => "io",
        }
    }
}

// Result type alias for convenience
pub type GraphResult<T> = Result<T, GraphError>;
