//! Error type for the classifier library.

use thiserror::Error;

/// Errors raised by the registry and the classifier.
///
/// Free-text input never produces an error: a message that matches nothing
/// simply yields no detections. Only type violations and broken configuration
/// end up here.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The caller handed over something that is not the expected shape,
    /// e.g. a `null` message or a history entry without text.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown tool id: {0}")]
    UnknownTool(String),

    /// A trigger or keyword pattern failed to compile.
    #[error("failed to compile pattern for '{tool}': {source}")]
    Pattern {
        tool: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, DetectError>;
