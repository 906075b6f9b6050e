//! Footprint Intent — conversational tool detection for the digital footprint
//! security assistant.
//!
//! Maps a free-text chat message (plus a little conversation history) to the
//! mocked security tools worth suggesting, each with a heuristic confidence
//! score and pre-fill hints pulled from the message.

pub mod config;
pub mod detector;
pub mod error;
pub mod session;
pub mod tools;
pub mod types;

pub use detector::{ScoringWeights, ToolIntentClassifier};
pub use error::DetectError;
pub use session::ChatSession;
pub use tools::ToolRegistry;
pub use types::{ChatRole, ConversationTurn, DetectionResult, ExtractedParameters, ToolId};
