//! Chat session — keeps a rolling conversation history and decides which
//! detections are confident enough to surface as a suggested-tool card.

use crate::detector::ToolIntentClassifier;
use crate::types::{ConversationTurn, DetectionResult};
use tracing::debug;

pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.75;
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// One user's conversation. Sessions never share history with each other.
pub struct ChatSession<'a> {
    classifier: &'a ToolIntentClassifier<'a>,
    history: Vec<ConversationTurn>,
    threshold: f64,
    history_limit: usize,
}

impl<'a> ChatSession<'a> {
    pub fn new(classifier: &'a ToolIntentClassifier<'a>) -> Self {
        Self::with_limits(
            classifier,
            DEFAULT_SUGGESTION_THRESHOLD,
            DEFAULT_HISTORY_LIMIT,
        )
    }

    pub fn with_limits(
        classifier: &'a ToolIntentClassifier<'a>,
        threshold: f64,
        history_limit: usize,
    ) -> Self {
        Self {
            classifier,
            history: Vec::new(),
            threshold,
            history_limit: history_limit.max(1),
        }
    }

    /// Record a user message and return the suggestions worth showing.
    ///
    /// Detection runs against the history *before* this message is appended.
    pub fn user_message(&mut self, text: &str) -> Vec<DetectionResult> {
        let detections = self.classifier.detect(text, &self.history);
        self.push(ConversationTurn::user(text));

        let total = detections.len();
        let surfaced: Vec<DetectionResult> = detections
            .into_iter()
            .filter(|d| d.confidence >= self.threshold)
            .collect();
        debug!(
            "Surfacing {} of {} detection(s) at threshold {:.2}",
            surfaced.len(),
            total,
            self.threshold
        );
        surfaced
    }

    pub fn assistant_message(&mut self, text: &str) {
        self.push(ConversationTurn::assistant(text));
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn push(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }
}
