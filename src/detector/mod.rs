//! Tool intent classifier — decides which mocked security tool (if any) a
//! chat message is asking for.
//!
//! Pipeline per message:
//! 1. First matching trigger per tool (later triggers are not tried)
//! 2. Tool-specific parameter extraction
//! 3. Base confidence plus message-level heuristic boosts, capped
//! 4. Contextual relevance from recent history (ranking only)
//! 5. Sort by confidence + relevance, keep the top few
//!
//! The classifier holds no mutable state and can be shared across threads.

pub mod scoring;

pub use scoring::{Heuristics, MessageSignals, ScoringWeights};

use crate::error::{DetectError, Result};
use crate::tools::ToolRegistry;
use crate::types::{ConversationTurn, DetectionResult};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Stateless classifier over a borrowed, immutable tool registry.
#[derive(Debug)]
pub struct ToolIntentClassifier<'r> {
    registry: &'r ToolRegistry,
    heuristics: Heuristics,
    weights: ScoringWeights,
}

/// A match before ranking; `relevance` never leaves this module.
struct Candidate {
    result: DetectionResult,
    relevance: f64,
}

impl Candidate {
    fn rank(&self) -> f64 {
        self.result.confidence + self.relevance
    }
}

impl<'r> ToolIntentClassifier<'r> {
    pub fn new(registry: &'r ToolRegistry) -> Result<Self> {
        Self::with_weights(registry, ScoringWeights::default())
    }

    pub fn with_weights(registry: &'r ToolRegistry, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            registry,
            heuristics: Heuristics::new()?,
            weights,
        })
    }

    pub fn registry(&self) -> &'r ToolRegistry {
        self.registry
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Classify `message` given the prior conversation.
    ///
    /// Returns at most `max_results` detections, highest
    /// `confidence + contextual relevance` first. Ties keep registry order.
    pub fn detect(&self, message: &str, history: &[ConversationTurn]) -> Vec<DetectionResult> {
        if message.trim().is_empty() {
            return Vec::new();
        }

        let signals = self.heuristics.signals(message, history, &self.weights);
        let confidence = signals.confidence(&self.weights);
        let context = scoring::recent_text(history, self.weights.relevance_history_turns);
        trace!(?signals, confidence, "Message signals");

        let mut candidates: Vec<Candidate> = self
            .registry
            .iter()
            .filter_map(|tool| {
                let index = tool.first_match(message)?;
                let relevance = if !context.is_empty() && tool.mentioned_in(&context) {
                    self.weights.contextual_bonus
                } else {
                    0.0
                };
                trace!(tool = %tool.id, index, relevance, "Trigger matched");

                Some(Candidate {
                    result: DetectionResult {
                        tool_id: tool.id,
                        confidence,
                        extracted_parameters: self.registry.extract(tool.id, message),
                        matched_pattern_index: index,
                    },
                    relevance,
                })
            })
            .collect();

        // `sort_by` is stable, so equal ranks stay in registry order.
        candidates.sort_by(|a, b| b.rank().partial_cmp(&a.rank()).unwrap_or(Ordering::Equal));
        candidates.truncate(self.weights.max_results);

        let results: Vec<DetectionResult> = candidates.into_iter().map(|c| c.result).collect();
        debug!(
            "Detected {} tool(s) in {} chars: [{}]",
            results.len(),
            message.len(),
            results
                .iter()
                .map(|r| format!("{}={:.2}", r.tool_id, r.confidence))
                .collect::<Vec<_>>()
                .join(", ")
        );
        results
    }

    /// Classify an untyped request of the form
    /// `{ "message": "...", "history": [{ "role": "user", "text": "..." }] }`.
    ///
    /// This is the entry point for callers that hand over loosely typed data
    /// (JSON from a chat frontend). A missing or non-string `message`, or a
    /// history that is not a list of turns, is an `InvalidArgument`.
    pub fn detect_value(&self, request: &serde_json::Value) -> Result<Vec<DetectionResult>> {
        let object = request.as_object().ok_or_else(|| {
            DetectError::InvalidArgument("request must be a JSON object".into())
        })?;

        let message = match object.get("message") {
            Some(serde_json::Value::String(s)) => s.as_str(),
            Some(serde_json::Value::Null) | None => {
                return Err(DetectError::InvalidArgument("message is required".into()))
            }
            Some(other) => {
                return Err(DetectError::InvalidArgument(format!(
                    "message must be a string, got {}",
                    json_type(other)
                )))
            }
        };

        let history = match object.get("history") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value::<ConversationTurn>(item.clone()).map_err(|e| {
                        DetectError::InvalidArgument(format!("history[{i}] is not a turn: {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(DetectError::InvalidArgument(format!(
                    "history must be an array, got {}",
                    json_type(other)
                )))
            }
        };

        Ok(self.detect(message, &history))
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolId;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::builtin().expect("builtin registry")
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        let registry = registry();
        let classifier = ToolIntentClassifier::new(&registry).unwrap();
        assert!(classifier.detect("", &[]).is_empty());
        assert!(classifier.detect("   \n", &[]).is_empty());
    }

    #[test]
    fn reports_first_matching_trigger_index() {
        let registry = registry();
        let classifier = ToolIntentClassifier::new(&registry).unwrap();
        let results = classifier.detect(r#"Check "Tr0ub4dor&3" password strength"#, &[]);
        let password = results
            .iter()
            .find(|r| r.tool_id == ToolId::PasswordChecker)
            .unwrap();
        assert_eq!(password.matched_pattern_index, 2);
    }

    #[test]
    fn relevance_reorders_but_is_not_reported() {
        let registry = registry();
        let classifier = ToolIntentClassifier::new(&registry).unwrap();
        let message = "Can you do a full security check including my password?";

        let cold = classifier.detect(message, &[]);
        assert_eq!(cold.len(), 2);
        assert_eq!(cold[0].tool_id, ToolId::ComprehensiveSecurity);
        assert_eq!(cold[1].tool_id, ToolId::PasswordChecker);

        let history = vec![ConversationTurn::user("I reuse my password everywhere")];
        let warm = classifier.detect(message, &history);
        assert_eq!(warm[0].tool_id, ToolId::PasswordChecker);
        // Both get the same message-level confidence; the bonus is ranking only.
        assert_eq!(warm[0].confidence, warm[1].confidence);
    }

    #[test]
    fn max_results_is_configurable() {
        let registry = registry();
        let weights = ScoringWeights {
            max_results: 1,
            ..Default::default()
        };
        let classifier = ToolIntentClassifier::with_weights(&registry, weights).unwrap();
        let results =
            classifier.detect("Can you do a full security check including my password?", &[]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn invalid_weights_refuse_to_build() {
        let registry = registry();
        let weights = ScoringWeights {
            contextual_bonus: -0.2,
            ..Default::default()
        };
        assert!(matches!(
            ToolIntentClassifier::with_weights(&registry, weights),
            Err(DetectError::InvalidArgument(_))
        ));
    }

    #[test]
    fn detect_value_validates_shape() {
        let registry = registry();
        let classifier = ToolIntentClassifier::new(&registry).unwrap();

        let ok = classifier
            .detect_value(&json!({
                "message": "Has my email john@example.com been breached?",
                "history": [{ "role": "assistant", "text": "Hi! How can I help?" }]
            }))
            .unwrap();
        assert_eq!(ok[0].tool_id, ToolId::EmailBreach);

        for bad in [
            json!({ "message": null }),
            json!({}),
            json!({ "message": 42 }),
            json!({ "message": "hi", "history": "nope" }),
            json!({ "message": "hi", "history": [{ "role": "system", "text": "x" }] }),
            json!(["message"]),
        ] {
            assert!(
                matches!(classifier.detect_value(&bad), Err(DetectError::InvalidArgument(_))),
                "expected InvalidArgument for {bad}"
            );
        }
    }

    #[test]
    fn detect_value_accepts_missing_history() {
        let registry = registry();
        let classifier = ToolIntentClassifier::new(&registry).unwrap();
        let results = classifier.detect_value(&json!({ "message": "" })).unwrap();
        assert!(results.is_empty());
    }
}
