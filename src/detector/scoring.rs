//! Confidence heuristics.
//!
//! Scores are built from a fixed base plus a handful of additive,
//! message-level boosts, then capped. The contextual relevance bonus is kept
//! separate and only used for ranking.

use crate::error::{DetectError, Result};
use crate::types::ConversationTurn;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

pub const BASE_CONFIDENCE: f64 = 0.6;
pub const HEURISTIC_BOOST: f64 = 0.1;
pub const CONTEXTUAL_BONUS: f64 = 0.2;
pub const MAX_CONFIDENCE: f64 = 1.0;
pub const BOOST_HISTORY_TURNS: usize = 3;
pub const RELEVANCE_HISTORY_TURNS: usize = 5;
pub const MAX_RESULTS: usize = 2;

/// Action verbs (check, scan, analyze, test) with their regular inflections,
/// spelled out per stem since "scan" doubles its consonant and "analyze" drops its e.
pub const ACTION_VERB_FORMS: &[&str] = &[
    r"check(?:s|ed|ing)?",
    r"scan(?:s|ned|ning)?",
    r"analy[sz](?:e|es|ed|ing)",
    r"test(?:s|ed|ing)?",
];

pub const FIRST_PERSON_PRONOUNS: &[&str] = &["my", "i", "me"];

/// Security nouns (secure, safe, protection, privacy, threat) and their
/// close derivations.
pub const SECURITY_NOUN_FORMS: &[&str] = &[
    r"secur(?:e|ed|ely|ity|ities)",
    r"safe(?:ly|ty)?",
    r"protections?",
    r"privacy",
    r"threat(?:s|ened|ening)?",
];

/// Words in recent history that mark the conversation as security-related.
pub const HISTORY_SECURITY_KEYWORDS: &[&str] = &[
    "security",
    "secure",
    "safe",
    "password",
    "breach",
    "breached",
    "hack",
    "hacked",
    "scam",
    "privacy",
    "threat",
    "malware",
    "virus",
    "phishing",
    "vulnerability",
    "protection",
    "leak",
    "leaked",
];

/// Tunable scoring constants. The defaults are the values the chat UI was
/// tuned with; none of them carry meaning beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score every match starts from.
    pub base_confidence: f64,

    pub question_boost: f64,
    pub action_verb_boost: f64,
    pub pronoun_boost: f64,
    pub security_noun_boost: f64,

    /// Applied when any of the last `boost_history_turns` turns is security-related.
    pub history_boost: f64,

    /// Ranking-only bonus when a tool's keywords recur in recent history.
    pub contextual_bonus: f64,

    /// Upper bound on reported confidence.
    pub max_confidence: f64,

    pub boost_history_turns: usize,
    pub relevance_history_turns: usize,

    /// Maximum number of detections returned per message.
    pub max_results: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_confidence: BASE_CONFIDENCE,
            question_boost: HEURISTIC_BOOST,
            action_verb_boost: HEURISTIC_BOOST,
            pronoun_boost: HEURISTIC_BOOST,
            security_noun_boost: HEURISTIC_BOOST,
            history_boost: HEURISTIC_BOOST,
            contextual_bonus: CONTEXTUAL_BONUS,
            max_confidence: MAX_CONFIDENCE,
            boost_history_turns: BOOST_HISTORY_TURNS,
            relevance_history_turns: RELEVANCE_HISTORY_TURNS,
            max_results: MAX_RESULTS,
        }
    }
}

impl ScoringWeights {
    /// Reject weights that would break the (0, 1] confidence contract.
    pub fn validate(&self) -> Result<()> {
        let unit = [
            ("base_confidence", self.base_confidence),
            ("question_boost", self.question_boost),
            ("action_verb_boost", self.action_verb_boost),
            ("pronoun_boost", self.pronoun_boost),
            ("security_noun_boost", self.security_noun_boost),
            ("history_boost", self.history_boost),
            ("contextual_bonus", self.contextual_bonus),
            ("max_confidence", self.max_confidence),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(DetectError::InvalidArgument(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.base_confidence <= 0.0 {
            return Err(DetectError::InvalidArgument(
                "base_confidence must be greater than 0".into(),
            ));
        }
        if self.max_confidence < self.base_confidence {
            return Err(DetectError::InvalidArgument(
                "max_confidence must not be below base_confidence".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(DetectError::InvalidArgument(
                "max_results must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Message-level features. Each one contributes its boost at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageSignals {
    pub question: bool,
    pub action_verb: bool,
    pub first_person: bool,
    pub security_noun: bool,
    pub security_history: bool,
}

impl MessageSignals {
    /// Base score plus every boost that fired, capped at `max_confidence`.
    pub fn confidence(&self, weights: &ScoringWeights) -> f64 {
        let boosts = [
            (self.question, weights.question_boost),
            (self.action_verb, weights.action_verb_boost),
            (self.first_person, weights.pronoun_boost),
            (self.security_noun, weights.security_noun_boost),
            (self.security_history, weights.history_boost),
        ];
        let score = boosts
            .iter()
            .filter(|(fired, _)| *fired)
            .fold(weights.base_confidence, |acc, (_, boost)| acc + boost);
        score.min(weights.max_confidence)
    }
}

/// Compiled word-list matchers used to compute `MessageSignals`.
#[derive(Debug)]
pub struct Heuristics {
    action_verb: Regex,
    first_person: Regex,
    security_noun: Regex,
    history_keyword: Regex,
}

impl Heuristics {
    pub fn new() -> Result<Self> {
        Ok(Self {
            action_verb: word_forms("action_verbs", ACTION_VERB_FORMS)?,
            first_person: word_list("pronouns", FIRST_PERSON_PRONOUNS, "")?,
            security_noun: word_forms("security_nouns", SECURITY_NOUN_FORMS)?,
            history_keyword: word_list("history_keywords", HISTORY_SECURITY_KEYWORDS, "s?")?,
        })
    }

    /// Evaluate the message and the last few history turns.
    pub fn signals(
        &self,
        message: &str,
        history: &[ConversationTurn],
        weights: &ScoringWeights,
    ) -> MessageSignals {
        MessageSignals {
            question: message.contains('?'),
            action_verb: self.action_verb.is_match(message),
            first_person: self.first_person.is_match(message),
            security_noun: self.security_noun.is_match(message),
            security_history: recent(history, weights.boost_history_turns)
                .iter()
                .any(|turn| self.history_keyword.is_match(&turn.text)),
        }
    }
}

/// The last `n` turns, oldest first.
pub fn recent(history: &[ConversationTurn], n: usize) -> &[ConversationTurn] {
    &history[history.len().saturating_sub(n)..]
}

/// Concatenated text of the last `n` turns, used for contextual relevance.
pub fn recent_text(history: &[ConversationTurn], n: usize) -> String {
    recent(history, n)
        .iter()
        .map(|turn| turn.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build `\b(?:w1|w2|...)<suffix>\b` from literal words, case-insensitive.
fn word_list(label: &str, words: &[&str], suffix: &str) -> Result<Regex> {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    word_regex(label, &format!("(?:{alternatives}){suffix}"))
}

/// Build `\b(?:f1|f2|...)\b` from regex fragments, case-insensitive.
fn word_forms(label: &str, forms: &[&str]) -> Result<Regex> {
    word_regex(label, &format!("(?:{})", forms.join("|")))
}

fn word_regex(label: &str, body: &str) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b{body}\b"))
        .case_insensitive(true)
        .build()
        .map_err(|source| DetectError::Pattern {
            tool: format!("heuristic:{label}"),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_weights_validate() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_weights_rejected() {
        let weights = ScoringWeights {
            question_boost: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(DetectError::InvalidArgument(msg)) if msg.contains("question_boost")
        ));

        let weights = ScoringWeights {
            base_confidence: 0.0,
            ..Default::default()
        };
        assert!(weights.validate().is_err());

        let weights = ScoringWeights {
            max_results: 0,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn signals_from_message() {
        let h = Heuristics::new().unwrap();
        let w = ScoringWeights::default();

        let s = h.signals("Is my password safe?", &[], &w);
        assert_eq!(
            s,
            MessageSignals {
                question: true,
                action_verb: false,
                first_person: true,
                security_noun: true,
                security_history: false,
            }
        );

        let s = h.signals("Please scan the attachment", &[], &w);
        assert!(s.action_verb);
        assert!(!s.first_person);
        assert!(!s.question);

        // "mine" and "checkout" are not the words we are looking for.
        let s = h.signals("checkout mine", &[], &w);
        assert!(!s.action_verb);
        assert!(!s.first_person);
    }

    #[test]
    fn every_action_verb_form_boosts() {
        let h = Heuristics::new().unwrap();
        let w = ScoringWeights::default();
        for verb in [
            "check", "checks", "checked", "checking",
            "scan", "scans", "scanned", "scanning",
            "analyze", "analyzes", "analyzed", "analyzing",
            "analyse", "analysed", "analysing",
            "test", "tests", "tested", "testing",
        ] {
            assert!(
                h.signals(&format!("password {verb}"), &[], &w).action_verb,
                "{verb} should count as an action verb"
            );
        }
        for other in ["checkout", "scanner", "analysis", "testament"] {
            assert!(
                !h.signals(&format!("password {other}"), &[], &w).action_verb,
                "{other} should not count as an action verb"
            );
        }
    }

    #[test]
    fn security_noun_derivations_boost() {
        let h = Heuristics::new().unwrap();
        let w = ScoringWeights::default();
        for noun in [
            "secure", "secured", "security", "safe", "safety", "protection",
            "privacy", "threat", "threats",
        ] {
            assert!(
                h.signals(&format!("is it {noun}"), &[], &w).security_noun,
                "{noun} should count as a security noun"
            );
        }
        assert!(!h.signals("safeguard the insecure", &[], &w).security_noun);
    }

    #[test]
    fn history_boost_only_looks_at_last_three_turns() {
        let h = Heuristics::new().unwrap();
        let w = ScoringWeights::default();
        let history = vec![
            ConversationTurn::user("I think I got hacked"),
            ConversationTurn::assistant("Sorry to hear that."),
            ConversationTurn::user("Anyway"),
            ConversationTurn::assistant("What else?"),
        ];
        assert!(!h.signals("hello", &history, &w).security_history);
        assert!(h.signals("hello", &history[..3], &w).security_history);
    }

    #[test]
    fn confidence_is_additive_and_capped() {
        let w = ScoringWeights::default();
        let none = MessageSignals::default();
        assert!(close(none.confidence(&w), 0.6));

        let three = MessageSignals {
            question: true,
            first_person: true,
            security_noun: true,
            ..Default::default()
        };
        assert!(close(three.confidence(&w), 0.9));

        let all = MessageSignals {
            question: true,
            action_verb: true,
            first_person: true,
            security_noun: true,
            security_history: true,
        };
        assert!(close(all.confidence(&w), 1.0));
        assert!(all.confidence(&w) <= 1.0);
    }

    #[test]
    fn recent_text_joins_tail() {
        let history = vec![
            ConversationTurn::user("one"),
            ConversationTurn::user("two"),
            ConversationTurn::user("three"),
        ];
        assert_eq!(recent_text(&history, 2), "two\nthree");
        assert_eq!(recent_text(&history, 10), "one\ntwo\nthree");
        assert_eq!(recent_text(&[], 5), "");
    }
}
