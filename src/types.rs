//! Shared types used across the classifier.

use crate::error::DetectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Who authored a turn in the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn of prior conversation, supplied read-only by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Identifier of a mocked security tool. Variant order is registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    ComprehensiveSecurity,
    PasswordChecker,
    EmailBreach,
    AreaCodeChecker,
    DataBrokerScan,
    NetworkScanner,
    FileScanner,
}

impl ToolId {
    pub const ALL: [ToolId; 7] = [
        Self::ComprehensiveSecurity,
        Self::PasswordChecker,
        Self::EmailBreach,
        Self::AreaCodeChecker,
        Self::DataBrokerScan,
        Self::NetworkScanner,
        Self::FileScanner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComprehensiveSecurity => "comprehensive_security",
            Self::PasswordChecker => "password_checker",
            Self::EmailBreach => "email_breach",
            Self::AreaCodeChecker => "area_code_checker",
            Self::DataBrokerScan => "data_broker_scan",
            Self::NetworkScanner => "network_scanner",
            Self::FileScanner => "file_scanner",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DetectError::UnknownTool(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Detection output
// ---------------------------------------------------------------------------

/// Structured hints pulled out of the raw message by a tool's extractor.
///
/// Every field is optional; an absent hint is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_area_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_file_name: Option<String>,
}

impl ExtractedParameters {
    /// Look up a field by its wire (camelCase) name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let field = match name {
            "suggestedPassword" => &self.suggested_password,
            "suggestedEmail" => &self.suggested_email,
            "suggestedPhone" => &self.suggested_phone,
            "suggestedAreaCode" => &self.suggested_area_code,
            "suggestedName" => &self.suggested_name,
            "suggestedAddress" => &self.suggested_address,
            "suggestedFileName" => &self.suggested_file_name,
            _ => return None,
        };
        field.as_deref()
    }

    /// Iterate over the hints that were actually found, as (wire name, value).
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("suggestedPassword", &self.suggested_password),
            ("suggestedEmail", &self.suggested_email),
            ("suggestedPhone", &self.suggested_phone),
            ("suggestedAreaCode", &self.suggested_area_code),
            ("suggestedName", &self.suggested_name),
            ("suggestedAddress", &self.suggested_address),
            ("suggestedFileName", &self.suggested_file_name),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// A suggested tool for one message. Produced fresh per `detect` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub tool_id: ToolId,
    /// Heuristic score in (0, 1].
    pub confidence: f64,
    pub extracted_parameters: ExtractedParameters,
    /// Index into the tool's trigger list of the pattern that fired.
    pub matched_pattern_index: usize,
}
