//! Static registry of the mocked security tools the chat can suggest.
//!
//! The registry is compiled once at startup and handed to the classifier by
//! reference; there is no runtime registration or removal.

pub mod extract;
pub mod patterns;

pub use extract::Extractors;
pub use patterns::{ToolSpec, TOOL_SPECS};

use crate::error::{DetectError, Result};
use crate::types::{ExtractedParameters, ToolId};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// A compiled tool: its identity plus the patterns that trigger it.
#[derive(Debug)]
pub struct ToolDefinition {
    pub id: ToolId,
    pub display_name: &'static str,
    pub description: &'static str,
    triggers: Vec<Regex>,
    context: Regex,
}

impl ToolDefinition {
    fn compile(spec: &ToolSpec) -> Result<Self> {
        let triggers = spec
            .triggers
            .iter()
            .map(|pattern| compile_pattern(spec.id, pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: spec.id,
            display_name: spec.display_name,
            description: spec.description,
            triggers,
            context: compile_pattern(spec.id, spec.context)?,
        })
    }

    /// Index of the first trigger that matches `text`. Later triggers are
    /// never tried once one fires.
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.triggers.iter().position(|re| re.is_match(text))
    }

    /// Whether the tool's keyword pattern occurs anywhere in `text`.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.context.is_match(text)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

/// Immutable set of tool definitions plus the shared extractors.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    extractors: Extractors,
}

impl ToolRegistry {
    /// Compile the built-in tool table.
    pub fn builtin() -> Result<Self> {
        Self::from_specs(TOOL_SPECS)
    }

    /// Compile an arbitrary tool table. Duplicate ids are rejected.
    pub fn from_specs(specs: &[ToolSpec]) -> Result<Self> {
        let mut tools: Vec<ToolDefinition> = Vec::with_capacity(specs.len());
        for spec in specs {
            if tools.iter().any(|t| t.id == spec.id) {
                return Err(DetectError::InvalidArgument(format!(
                    "tool '{}' registered twice",
                    spec.id
                )));
            }
            tools.push(ToolDefinition::compile(spec)?);
        }

        debug!("Compiled tool registry with {} tools", tools.len());
        Ok(Self {
            tools,
            extractors: Extractors::new()?,
        })
    }

    /// Tools in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn get(&self, id: ToolId) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Look a tool up by its string id, e.g. `"password_checker"`.
    pub fn get_by_name(&self, name: &str) -> Result<&ToolDefinition> {
        let id: ToolId = name.parse()?;
        self.get(id)
            .ok_or_else(|| DetectError::UnknownTool(name.to_string()))
    }

    /// Run the extractor that belongs to `id` over the raw message.
    pub fn extract(&self, id: ToolId, text: &str) -> ExtractedParameters {
        self.extractors.extract(id, text)
    }
}

fn compile_pattern(id: ToolId, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| DetectError::Pattern {
            tool: id.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_keeps_declared_order() {
        let registry = ToolRegistry::builtin().unwrap();
        let ids: Vec<ToolId> = registry.iter().map(|t| t.id).collect();
        assert_eq!(ids, ToolId::ALL.to_vec());
        assert!(registry.iter().all(|t| t.trigger_count() > 0));
    }

    #[test]
    fn first_match_stops_at_earliest_trigger() {
        let registry = ToolRegistry::builtin().unwrap();
        let password = registry.get(ToolId::PasswordChecker).unwrap();

        // Matches both the "is my password safe" phrasing and the bare
        // keyword fallback; only the former is reported.
        assert_eq!(password.first_match("Is my password safe?"), Some(0));
        assert_eq!(password.first_match("forgot my passcode"), Some(4));
        assert_eq!(password.first_match("what's the weather today"), None);
    }

    #[test]
    fn lookup_by_name() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.get_by_name("email_breach").unwrap();
        assert_eq!(tool.display_name, "Email Breach Scanner");
        assert!(matches!(
            registry.get_by_name("teleporter"),
            Err(DetectError::UnknownTool(name)) if name == "teleporter"
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let spec = TOOL_SPECS[0];
        let err = ToolRegistry::from_specs(&[spec, spec]).unwrap_err();
        assert!(matches!(err, DetectError::InvalidArgument(_)));
    }

    #[test]
    fn broken_pattern_is_reported_not_panicked() {
        let spec = ToolSpec {
            triggers: &[r"(unclosed"],
            ..TOOL_SPECS[1]
        };
        let err = ToolRegistry::from_specs(&[spec]).unwrap_err();
        match err {
            DetectError::Pattern { tool, .. } => assert_eq!(tool, "password_checker"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn context_keywords() {
        let registry = ToolRegistry::builtin().unwrap();
        let network = registry.get(ToolId::NetworkScanner).unwrap();
        assert!(network.mentioned_in("my WiFi keeps dropping"));
        assert!(!network.mentioned_in("my password is short"));
    }
}
