//! The Decision Procedure
//!
//! Turns one user utterance into one [`Decision`]: either a natural-language
//! reply or exactly one tool call with raw arguments. All "is this a tool
//! call" ambiguity is confined to a single parsing step, and the policy of
//! swallowing hallucinated tool names into a fallback reply lives in exactly
//! one place so monitoring can hook it without touching dispatch.

/// Versioned system-directive template.
pub mod directives;

pub use directives::{DirectiveTemplate, DIRECTIVE_VERSION};

use crate::llm::{LanguageModel, RawModelOutput};
use crate::memory::ConversationContext;
use crate::tools::ToolRegistry;
use crate::types::{Decision, Result, ToolCallRequest};
use std::sync::Arc;

/// Reply used when the model asks for a tool that does not exist.
pub const UNKNOWN_TOOL_FALLBACK: &str =
    "Sorry, I can't do that with the tools I have. Could you rephrase your request?";

/// Maps utterances to decisions by consulting the model collaborator.
pub struct DecisionProcedure {
    model: Arc<dyn LanguageModel>,
    directives: DirectiveTemplate,
}

impl DecisionProcedure {
    pub fn new(model: Arc<dyn LanguageModel>, directives: DirectiveTemplate) -> Self {
        Self { model, directives }
    }

    /// Decide how to answer one utterance.
    ///
    /// Fails only when the model collaborator itself fails
    /// (`ModelUnavailable`); every malformed or hallucinated model output
    /// degrades into a `NaturalLanguage` decision instead.
    pub async fn decide(
        &self,
        utterance: &str,
        context: &ConversationContext,
        registry: &ToolRegistry,
    ) -> Result<Decision> {
        let specs = registry.all_specs();
        let system_directives = self.directives.render(&specs);

        tracing::debug!(
            model = self.model.model_name(),
            directive_version = self.directives.version(),
            tools = specs.len(),
            "running inference"
        );

        let raw = self
            .model
            .infer(utterance, context.recent(), &specs, &system_directives)
            .await?;

        Ok(interpret(raw, registry))
    }
}

/// The single point where raw model output becomes a [`Decision`].
///
/// A structured or textual tool call referencing a registered tool becomes
/// `ToolCall`; a reference to anything else is swallowed into the fallback
/// reply (a model-quality signal, logged, never surfaced as a fault); all
/// remaining output passes through as `NaturalLanguage`.
fn interpret(raw: RawModelOutput, registry: &ToolRegistry) -> Decision {
    let (tool_name, arguments) = match raw {
        RawModelOutput::ToolCall {
            tool_name,
            arguments,
        } => (tool_name, arguments),
        RawModelOutput::Text(text) => match parse_textual_tool_call(&text) {
            Some(call) => call,
            None => return Decision::NaturalLanguage(text),
        },
    };

    if registry.has_tool(&tool_name) {
        Decision::ToolCall(ToolCallRequest {
            tool_name,
            arguments,
        })
    } else {
        tracing::debug!(tool = %tool_name, "model referenced an unregistered tool");
        Decision::NaturalLanguage(UNKNOWN_TOOL_FALLBACK.to_string())
    }
}

/// Recognize the textual tool-call shape
/// `{"function": "<name>", "arguments": {...}}` inside free text,
/// tolerating markdown fences and surrounding prose.
fn parse_textual_tool_call(
    text: &str,
) -> Option<(String, serde_json::Map<String, serde_json::Value>)> {
    let candidate = extract_json_object(text)?;
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    let object = value.as_object()?;

    let tool_name = object.get("function")?.as_str()?.to_string();
    let arguments = object
        .get("arguments")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    Some((tool_name, arguments))
}

/// Slice out the outermost brace-delimited region, if any.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
