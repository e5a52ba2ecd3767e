//! The language-model collaborator interface.

use crate::types::{Message, Result, ToolSpec};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Raw output of one model inference call.
///
/// Providers that support structured tool calling return `ToolCall`
/// directly; plain-text providers return `Text`, which the decision
/// procedure inspects for the textual tool-call shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawModelOutput {
    Text(String),
    ToolCall {
        tool_name: String,
        arguments: serde_json::Map<String, serde_json::Value>,
    },
}

/// Language-model collaborator.
///
/// The schema of a call is deterministic: the same utterance, history,
/// specs, and directives always produce the same *kind* of request, so
/// prompt construction can be tested independently of any provider.
///
/// Implementations must deliver failures (as `ModelUnavailable`) rather
/// than hang; per-request timeouts belong on this boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one inference over the utterance, with the conversation window,
    /// the registered tool specs, and the rendered system directives.
    async fn infer(
        &self,
        utterance: &str,
        history: &[Message],
        tool_specs: &[ToolSpec],
        system_directives: &str,
    ) -> Result<RawModelOutput>;

    /// Model name/identifier, for logging.
    fn model_name(&self) -> &str;
}
