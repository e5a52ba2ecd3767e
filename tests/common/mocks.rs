//! Mock collaborators for testing.
//!
//! Provides stub model and search collaborators that can be shared across
//! test files without duplication. Both honor the collaborator boundary
//! contract: they fail fast with the taxonomy's error variants instead of
//! hanging.

use aria::decision::{DecisionProcedure, DirectiveTemplate};
use aria::dispatch::Dispatcher;
use aria::llm::{LanguageModel, RawModelOutput};
use aria::tools::{SearchHit, SearchProvider, ToolRegistry};
use aria::types::{AppError, Message, Result, ToolSpec};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Model stub that replays scripted outputs, one per `infer` call.
///
/// Records the history length and directives of every call so tests can
/// assert on what the decision procedure actually sent.
pub struct ScriptedModel {
    outputs: Mutex<VecDeque<Result<RawModelOutput>>>,
    pub seen_history_lens: Mutex<Vec<usize>>,
    pub seen_directives: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(outputs: Vec<Result<RawModelOutput>>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            seen_history_lens: Mutex::new(vec![]),
            seen_directives: Mutex::new(vec![]),
        }
    }

    /// One turn of plain text output.
    pub fn text(reply: &str) -> Self {
        Self::replying(vec![Ok(RawModelOutput::Text(reply.to_string()))])
    }

    /// One turn of textual tool-call output, the original wire shape.
    pub fn tool_call(tool_name: &str, arguments: serde_json::Value) -> Self {
        Self::text(&format!(
            r#"{{"function": "{}", "arguments": {}}}"#,
            tool_name, arguments
        ))
    }

    /// A model collaborator that is down.
    pub fn failing() -> Self {
        Self::replying(vec![Err(AppError::ModelUnavailable(
            "connection refused".to_string(),
        ))])
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn infer(
        &self,
        _utterance: &str,
        history: &[Message],
        _tool_specs: &[ToolSpec],
        system_directives: &str,
    ) -> Result<RawModelOutput> {
        self.seen_history_lens.lock().unwrap().push(history.len());
        self.seen_directives
            .lock()
            .unwrap()
            .push(system_directives.to_string());

        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted model ran out of outputs")
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Search collaborator stub with a fixed outcome.
pub struct StubSearchProvider {
    outcome: StubOutcome,
}

enum StubOutcome {
    Hits(Vec<SearchHit>),
    Failing,
}

impl StubSearchProvider {
    pub fn with_hits(pairs: &[(&str, &str)]) -> Self {
        Self {
            outcome: StubOutcome::Hits(
                pairs
                    .iter()
                    .map(|(title, identifier)| SearchHit {
                        title: title.to_string(),
                        identifier: identifier.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn empty() -> Self {
        Self::with_hits(&[])
    }

    pub fn failing() -> Self {
        Self {
            outcome: StubOutcome::Failing,
        }
    }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        match &self.outcome {
            StubOutcome::Hits(hits) => Ok(hits.clone()),
            StubOutcome::Failing => Err(AppError::SearchUnavailable(
                "connection reset".to_string(),
            )),
        }
    }
}

/// A dispatcher over the built-in tool set and the given collaborators.
pub fn dispatcher_with(
    model: Arc<dyn LanguageModel>,
    search: Arc<dyn SearchProvider>,
) -> Dispatcher {
    let registry = Arc::new(ToolRegistry::with_builtin_tools(search));
    let decision = DecisionProcedure::new(model, DirectiveTemplate::current());
    Dispatcher::new(registry, decision)
}
