//! The Dispatcher
//!
//! Drives one user turn through an explicit state machine:
//! Deciding -> (Sanitizing ->) Executing -> Responding, with ModelUnavailable
//! as the only failing exit. Every tool-level problem (bad arguments, failed
//! evaluation, unreachable search) is recovered here into a stable,
//! user-facing reply; raw error codes never reach the user.

use crate::decision::DecisionProcedure;
use crate::memory::ConversationContext;
use crate::tools::sanitizer::sanitize;
use crate::tools::{calculator, search, ToolRegistry};
use crate::types::{Decision, Result, ToolCallRequest, ToolResult};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Reply when calculator arguments are missing or mistyped.
pub const CALC_MALFORMED_REPLY: &str =
    "Sorry, I couldn't understand that calculation. Could you say it differently?";

/// Reply when the calculator fails to evaluate an expression.
pub const CALC_FAILED_REPLY: &str = "Sorry, I wasn't able to work that calculation out.";

/// Reply when search arguments are missing or mistyped.
pub const SEARCH_MALFORMED_REPLY: &str =
    "Sorry, I couldn't tell what you wanted me to search for.";

/// Reply when the literature search fails or comes back empty.
pub const SEARCH_FAILED_REPLY: &str =
    "Sorry, the literature search isn't reachable right now. Please try again later.";

/// Reply for internal faults that should never surface as such.
pub const GENERIC_APOLOGY: &str = "Sorry, something went wrong while handling that request.";

/// Name of the calculator's expression parameter, fixed by its spec.
const EXPRESSION_PARAM: &str = "expression";

/// Per-turn state. `Failed` is represented by the early `Err` return of
/// [`Dispatcher::handle_turn`]; it is reachable only via ModelUnavailable.
enum TurnState {
    Deciding,
    Sanitizing(ToolCallRequest),
    Executing(ToolCallRequest),
    Responding(String),
}

/// Routes decisions to tools and merges results into the final answer.
///
/// Holds only immutable shared state (`Arc`ed registry, decision procedure),
/// so one dispatcher may serve any number of concurrent turns as long as
/// each turn owns its `ConversationContext`.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    decision: DecisionProcedure,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, decision: DecisionProcedure) -> Self {
        Self { registry, decision }
    }

    /// Handle one user turn and return the final answer text.
    ///
    /// The only error this returns is `ModelUnavailable`; the surrounding
    /// service layer decides whether to retry or report. On success the
    /// turn is appended to `context`.
    pub async fn handle_turn(
        &self,
        utterance: &str,
        context: &mut ConversationContext,
    ) -> Result<String> {
        let turn_id = Uuid::new_v4();
        let span = tracing::debug_span!("turn", %turn_id);
        self.run_turn(utterance, context).instrument(span).await
    }

    async fn run_turn(
        &self,
        utterance: &str,
        context: &mut ConversationContext,
    ) -> Result<String> {
        let mut state = TurnState::Deciding;

        loop {
            state = match state {
                TurnState::Deciding => {
                    let decision = self.decision.decide(utterance, context, &self.registry).await?;
                    match decision {
                        Decision::NaturalLanguage(text) => TurnState::Responding(text),
                        Decision::ToolCall(request) => self.admit(request),
                    }
                }

                TurnState::Sanitizing(mut request) => {
                    if let Some(raw) = request
                        .arguments
                        .get(EXPRESSION_PARAM)
                        .and_then(|v| v.as_str())
                    {
                        let sanitized = sanitize(raw);
                        tracing::debug!(raw, sanitized = %sanitized, "sanitized expression");
                        request.arguments.insert(
                            EXPRESSION_PARAM.to_string(),
                            serde_json::Value::String(sanitized.into_inner()),
                        );
                    }
                    TurnState::Executing(request)
                }

                TurnState::Executing(request) => {
                    let result = match self.registry.lookup(&request.tool_name) {
                        Ok(tool) => tool.execute(&request.arguments).await,
                        Err(_) => {
                            // The decision procedure only emits registered
                            // names; reaching this arm is an internal fault.
                            tracing::error!(
                                tool = %request.tool_name,
                                "unregistered tool reached dispatch"
                            );
                            return self.respond(GENERIC_APOLOGY.to_string(), utterance, context);
                        }
                    };
                    TurnState::Responding(render_result(result))
                }

                TurnState::Responding(text) => {
                    return self.respond(text, utterance, context);
                }
            };
        }
    }

    /// Validate an admitted tool call and pick its next state.
    fn admit(&self, request: ToolCallRequest) -> TurnState {
        let tool = match self.registry.lookup(&request.tool_name) {
            Ok(tool) => tool,
            Err(_) => {
                tracing::error!(tool = %request.tool_name, "unregistered tool reached dispatch");
                return TurnState::Responding(GENERIC_APOLOGY.to_string());
            }
        };

        if let Err(e) = tool.validate_args(&request.arguments) {
            tracing::debug!(tool = %request.tool_name, error = %e, "rejecting malformed arguments");
            return TurnState::Responding(malformed_reply(&request.tool_name));
        }

        if request.tool_name == calculator::TOOL_NAME {
            TurnState::Sanitizing(request)
        } else {
            TurnState::Executing(request)
        }
    }

    fn respond(
        &self,
        text: String,
        utterance: &str,
        context: &mut ConversationContext,
    ) -> Result<String> {
        context.push_user(utterance);
        context.push_assistant(&text);
        Ok(text)
    }
}

/// Map a tool result onto the final answer text.
fn render_result(result: ToolResult) -> String {
    if result.success {
        result.value
    } else {
        tracing::debug!(
            tool = %result.tool_name,
            code = result.error.as_deref().unwrap_or("unknown"),
            "tool execution failed"
        );
        apology_reply(&result.tool_name)
    }
}

fn malformed_reply(tool_name: &str) -> String {
    match tool_name {
        calculator::TOOL_NAME => CALC_MALFORMED_REPLY,
        search::TOOL_NAME => SEARCH_MALFORMED_REPLY,
        _ => GENERIC_APOLOGY,
    }
    .to_string()
}

fn apology_reply(tool_name: &str) -> String {
    match tool_name {
        calculator::TOOL_NAME => CALC_FAILED_REPLY,
        search::TOOL_NAME => SEARCH_FAILED_REPLY,
        _ => GENERIC_APOLOGY,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_results_map_to_tool_specific_apologies() {
        let calc = ToolResult::failure(calculator::TOOL_NAME, calculator::EVALUATION_ERROR);
        assert_eq!(render_result(calc), CALC_FAILED_REPLY);

        let search = ToolResult::failure(search::TOOL_NAME, search::SEARCH_UNAVAILABLE);
        assert_eq!(render_result(search), SEARCH_FAILED_REPLY);

        let other = ToolResult::failure("mystery", "whatever");
        assert_eq!(render_result(other), GENERIC_APOLOGY);
    }

    #[test]
    fn successful_results_pass_value_through() {
        let result = ToolResult::ok(calculator::TOOL_NAME, "4");
        assert_eq!(render_result(result), "4");
    }

    #[test]
    fn apologies_never_leak_error_codes() {
        for reply in [
            CALC_MALFORMED_REPLY,
            CALC_FAILED_REPLY,
            SEARCH_MALFORMED_REPLY,
            SEARCH_FAILED_REPLY,
            GENERIC_APOLOGY,
        ] {
            assert!(!reply.contains("EvaluationError"));
            assert!(!reply.contains("SearchUnavailable"));
        }
    }
}
