//! Tests for the decision procedure: routing, directive construction, and
//! the hallucination-swallowing policy.

mod common;

use aria::decision::{DecisionProcedure, DirectiveTemplate, UNKNOWN_TOOL_FALLBACK};
use aria::memory::ConversationContext;
use aria::tools::ToolRegistry;
use aria::types::Decision;
use common::mocks::{ScriptedModel, StubSearchProvider};
use serde_json::json;
use std::sync::Arc;

fn registry() -> ToolRegistry {
    ToolRegistry::with_builtin_tools(Arc::new(StubSearchProvider::empty()))
}

#[tokio::test]
async fn arithmetic_question_resolves_to_a_calculate_call() {
    // The directives force arithmetic through the calculator; a compliant
    // model answers with the tool-call shape, and the decision must come
    // out as ToolCall, never NaturalLanguage.
    let model = Arc::new(ScriptedModel::tool_call(
        "calculate",
        json!({"expression": "sqrt(16)"}),
    ));
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());

    let decision = procedure
        .decide(
            "what is the square root of 16",
            &ConversationContext::new(),
            &registry(),
        )
        .await
        .unwrap();

    match decision {
        Decision::ToolCall(request) => {
            assert_eq!(request.tool_name, "calculate");
            assert_eq!(request.arguments["expression"], json!("sqrt(16)"));
        }
        Decision::NaturalLanguage(text) => {
            panic!("arithmetic must not resolve to natural language: {}", text)
        }
    }
}

#[tokio::test]
async fn literature_question_resolves_to_a_search_call() {
    let model = Arc::new(ScriptedModel::tool_call(
        "search",
        json!({"query": "quantum entanglement"}),
    ));
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());

    let decision = procedure
        .decide(
            "find papers on quantum entanglement",
            &ConversationContext::new(),
            &registry(),
        )
        .await
        .unwrap();

    assert!(
        matches!(decision, Decision::ToolCall(ref request) if request.tool_name == "search")
    );
}

#[tokio::test]
async fn prose_resolves_to_natural_language() {
    let model = Arc::new(ScriptedModel::text("Ottawa is the capital of Canada."));
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());

    let decision = procedure
        .decide(
            "what is the capital of Canada",
            &ConversationContext::new(),
            &registry(),
        )
        .await
        .unwrap();

    assert_eq!(
        decision,
        Decision::NaturalLanguage("Ottawa is the capital of Canada.".to_string())
    );
}

#[tokio::test]
async fn hallucinated_tool_is_swallowed_not_surfaced() {
    let model = Arc::new(ScriptedModel::tool_call(
        "book_flight",
        json!({"destination": "Lisbon"}),
    ));
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());

    let decision = procedure
        .decide(
            "book me a flight",
            &ConversationContext::new(),
            &registry(),
        )
        .await
        .unwrap();

    assert_eq!(
        decision,
        Decision::NaturalLanguage(UNKNOWN_TOOL_FALLBACK.to_string())
    );
}

#[tokio::test]
async fn directives_are_rebuilt_identically_per_turn() {
    let model = Arc::new(ScriptedModel::replying(vec![
        Ok(aria::llm::RawModelOutput::Text("a".to_string())),
        Ok(aria::llm::RawModelOutput::Text("b".to_string())),
    ]));
    let model_handle = Arc::clone(&model);
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());
    let registry = registry();
    let context = ConversationContext::new();

    procedure.decide("one", &context, &registry).await.unwrap();
    procedure.decide("two", &context, &registry).await.unwrap();

    let directives = model_handle.seen_directives.lock().unwrap();
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[0], directives[1]);
}

#[tokio::test]
async fn directives_list_registered_tools_in_registration_order() {
    let model = Arc::new(ScriptedModel::text("ok"));
    let model_handle = Arc::clone(&model);
    let procedure = DecisionProcedure::new(model, DirectiveTemplate::current());

    procedure
        .decide("hello", &ConversationContext::new(), &registry())
        .await
        .unwrap();

    let directives = model_handle.seen_directives.lock().unwrap();
    let rendered = &directives[0];
    let calc_at = rendered.find("calculate(").unwrap();
    let search_at = rendered.find("search(").unwrap();
    assert!(calc_at < search_at);
}
