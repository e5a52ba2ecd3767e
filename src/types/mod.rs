//! Core types shared across the dispatch core: tool schemas, per-turn
//! decisions, tool results, conversation messages, and the error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Tool Schema Types =============

/// Declarative description of a tool the model may invoke.
///
/// Specs are immutable after registration; the registry hands them out in
/// registration order so that prompt construction stays deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ParamSpec>,
}

/// A single named parameter of a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    /// A required parameter of the given kind.
    pub fn required(name: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }
}

/// Wire-level type of a tool parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }

    /// Whether a JSON value is acceptable for this kind.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
        }
    }
}

// ============= Per-Turn Types =============

/// A structured tool invocation produced by the decision procedure.
///
/// The decision procedure only emits requests whose `tool_name` references
/// a registered spec; the dispatcher re-checks on lookup anyway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    pub tool_name: String,
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// The per-turn choice: answer directly, or invoke exactly one tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    NaturalLanguage(String),
    ToolCall(ToolCallRequest),
}

/// Outcome of a single tool execution.
///
/// Consumed immediately by the dispatcher to build the final answer; never
/// persisted. `error` carries a stable error code ("EvaluationError",
/// "SearchUnavailable"), not the underlying failure message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub success: bool,
    pub value: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(tool_name: &str, value: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            success: true,
            value: value.into(),
            error: None,
        }
    }

    pub fn failure(tool_name: &str, code: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            success: false,
            value: String::new(),
            error: Some(code.to_string()),
        }
    }
}

// ============= Conversation Types =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= Error Types =============

/// Error taxonomy of the dispatch core.
///
/// Everything below `ModelUnavailable` is recovered inside the dispatcher
/// and turned into a user-facing reply; only `ModelUnavailable` crosses the
/// core boundary as an explicit failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("duplicate tool name: {0}")]
    DuplicateToolName(String),

    #[error("malformed arguments: {0}")]
    MalformedArguments(String),

    #[error("evaluation error: {0}")]
    EvaluationError(String),

    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
