//! # A.R.I.A - Assistant Routing & Invocation Agent
//!
//! The tool-selection and dispatch core of a voice-assistant backend. Each
//! user turn is one utterance in, one answer out: a decision procedure asks
//! the model collaborator whether to invoke the calculator tool, invoke the
//! literature-search tool, or answer directly, and a dispatcher validates,
//! sanitizes, executes, and merges the result into the final reply.
//!
//! ## Overview
//!
//! A.R.I.A can be used in two ways:
//!
//! 1. **As a REPL** - Run the `aria` binary against a local Ollama server
//! 2. **As a library** - Wire the dispatcher into your own service layer
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use aria::{
//!     ConversationContext, CrossrefSearch, DecisionProcedure, DirectiveTemplate,
//!     Dispatcher, OllamaModel, ToolRegistry,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(OllamaModel::new(
//!         "http://localhost:11434".to_string(),
//!         "llama3.2:1b".to_string(),
//!     ));
//!     let search = Arc::new(CrossrefSearch::new(
//!         "https://api.crossref.org".to_string(),
//!         3,
//!     )?);
//!
//!     let registry = Arc::new(ToolRegistry::with_builtin_tools(search));
//!     let decision = DecisionProcedure::new(model, DirectiveTemplate::current());
//!     let dispatcher = Dispatcher::new(registry, decision);
//!
//!     let mut context = ConversationContext::new();
//!     let answer = dispatcher
//!         .handle_turn("What is the square root of 16?", &mut context)
//!         .await?;
//!     println!("{}", answer); // "4"
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Collaborators
//!
//! Both external capabilities sit behind narrow traits:
//! [`LanguageModel`](llm::LanguageModel) for inference and
//! [`SearchProvider`](tools::SearchProvider) for literature search. Swap in
//! your own implementations (or test stubs) without touching decision or
//! dispatch logic.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama model collaborator (default) |
//! | `minimal` | No bundled model collaborator |
//!
//! ## Modules
//!
//! - [`decision`] - Directive template and utterance-to-decision mapping
//! - [`dispatch`] - Per-turn state machine and the `handle_turn` entry point
//! - [`llm`] - Model-collaborator trait and bundled clients
//! - [`tools`] - Tool registry, sanitizer, calculator, literature search
//! - [`memory`] - Per-session conversation context
//! - [`types`] - Core types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Command-line interface for the `aria` binary.
pub mod cli;
/// Decision procedure and system-directive template.
pub mod decision;
/// Per-turn dispatch state machine.
pub mod dispatch;
/// Model-collaborator clients and abstractions.
pub mod llm;
/// Per-session conversation context.
pub mod memory;
/// Built-in tools and tool registry.
pub mod tools;
/// Core types (decisions, tool results, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use decision::{DecisionProcedure, DirectiveTemplate};
pub use dispatch::Dispatcher;
pub use llm::{LanguageModel, RawModelOutput};
pub use memory::ConversationContext;
pub use tools::{Calculator, CrossrefSearch, SearchProvider, SearchTool, Tool, ToolRegistry};
pub use types::{AppError, Decision, Result, ToolCallRequest, ToolResult, ToolSpec};

#[cfg(feature = "ollama")]
pub use llm::OllamaModel;
