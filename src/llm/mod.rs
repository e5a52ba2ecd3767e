//! Model-Collaborator Abstractions
//!
//! The decision procedure consumes language-model inference through the
//! narrow [`LanguageModel`] trait: one call in, one [`RawModelOutput`] out.
//! The trait is the seam for swapping providers (or test stubs) without
//! touching decision or dispatch logic.
//!
//! # Bundled Collaborators
//!
//! Enable collaborators via Cargo features:
//! - `ollama` (default) - local inference against an Ollama server

/// Core model-collaborator trait and raw output type.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{LanguageModel, RawModelOutput};

#[cfg(feature = "ollama")]
pub use ollama::OllamaModel;
