//! LLM endpoints used as glue around the optimizer.
//!
//! Two jobs, both deliberately thin:
//!
//! - [`OpenAiClient`]: free-text inventory description -> structured request
//!   (schema-constrained), and assignments -> Markdown table
//! - [`GeminiClient`]: list models available to the configured key
//!
//! LLM output is never trusted: parsed requests go through
//! [`crate::domain::validate_request`] before they reach the bridge, and
//! everything else is treated as opaque text.

mod gemini;
mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
