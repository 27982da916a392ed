//! promptflow - model workflows as finite state machines
//!
//! A two-stage LLM pipeline turns a free-text workflow description into a
//! structured `ProcessDescription`, then into a `PromptFlow` state machine that
//! can be printed as JSON or rendered as a Mermaid diagram. The record types,
//! validation, pretty-printing and rendering are pure and need no model.

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod pretty;
pub mod render;
pub mod util;

pub use error::{FlowError, UnsupportedTypeError, ValidationError};
pub use model::{ProcessDescription, PromptFlow, StateDescription, Transition};
pub use pretty::{pretty, Structured};
pub use render::render_mermaid;
