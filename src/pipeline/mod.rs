//! The two-stage generation pipeline: description -> ProcessDescription -> PromptFlow.

pub mod extract;
pub mod generator;

pub use generator::{FlowGenerator, PipelineOutput};
