//! Text-generation backends and the prompts sent to them.

pub mod client;
pub mod client_impl;
pub mod factory;
pub mod prompts;

pub use client::{LlmClient, MockLlmClient};
