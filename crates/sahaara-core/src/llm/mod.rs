//! Completion client and the provider abstraction it is built on.

pub mod client;
pub mod provider;

pub use client::CompletionClient;
pub use provider::{BoxLlmProvider, LlmProvider};
