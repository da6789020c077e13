//! Business logic for Sahaara: keyword classification, prompt construction,
//! agent routing, the completion client, and safety-plan generation.
//!
//! This crate defines the "ports" (the `LlmProvider` and `SessionStore`
//! traits) that the infrastructure layer implements. It depends only on
//! `sahaara-types` -- never on `sahaara-infra` or any HTTP/IO crate, so the
//! whole control flow is testable without a web framework present.

pub mod agent;
pub mod classify;
pub mod engine;
pub mod llm;
pub mod plan;
pub mod prompt;
pub mod session;
