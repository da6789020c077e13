//! Shared domain types for Sahaara.
//!
//! This crate contains the core domain types used across the Sahaara support
//! service: agents, sessions, risk classification, LLM request/response
//! shapes, and safety plans.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod llm;
pub mod plan;
pub mod session;
