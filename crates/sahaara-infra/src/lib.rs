//! Infrastructure implementations for Sahaara.
//!
//! Everything that touches the outside world lives here: the hosted LLM
//! provider, environment configuration, and safety-plan PDF rendering. The
//! core crate only sees the traits these types implement.

pub mod config;
pub mod llm;
pub mod pdf;
