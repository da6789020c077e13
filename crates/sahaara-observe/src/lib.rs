//! Observability setup for Sahaara.

pub mod tracing_setup;
