//! # Connector Layer
//!
//! External integrations around the application core:
//! - Completion providers (OpenAI, Anthropic, offline mock)
//! - HTTP API (axum)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
