//! Core use-case services.
//!
//! # Responsibility
//! - Hold authoritative in-memory state and orchestrate repository calls.
//! - Keep the presentation layer decoupled from storage details.

pub mod task_store;
