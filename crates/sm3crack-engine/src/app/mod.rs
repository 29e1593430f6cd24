//! Application layer - Use case implementations
//!
//! This module wires the domain types to worker threads and shared state.

pub mod coordinator;
pub mod matcher;
pub mod progress;
pub mod state;
