//! Domain layer - Pure computational logic
//!
//! This module contains pure types and algorithms without threads or I/O.

pub mod alphabet;
pub mod candidate;
pub mod digest;
pub mod keyspace;
pub mod target;
