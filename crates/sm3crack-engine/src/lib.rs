//! sm3crack-engine - Parallel brute-force preimage search over a fixed alphabet
//!
//! This crate provides functionality to:
//! - Split the keyspace of an alphabet/length pair into one partition per leading symbol
//! - Enumerate each partition depth-first with cooperative cancellation
//! - Match candidates against a target digest through a pluggable digest oracle
//! - Report progress of a running search from a shared attempt counter

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use app::coordinator::{SearchConfig, SearchOptions, SearchOutcome, SearchReport, crack, run};
pub use app::progress::ProgressSnapshot;
pub use constants::*;
pub use domain::alphabet::{Alphabet, Charset};
pub use domain::digest::{Algorithm, DigestOracle, HashOracle, Sm3Oracle};
pub use domain::target::TargetDigest;
pub use error::SearchError;
