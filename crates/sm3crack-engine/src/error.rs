//! Search errors
//!
//! Every variant except `ThreadPool` is an input error detected before any
//! worker starts.

/// Errors raised while validating or launching a search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("digest length mismatch: expected {expected} bytes, found {found} bytes")]
    DigestLength { expected: usize, found: usize },

    #[error("plaintext length must be at least 1, got {0}")]
    InvalidLength(usize),

    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("alphabet contains a duplicate symbol at position {index}")]
    DuplicateSymbol { index: usize },

    #[error("keyspace too large to enumerate: {symbols}^{length} exceeds {max}", max = u64::MAX)]
    KeyspaceTooLarge { symbols: usize, length: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    /// Whether this error rejects the input (as opposed to a runtime failure)
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::ThreadPool(_))
    }
}
