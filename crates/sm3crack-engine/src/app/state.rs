//! Shared search state
//!
//! One `SearchState` is created per run and handed by reference to every
//! worker and to the progress reporter.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Counters and result slot shared by all workers of one run
#[derive(Debug, Default)]
pub struct SearchState {
    /// Digest evaluations performed so far (monotonic)
    attempted: AtomicU64,
    /// Write-once flag, set only after `plaintext` holds the match
    found: AtomicBool,
    plaintext: Mutex<Option<Vec<u8>>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one digest evaluation
    #[inline]
    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    /// Attempts recorded so far (may lag in-flight work slightly)
    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// The found-flag, for use as a cancellation signal
    pub fn found_flag(&self) -> &AtomicBool {
        &self.found
    }

    /// Record a matching plaintext
    ///
    /// First writer wins. Returns `false` if a match was already recorded, in
    /// which case `candidate` is discarded.
    pub fn record_match(&self, candidate: &[u8]) -> bool {
        let mut slot = self.plaintext.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate.to_vec());
        self.found.store(true, Ordering::Release);
        true
    }

    /// Copy of the recorded plaintext, if any
    pub fn plaintext(&self) -> Option<Vec<u8>> {
        self.plaintext
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_plaintext(self) -> Option<Vec<u8>> {
        self.plaintext
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
