//! Match engine
//!
//! Hashes one candidate at a time and compares it with the target digest.

use tracing::{debug, info};

use crate::app::state::SearchState;
use crate::domain::digest::DigestOracle;
use crate::domain::target::TargetDigest;

/// Per-worker candidate evaluator
///
/// Each worker owns one engine; the scratch digest buffer is reused for every
/// candidate.
pub struct MatchEngine<'a, O: ?Sized> {
    oracle: &'a O,
    target: &'a TargetDigest,
    state: &'a SearchState,
    scratch: Vec<u8>,
}

impl<'a, O: DigestOracle + ?Sized> MatchEngine<'a, O> {
    pub fn new(oracle: &'a O, target: &'a TargetDigest, state: &'a SearchState) -> Self {
        Self {
            oracle,
            target,
            state,
            scratch: vec![0u8; oracle.output_len()],
        }
    }

    /// Evaluate one candidate
    ///
    /// Always counts one attempt. Returns `true` if the candidate's digest
    /// equals the target, whether or not this call won the race to record it.
    pub fn try_match(&mut self, candidate: &[u8]) -> bool {
        self.oracle.digest_into(candidate, &mut self.scratch);
        self.state.record_attempt();

        if !digest_eq(&self.scratch, self.target.as_bytes()) {
            return false;
        }

        if self.state.record_match(candidate) {
            info!(plaintext = %hex::encode(candidate), "match found");
        } else {
            debug!(plaintext = %hex::encode(candidate), "match discarded, already found");
        }
        true
    }
}

/// Byte-for-byte equality without early exit
#[inline]
pub fn digest_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
