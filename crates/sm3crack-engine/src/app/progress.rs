//! Progress reporting
//!
//! The reporter runs on its own thread and samples the shared attempt counter
//! on a fixed interval. It never takes the result lock, so it cannot slow the
//! workers down.

use std::fmt;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::trace;

use crate::app::state::SearchState;

/// Point-in-time view of a running search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapshot {
    /// Digest evaluations performed so far
    pub attempted: u64,
    /// Keyspace size (A^L)
    pub total: u64,
    /// Wall-clock time since the search started
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Completion percentage (0.0 to 100.0)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.attempted as f64 / self.total as f64 * 100.0).min(100.0)
    }

    /// Attempts per second since the start
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempted as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}% ({} / {})",
            self.percent(),
            self.attempted,
            self.total
        )
    }
}

/// Periodic progress sampler
#[derive(Clone, Copy, Debug)]
pub struct ProgressReporter {
    interval: Duration,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn snapshot(state: &SearchState, total: u64, started: Instant) -> ProgressSnapshot {
        ProgressSnapshot {
            attempted: state.attempted(),
            total,
            elapsed: started.elapsed(),
        }
    }

    /// Tick until the found-flag is set or `stop` fires (or is disconnected)
    ///
    /// `on_tick` receives one snapshot per interval and a final snapshot on
    /// exit. Returns the number of snapshots delivered.
    pub fn run<F>(
        &self,
        state: &SearchState,
        total: u64,
        started: Instant,
        stop: &Receiver<()>,
        mut on_tick: F,
    ) -> u64
    where
        F: FnMut(ProgressSnapshot),
    {
        let mut ticks = 0;

        loop {
            match stop.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            if state.is_found() {
                break;
            }

            let snapshot = Self::snapshot(state, total, started);
            trace!(attempted = snapshot.attempted, total, "progress tick");
            on_tick(snapshot);
            ticks += 1;
        }

        on_tick(Self::snapshot(state, total, started));
        ticks + 1
    }
}
