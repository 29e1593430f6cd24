//! Search workflow implementation
//!
//! A run moves through Validating, Running and Terminated. Validation errors
//! are returned before any worker starts; a run that gets past validation ends
//! in `SearchOutcome::Found` or `SearchOutcome::NotFound`.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::app::matcher::MatchEngine;
use crate::app::progress::{ProgressReporter, ProgressSnapshot};
use crate::app::state::SearchState;
use crate::constants::DEFAULT_PROGRESS_INTERVAL;
use crate::domain::alphabet::Alphabet;
use crate::domain::candidate::PartitionCandidates;
use crate::domain::digest::DigestOracle;
use crate::domain::keyspace::{Partition, keyspace_size, partitions};
use crate::domain::target::TargetDigest;
use crate::error::SearchError;

/// Validated, immutable search parameters
#[derive(Clone, Debug)]
pub struct SearchConfig {
    alphabet: Alphabet,
    length: usize,
    target: TargetDigest,
    total: u64,
}

impl SearchConfig {
    /// Validate length and keyspace size
    pub fn new(alphabet: Alphabet, length: usize, target: TargetDigest) -> Result<Self, SearchError> {
        let total = keyspace_size(alphabet.len(), length)?;
        Ok(Self {
            alphabet,
            length,
            target,
            total,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn target(&self) -> &TargetDigest {
        &self.target
    }

    /// Keyspace size (A^L)
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Options for a search run
#[derive(Clone)]
pub struct SearchOptions<F = fn(ProgressSnapshot)> {
    /// Worker thread count (default: rayon's global pool)
    pub threads: Option<usize>,
    /// Interval between progress callbacks
    pub progress_interval: Duration,
    /// Progress callback
    pub on_progress: Option<F>,
}

impl Default for SearchOptions<fn(ProgressSnapshot)> {
    fn default() -> Self {
        Self {
            threads: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            on_progress: None,
        }
    }
}

impl<F> SearchOptions<F> {
    /// Run on a dedicated pool of `threads` workers
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the progress callback
    pub fn with_progress<G>(self, callback: G) -> SearchOptions<G> {
        SearchOptions {
            threads: self.threads,
            progress_interval: self.progress_interval,
            on_progress: Some(callback),
        }
    }
}

/// Terminal state of a run that passed validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A plaintext whose digest equals the target
    Found(Vec<u8>),
    /// Every partition was exhausted without a match
    NotFound,
}

/// Result of a search run
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Digest evaluations performed
    pub attempted: u64,
    /// Keyspace size (A^L)
    pub total: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    pub fn plaintext(&self) -> Option<&[u8]> {
        match &self.outcome {
            SearchOutcome::Found(p) => Some(p.as_slice()),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Validate raw inputs and run the search
///
/// # Arguments
/// * `oracle` - Digest function the target was produced with
/// * `target_hex` - Hex-encoded target digest (case-insensitive)
/// * `length` - Plaintext length in symbols
/// * `alphabet` - Symbols to enumerate
/// * `options` - Worker count and progress callback
pub fn crack<O, F>(
    oracle: &O,
    target_hex: &str,
    length: usize,
    alphabet: Alphabet,
    options: SearchOptions<F>,
) -> Result<SearchReport, SearchError>
where
    O: DigestOracle + ?Sized,
    F: FnMut(ProgressSnapshot) + Send,
{
    debug!(algorithm = oracle.name(), length, "validating search input");
    let target = TargetDigest::from_hex(target_hex, oracle.output_len())?;
    let config = SearchConfig::new(alphabet, length, target)?;
    run(oracle, &config, options)
}

/// Run a validated search
///
/// Spawns one worker task per partition and blocks until every worker has
/// stopped, either by exhausting its partition or by observing the
/// found-flag.
pub fn run<O, F>(
    oracle: &O,
    config: &SearchConfig,
    options: SearchOptions<F>,
) -> Result<SearchReport, SearchError>
where
    O: DigestOracle + ?Sized,
    F: FnMut(ProgressSnapshot) + Send,
{
    if config.target.len() != oracle.output_len() {
        return Err(SearchError::DigestLength {
            expected: oracle.output_len(),
            found: config.target.len(),
        });
    }

    let SearchOptions {
        threads,
        progress_interval,
        on_progress,
    } = options;

    let pool = threads
        .map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build())
        .transpose()?;
    let parts = partitions(&config.alphabet, config.length)?;
    let total = config.total;

    info!(
        algorithm = oracle.name(),
        digest = %config.target,
        length = config.length,
        symbols = config.alphabet.len(),
        total,
        "starting search"
    );

    let state = SearchState::new();
    let started = Instant::now();
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    thread::scope(|scope| {
        if let Some(callback) = on_progress {
            let reporter = ProgressReporter::new(progress_interval);
            let state = &state;
            scope.spawn(move || reporter.run(state, total, started, &stop_rx, callback));
        }

        let search = || {
            parts
                .into_par_iter()
                .for_each(|partition| search_partition(oracle, config, &state, partition));
        };
        match &pool {
            Some(pool) => pool.install(search),
            None => search(),
        }

        // Workers are done; release the reporter
        drop(stop_tx);
    });

    let elapsed = started.elapsed();
    let attempted = state.attempted();
    let outcome = match state.into_plaintext() {
        Some(plaintext) => SearchOutcome::Found(plaintext),
        None => SearchOutcome::NotFound,
    };

    info!(
        found = matches!(outcome, SearchOutcome::Found(_)),
        attempted,
        total,
        elapsed_ms = elapsed.as_millis() as u64,
        "search finished"
    );

    Ok(SearchReport {
        outcome,
        attempted,
        total,
        elapsed,
    })
}

/// Enumerate one partition until it is exhausted or a match is found anywhere
fn search_partition<O: DigestOracle + ?Sized>(
    oracle: &O,
    config: &SearchConfig,
    state: &SearchState,
    partition: Partition,
) {
    if state.is_found() {
        return;
    }

    trace!(first_symbol = partition.first_symbol, "partition started");

    let mut engine = MatchEngine::new(oracle, &config.target, state);
    let mut candidates =
        PartitionCandidates::new(&config.alphabet, partition).with_cancel(state.found_flag());

    let mut evaluated = 0u64;
    while let Some(candidate) = candidates.next_candidate() {
        evaluated += 1;
        if engine.try_match(candidate) {
            break;
        }
    }

    trace!(
        first_symbol = partition.first_symbol,
        evaluated,
        "partition finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::digest::Sm3Oracle;
    use std::sync::{Arc, Mutex};

    fn sm3_hex(plaintext: &[u8]) -> String {
        hex::encode(Sm3Oracle::default().digest(plaintext))
    }

    #[test]
    fn test_search_config_rejects_zero_length() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let target = TargetDigest::from_bytes(vec![0u8; 32], 32).unwrap();
        assert!(matches!(
            SearchConfig::new(alphabet, 0, target),
            Err(SearchError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_crack_found_small() {
        let oracle = Sm3Oracle::default();
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let report =
            crack(&oracle, &sm3_hex(b"ba"), 2, alphabet, SearchOptions::default()).unwrap();

        assert_eq!(report.outcome, SearchOutcome::Found(b"ba".to_vec()));
        assert!(report.attempted >= 1 && report.attempted <= 4);
        assert_eq!(report.total, 4);
    }

    #[test]
    fn test_crack_not_found_exhausts() {
        let oracle = Sm3Oracle::default();
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let report =
            crack(&oracle, &sm3_hex(b"abc"), 2, alphabet, SearchOptions::default()).unwrap();

        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.attempted, 4);
        assert_eq!(report.plaintext(), None);
    }

    #[test]
    fn test_crack_rejects_wrong_width() {
        let oracle = Sm3Oracle::default();
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let result = crack(&oracle, "00ff", 2, alphabet, SearchOptions::default());
        assert!(matches!(
            result,
            Err(SearchError::DigestLength {
                expected: 32,
                found: 2
            })
        ));
    }

    #[test]
    fn test_run_rejects_config_for_other_oracle() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let target = TargetDigest::from_bytes(vec![0u8; 20], 20).unwrap();
        let config = SearchConfig::new(alphabet, 2, target).unwrap();
        assert!(matches!(
            run(&Sm3Oracle::default(), &config, SearchOptions::default()),
            Err(SearchError::DigestLength { .. })
        ));
    }

    #[test]
    fn test_run_with_dedicated_pool() {
        let oracle = Sm3Oracle::default();
        let alphabet = Alphabet::from_chars("xyz").unwrap();
        let report = crack(
            &oracle,
            &sm3_hex(b"zzx"),
            3,
            alphabet,
            SearchOptions::default().with_threads(2),
        )
        .unwrap();
        assert_eq!(report.plaintext(), Some(&b"zzx"[..]));
    }

    #[test]
    fn test_progress_callback_receives_final_snapshot() {
        let oracle = Sm3Oracle::default();
        let alphabet = Alphabet::from_chars("0123").unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let options = SearchOptions::default()
            .with_progress_interval(Duration::from_millis(1))
            .with_progress(move |s: ProgressSnapshot| sink.lock().unwrap().push(s));
        let report = crack(&oracle, &sm3_hex(b"nope"), 3, alphabet, options).unwrap();

        assert_eq!(report.outcome, SearchOutcome::NotFound);
        let seen = seen.lock().unwrap();
        let last = seen.last().unwrap();
        assert_eq!(last.attempted, 64);
        assert_eq!(last.total, 64);
        assert_eq!(last.percent(), 100.0);
    }
}
