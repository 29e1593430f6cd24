//! Brute-force digest recovery CLI
//!
//! Usage: sm3crack <HASH> --length <N> [--charset <CHARS> | --preset <NAME> | --byte-charset <HEX>]
//!
//! Example:
//!   sm3crack 66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0 -l 3 --preset lower
//!   sm3crack <HASH> -l 6 --min-length 1 -c abc123 -j 8
//!
//! Exit status: 0 when a plaintext is found, 1 when the keyspace is exhausted,
//! 2 on invalid input.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use sm3crack_engine::{
    Algorithm, Alphabet, Charset, DigestOracle, ProgressSnapshot, SearchConfig, SearchError,
    SearchOptions, SearchOutcome, SearchReport, TargetDigest, run,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sm3crack")]
#[command(about = "Recover a short plaintext from its digest by exhaustive keyspace search")]
struct Args {
    /// Target digest, hex encoded (case-insensitive)
    hash: String,

    /// Plaintext length in symbols
    #[arg(short, long)]
    length: usize,

    /// Also try every shorter length starting from this one
    #[arg(long)]
    min_length: Option<usize>,

    /// Alphabet given literally, one symbol per character
    #[arg(short, long, conflicts_with_all = ["preset", "byte_charset"])]
    charset: Option<String>,

    /// Named alphabet preset (default: alnum)
    #[arg(long, value_enum, conflicts_with = "byte_charset")]
    preset: Option<PresetArg>,

    /// Raw byte alphabet given as hex, one symbol per byte (e.g. "00ff7f")
    #[arg(long)]
    byte_charset: Option<String>,

    /// Digest algorithm the target was produced with
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Sm3)]
    algorithm: AlgorithmArg,

    /// Number of worker threads (default: one per CPU)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Progress refresh interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Sm3,
    #[cfg(feature = "sha1")]
    Sha1,
    #[cfg(feature = "sha2")]
    Sha256,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sm3 => Algorithm::Sm3,
            #[cfg(feature = "sha1")]
            AlgorithmArg::Sha1 => Algorithm::Sha1,
            #[cfg(feature = "sha2")]
            AlgorithmArg::Sha256 => Algorithm::Sha256,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Digits,
    Lower,
    Upper,
    Alpha,
    Alnum,
    Hex,
    Printable,
}

impl From<PresetArg> for Charset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Digits => Charset::Digits,
            PresetArg::Lower => Charset::Lower,
            PresetArg::Upper => Charset::Upper,
            PresetArg::Alpha => Charset::Alpha,
            PresetArg::Alnum => Charset::Alnum,
            PresetArg::Hex => Charset::Hex,
            PresetArg::Printable => Charset::Printable,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("--min-length {min} is greater than --length {max}")]
    LengthRange { min: usize, max: usize },
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Search(e) if !e.is_invalid_input() => ExitCode::from(3),
            _ => ExitCode::from(2),
        }
    }
}

fn resolve_alphabet(args: &Args) -> Result<Alphabet, SearchError> {
    if let Some(chars) = &args.charset {
        return Alphabet::from_chars(chars);
    }
    if let Some(hex_bytes) = &args.byte_charset {
        return Alphabet::from_bytes(&hex::decode(hex_bytes.trim())?);
    }
    Ok(Charset::from(args.preset.unwrap_or(PresetArg::Alnum)).alphabet())
}

/// Build and validate one config per length before any search starts
fn build_configs(
    args: &Args,
    oracle: &dyn DigestOracle,
    alphabet: &Alphabet,
) -> Result<Vec<SearchConfig>, CliError> {
    let target = TargetDigest::from_hex(&args.hash, oracle.output_len())?;

    let min = args.min_length.unwrap_or(args.length);
    if min > args.length {
        return Err(CliError::LengthRange {
            min,
            max: args.length,
        });
    }

    (min..=args.length)
        .map(|length| {
            SearchConfig::new(alphabet.clone(), length, target.clone()).map_err(CliError::from)
        })
        .collect()
}

fn search_with_progress(
    oracle: &dyn DigestOracle,
    config: &SearchConfig,
    args: &Args,
) -> Result<SearchReport, SearchError> {
    let mut options =
        SearchOptions::default().with_progress_interval(Duration::from_millis(args.interval_ms));
    if let Some(threads) = args.threads {
        options = options.with_threads(threads);
    }

    if args.no_progress {
        return run(oracle, config, options);
    }

    let pb = ProgressBar::new(config.total());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );

    let bar = pb.clone();
    let options = options.with_progress(move |snapshot: ProgressSnapshot| {
        bar.set_position(snapshot.attempted);
        bar.set_message(format!("{} {:.0} H/s", snapshot, snapshot.rate()));
    });

    let report = run(oracle, config, options);
    pb.finish();
    report
}

fn print_found(plaintext: &[u8], as_text: bool) {
    println!("[FOUND] Plaintext (hex): {}", hex::encode(plaintext));
    if as_text && let Ok(text) = std::str::from_utf8(plaintext) {
        println!("[FOUND] Plaintext (text): {}", text);
    }
}

/// Returns whether a plaintext was found
fn execute(args: &Args) -> Result<bool, CliError> {
    let alphabet = resolve_alphabet(args)?;
    let oracle = Algorithm::from(args.algorithm).oracle();
    let configs = build_configs(args, oracle.as_ref(), &alphabet)?;
    let as_text = alphabet.is_ascii() || args.byte_charset.is_none();

    debug!(
        algorithm = oracle.name(),
        symbols = alphabet.len(),
        lengths = configs.len(),
        "input validated"
    );

    for config in &configs {
        println!(
            "[*] Cracking {} hash: {} (length={}, total={} combinations)",
            oracle.name(),
            config.target(),
            config.length(),
            config.total()
        );

        let report = search_with_progress(oracle.as_ref(), config, args)?;
        println!(
            "[*] {} attempts in {:.2} seconds",
            report.attempted,
            report.elapsed.as_secs_f64()
        );

        if let SearchOutcome::Found(plaintext) = &report.outcome {
            print_found(plaintext, as_text);
            return Ok(true);
        }
    }

    println!("[!] No matching plaintext found.");
    Ok(false)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match execute(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("[-] {}", e);
            e.exit_code()
        }
    }
}
