//! Search related constants

use std::time::Duration;

// =============================================================================
// Digest parameters
// =============================================================================

/// SM3 digest width in bytes (256 bits)
pub const SM3_DIGEST_SIZE: usize = 32;

/// SHA-1 digest width in bytes (160 bits)
pub const SHA1_DIGEST_SIZE: usize = 20;

/// SHA-256 digest width in bytes (256 bits)
pub const SHA256_DIGEST_SIZE: usize = 32;

// =============================================================================
// Progress reporting
// =============================================================================

/// Default interval between progress ticks
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

// =============================================================================
// Charset presets
// =============================================================================

pub const DIGITS: &str = "0123456789";

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const HEX_DIGITS: &str = "0123456789abcdef";

/// Printable ASCII punctuation (used together with alphanumerics for `Printable`)
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ ";
