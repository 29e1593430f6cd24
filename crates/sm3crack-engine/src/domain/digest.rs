//! Digest oracle
//!
//! The engine only sees the `DigestOracle` trait. Any fixed-width one-way
//! function can be plugged in; RustCrypto hashes are adapted by `HashOracle`.

use std::fmt;
use std::marker::PhantomData;

use ::digest::Digest;

#[cfg(feature = "sha1")]
use crate::constants::SHA1_DIGEST_SIZE;
#[cfg(feature = "sha2")]
use crate::constants::SHA256_DIGEST_SIZE;
use crate::constants::SM3_DIGEST_SIZE;

/// Fixed-width one-way function
///
/// Implementations must be pure and reentrant: the same oracle is shared by
/// every worker without synchronization.
pub trait DigestOracle: Send + Sync {
    /// Human readable algorithm name
    fn name(&self) -> &'static str;

    /// Digest width in bytes
    fn output_len(&self) -> usize;

    /// Write the digest of `data` into `out`
    ///
    /// `out` is exactly `output_len()` bytes long.
    fn digest_into(&self, data: &[u8], out: &mut [u8]);

    /// Allocating convenience wrapper around `digest_into`
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len()];
        self.digest_into(data, &mut out);
        out
    }
}

/// Adapter from a RustCrypto `Digest` to `DigestOracle`
pub struct HashOracle<D> {
    name: &'static str,
    _hasher: PhantomData<fn() -> D>,
}

impl<D> HashOracle<D> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _hasher: PhantomData,
        }
    }
}

impl<D> Clone for HashOracle<D> {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

impl<D> fmt::Debug for HashOracle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashOracle").field("name", &self.name).finish()
    }
}

impl<D: Digest> DigestOracle for HashOracle<D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }

    #[inline]
    fn digest_into(&self, data: &[u8], out: &mut [u8]) {
        out.copy_from_slice(&D::digest(data));
    }
}

/// SM3 (GB/T 32905-2016), 32-byte output
pub type Sm3Oracle = HashOracle<sm3::Sm3>;

impl Default for Sm3Oracle {
    fn default() -> Self {
        Self::new("SM3")
    }
}

#[cfg(feature = "sha1")]
pub type Sha1Oracle = HashOracle<sha1::Sha1>;

#[cfg(feature = "sha1")]
impl Default for Sha1Oracle {
    fn default() -> Self {
        Self::new("SHA-1")
    }
}

#[cfg(feature = "sha2")]
pub type Sha256Oracle = HashOracle<sha2::Sha256>;

#[cfg(feature = "sha2")]
impl Default for Sha256Oracle {
    fn default() -> Self {
        Self::new("SHA-256")
    }
}

/// Bundled digest algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Sm3,
    #[cfg(feature = "sha1")]
    Sha1,
    #[cfg(feature = "sha2")]
    Sha256,
}

impl Algorithm {
    /// Digest width in bytes
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sm3 => SM3_DIGEST_SIZE,
            #[cfg(feature = "sha1")]
            Self::Sha1 => SHA1_DIGEST_SIZE,
            #[cfg(feature = "sha2")]
            Self::Sha256 => SHA256_DIGEST_SIZE,
        }
    }

    /// Instantiate the oracle for this algorithm
    pub fn oracle(self) -> Box<dyn DigestOracle> {
        match self {
            Self::Sm3 => Box::new(Sm3Oracle::default()),
            #[cfg(feature = "sha1")]
            Self::Sha1 => Box::new(Sha1Oracle::default()),
            #[cfg(feature = "sha2")]
            Self::Sha256 => Box::new(Sha256Oracle::default()),
        }
    }
}
