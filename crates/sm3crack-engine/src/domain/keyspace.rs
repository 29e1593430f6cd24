//! Keyspace sizing and partitioning
//!
//! The keyspace of an alphabet of A symbols and length L holds A^L
//! candidates. It is split into A disjoint partitions, one per leading symbol,
//! each holding A^(L-1) candidates.

use crate::domain::alphabet::Alphabet;
use crate::error::SearchError;

/// Total number of candidates (A^L)
///
/// The total must fit in `u64`, the width of the attempted-count. Larger
/// keyspaces are rejected rather than wrapped.
pub fn keyspace_size(symbols: usize, length: usize) -> Result<u64, SearchError> {
    if symbols == 0 {
        return Err(SearchError::EmptyAlphabet);
    }
    if length == 0 {
        return Err(SearchError::InvalidLength(length));
    }

    let too_large = || SearchError::KeyspaceTooLarge { symbols, length };
    let base = u64::try_from(symbols).map_err(|_| too_large())?;
    let exp = u32::try_from(length).map_err(|_| too_large())?;
    base.checked_pow(exp).ok_or_else(too_large)
}

/// A disjoint slice of the keyspace identified by its leading symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Alphabet index of the fixed leading symbol
    pub first_symbol: usize,
    /// Candidate length in symbols
    pub length: usize,
    /// Number of candidates in this partition (A^(L-1))
    pub size: u64,
}

/// Split the keyspace into one partition per alphabet symbol
pub fn partitions(alphabet: &Alphabet, length: usize) -> Result<Vec<Partition>, SearchError> {
    let total = keyspace_size(alphabet.len(), length)?;
    let size = total / alphabet.len() as u64;

    Ok((0..alphabet.len())
        .map(|first_symbol| Partition {
            first_symbol,
            length,
            size,
        })
        .collect())
}
