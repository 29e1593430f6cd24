//! Candidate generation
//!
//! Depth-first enumeration of one partition. The leading symbol is fixed and
//! the remaining L-1 positions advance like an odometer, rightmost first, so
//! candidates come out in alphabet-index order:
//!
//! ```text
//! alphabet "ab", length 3, partition 'b':  baa, bab, bba, bbb
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::alphabet::Alphabet;
use crate::domain::keyspace::Partition;

/// Lazy, finite, non-restartable sequence of the candidates of one partition
#[derive(Debug)]
pub struct PartitionCandidates<'a> {
    alphabet: &'a Alphabet,
    /// Alphabet indices of positions 1..L
    suffix: Vec<usize>,
    /// Byte offset in `buf` just past each position 0..L
    ends: Vec<usize>,
    buf: Vec<u8>,
    remaining: u64,
    started: bool,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> PartitionCandidates<'a> {
    pub fn new(alphabet: &'a Alphabet, partition: Partition) -> Self {
        let length = partition.length.max(1);
        let mut buf = Vec::with_capacity(length * alphabet.max_symbol_len());
        let mut ends = Vec::with_capacity(length);

        buf.extend_from_slice(alphabet.symbol(partition.first_symbol));
        ends.push(buf.len());
        for _ in 1..length {
            buf.extend_from_slice(alphabet.symbol(0));
            ends.push(buf.len());
        }

        Self {
            alphabet,
            suffix: vec![0; length - 1],
            ends,
            buf,
            remaining: partition.size,
            started: false,
            cancel: None,
        }
    }

    /// Stop yielding candidates as soon as `flag` is observed set
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Number of candidates not yet yielded
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Advance to the next candidate and borrow it
    ///
    /// Returns `None` once the partition is exhausted or cancellation has been
    /// observed; every later call returns `None` as well.
    pub fn next_candidate(&mut self) -> Option<&[u8]> {
        if self.remaining == 0 {
            return None;
        }
        if let Some(flag) = self.cancel
            && flag.load(Ordering::Acquire)
        {
            self.remaining = 0;
            return None;
        }

        if self.started {
            self.advance();
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(self.buf.as_slice())
    }

    /// Step the suffix odometer and rebuild the buffer from the first changed position
    fn advance(&mut self) {
        let symbols = self.alphabet.len();
        let mut pos = self.suffix.len();
        while pos > 0 {
            pos -= 1;
            self.suffix[pos] += 1;
            if self.suffix[pos] < symbols {
                break;
            }
            self.suffix[pos] = 0;
        }

        // suffix[k] is candidate position k + 1, which starts at ends[k]
        self.buf.truncate(self.ends[pos]);
        for k in pos..self.suffix.len() {
            self.buf.extend_from_slice(self.alphabet.symbol(self.suffix[k]));
            self.ends[k + 1] = self.buf.len();
        }
    }
}

impl Iterator for PartitionCandidates<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_candidate().map(<[u8]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Cancellation can end the sequence early
        (0, usize::try_from(self.remaining).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyspace::partitions;

    fn collect_partition(chars: &str, length: usize, first: usize) -> Vec<String> {
        let alphabet = Alphabet::from_chars(chars).unwrap();
        let part = partitions(&alphabet, length).unwrap()[first];
        PartitionCandidates::new(&alphabet, part)
            .map(|c| String::from_utf8(c).unwrap())
            .collect()
    }

    #[test]
    fn test_enumeration_order() {
        assert_eq!(
            collect_partition("ab", 3, 1),
            vec!["baa", "bab", "bba", "bbb"]
        );
    }

    #[test]
    fn test_length_one_yields_single_symbol() {
        assert_eq!(collect_partition("xyz", 1, 2), vec!["z"]);
    }

    #[test]
    fn test_single_symbol_alphabet() {
        assert_eq!(collect_partition("q", 4, 0), vec!["qqqq"]);
    }

    #[test]
    fn test_partition_size_matches_yield_count() {
        let alphabet = Alphabet::from_chars("0123456789").unwrap();
        let part = partitions(&alphabet, 4).unwrap()[7];
        let candidates: Vec<_> = PartitionCandidates::new(&alphabet, part).collect();

        assert_eq!(candidates.len() as u64, part.size);
        assert_eq!(candidates.first().unwrap(), b"7000");
        assert_eq!(candidates.last().unwrap(), b"7999");
    }

    #[test]
    fn test_multibyte_symbols_rebuilt_correctly() {
        assert_eq!(
            collect_partition("aé", 3, 0),
            vec!["aaa", "aaé", "aéa", "aéé"]
        );
    }

    #[test]
    fn test_not_restartable() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let part = partitions(&alphabet, 2).unwrap()[0];
        let mut candidates = PartitionCandidates::new(&alphabet, part);

        assert_eq!(candidates.next_candidate(), Some(&b"aa"[..]));
        assert_eq!(candidates.next_candidate(), Some(&b"ab"[..]));
        assert_eq!(candidates.next_candidate(), None);
        assert_eq!(candidates.next_candidate(), None);
        assert_eq!(candidates.remaining(), 0);
    }

    #[test]
    fn test_cancel_before_start() {
        let alphabet = Alphabet::from_chars("abc").unwrap();
        let part = partitions(&alphabet, 3).unwrap()[0];
        let flag = AtomicBool::new(true);

        let mut candidates = PartitionCandidates::new(&alphabet, part).with_cancel(&flag);
        assert_eq!(candidates.next_candidate(), None);
    }

    #[test]
    fn test_cancel_mid_partition_stops_within_one_candidate() {
        let alphabet = Alphabet::from_chars("abc").unwrap();
        let part = partitions(&alphabet, 3).unwrap()[0];
        let flag = AtomicBool::new(false);

        let mut candidates = PartitionCandidates::new(&alphabet, part).with_cancel(&flag);
        assert!(candidates.next_candidate().is_some());
        assert!(candidates.next_candidate().is_some());

        flag.store(true, Ordering::Release);
        assert_eq!(candidates.next_candidate(), None);

        // Clearing the flag does not resume enumeration
        flag.store(false, Ordering::Release);
        assert_eq!(candidates.next_candidate(), None);
    }
}
