//! Target digest parsing

use std::fmt;

use crate::error::SearchError;

/// Digest the search is trying to invert
///
/// Its width always equals the oracle width it was validated against.
#[derive(Clone, PartialEq, Eq)]
pub struct TargetDigest {
    bytes: Box<[u8]>,
}

impl TargetDigest {
    /// Parse a hex digest (case-insensitive, surrounding whitespace ignored)
    pub fn from_hex(text: &str, expected_len: usize) -> Result<Self, SearchError> {
        let bytes = hex::decode(text.trim())?;
        Self::from_bytes(bytes, expected_len)
    }

    pub fn from_bytes(bytes: impl Into<Box<[u8]>>, expected_len: usize) -> Result<Self, SearchError> {
        let bytes = bytes.into();
        if bytes.len() != expected_len {
            return Err(SearchError::DigestLength {
                expected: expected_len,
                found: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetDigest({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SM3_ABC: &str = "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0";

    #[test]
    fn test_from_hex_lowercase() {
        let target = TargetDigest::from_hex(SM3_ABC, 32).unwrap();
        assert_eq!(target.len(), 32);
        assert_eq!(target.as_bytes()[0], 0x66);
        assert_eq!(target.to_hex(), SM3_ABC);
    }

    #[test]
    fn test_from_hex_case_insensitive() {
        let upper = TargetDigest::from_hex(&SM3_ABC.to_uppercase(), 32).unwrap();
        let lower = TargetDigest::from_hex(SM3_ABC, 32).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_from_hex_trims_whitespace() {
        let padded = format!("  {}\n", SM3_ABC);
        assert!(TargetDigest::from_hex(&padded, 32).is_ok());
    }

    #[test]
    fn test_from_hex_wrong_width() {
        // 30 hex characters = 15 bytes
        let short = &SM3_ABC[..30];
        assert!(matches!(
            TargetDigest::from_hex(short, 32),
            Err(SearchError::DigestLength {
                expected: 32,
                found: 15
            })
        ));
    }

    #[test]
    fn test_from_hex_non_hex_character() {
        let bad = SM3_ABC.replacen('6', "g", 1);
        assert!(matches!(
            TargetDigest::from_hex(&bad, 32),
            Err(SearchError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_hex_odd_length() {
        assert!(matches!(
            TargetDigest::from_hex("abc", 32),
            Err(SearchError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_hex_empty() {
        assert!(matches!(
            TargetDigest::from_hex("", 32),
            Err(SearchError::DigestLength { found: 0, .. })
        ));
    }
}
