//! Search alphabet
//!
//! An alphabet is an ordered list of distinct symbols. Each symbol is a short
//! byte string: a single byte in byte mode, or the UTF-8 encoding of one
//! character in character mode. Symbol order defines enumeration order.

use crate::constants::{DIGITS, HEX_DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
use crate::error::SearchError;

/// Ordered set of distinct symbols
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Box<[u8]>>,
}

impl Alphabet {
    /// Build an alphabet with one symbol per character of `chars`
    pub fn from_chars(chars: &str) -> Result<Self, SearchError> {
        let mut buf = [0u8; 4];
        let symbols: Vec<Box<[u8]>> = chars
            .chars()
            .map(|c| Box::<[u8]>::from(c.encode_utf8(&mut buf).as_bytes()))
            .collect();
        Self::from_symbols(symbols)
    }

    /// Build an alphabet with one symbol per raw byte
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        let symbols: Vec<Box<[u8]>> = bytes
            .iter()
            .map(|&b| Box::<[u8]>::from([b].as_slice()))
            .collect();
        Self::from_symbols(symbols)
    }

    fn from_symbols(symbols: Vec<Box<[u8]>>) -> Result<Self, SearchError> {
        if symbols.is_empty() {
            return Err(SearchError::EmptyAlphabet);
        }

        for (index, symbol) in symbols.iter().enumerate() {
            if symbols[..index].contains(symbol) {
                return Err(SearchError::DuplicateSymbol { index });
            }
        }

        Ok(Self { symbols })
    }

    /// Number of symbols (A)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: an alphabet holds at least one symbol
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `index` in enumeration order
    #[inline]
    pub fn symbol(&self, index: usize) -> &[u8] {
        &self.symbols[index]
    }

    pub fn symbols(&self) -> impl Iterator<Item = &[u8]> {
        self.symbols.iter().map(|s| &s[..])
    }

    /// Longest symbol encoding in bytes
    pub fn max_symbol_len(&self) -> usize {
        self.symbols.iter().map(|s| s.len()).max().unwrap_or(0)
    }

    /// Whether every symbol is 7-bit ASCII
    pub fn is_ascii(&self) -> bool {
        self.symbols.iter().all(|s| s.is_ascii())
    }
}

/// Named charset presets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// `0-9`
    Digits,
    /// `a-z`
    Lower,
    /// `A-Z`
    Upper,
    /// `a-zA-Z`
    Alpha,
    /// `a-z0-9`
    Alnum,
    /// `0-9a-f`
    Hex,
    /// All printable ASCII including space
    Printable,
}

impl Charset {
    /// Characters of the preset in enumeration order
    pub fn chars(self) -> String {
        match self {
            Self::Digits => DIGITS.to_string(),
            Self::Lower => LOWERCASE.to_string(),
            Self::Upper => UPPERCASE.to_string(),
            Self::Alpha => [LOWERCASE, UPPERCASE].concat(),
            Self::Alnum => [LOWERCASE, DIGITS].concat(),
            Self::Hex => HEX_DIGITS.to_string(),
            Self::Printable => [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS].concat(),
        }
    }

    pub fn alphabet(self) -> Alphabet {
        Alphabet::from_chars(&self.chars()).expect("preset charsets are non-empty and distinct")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chars_ascii() {
        let alphabet = Alphabet::from_chars("abc").unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.symbol(0), b"a");
        assert_eq!(alphabet.symbol(2), b"c");
        assert!(alphabet.is_ascii());
    }

    #[test]
    fn test_from_chars_multibyte() {
        let alphabet = Alphabet::from_chars("aé中").unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.symbol(1), "é".as_bytes());
        assert_eq!(alphabet.symbol(2), "中".as_bytes());
        assert_eq!(alphabet.max_symbol_len(), 3);
        assert!(!alphabet.is_ascii());
    }

    #[test]
    fn test_from_bytes_extended() {
        let alphabet = Alphabet::from_bytes(&[0x00, 0x7f, 0x80, 0xff]).unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.symbol(3), &[0xff]);
        assert!(!alphabet.is_ascii());
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert!(matches!(
            Alphabet::from_chars(""),
            Err(SearchError::EmptyAlphabet)
        ));
        assert!(matches!(
            Alphabet::from_bytes(&[]),
            Err(SearchError::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        assert!(matches!(
            Alphabet::from_chars("abca"),
            Err(SearchError::DuplicateSymbol { index: 3 })
        ));
        assert!(matches!(
            Alphabet::from_bytes(&[1, 1]),
            Err(SearchError::DuplicateSymbol { index: 1 })
        ));
    }

    #[test]
    fn test_order_preserved() {
        let alphabet = Alphabet::from_chars("zyx").unwrap();
        let symbols: Vec<&[u8]> = alphabet.symbols().collect();
        assert_eq!(symbols, vec![&b"z"[..], &b"y"[..], &b"x"[..]]);
    }

    #[test]
    fn test_presets_are_valid() {
        for (preset, expected_len) in [
            (Charset::Digits, 10),
            (Charset::Lower, 26),
            (Charset::Upper, 26),
            (Charset::Alpha, 52),
            (Charset::Alnum, 36),
            (Charset::Hex, 16),
            (Charset::Printable, 95),
        ] {
            assert_eq!(preset.alphabet().len(), expected_len, "{:?}", preset);
        }
    }
}
