//! State index to symbol mapping

use crate::error::{EncoderError, Result};

/// The 3Di symbols, in codebook order
pub const ALPHABET_3DI: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Symbol written for residues that could not be encoded
pub const MASKED_SYMBOL: char = 'X';

/// Symbols for the K codebook states plus the masked symbol
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawAlphabet", into = "RawAlphabet"))]
pub struct Alphabet {
    symbols: Vec<char>,
    masked: char,
}

/// Unchecked form of [`Alphabet`]; converting it runs the same validation as
/// [`Alphabet::new`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAlphabet {
    pub symbols: String,
    pub masked: char,
}

impl TryFrom<RawAlphabet> for Alphabet {
    type Error = EncoderError;

    fn try_from(raw: RawAlphabet) -> Result<Self> {
        Self::new(&raw.symbols, raw.masked)
    }
}

impl From<Alphabet> for RawAlphabet {
    fn from(alphabet: Alphabet) -> Self {
        Self {
            symbols: alphabet.symbols.into_iter().collect(),
            masked: alphabet.masked,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: ALPHABET_3DI.chars().collect(),
            masked: MASKED_SYMBOL,
        }
    }
}

impl Alphabet {
    /// Build an alphabet from the state symbols and the masked symbol.
    ///
    /// Symbols must be distinct so a sequence can be decoded back to states.
    pub fn new(symbols: &str, masked: char) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(EncoderError::Configuration("alphabet has no symbols".into()));
        }
        if symbols.len() > u8::MAX as usize {
            return Err(EncoderError::Configuration(format!(
                "alphabet has {} symbols, at most {} are supported",
                symbols.len(),
                u8::MAX
            )));
        }
        for (i, s) in symbols.iter().enumerate() {
            if *s == masked || symbols[..i].contains(s) {
                return Err(EncoderError::Configuration(format!(
                    "symbol '{}' appears more than once in alphabet",
                    s
                )));
            }
        }
        Ok(Self { symbols, masked })
    }

    /// Number of real states (K)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn masked_symbol(&self) -> char {
        self.masked
    }

    /// Symbol for a state index; anything past the last state is masked.
    pub fn symbol(&self, state: u8) -> char {
        self.symbols
            .get(state as usize)
            .copied()
            .unwrap_or(self.masked)
    }

    /// State index of a symbol, `None` for the masked or an unknown symbol
    pub fn state(&self, symbol: char) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|i| i as u8)
    }
}
