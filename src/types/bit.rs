//! Input symbols.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single binary input symbol, as produced by one button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Parse a bit from `'0'` or `'1'`
    #[must_use]
    pub fn from_char(c: char) -> Option<Bit> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// The other symbol.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// Read a group of bits as an unsigned big-endian number.
    #[must_use]
    pub fn to_number(bits: &[Bit]) -> u8 {
        bits.iter().fold(0, |acc, bit| (acc << 1) | bit.value())
    }

    /// Parse a string of `0`/`1` characters, ignoring spaces.
    ///
    /// Returns `None` if any other character is present.
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Vec<Bit>> {
        s.chars()
            .filter(|c| *c != ' ')
            .map(Bit::from_char)
            .collect()
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
