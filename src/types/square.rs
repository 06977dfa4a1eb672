//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SquareError;

/// A square on the chess board, stored as its index (a1 = 0, b1 = 1, ..., h8 = 63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a square from file and rank with bounds checking
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from an index (0-63)
    #[must_use]
    pub fn from_index(idx: u8) -> Option<Self> {
        if idx < 64 {
            Some(Square(idx))
        } else {
            None
        }
    }

    /// Wrap an index known to be in range. Only the low six bits are kept.
    #[inline]
    #[must_use]
    pub(crate) const fn from_index_masked(idx: u8) -> Self {
        Square(idx & 63)
    }

    /// Get the square's index (0-63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Rotate the square by 180 degrees (e.g., a1 <-> h8), i.e. view it from
    /// the other side of the board.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        Square(63 - self.0)
    }

    /// Apply [`Square::flip`] when `flipped` is set.
    #[inline]
    #[must_use]
    pub const fn relative(self, flipped: bool) -> Self {
        if flipped {
            self.flip()
        } else {
            self
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        Square::from_index(idx).ok_or(SquareError::IndexOutOfBounds { index: idx })
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return Err(invalid()),
        };
        Ok(Square(rank * 8 + file))
    }
}
