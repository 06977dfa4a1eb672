//! Coordinate moves.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceType;
use super::square::Square;
use crate::error::MoveParseError;

/// A move in coordinate notation: origin, destination and an optional
/// promotion piece. Castling is the king's two-square move (`e1g1`).
///
/// Everything else about a move (captures, en passant, castling rights) is
/// the rules engine's business.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(from: Square, to: Square, piece: PieceType) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Parse a move in UCI format (e.g., "e2e4", "e7e8q").
    pub fn from_uci(s: &str) -> Result<Self, MoveParseError> {
        s.parse()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::InvalidLength { len: s.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: s.to_string(),
        };
        let from: Square = s[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid_square())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c) {
                Some(piece) if !matches!(piece, PieceType::Pawn | PieceType::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_move() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv.from.to_string(), "e2");
        assert_eq!(mv.to.to_string(), "e4");
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_parse_promotion() {
        let mv = Move::from_uci("e7e8q").unwrap();
        assert_eq!(mv.promotion, Some(PieceType::Queen));
        assert_eq!(mv.to_string(), "e7e8q");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Move::from_uci("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            Move::from_uci("z2e4"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert_eq!(
            Move::from_uci("e7e8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
    }
}
