//! Fixed-width bit groups.

use crate::error::ProtocolViolation;
use crate::types::{Bit, PieceType, Square};

pub const SQUARE_BITS: usize = 6;
pub const PIECE_BITS: usize = 3;
pub const TIE_BREAK_BITS: usize = 1;
pub const RECAPTURE_BITS: usize = 2;

/// Stands in for the destination when a move lands where the previous one did.
pub const RECAPTURE_CODE: [Bit; RECAPTURE_BITS] = [Bit::Zero, Bit::Zero];

fn three_bits(value: u8) -> [Bit; 3] {
    [
        Bit::from(value & 0b100 != 0),
        Bit::from(value & 0b010 != 0),
        Bit::from(value & 0b001 != 0),
    ]
}

fn check_len(bits: &[Bit], expected: usize) -> Result<(), ProtocolViolation> {
    if bits.len() == expected {
        Ok(())
    } else {
        Err(ProtocolViolation::GroupLength {
            expected,
            found: bits.len(),
        })
    }
}

/// Destination code: file group then rank group, from the receiver's side.
#[must_use]
pub fn square_code(square: Square, flipped: bool) -> [[Bit; 3]; 2] {
    let square = square.relative(flipped);
    [three_bits(square.file()), three_bits(square.rank())]
}

/// Inverse of [`square_code`] over a flat 6-bit group.
pub fn square_from_bits(bits: &[Bit], flipped: bool) -> Result<Square, ProtocolViolation> {
    check_len(bits, SQUARE_BITS)?;
    let file = Bit::to_number(&bits[0..3]);
    let rank = Bit::to_number(&bits[3..6]);
    Ok(Square::from_index_masked(rank * 8 + file).relative(flipped))
}

#[must_use]
pub fn piece_code(piece: PieceType) -> [Bit; 3] {
    three_bits(piece.code())
}

pub fn piece_from_bits(bits: &[Bit]) -> Result<PieceType, ProtocolViolation> {
    check_len(bits, PIECE_BITS)?;
    let code = Bit::to_number(bits);
    PieceType::from_code(code).ok_or(ProtocolViolation::InvalidPieceCode { code })
}

/// `1` selects the higher origin square, complemented for the flipped side.
#[must_use]
pub fn tie_break_bit(higher: bool, flipped: bool) -> Bit {
    Bit::from(higher != flipped)
}

/// Index into the origin-ordered pair selected by a tie-break bit.
#[must_use]
pub fn tie_break_index(bit: Bit, flipped: bool) -> usize {
    let bit = if flipped { bit.complement() } else { bit };
    usize::from(bit.value())
}

#[must_use]
pub fn is_recapture_code(bits: &[Bit]) -> bool {
    bits == RECAPTURE_CODE
}
