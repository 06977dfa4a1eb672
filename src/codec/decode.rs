//! Incremental decoding.
//!
//! [`Decoder`] does no I/O: it says how many bits it needs next, and the
//! caller feeds exactly that many. The game loop drives it from the bit
//! buffer, tests drive it from slices.

use crate::error::ProtocolViolation;
use crate::pulse::PulsePattern;
use crate::rules::RulesEngine;
use crate::types::{Bit, Move, Side, Square};

use super::bits::{
    is_recapture_code, piece_from_bits, square_from_bits, tie_break_index, PIECE_BITS,
    RECAPTURE_BITS, SQUARE_BITS, TIE_BREAK_BITS,
};
use super::candidates::{
    candidates_to, filter_by_piece, ordered_pair, recapture_square, shortcut_is_shadowed,
};

/// The next read the decoder wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub bits: usize,
    /// The move is not yet determined by what was read so far. The caller
    /// should prompt for more input before waiting.
    pub ambiguous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    Need(Demand),
    Decoded(Move),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    /// Two bits that are either the recapture shortcut or the start of a square
    Prefix { recapture: Square },
    /// The rest of a literal destination; `read` holds any prefix bits
    Square { read: Vec<Bit> },
    Piece { square: Square, candidates: Vec<Move> },
    TieBreak { pair: [Move; 2] },
    Done(Move),
}

/// Decoder for one move, bound to a position and a side.
#[derive(Debug)]
pub struct Decoder<'a, R: ?Sized> {
    rules: &'a R,
    flipped: bool,
    stage: Stage,
}

impl<'a, R: RulesEngine + ?Sized> Decoder<'a, R> {
    #[must_use]
    pub fn new(rules: &'a R, side: Side) -> Self {
        let flipped = side.is_flipped();
        let stage = match recapture_square(rules) {
            Some(recapture) if !shortcut_is_shadowed(rules, flipped) => {
                Stage::Prefix { recapture }
            }
            _ => Stage::Square { read: Vec::new() },
        };
        Decoder {
            rules,
            flipped,
            stage,
        }
    }

    /// What the decoder needs next, or the move once it is known.
    #[must_use]
    pub fn step(&self) -> DecodeStep {
        let need = |bits, ambiguous| DecodeStep::Need(Demand { bits, ambiguous });
        match &self.stage {
            Stage::Prefix { .. } => need(RECAPTURE_BITS, false),
            Stage::Square { read } => need(SQUARE_BITS - read.len(), false),
            Stage::Piece { .. } => need(PIECE_BITS, true),
            Stage::TieBreak { .. } => need(TIE_BREAK_BITS, true),
            Stage::Done(mv) => DecodeStep::Decoded(*mv),
        }
    }

    /// Supply exactly the number of bits the last [`Decoder::step`] asked for.
    ///
    /// On error the decoder is left where it was.
    pub fn feed(&mut self, bits: &[Bit]) -> Result<DecodeStep, ProtocolViolation> {
        let expected = match self.step() {
            DecodeStep::Need(demand) => demand.bits,
            done @ DecodeStep::Decoded(_) => return Ok(done),
        };
        if bits.len() != expected {
            return Err(ProtocolViolation::GroupLength {
                expected,
                found: bits.len(),
            });
        }

        let next = match &self.stage {
            Stage::Prefix { recapture } => {
                if is_recapture_code(bits) {
                    log::debug!("recapture shortcut selects {recapture}");
                    self.at_square(*recapture)?
                } else {
                    Stage::Square {
                        read: bits.to_vec(),
                    }
                }
            }
            Stage::Square { read } => {
                let code = [read.as_slice(), bits].concat();
                let square = square_from_bits(&code, self.flipped)?;
                self.at_square(square)?
            }
            Stage::Piece { square, candidates } => {
                let piece = piece_from_bits(bits)?;
                let mut same = filter_by_piece(self.rules, *square, candidates, piece)?;
                log::debug!("piece {piece} leaves {} candidate(s) at {square}", same.len());
                if same.len() == 1 {
                    Stage::Done(same.remove(0))
                } else {
                    Stage::TieBreak {
                        pair: ordered_pair(*square, same)?,
                    }
                }
            }
            Stage::TieBreak { pair } => Stage::Done(pair[tie_break_index(bits[0], self.flipped)]),
            Stage::Done(mv) => Stage::Done(*mv),
        };
        self.stage = next;
        Ok(self.step())
    }

    fn at_square(&self, square: Square) -> Result<Stage, ProtocolViolation> {
        let candidates = candidates_to(self.rules, square)?;
        log::debug!("{} candidate(s) reach {square}", candidates.len());
        Ok(match candidates.as_slice() {
            [only] => Stage::Done(*only),
            _ => Stage::Piece { square, candidates },
        })
    }
}

/// Decode one move from the front of `bits`.
///
/// Returns the move and the number of bits it used, or `None` if `bits` ends
/// before the move is determined.
pub fn decode_bits<R: RulesEngine + ?Sized>(
    rules: &R,
    side: Side,
    bits: &[Bit],
) -> Result<Option<(Move, usize)>, ProtocolViolation> {
    let mut decoder = Decoder::new(rules, side);
    let mut used = 0;
    let mut step = decoder.step();
    loop {
        match step {
            DecodeStep::Decoded(mv) => return Ok(Some((mv, used))),
            DecodeStep::Need(demand) => {
                let Some(chunk) = bits.get(used..used + demand.bits) else {
                    return Ok(None);
                };
                used += demand.bits;
                step = decoder.feed(chunk)?;
            }
        }
    }
}

/// Decode a complete pattern as produced by [`super::encode_move`].
///
/// Group boundaries are explicit here, so a leading two-symbol group is always
/// the recapture shortcut.
pub fn decode_pattern<R: RulesEngine + ?Sized>(
    rules: &R,
    side: Side,
    pattern: &PulsePattern,
) -> Result<Move, ProtocolViolation> {
    let flipped = side.is_flipped();
    let groups: Vec<Vec<Bit>> = pattern.groups().collect();
    let malformed = || ProtocolViolation::MalformedPattern {
        pattern: pattern.to_string(),
    };

    let (square, rest) = match groups.as_slice() {
        [first, rest @ ..] if is_recapture_code(first) => {
            let previous = rules.previous_move().ok_or_else(malformed)?;
            (previous.to, rest)
        }
        [file, rank, rest @ ..] if file.len() == 3 && rank.len() == 3 => {
            (square_from_bits(&[file.as_slice(), rank.as_slice()].concat(), flipped)?, rest)
        }
        _ => return Err(malformed()),
    };

    let candidates = candidates_to(rules, square)?;
    if candidates.len() == 1 {
        return match rest {
            [] => Ok(candidates[0]),
            _ => Err(malformed()),
        };
    }

    let [piece_group, rest @ ..] = rest else {
        return Err(malformed());
    };
    let piece = piece_from_bits(piece_group)?;
    let same = filter_by_piece(rules, square, &candidates, piece)?;
    if same.len() == 1 {
        return match rest {
            [] => Ok(same[0]),
            _ => Err(malformed()),
        };
    }

    let pair = ordered_pair(square, same)?;
    match rest {
        [tie_break] if tie_break.len() == TIE_BREAK_BITS => {
            Ok(pair[tie_break_index(tie_break[0], flipped)])
        }
        _ => Err(malformed()),
    }
}
