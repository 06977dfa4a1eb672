//! The move-encoding protocol.
//!
//! A move is identified by its destination square, then (only if several
//! legal moves share that destination) the moving piece's type, then (only
//! if two pieces of that type qualify) one tie-break bit choosing between
//! the lower and the higher origin square.
//!
//! | group       | bits | flipped for Black        |
//! |-------------|------|--------------------------|
//! | destination | 3+3  | file and rank (`7 - c`)  |
//! | recapture   | 2    | no (`00` replaces dest.) |
//! | piece type  | 3    | no                       |
//! | tie-break   | 1    | complemented             |
//!
//! Everything here is a pure function of the rules engine's answers: the
//! codec keeps no state between calls.

mod bits;
mod candidates;
mod decode;
mod encode;

pub use bits::{
    is_recapture_code, piece_code, piece_from_bits, square_code, square_from_bits,
    tie_break_bit, tie_break_index, PIECE_BITS, RECAPTURE_BITS, RECAPTURE_CODE, SQUARE_BITS,
    TIE_BREAK_BITS,
};
pub use candidates::{candidates_to, recapture_square, shortcut_is_shadowed};
pub use decode::{decode_bits, decode_pattern, DecodeStep, Decoder, Demand};
pub use encode::encode_move;
