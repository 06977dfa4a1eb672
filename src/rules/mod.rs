//! The rules engine boundary.
//!
//! The codec never decides legality itself. It asks a [`RulesEngine`] which
//! moves reach a square and which piece stands where, and only filters and
//! sorts what it is given.

mod standard;

pub use standard::StandardBoard;

use crate::error::RulesError;
use crate::types::{Move, PieceType, Side, Square};

/// Authoritative board state and legality.
pub trait RulesEngine {
    /// All legal moves in the current position.
    ///
    /// A promoting pawn appears once per origin and destination, as the
    /// queen promotion.
    fn legal_moves(&self) -> Vec<Move>;

    /// Legal moves whose destination is `square` (the LegalMoveSet).
    fn legal_moves_to(&self, square: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.to == square)
            .collect()
    }

    /// Type of the piece on `square`, if any.
    fn piece_type_at(&self, square: Square) -> Option<PieceType>;

    /// Side to move.
    fn turn(&self) -> Side;

    fn is_game_over(&self) -> bool;

    /// Human-readable result, once the game is over.
    fn outcome(&self) -> Option<String>;

    /// The last move played, if any.
    fn previous_move(&self) -> Option<Move>;

    /// Play a move. Fails if it is not legal.
    fn push(&mut self, mv: Move) -> Result<(), RulesError>;

    /// Back to the starting position with an empty history.
    fn reset(&mut self);

    /// The current position in FEN.
    fn fen(&self) -> String;
}
