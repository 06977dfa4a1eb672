//! Standard chess rules backed by `shakmaty`.

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Outcome, Position, Role};

use super::RulesEngine;
use crate::error::RulesError;
use crate::types::{Move, PieceType, Side, Square};

fn to_square(sq: shakmaty::Square) -> Square {
    Square::from_index_masked(sq as u8)
}

/// Half-moves without a capture or pawn move after which the game is drawn.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position after which the game is drawn.
const FIVEFOLD: usize = 5;

fn from_square(sq: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(sq.index()))
}

fn to_piece_type(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

fn from_piece_type(piece: PieceType) -> Role {
    match piece {
        PieceType::Pawn => Role::Pawn,
        PieceType::Knight => Role::Knight,
        PieceType::Bishop => Role::Bishop,
        PieceType::Rook => Role::Rook,
        PieceType::Queen => Role::Queen,
        PieceType::King => Role::King,
    }
}

/// Coordinate form of a legal move, castling as the king's step.
fn to_move(mv: &shakmaty::Move) -> Option<Move> {
    match mv.to_uci(CastlingMode::Standard) {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => Some(Move {
            from: to_square(from),
            to: to_square(to),
            promotion: promotion.map(to_piece_type),
        }),
        _ => None,
    }
}

fn position_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

/// A standard game from the initial position (or a FEN), with move history.
///
/// Besides checkmate, stalemate and insufficient material, the game ends on
/// the seventy-five-move rule and on fivefold repetition.
#[derive(Debug, Clone)]
pub struct StandardBoard {
    position: Chess,
    history: Vec<Move>,
    /// Key of every position reached, the starting one included
    keys: Vec<Zobrist64>,
}

impl Default for StandardBoard {
    fn default() -> Self {
        Self::with_position(Chess::default())
    }
}

impl StandardBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_position(position: Chess) -> Self {
        let keys = vec![position_key(&position)];
        StandardBoard {
            position,
            history: Vec::new(),
            keys,
        }
    }

    /// Start from an arbitrary position. History starts empty.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |message: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            message,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::with_position(position))
    }

    /// Moves played since construction or the last reset.
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Play a sequence of UCI moves.
    pub fn push_uci_line(&mut self, line: &str) -> Result<(), RulesError> {
        for notation in line.split_whitespace() {
            let mv = Move::from_uci(notation).map_err(|_| RulesError::IllegalMove {
                notation: notation.to_string(),
            })?;
            self.push(mv)?;
        }
        Ok(())
    }

    /// How often the current position has occurred so far.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        match self.keys.last() {
            Some(current) => self.keys.iter().filter(|key| *key == current).count(),
            None => 0,
        }
    }

    fn is_seventy_five_move_draw(&self) -> bool {
        self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES && !self.position.is_checkmate()
    }

    fn is_fivefold_repetition(&self) -> bool {
        self.repetitions() >= FIVEFOLD
    }

    fn resolve(&self, mv: Move) -> Option<shakmaty::Move> {
        let uci = UciMove::Normal {
            from: from_square(mv.from),
            to: from_square(mv.to),
            promotion: mv.promotion.map(from_piece_type),
        };
        uci.to_move(&self.position).ok()
    }
}

impl RulesEngine for StandardBoard {
    fn legal_moves(&self) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter(|mv| matches!(mv.promotion(), None | Some(Role::Queen)))
            .filter_map(to_move)
            .collect()
    }

    fn piece_type_at(&self, square: Square) -> Option<PieceType> {
        self.position
            .board()
            .role_at(from_square(square))
            .map(to_piece_type)
    }

    fn turn(&self) -> Side {
        match self.position.turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    fn is_game_over(&self) -> bool {
        self.position.is_game_over()
            || self.is_seventy_five_move_draw()
            || self.is_fivefold_repetition()
    }

    fn outcome(&self) -> Option<String> {
        let (outcome, reason) = if let Some(outcome) = self.position.outcome() {
            let reason = if self.position.is_checkmate() {
                "checkmate"
            } else if self.position.is_stalemate() {
                "stalemate"
            } else if self.position.is_insufficient_material() {
                "insufficient material"
            } else {
                "game over"
            };
            (outcome, reason)
        } else if self.is_seventy_five_move_draw() {
            (Outcome::Draw, "seventy-five-move rule")
        } else if self.is_fivefold_repetition() {
            (Outcome::Draw, "fivefold repetition")
        } else {
            return None;
        };
        let result = match outcome {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        };
        Some(format!("{result} ({reason})"))
    }

    fn previous_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    fn push(&mut self, mv: Move) -> Result<(), RulesError> {
        let resolved = self.resolve(mv).ok_or_else(|| RulesError::IllegalMove {
            notation: mv.to_string(),
        })?;
        self.position.play_unchecked(&resolved);
        self.history.push(mv);
        self.keys.push(position_key(&self.position));
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }
}
