//! Candidate filtering shared by encode and decode.

use crate::error::ProtocolViolation;
use crate::rules::RulesEngine;
use crate::types::{Move, PieceType, Square};

/// The LegalMoveSet for `square`: one move per origin, ordered by origin.
///
/// Several moves from the same origin (promotion choices) collapse into one,
/// preferring the queen promotion.
pub fn candidates_to<R: RulesEngine + ?Sized>(
    rules: &R,
    square: Square,
) -> Result<Vec<Move>, ProtocolViolation> {
    let mut candidates = rules.legal_moves_to(square);
    candidates.sort_by_key(|mv| (mv.from, mv.promotion != Some(PieceType::Queen)));
    candidates.dedup_by_key(|mv| mv.from);
    if candidates.is_empty() {
        return Err(ProtocolViolation::NoLegalMoves { square });
    }
    Ok(candidates)
}

/// Candidates moved by a piece of type `piece`. Never empty on success.
pub(crate) fn filter_by_piece<R: RulesEngine + ?Sized>(
    rules: &R,
    square: Square,
    candidates: &[Move],
    piece: PieceType,
) -> Result<Vec<Move>, ProtocolViolation> {
    let same: Vec<Move> = candidates
        .iter()
        .filter(|mv| rules.piece_type_at(mv.from) == Some(piece))
        .copied()
        .collect();
    if same.is_empty() {
        return Err(ProtocolViolation::NoMatchingPiece { square, piece });
    }
    Ok(same)
}

/// The two remaining candidates, lower origin first.
///
/// Two same-type pieces reaching one square is the most the protocol can
/// tell apart; anything more is a violation.
pub(crate) fn ordered_pair(
    square: Square,
    mut candidates: Vec<Move>,
) -> Result<[Move; 2], ProtocolViolation> {
    candidates.sort_by_key(|mv| mv.from);
    match candidates.as_slice() {
        [lower, higher] => Ok([*lower, *higher]),
        _ => Err(ProtocolViolation::TooManyCandidates {
            square,
            count: candidates.len(),
        }),
    }
}

/// The previous move's destination, if some legal move can land there now.
pub fn recapture_square<R: RulesEngine + ?Sized>(rules: &R) -> Option<Square> {
    let previous = rules.previous_move()?;
    if rules.legal_moves_to(previous.to).is_empty() {
        None
    } else {
        Some(previous.to)
    }
}

/// Whether the `00` shortcut would collide with a literal destination: some
/// legal destination's code, the recapture square's included, starts with
/// `00` from this side's view.
pub fn shortcut_is_shadowed<R: RulesEngine + ?Sized>(rules: &R, flipped: bool) -> bool {
    rules
        .legal_moves()
        .iter()
        .any(|mv| mv.to.relative(flipped).file() < 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardBoard;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_candidates_sorted_by_origin() {
        let board = StandardBoard::new();
        let c = candidates_to(&board, sq("f3")).unwrap();
        assert_eq!(c, vec![mv("g1f3"), mv("f2f3")]);
        assert!(c[0].from < c[1].from);
    }

    #[test]
    fn test_no_candidates_is_violation() {
        let board = StandardBoard::new();
        assert_eq!(
            candidates_to(&board, sq("e5")),
            Err(ProtocolViolation::NoLegalMoves { square: sq("e5") })
        );
    }

    #[test]
    fn test_filter_by_piece() {
        let board = StandardBoard::new();
        let c = candidates_to(&board, sq("f3")).unwrap();
        assert_eq!(
            filter_by_piece(&board, sq("f3"), &c, PieceType::Knight).unwrap(),
            vec![mv("g1f3")]
        );
        assert_eq!(
            filter_by_piece(&board, sq("f3"), &c, PieceType::Queen),
            Err(ProtocolViolation::NoMatchingPiece {
                square: sq("f3"),
                piece: PieceType::Queen
            })
        );
    }

    #[test]
    fn test_ordered_pair_bound() {
        let pair = ordered_pair(sq("c3"), vec![mv("d2c3"), mv("b1c3")]).unwrap();
        assert_eq!(pair, [mv("b1c3"), mv("d2c3")]);
        assert_eq!(
            ordered_pair(sq("c3"), vec![mv("d2c3"), mv("b1c3"), mv("a2c3")]),
            Err(ProtocolViolation::TooManyCandidates {
                square: sq("c3"),
                count: 3
            })
        );
    }

    #[test]
    fn test_recapture_square() {
        let mut board = StandardBoard::new();
        assert_eq!(recapture_square(&board), None);
        board.push_uci_line("e2e4 d7d5").unwrap();
        assert_eq!(recapture_square(&board), Some(sq("d5")));
        board.push_uci_line("b1c3").unwrap();
        assert_eq!(recapture_square(&board), None);
    }
}
