use crate::error::ProtocolViolation;
use crate::pulse::PulsePattern;
use crate::rules::RulesEngine;
use crate::types::{Bit, Move, Side};

use super::bits::{piece_code, square_code, tie_break_bit, RECAPTURE_CODE};
use super::candidates::{candidates_to, filter_by_piece, ordered_pair};

/// Encode `mv`, which is about to be played in the position held by `rules`,
/// as seen by `side`.
///
/// Groups are emitted only as deep as needed to single the move out among
/// the legal moves sharing its destination.
pub fn encode_move<R: RulesEngine + ?Sized>(
    rules: &R,
    mv: Move,
    side: Side,
) -> Result<PulsePattern, ProtocolViolation> {
    let flipped = side.is_flipped();
    let mut groups: Vec<Vec<Bit>> = Vec::with_capacity(4);

    let recapture = rules
        .previous_move()
        .is_some_and(|previous| previous.to == mv.to);
    if recapture {
        groups.push(RECAPTURE_CODE.to_vec());
    } else {
        groups.extend(square_code(mv.to, flipped).iter().map(|g| g.to_vec()));
    }

    let candidates = candidates_to(rules, mv.to)?;
    if !candidates.iter().any(|c| c.from == mv.from) {
        return Err(ProtocolViolation::UnknownMove {
            notation: mv.to_string(),
        });
    }

    if candidates.len() > 1 {
        let piece = rules
            .piece_type_at(mv.from)
            .ok_or(ProtocolViolation::EmptyOrigin { square: mv.from })?;
        groups.push(piece_code(piece).to_vec());

        let same = filter_by_piece(rules, mv.to, &candidates, piece)?;
        if same.len() > 1 {
            let [_, higher] = ordered_pair(mv.to, same)?;
            groups.push(vec![tie_break_bit(higher.from == mv.from, flipped)]);
        }
    }

    let pattern = PulsePattern::from_groups(&groups);
    log::debug!("encoded {mv} for {side} as '{pattern}'");
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardBoard;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn encode(board: &StandardBoard, m: &str, side: Side) -> String {
        encode_move(board, mv(m), side).unwrap().to_string()
    }

    #[test]
    fn test_single_candidate_is_square_only() {
        let board = StandardBoard::new();
        assert_eq!(encode(&board, "e2e4", Side::White), "100 011");
        // e4 mirrored for Black is d5: file 3, rank 4
        assert_eq!(encode(&board, "e2e4", Side::Black), "011 100");
    }

    #[test]
    fn test_piece_type_disambiguates() {
        let board = StandardBoard::new();
        assert_eq!(encode(&board, "g1f3", Side::White), "101 010 010");
        assert_eq!(encode(&board, "f2f3", Side::White), "101 010 001");
    }

    #[test]
    fn test_tie_break_between_knights() {
        // White knights on b1 and e2 both reach c3
        let board = StandardBoard::from_fen("4k3/8/8/8/8/8/4N3/1N2K3 w - - 0 1").unwrap();
        assert_eq!(encode(&board, "b1c3", Side::White), "010 010 010 0");
        assert_eq!(encode(&board, "e2c3", Side::White), "010 010 010 1");
        // flipped: c3 reads as f6 and the tie-break bit is complemented
        assert_eq!(encode(&board, "e2c3", Side::Black), "101 101 010 0");
    }

    #[test]
    fn test_recapture_emits_shortcut() {
        let mut board = StandardBoard::new();
        board.push_uci_line("e2e4 d7d5").unwrap();
        assert_eq!(encode(&board, "e4d5", Side::White), "00");

        let mut board = StandardBoard::new();
        board.push_uci_line("e2e4 c7c6 d2d4 d7d5 e4d5").unwrap();
        // pawn and queen can both take back on d5
        assert_eq!(encode(&board, "d8d5", Side::Black), "00 101");
        assert_eq!(encode(&board, "c6d5", Side::Black), "00 001");
    }

    #[test]
    fn test_unknown_move() {
        let board = StandardBoard::new();
        assert_eq!(
            encode_move(&board, mv("b1f3"), Side::White),
            Err(ProtocolViolation::UnknownMove {
                notation: "b1f3".to_string()
            })
        );
        assert!(matches!(
            encode_move(&board, mv("e2e5"), Side::White),
            Err(ProtocolViolation::NoLegalMoves { .. })
        ));
    }

    #[test]
    fn test_too_many_same_type_candidates() {
        // three white queens all reach d4
        let board = StandardBoard::from_fen("4k3/8/1Q6/8/8/8/1Q1Q4/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            encode_move(&board, mv("b2d4"), Side::White),
            Err(ProtocolViolation::TooManyCandidates { count: 3, .. })
        ));
    }

    #[test]
    fn test_underpromotion_encodes_by_origin() {
        let board = StandardBoard::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert_eq!(encode(&board, "e7e8n", Side::White), "100 111");
        assert_eq!(encode(&board, "e7e8q", Side::White), "100 111");
    }
}
