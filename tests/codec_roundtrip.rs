//! Property-based tests over random legal games.

use haptic_chess::codec::{decode_bits, decode_pattern, encode_move, shortcut_is_shadowed};
use haptic_chess::{Bit, ProtocolViolation, PulsePattern, RulesEngine, Side, StandardBoard};
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy to generate a random game length
fn ply_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play `plies` random legal moves from the start position.
fn random_game(seed: u64, plies: usize) -> StandardBoard {
    let mut board = StandardBoard::new();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..plies {
        let moves = board.legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        board.push(*mv).unwrap();
    }
    board
}

fn group_lengths(pattern: &PulsePattern) -> Vec<usize> {
    pattern.groups().map(|g| g.len()).collect()
}

fn uses_shortcut(pattern: &PulsePattern) -> bool {
    pattern.groups().next().is_some_and(|g| g == [Bit::Zero, Bit::Zero])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: decoding an encoded pattern gives back the move, for both sides
    #[test]
    fn prop_pattern_roundtrip(seed in seed_strategy(), plies in ply_count_strategy()) {
        let board = random_game(seed, plies);
        for mv in board.legal_moves() {
            for side in [Side::White, Side::Black] {
                let pattern = match encode_move(&board, mv, side) {
                    Ok(pattern) => pattern,
                    Err(ProtocolViolation::TooManyCandidates { .. }) => continue,
                    Err(e) => panic!("{mv} in {}: {e}", board.fen()),
                };
                prop_assert_eq!(decode_pattern(&board, side, &pattern), Ok(mv));
            }
        }
    }

    /// Property: the bit stream decodes to the move and consumes exactly the
    /// encoded bits, unless the shortcut is shadowed by a literal destination
    #[test]
    fn prop_bit_roundtrip(seed in seed_strategy(), plies in ply_count_strategy()) {
        let board = random_game(seed, plies);
        for mv in board.legal_moves() {
            for side in [Side::White, Side::Black] {
                let Ok(pattern) = encode_move(&board, mv, side) else {
                    continue;
                };
                if uses_shortcut(&pattern) && shortcut_is_shadowed(&board, side.is_flipped()) {
                    continue;
                }
                let mut bits = pattern.bits();
                let used = bits.len();
                // trailing input belongs to the next move and must be left alone
                bits.extend([Bit::One, Bit::Zero]);
                prop_assert_eq!(decode_bits(&board, side, &bits), Ok(Some((mv, used))));
            }
        }
    }

    /// Property: group lengths are a destination (6 or 2), then 3, then 1
    #[test]
    fn prop_group_lengths(seed in seed_strategy(), plies in ply_count_strategy()) {
        let board = random_game(seed, plies);
        for mv in board.legal_moves() {
            let Ok(pattern) = encode_move(&board, mv, Side::White) else {
                continue;
            };
            let lengths = group_lengths(&pattern);
            let valid = [
                vec![3, 3],
                vec![3, 3, 3],
                vec![3, 3, 3, 1],
                vec![2],
                vec![2, 3],
                vec![2, 3, 1],
            ];
            prop_assert!(valid.contains(&lengths), "{} -> {}", mv, pattern);
            prop_assert_eq!(pattern.payload_len(), lengths.iter().sum::<usize>());
        }
    }

    /// Property: Black's encoding of a move is White's encoding of the mirrored
    /// destination, with the tie-break bit complemented
    #[test]
    fn prop_flip_symmetry(seed in seed_strategy(), plies in ply_count_strategy()) {
        let board = random_game(seed, plies);
        for mv in board.legal_moves() {
            let (Ok(white), Ok(black)) = (
                encode_move(&board, mv, Side::White),
                encode_move(&board, mv, Side::Black),
            ) else {
                continue;
            };
            let white: Vec<Vec<Bit>> = white.groups().collect();
            let black: Vec<Vec<Bit>> = black.groups().collect();
            prop_assert_eq!(white.len(), black.len());
            let shortcut = white[0].len() == 2;
            for (i, (w, b)) in white.iter().zip(&black).enumerate() {
                let literal_square = !shortcut && i < 2;
                let tie_break = w.len() == 1;
                if literal_square || tie_break {
                    let complemented: Vec<Bit> = w.iter().map(|bit| bit.complement()).collect();
                    prop_assert_eq!(b, &complemented);
                } else {
                    prop_assert_eq!(b, w);
                }
            }
        }
    }
}

#[test]
fn test_underpromotion_decodes_as_queen() {
    let board = StandardBoard::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let pattern = encode_move(&board, "e7e8r".parse().unwrap(), Side::White).unwrap();
    assert_eq!(
        decode_pattern(&board, Side::White, &pattern),
        Ok("e7e8q".parse().unwrap())
    );
}
