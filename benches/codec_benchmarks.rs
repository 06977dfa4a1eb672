//! Benchmarks for move encoding and decoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use haptic_chess::codec::{decode_bits, decode_pattern, encode_move};
use haptic_chess::{RulesEngine, Side, StandardBoard};

const POSITIONS: [(&str, &str); 2] = [
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_all_moves");
    for (name, fen) in POSITIONS {
        let board = StandardBoard::from_fen(fen).unwrap();
        let moves = board.legal_moves();
        group.bench_with_input(BenchmarkId::from_parameter(name), &moves, |b, moves| {
            b.iter(|| {
                for mv in moves {
                    let _ = black_box(encode_move(&board, *mv, Side::White));
                }
            })
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_all_moves");
    for (name, fen) in POSITIONS {
        let board = StandardBoard::from_fen(fen).unwrap();
        let patterns: Vec<_> = board
            .legal_moves()
            .into_iter()
            .filter_map(|mv| encode_move(&board, mv, Side::Black).ok())
            .collect();

        group.bench_with_input(BenchmarkId::new("pattern", name), &patterns, |b, patterns| {
            b.iter(|| {
                for pattern in patterns {
                    let _ = black_box(decode_pattern(&board, Side::Black, pattern));
                }
            })
        });

        let bits: Vec<_> = patterns.iter().map(|p| p.bits()).collect();
        group.bench_with_input(BenchmarkId::new("bits", name), &bits, |b, bits| {
            b.iter(|| {
                for code in bits {
                    let _ = black_box(decode_bits(&board, Side::Black, code));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
