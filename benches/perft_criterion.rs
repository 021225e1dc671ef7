use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tabula_chess::game_state::board::Board;
use tabula_chess::game_state::chess_rules::RuleSet;
use tabula_chess::game_state::chess_types::{Colour, PieceId, PieceKind, Square};
use tabula_chess::move_generation::perft::{perft, perft_multi_threaded};

struct BenchCase {
    name: &'static str,
    board: Board,
    rules: RuleSet,
    expected_nodes: &'static [u64],
}

type Placement = (PieceKind, PieceId, i8, i8);

fn place_all(board: &mut Board, colour: Colour, pieces: &[Placement]) {
    for &(kind, id, file, rank) in pieces {
        let square = Square::new(file, rank).expect("bench squares are on the board");
        board
            .place(kind, colour, id, square)
            .expect("bench position should be valid");
        let home = if kind == PieceKind::Pawn {
            colour.pawn_rank()
        } else {
            colour.home_rank()
        };
        if rank != home {
            board
                .set_has_moved(colour, id, true)
                .expect("piece was just placed");
        }
    }
}

/// r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -
fn kiwipete() -> Board {
    use PieceKind::*;
    let mut board = Board::empty();
    place_all(
        &mut board,
        Colour::White,
        &[
            (Pawn, 0, 0, 1),
            (Pawn, 1, 1, 1),
            (Pawn, 2, 2, 1),
            (Pawn, 3, 3, 4),
            (Pawn, 4, 4, 3),
            (Pawn, 5, 5, 1),
            (Pawn, 6, 6, 1),
            (Pawn, 7, 7, 1),
            (Rook, 8, 0, 0),
            (Knight, 9, 2, 2),
            (Bishop, 10, 3, 1),
            (Queen, 11, 5, 2),
            (King, 12, 4, 0),
            (Bishop, 13, 4, 1),
            (Knight, 14, 4, 4),
            (Rook, 15, 7, 0),
        ],
    );
    place_all(
        &mut board,
        Colour::Black,
        &[
            (Pawn, 0, 0, 6),
            (Pawn, 1, 1, 3),
            (Pawn, 2, 2, 6),
            (Pawn, 3, 3, 6),
            (Pawn, 4, 4, 5),
            (Pawn, 5, 5, 6),
            (Pawn, 6, 6, 5),
            (Pawn, 7, 7, 2),
            (Rook, 8, 0, 7),
            (Knight, 9, 1, 5),
            (Bishop, 10, 0, 5),
            (Queen, 11, 4, 6),
            (King, 12, 4, 7),
            (Bishop, 13, 6, 6),
            (Knight, 14, 5, 5),
            (Rook, 15, 7, 7),
        ],
    );
    board
}

fn selected_cases() -> Vec<BenchCase> {
    let standard = matches!(
        std::env::var("TABULA_BENCH_SUITE"),
        Ok(value) if value.eq_ignore_ascii_case("standard")
    );
    vec![
        BenchCase {
            name: "startpos",
            board: Board::new_game(),
            rules: RuleSet::default(),
            expected_nodes: if standard {
                &[20, 400, 8902, 197_281]
            } else {
                &[20, 400, 8902]
            },
        },
        BenchCase {
            name: "kiwipete",
            board: kiwipete(),
            rules: RuleSet::fide(),
            expected_nodes: if standard { &[48, 2039, 97_862] } else { &[48, 2039] },
        },
    ]
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&case.board, Colour::White, depth, &case.rules).expect("perft should run");
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&case.board), Colour::White, black_box(depth), &case.rules)
                            .expect("perft benchmark run should succeed");
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }

        let deepest = case.expected_nodes.len() as u8;
        group.bench_function(format!("{}_d{}_threaded", case.name, deepest), |b| {
            b.iter(|| {
                perft_multi_threaded(black_box(&case.board), Colour::White, deepest, &case.rules)
                    .expect("threaded perft should succeed")
                    .nodes
            });
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
