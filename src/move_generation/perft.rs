//! Perft: exhaustive move-path enumeration for validating the generator.
//!
//! Children are produced by clone-and-apply on the public executor, so perft
//! exercises the same code paths as a real game, promotions expanded to all
//! four kinds and marker expiry included.

use std::thread;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::RuleSet;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{begin_turn, move_piece, promote, MoveOutcome, MoveRecord};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf positions `depth` plies below `board` with `side` to move.
pub fn perft(board: &Board, side: Colour, depth: u8, rules: &RuleSet) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for (child, record) in children(board, side, rules)? {
        perft_recurse(&child, &record, side.opposite(), depth, 1, rules, &mut total)?;
    }
    Ok(total)
}

/// Same as [`perft`] with one worker thread per root move.
pub fn perft_multi_threaded(
    board: &Board,
    side: Colour,
    depth: u8,
    rules: &RuleSet,
) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return perft(board, side, depth, rules);
    }

    let roots = children(board, side, rules)?;
    thread::scope(|scope| {
        let handles: Vec<_> = roots
            .iter()
            .map(|(child, record)| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(child, record, side.opposite(), depth, 1, rules, &mut local)
                        .map(|()| local)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let local = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
            total.merge(local);
        }
        Ok(total)
    })
}

/// Every position reachable in one ply, with the opponent's turn begun.
fn children(board: &Board, side: Colour, rules: &RuleSet) -> Result<Vec<(Board, MoveRecord)>, ChessErrors> {
    let mut out = Vec::with_capacity(48);
    for (piece, destinations) in all_legal_moves(board, side, rules.pin_rule) {
        for to in destinations {
            let mut child = board.clone();
            match move_piece(&mut child, piece.square, to)? {
                MoveOutcome::Applied(record) => out.push((child, record)),
                MoveOutcome::PendingPromotion(pending) => {
                    for kind in PieceKind::PROMOTIONS {
                        let mut promoted = child.clone();
                        let record = promote(&mut promoted, &pending, kind)?;
                        out.push((promoted, record));
                    }
                }
                MoveOutcome::Rejected(_) => {}
            }
        }
    }
    for (child, _) in out.iter_mut() {
        begin_turn(child, side.opposite());
    }
    Ok(out)
}

fn perft_recurse(
    board: &Board,
    record: &MoveRecord,
    side_to_move: Colour,
    search_depth: u8,
    current_depth: u8,
    rules: &RuleSet,
    counts: &mut PerftCounts,
) -> Result<(), ChessErrors> {
    if current_depth == search_depth {
        counts.nodes += 1;

        if record.captured.is_some() {
            counts.captures += 1;
        }
        if record.en_passant_capture {
            counts.en_passant += 1;
        }
        if record.castled_rook.is_some() {
            counts.castles += 1;
        }
        if record.promoted_to.is_some() {
            counts.promotions += 1;
        }
        if is_in_check(board, side_to_move) {
            counts.checks += 1;
            if !has_any_legal_move(board, side_to_move, rules.pin_rule) {
                counts.checkmates += 1;
            }
        }
        return Ok(());
    }

    for (child, child_record) in children(board, side_to_move, rules)? {
        perft_recurse(
            &child,
            &child_record,
            side_to_move.opposite(),
            search_depth,
            current_depth + 1,
            rules,
            counts,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    /// Places `(kind, id, file, rank)` pieces; anything off its home square
    /// counts as moved.
    fn setup(board: &mut Board, colour: Colour, pieces: &[(PieceKind, PieceId, i8, i8)]) {
        for &(kind, id, file, rank) in pieces {
            board.place(kind, colour, id, sq(file, rank)).unwrap();
            let home = if kind == PieceKind::Pawn {
                colour.pawn_rank()
            } else {
                colour.home_rank()
            };
            if rank != home {
                board.set_has_moved(colour, id, true).unwrap();
            }
        }
    }

    /// r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -
    fn kiwipete() -> Board {
        use PieceKind::*;
        let mut board = Board::empty();
        setup(
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
        setup(
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

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&Board::new_game(), Colour::White, 0, &RuleSet::default()).unwrap();
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_node_counts() {
        let board = Board::new_game();
        let rules = RuleSet::default();
        assert_eq!(perft(&board, Colour::White, 1, &rules).unwrap().nodes, 20);
        assert_eq!(perft(&board, Colour::White, 2, &rules).unwrap().nodes, 400);

        let depth_three = perft(&board, Colour::White, 3, &rules).unwrap();
        assert_eq!(depth_three.nodes, 8902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(depth_three.checkmates, 0);
    }

    #[test]
    fn kiwipete_matches_reference_counts() {
        let board = kiwipete();
        assert!(board.is_consistent());
        let rules = RuleSet::fide();

        let depth_one = perft(&board, Colour::White, 1, &rules).unwrap();
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&board, Colour::White, 2, &rules).unwrap();
        assert_eq!(
            depth_two,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn threaded_perft_agrees_with_single_thread() {
        let board = Board::new_game();
        let rules = RuleSet::default();
        assert_eq!(
            perft_multi_threaded(&board, Colour::White, 2, &rules).unwrap(),
            perft(&board, Colour::White, 2, &rules).unwrap()
        );
    }
}
