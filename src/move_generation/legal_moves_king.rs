//! King moves and castling.
//!
//! The opponent's protected-square union is computed once per call and shared
//! by the step filter and every castling gate.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    CASTLE_KING_SIDE_DELTA, CASTLE_QUEEN_SIDE_DELTA, KING_SIDE_ROOK_FILES, KING_START_FILE,
    QUEEN_SIDE_ROOK_FILES,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::protected_union;
use crate::move_generation::legal_move_shared::{step_moves, step_protected, KING_OFFSETS};

pub fn king_moves(board: &Board, king: &Piece) -> SquareSet {
    let enemy_cover = protected_union(board, king.colour.opposite());

    let mut out: SquareSet = step_moves(board, king, &KING_OFFSETS)
        .iter()
        .filter(|&square| !enemy_cover.contains(square))
        .collect();
    out |= castling_moves(board, king, enemy_cover);
    out
}

pub fn king_protected(king: &Piece) -> SquareSet {
    step_protected(king, &KING_OFFSETS)
}

/// The rook a two-file king move from `king_square` by `file_delta` brings
/// along, with the rook's destination.
pub fn castling_rook(
    board: &Board,
    colour: Colour,
    king_square: Square,
    file_delta: i8,
) -> Option<(Piece, Square)> {
    let (rook_id, (rook_from_file, rook_to_file)) = if file_delta < 0 {
        (QUEEN_SIDE_ROOK_ID, QUEEN_SIDE_ROOK_FILES)
    } else {
        (KING_SIDE_ROOK_ID, KING_SIDE_ROOK_FILES)
    };
    let rook = *board.piece(colour, rook_id)?;
    if rook.kind != PieceKind::Rook
        || rook.square.rank() != king_square.rank()
        || rook.square.file() != rook_from_file
    {
        return None;
    }
    let destination = Square::new(rook_to_file, king_square.rank()).ok()?;
    Some((rook, destination))
}

fn castling_moves(board: &Board, king: &Piece, enemy_cover: SquareSet) -> SquareSet {
    let mut out = SquareSet::EMPTY;
    let on_start_square =
        king.square.file() == KING_START_FILE && king.square.rank() == king.colour.home_rank();
    if king.has_moved || !on_start_square || enemy_cover.contains(king.square) {
        return out;
    }

    for file_delta in [CASTLE_QUEEN_SIDE_DELTA, CASTLE_KING_SIDE_DELTA] {
        let Some((rook, _)) = castling_rook(board, king.colour, king.square, file_delta) else {
            continue;
        };
        if rook.has_moved {
            continue;
        }

        let step = file_delta.signum();
        let mut path_clear = true;
        let mut file = king.square.file() + step;
        while file != rook.square.file() {
            match Square::new(file, king.square.rank()) {
                Ok(between) if board.is_vacant(between) => {}
                _ => {
                    path_clear = false;
                    break;
                }
            }
            file += step;
        }
        if !path_clear {
            continue;
        }

        let traversed_safe = (1..=file_delta.abs()).all(|distance| {
            king.square
                .offset(step * distance, 0)
                .is_some_and(|square| !enemy_cover.contains(square))
        });
        if !traversed_safe {
            continue;
        }

        if let Some(destination) = king.square.offset(file_delta, 0) {
            out.insert(destination);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn castling_board() -> Board {
        let mut board = Board::empty();
        board.place(PieceKind::King, Colour::White, KING_ID, sq(4, 0)).unwrap();
        board.place(PieceKind::Rook, Colour::White, 8, sq(0, 0)).unwrap();
        board.place(PieceKind::Rook, Colour::White, 15, sq(7, 0)).unwrap();
        board.place(PieceKind::King, Colour::Black, KING_ID, sq(4, 7)).unwrap();
        board
    }

    fn white_king(board: &Board) -> Piece {
        *board.king(Colour::White).unwrap()
    }

    #[test]
    fn both_castles_available_on_clear_rank() {
        let board = castling_board();
        let moves = king_moves(&board, &white_king(&board));
        assert!(moves.contains(sq(2, 0)));
        assert!(moves.contains(sq(6, 0)));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn moved_king_or_rook_cannot_castle() {
        let mut board = castling_board();
        board.set_has_moved(Colour::White, 15, true).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(moves.contains(sq(2, 0)));
        assert!(!moves.contains(sq(6, 0)));

        board.set_has_moved(Colour::White, KING_ID, true).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(2, 0)));
    }

    #[test]
    fn blocked_or_missing_rook_prevents_castling() {
        let mut board = castling_board();
        board.place(PieceKind::Knight, Colour::White, 9, sq(1, 0)).unwrap();
        board.set_slot(Colour::White, 15, None);
        board.set_cell(sq(7, 0), None);
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(2, 0)));
        assert!(!moves.contains(sq(6, 0)));
    }

    #[test]
    fn attacked_transit_square_prevents_castling() {
        let mut board = castling_board();
        board.place(PieceKind::Rook, Colour::Black, 8, sq(5, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(6, 0)));
        assert!(moves.contains(sq(2, 0)));
        assert!(!moves.contains(sq(5, 0)));
    }

    #[test]
    fn attacked_destination_prevents_that_castle_only() {
        let mut board = castling_board();
        board.place(PieceKind::Rook, Colour::Black, 15, sq(6, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(moves.contains(sq(5, 0)));
        assert!(!moves.contains(sq(6, 0)));
        assert!(moves.contains(sq(2, 0)));

        let mut board = castling_board();
        board.place(PieceKind::Rook, Colour::Black, 8, sq(2, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(moves.contains(sq(3, 0)));
        assert!(!moves.contains(sq(2, 0)));
        assert!(moves.contains(sq(6, 0)));
    }

    #[test]
    fn attacked_b_file_square_does_not_block_long_castle() {
        let mut board = castling_board();
        board.place(PieceKind::Rook, Colour::Black, 8, sq(1, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(moves.contains(sq(2, 0)));
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut board = castling_board();
        board.place(PieceKind::Rook, Colour::Black, 8, sq(4, 5)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(2, 0)));
        assert!(!moves.contains(sq(6, 0)));
    }

    #[test]
    fn king_cannot_retreat_along_checking_line() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Colour::White, KING_ID, sq(4, 3)).unwrap();
        board.place(PieceKind::Rook, Colour::Black, 8, sq(0, 3)).unwrap();
        board.place(PieceKind::King, Colour::Black, KING_ID, sq(7, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(5, 3)));
        assert!(!moves.contains(sq(3, 3)));
        assert!(moves.contains(sq(4, 4)));
    }

    #[test]
    fn king_cannot_capture_a_defended_piece() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Colour::White, KING_ID, sq(4, 3)).unwrap();
        board.place(PieceKind::Pawn, Colour::Black, 4, sq(4, 4)).unwrap();
        board.place(PieceKind::Knight, Colour::Black, 9, sq(3, 6)).unwrap();
        board.place(PieceKind::King, Colour::Black, KING_ID, sq(7, 7)).unwrap();
        let moves = king_moves(&board, &white_king(&board));
        assert!(!moves.contains(sq(4, 4)));
    }
}
