//! Bishop moves: diagonal rays.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_moves, slide_protected, DIAGONAL};

pub fn bishop_moves(board: &Board, bishop: &Piece) -> SquareSet {
    slide_moves(board, bishop, &DIAGONAL)
}

pub fn bishop_protected(board: &Board, bishop: &Piece) -> SquareSet {
    slide_protected(board, bishop, &DIAGONAL)
}
