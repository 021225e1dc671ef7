//! Rook moves: orthogonal rays.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_moves, slide_protected, ORTHOGONAL};

pub fn rook_moves(board: &Board, rook: &Piece) -> SquareSet {
    slide_moves(board, rook, &ORTHOGONAL)
}

pub fn rook_protected(board: &Board, rook: &Piece) -> SquareSet {
    slide_protected(board, rook, &ORTHOGONAL)
}
