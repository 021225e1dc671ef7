//! Knight moves: eight fixed jumps.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{step_moves, step_protected, KNIGHT_OFFSETS};

pub fn knight_moves(board: &Board, knight: &Piece) -> SquareSet {
    step_moves(board, knight, &KNIGHT_OFFSETS)
}

pub fn knight_protected(knight: &Piece) -> SquareSet {
    step_protected(knight, &KNIGHT_OFFSETS)
}
