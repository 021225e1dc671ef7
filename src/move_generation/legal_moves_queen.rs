//! Queen moves: union of rook and bishop rays.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::{bishop_moves, bishop_protected};
use crate::move_generation::legal_moves_rook::{rook_moves, rook_protected};

pub fn queen_moves(board: &Board, queen: &Piece) -> SquareSet {
    rook_moves(board, queen) | bishop_moves(board, queen)
}

pub fn queen_protected(board: &Board, queen: &Piece) -> SquareSet {
    rook_protected(board, queen) | bishop_protected(board, queen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_in_the_corner_sees_twenty_one_squares() {
        let mut board = Board::empty();
        let h1 = Square::new(7, 0).unwrap();
        board.place(PieceKind::Queen, Colour::White, 11, h1).unwrap();
        let queen = *board.piece_at(h1).unwrap();
        assert_eq!(queen_moves(&board, &queen).len(), 21);
        assert_eq!(queen_protected(&board, &queen), queen_moves(&board, &queen));
    }
}
