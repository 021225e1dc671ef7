//! Pawn moves.
//!
//! The pawn is where candidate moves and protected squares diverge most: it
//! moves straight but only protects its two forward diagonals, and those
//! diagonals are protected whether or not anything stands on them.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn pawn_moves(board: &Board, pawn: &Piece) -> SquareSet {
    let direction = pawn.colour.pawn_direction();
    let mut out = SquareSet::EMPTY;

    if let Some(one_step) = pawn.square.offset(0, direction) {
        if board.is_vacant(one_step) {
            out.insert(one_step);
            if pawn.square.rank() == pawn.colour.pawn_rank() {
                if let Some(two_step) = one_step.offset(0, direction) {
                    if board.is_vacant(two_step) {
                        out.insert(two_step);
                    }
                }
            }
        }
    }

    for target in pawn_protected(pawn) {
        let capturable = match board.occupant(target) {
            Some(Occupant::Piece { colour, .. }) => colour != pawn.colour,
            Some(Occupant::Marker(colour)) => colour != pawn.colour,
            None => false,
        };
        if capturable {
            out.insert(target);
        }
    }

    out
}

pub fn pawn_protected(pawn: &Piece) -> SquareSet {
    let direction = pawn.colour.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(|d_file| pawn.square.offset(d_file, direction))
        .collect()
}

#[inline]
pub fn is_double_step(from: Square, to: Square) -> bool {
    from.file() == to.file() && (to.rank() - from.rank()).abs() == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn starting_pawn_has_single_and_double_step() {
        let board = Board::new_game();
        let pawn = *board.piece_at(sq(4, 1)).unwrap();
        let moves = pawn_moves(&board, &pawn);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(sq(4, 2)));
        assert!(moves.contains(sq(4, 3)));
    }

    #[test]
    fn blocked_pawn_cannot_step_or_jump() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Colour::White, 4, sq(4, 1)).unwrap();
        board.place(PieceKind::Knight, Colour::Black, 9, sq(4, 2)).unwrap();
        let pawn = *board.piece_at(sq(4, 1)).unwrap();
        assert!(pawn_moves(&board, &pawn).is_empty());
    }

    #[test]
    fn blocker_on_fourth_rank_leaves_single_step() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Colour::White, 4, sq(4, 1)).unwrap();
        board.place(PieceKind::Knight, Colour::Black, 9, sq(4, 3)).unwrap();
        let pawn = *board.piece_at(sq(4, 1)).unwrap();
        let moves = pawn_moves(&board, &pawn);
        assert_eq!(moves.iter().collect::<Vec<_>>(), vec![sq(4, 2)]);
    }

    #[test]
    fn diagonals_are_protected_even_when_empty() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Colour::Black, 3, sq(3, 4)).unwrap();
        board.place(PieceKind::Rook, Colour::White, 8, sq(2, 3)).unwrap();
        let pawn = *board.piece_at(sq(3, 4)).unwrap();

        let moves = pawn_moves(&board, &pawn);
        assert!(moves.contains(sq(2, 3)));
        assert!(!moves.contains(sq(4, 3)));
        assert!(moves.contains(sq(3, 3)));

        let protected = pawn_protected(&pawn);
        assert_eq!(protected.len(), 2);
        assert!(protected.contains(sq(4, 3)));
        assert!(!protected.contains(sq(3, 3)));
    }

    #[test]
    fn edge_pawn_protects_one_square() {
        let board = Board::new_game();
        let pawn = *board.piece_at(sq(0, 6)).unwrap();
        assert_eq!(pawn_protected(&pawn).iter().collect::<Vec<_>>(), vec![sq(1, 5)]);
    }
}
