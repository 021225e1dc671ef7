//! Attack, check and pin detection.
//!
//! These functions answer "is this square or king attacked" and "is this
//! piece pinned". Deciding whether the game is over belongs to the game state
//! machine.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::line_step;
use crate::move_generation::legal_moves_bishop::bishop_protected;
use crate::move_generation::legal_moves_king::king_protected;
use crate::move_generation::legal_moves_knight::knight_protected;
use crate::move_generation::legal_moves_pawn::pawn_protected;
use crate::move_generation::legal_moves_queen::queen_protected;
use crate::move_generation::legal_moves_rook::rook_protected;

/// Protected squares of one piece, dispatched on its kind.
pub fn protected_squares(board: &Board, piece: &Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_protected(piece),
        PieceKind::Rook => rook_protected(board, piece),
        PieceKind::Knight => knight_protected(piece),
        PieceKind::Bishop => bishop_protected(board, piece),
        PieceKind::Queen => queen_protected(board, piece),
        PieceKind::King => king_protected(piece),
        PieceKind::EnPassantMarker => SquareSet::EMPTY,
    }
}

/// Union of the protected squares of every live piece of `colour`.
pub fn protected_union(board: &Board, colour: Colour) -> SquareSet {
    board
        .pieces(colour)
        .fold(SquareSet::EMPTY, |acc, piece| acc | protected_squares(board, piece))
}

pub fn is_square_attacked(board: &Board, square: Square, by_colour: Colour) -> bool {
    board
        .pieces(by_colour)
        .any(|piece| protected_squares(board, piece).contains(square))
}

/// Whether `colour`'s king is attacked. A side without a king is never in
/// check.
#[inline]
pub fn is_in_check(board: &Board, colour: Colour) -> bool {
    let Ok(king) = board.king(colour) else {
        return false;
    };
    is_square_attacked(board, king.square, colour.opposite())
}

/// Opposing pieces currently attacking `colour`'s king.
pub fn checkers(board: &Board, colour: Colour) -> Vec<Piece> {
    let Ok(king) = board.king(colour) else {
        return Vec::new();
    };
    let king_square = king.square;
    board
        .pieces(colour.opposite())
        .filter(|piece| protected_squares(board, piece).contains(king_square))
        .copied()
        .collect()
}

/// Whether a non-king piece stands alone between its king and an opposing
/// slider that attacks along that line.
pub fn is_pinned(board: &Board, piece: &Piece) -> bool {
    if matches!(piece.kind, PieceKind::King | PieceKind::EnPassantMarker) {
        return false;
    }
    let Ok(king) = board.king(piece.colour) else {
        return false;
    };
    let Some((d_file, d_rank)) = line_step(king.square, piece.square) else {
        return false;
    };

    let mut probe = king.square.offset(d_file, d_rank);
    while let Some(square) = probe {
        if square == piece.square {
            break;
        }
        if !board.is_vacant(square) {
            return false;
        }
        probe = square.offset(d_file, d_rank);
    }

    let orthogonal = d_file == 0 || d_rank == 0;
    let mut probe = piece.square.offset(d_file, d_rank);
    while let Some(square) = probe {
        if let Some(other) = board.piece_at(square) {
            let matching_geometry = if orthogonal {
                other.kind.slides_orthogonally()
            } else {
                other.kind.slides_diagonally()
            };
            return other.colour != piece.colour && matching_geometry;
        }
        probe = square.offset(d_file, d_rank);
    }
    false
}
