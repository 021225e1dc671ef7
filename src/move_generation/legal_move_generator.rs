//! Full legal move generation pipeline.
//!
//! Candidate destinations come from the per-kind generators. Pinned pieces
//! are then handled according to the active `PinRule`, and every remaining
//! candidate is checked by a speculative apply/revert on a scratch copy of
//! the board so no move can leave the mover's own king attacked.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::PinRule;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::probe_leaves_king_in_check;
use crate::move_generation::legal_move_checks::is_pinned;
use crate::move_generation::legal_moves_bishop::bishop_moves;
use crate::move_generation::legal_moves_king::king_moves;
use crate::move_generation::legal_moves_knight::knight_moves;
use crate::move_generation::legal_moves_pawn::pawn_moves;
use crate::move_generation::legal_moves_queen::queen_moves;
use crate::move_generation::legal_moves_rook::rook_moves;

/// Destinations from the per-kind rules alone, before king safety.
pub fn candidate_moves(board: &Board, piece: &Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece),
        PieceKind::Rook => rook_moves(board, piece),
        PieceKind::Knight => knight_moves(board, piece),
        PieceKind::Bishop => bishop_moves(board, piece),
        PieceKind::Queen => queen_moves(board, piece),
        PieceKind::King => king_moves(board, piece),
        PieceKind::EnPassantMarker => SquareSet::EMPTY,
    }
}

/// Legal destinations of whatever stands on `square`. Empty squares and
/// markers have none.
pub fn legal_moves(board: &Board, square: Square, pin_rule: PinRule) -> SquareSet {
    match board.piece_at(square) {
        Some(piece) => legal_moves_for(board, piece, pin_rule),
        None => SquareSet::EMPTY,
    }
}

pub fn legal_moves_for(board: &Board, piece: &Piece, pin_rule: PinRule) -> SquareSet {
    let candidates = candidate_moves(board, piece);
    if candidates.is_empty() {
        return candidates;
    }
    if piece.kind != PieceKind::King && pin_rule == PinRule::Immobilize && is_pinned(board, piece) {
        return SquareSet::EMPTY;
    }

    let mut scratch = board.clone();
    candidates
        .iter()
        .filter(|&to| !probe_leaves_king_in_check(&mut scratch, piece.square, to))
        .collect()
}

/// Every piece of `colour` paired with its legal destinations. Pieces with
/// no legal move are left out.
pub fn all_legal_moves(board: &Board, colour: Colour, pin_rule: PinRule) -> Vec<(Piece, SquareSet)> {
    board
        .pieces(colour)
        .map(|piece| (*piece, legal_moves_for(board, piece, pin_rule)))
        .filter(|(_, moves)| !moves.is_empty())
        .collect()
}

#[inline]
pub fn has_any_legal_move(board: &Board, colour: Colour, pin_rule: PinRule) -> bool {
    board
        .pieces(colour)
        .any(|piece| !legal_moves_for(board, piece, pin_rule).is_empty())
}

/// Number of (piece, destination) pairs. A promotion counts once here.
pub fn count_legal_moves(board: &Board, colour: Colour, pin_rule: PinRule) -> usize {
    board
        .pieces(colour)
        .map(|piece| legal_moves_for(board, piece, pin_rule).len())
        .sum()
}
