//! Ray and step helpers shared by the per-kind generators.
//!
//! En passant markers are vacant for every helper here; only pawn captures
//! treat them as targets.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Destinations of a slider: every vacant square up to the first occupied
/// one, which is included only when it holds an enemy piece. Any piece
/// blocks, the enemy king included.
pub fn slide_moves(board: &Board, piece: &Piece, directions: &[(i8, i8)]) -> SquareSet {
    let mut out = SquareSet::EMPTY;
    for &(d_file, d_rank) in directions {
        let mut probe = piece.square.offset(d_file, d_rank);
        while let Some(square) = probe {
            match board.piece_colour_at(square) {
                None => out.insert(square),
                Some(colour) => {
                    if colour != piece.colour {
                        out.insert(square);
                    }
                    break;
                }
            }
            probe = square.offset(d_file, d_rank);
        }
    }
    out
}

/// Squares a slider protects: like [`slide_moves`] but the first occupied
/// square is always included, and the ray continues through the enemy king.
pub fn slide_protected(board: &Board, piece: &Piece, directions: &[(i8, i8)]) -> SquareSet {
    let mut out = SquareSet::EMPTY;
    for &(d_file, d_rank) in directions {
        let mut probe = piece.square.offset(d_file, d_rank);
        while let Some(square) = probe {
            out.insert(square);
            if let Some(other) = board.piece_at(square) {
                let xray = other.kind == PieceKind::King && other.colour != piece.colour;
                if !xray {
                    break;
                }
            }
            probe = square.offset(d_file, d_rank);
        }
    }
    out
}

/// Destinations of a stepping piece: on the board and not own-occupied.
pub fn step_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(d_file, d_rank)| piece.square.offset(d_file, d_rank))
        .filter(|&square| board.piece_colour_at(square) != Some(piece.colour))
        .collect()
}

/// Squares a stepping piece protects: every on-board offset.
pub fn step_protected(piece: &Piece, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(d_file, d_rank)| piece.square.offset(d_file, d_rank))
        .collect()
}

/// Unit step from `from` toward `to` when the two share a rank, file or
/// diagonal.
pub fn line_step(from: Square, to: Square) -> Option<(i8, i8)> {
    let d_file = to.file() - from.file();
    let d_rank = to.rank() - from.rank();
    if (d_file, d_rank) == (0, 0) {
        return None;
    }
    if d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs() {
        Some((d_file.signum(), d_rank.signum()))
    } else {
        None
    }
}
