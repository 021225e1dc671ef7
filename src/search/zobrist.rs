//! Zobrist hashing for position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_SIDE_ROOK_FILES, KING_START_FILE, QUEEN_SIDE_ROOK_FILES};
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for colour in &mut piece_square {
        for kind in colour {
            for key in kind {
                *key = rng.next_u64();
            }
        }
    }

    let side_to_move = rng.next_u64();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Castling eligibility as four bits: white king side, white queen side,
/// black king side, black queen side. Only unmoved pieces on their home
/// squares count; attacks and blockers are ignored.
pub fn castling_mask(board: &Board) -> u8 {
    let mut mask = 0u8;
    for colour in Colour::ALL {
        let home = colour.home_rank();
        let Ok(king) = board.king(colour) else {
            continue;
        };
        if king.has_moved || king.square.file() != KING_START_FILE || king.square.rank() != home {
            continue;
        }
        let sides = [
            (KING_SIDE_ROOK_ID, KING_SIDE_ROOK_FILES.0, 0u8),
            (QUEEN_SIDE_ROOK_ID, QUEEN_SIDE_ROOK_FILES.0, 1u8),
        ];
        for (rook_id, rook_file, bit) in sides {
            let eligible = board.piece(colour, rook_id).is_some_and(|rook| {
                rook.kind == PieceKind::Rook
                    && !rook.has_moved
                    && rook.square.file() == rook_file
                    && rook.square.rank() == home
            });
            if eligible {
                mask |= 1 << (colour.index() as u8 * 2 + bit);
            }
        }
    }
    mask
}

/// Full position key: piece placement, side to move, castling eligibility
/// and the file of any live en passant marker an opposing pawn could take.
pub fn position_key(board: &Board, side_to_move: Colour) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for colour in Colour::ALL {
        for piece in board.pieces(colour) {
            key ^= tables.piece_square[colour.index()][piece.kind.index()][piece.square.index()];
        }
    }

    if side_to_move == Colour::Black {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[castling_mask(board) as usize];

    for colour in Colour::ALL {
        if let Some(marker) = board.marker(colour) {
            if marker_is_capturable(board, colour, &marker) {
                key ^= tables.en_passant_file[marker.square.file() as usize];
            }
        }
    }

    key
}

/// Whether an opposing pawn stands beside the pawn that left `marker`.
fn marker_is_capturable(board: &Board, colour: Colour, marker: &EnPassantMarker) -> bool {
    let Some(pawn) = board.piece(colour, marker.pawn_id) else {
        return false;
    };
    [-1i8, 1]
        .into_iter()
        .filter_map(|d_file| pawn.square.offset(d_file, 0))
        .filter_map(|square| board.piece_at(square))
        .any(|piece| piece.kind == PieceKind::Pawn && piece.colour != colour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::{begin_turn, move_piece};

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn keys_are_deterministic_and_side_sensitive() {
        let board = Board::new_game();
        assert_eq!(position_key(&board, Colour::White), position_key(&board, Colour::White));
        assert_ne!(position_key(&board, Colour::White), position_key(&board, Colour::Black));
        assert_eq!(castling_mask(&board), 0b1111);
    }

    #[test]
    fn knight_shuffle_returns_to_the_same_key() {
        let mut board = Board::new_game();
        let start = position_key(&board, Colour::White);
        for (from, to) in [
            (sq(6, 0), sq(5, 2)),
            (sq(6, 7), sq(5, 5)),
            (sq(5, 2), sq(6, 0)),
            (sq(5, 5), sq(6, 7)),
        ] {
            move_piece(&mut board, from, to).unwrap();
        }
        assert_eq!(position_key(&board, Colour::White), start);
    }

    #[test]
    fn marker_without_adjacent_pawn_leaves_the_key_alone() {
        let mut board = Board::new_game();
        move_piece(&mut board, sq(4, 1), sq(4, 3)).unwrap();
        let with_marker = position_key(&board, Colour::Black);
        begin_turn(&mut board, Colour::White);
        assert!(board.marker(Colour::White).is_none());
        assert_eq!(position_key(&board, Colour::Black), with_marker);
    }

    #[test]
    fn capturable_marker_and_castling_rights_change_the_key() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Colour::White, KING_ID, sq(4, 0)).unwrap();
        board.place(PieceKind::King, Colour::Black, KING_ID, sq(4, 7)).unwrap();
        board.place(PieceKind::Pawn, Colour::White, 4, sq(4, 1)).unwrap();
        board.place(PieceKind::Pawn, Colour::Black, 3, sq(3, 3)).unwrap();
        move_piece(&mut board, sq(4, 1), sq(4, 3)).unwrap();
        let with_marker = position_key(&board, Colour::Black);
        begin_turn(&mut board, Colour::White);
        assert_ne!(position_key(&board, Colour::Black), with_marker);

        let mut rook_moved = Board::new_game();
        rook_moved.set_has_moved(Colour::White, KING_SIDE_ROOK_ID, true).unwrap();
        assert_eq!(castling_mask(&rook_moved), 0b1110);
        assert_ne!(
            position_key(&rook_moved, Colour::White),
            position_key(&Board::new_game(), Colour::White)
        );
    }
}
