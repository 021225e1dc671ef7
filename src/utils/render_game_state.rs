//! Terminal-oriented Unicode board renderer.
//!
//! Draws a `BoardSnapshot` for debugging, tests and the playout binary.
//! Markers are hidden; highlighted squares (typically a selected piece's
//! legal moves) show as `*` when empty and keep their piece glyph otherwise.

use crate::game_state::board::BoardSnapshot;
use crate::game_state::chess_types::*;

/// Render the board with White at the bottom.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    render_with_highlights(snapshot, SquareSet::EMPTY)
}

pub fn render_with_highlights(snapshot: &BoardSnapshot, highlights: SquareSet) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8i8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');

        for file in 0..8i8 {
            let square = Square::from_index((rank * 8 + file) as u8);
            let glyph = snapshot
                .get(square)
                .filter(|cell| cell.kind != PieceKind::EnPassantMarker)
                .map(|cell| piece_to_unicode(cell.colour, cell.kind));
            match glyph {
                Some(ch) => out.push(ch),
                None if highlights.contains(square) => out.push('*'),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(colour: Colour, kind: PieceKind) -> char {
    match (colour, kind) {
        (Colour::White, PieceKind::Pawn) => '♙',
        (Colour::White, PieceKind::Knight) => '♘',
        (Colour::White, PieceKind::Bishop) => '♗',
        (Colour::White, PieceKind::Rook) => '♖',
        (Colour::White, PieceKind::Queen) => '♕',
        (Colour::White, PieceKind::King) => '♔',
        (Colour::Black, PieceKind::Pawn) => '♟',
        (Colour::Black, PieceKind::Knight) => '♞',
        (Colour::Black, PieceKind::Bishop) => '♝',
        (Colour::Black, PieceKind::Rook) => '♜',
        (Colour::Black, PieceKind::Queen) => '♛',
        (Colour::Black, PieceKind::King) => '♚',
        (_, PieceKind::EnPassantMarker) => '·',
    }
}
