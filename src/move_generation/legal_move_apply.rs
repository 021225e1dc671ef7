//! Move execution: applying validated moves to the board.
//!
//! `move_piece` either fully applies a move or, for a pawn reaching its last
//! rank, returns `PendingPromotion` without touching the board. `promote`
//! finishes such a move. `begin_turn` enforces the one-ply lifetime of the
//! en passant marker. The speculative probe used by the legal move filter
//! lives here too, since it is a reduced form of the same mutation.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameResult;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_moves_king::castling_rook;
use crate::move_generation::legal_moves_pawn::is_double_step;

/// A pawn move onto the last rank waiting for its promotion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingPromotion {
    pub colour: Colour,
    pub pawn_id: PieceId,
    pub from: Square,
    pub destination: Square,
}

/// What an applied move did, for the game log and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The mover as it was before the move.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub en_passant_capture: bool,
    /// Rook origin and destination when the move was a castle.
    pub castled_rook: Option<(Square, Square)>,
    /// Square of the marker this move created.
    pub created_marker: Option<Square>,
    pub promoted_to: Option<PieceKind>,
}

/// Why the game refused a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The selected piece belongs to the side not on move.
    NotYourPiece,
    /// The destination is not in the piece's legal move set.
    IllegalDestination,
    /// A promotion choice must be made first.
    PromotionPending,
    /// The game is over and accepts no further moves.
    GameOver(GameResult),
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(MoveRecord),
    PendingPromotion(PendingPromotion),
    Rejected(Rejection),
}

/// Apply the move of the piece on `from` to `to`.
///
/// Legality is the caller's business: `to` must come from the piece's legal
/// move set.
pub fn move_piece(board: &mut Board, from: Square, to: Square) -> Result<MoveOutcome, ChessErrors> {
    let piece = *board.piece_at(from).ok_or(ChessErrors::EmptySquare(from))?;

    if piece.kind == PieceKind::Pawn && to.rank() == piece.colour.promotion_rank() {
        return Ok(MoveOutcome::PendingPromotion(PendingPromotion {
            colour: piece.colour,
            pawn_id: piece.id,
            from,
            destination: to,
        }));
    }

    Ok(MoveOutcome::Applied(relocate(board, piece, to)))
}

/// Finish a pending promotion: the pawn is replaced on the destination by a
/// new piece of `kind` under the same id and colour.
pub fn promote(
    board: &mut Board,
    pending: &PendingPromotion,
    kind: PieceKind,
) -> Result<MoveRecord, ChessErrors> {
    if !kind.is_promotion_target() {
        return Err(ChessErrors::InvalidPromotionKind(kind));
    }
    let pawn = board
        .slot(pending.colour, pending.pawn_id)
        .filter(|pawn| pawn.kind == PieceKind::Pawn && pawn.square == pending.from)
        .ok_or(ChessErrors::UnknownPiece {
            colour: pending.colour,
            id: pending.pawn_id,
        })?;

    let (captured, _) = resolve_capture(board, &pawn, pending.destination);

    board.set_cell(pawn.square, None);
    board.insert(Piece {
        kind,
        colour: pawn.colour,
        id: pawn.id,
        square: pending.destination,
        has_moved: true,
    });

    Ok(MoveRecord {
        piece: pawn,
        from: pawn.square,
        to: pending.destination,
        captured,
        en_passant_capture: false,
        castled_rook: None,
        created_marker: None,
        promoted_to: Some(kind),
    })
}

/// Turnover for the colour about to move: its marker from the previous turn
/// expires now, captured or not. Returns the freed square.
pub fn begin_turn(board: &mut Board, colour: Colour) -> Option<Square> {
    let marker = board.marker(colour)?;
    board.set_marker(colour, None);
    if board.occupant(marker.square) == Some(Occupant::Marker(colour)) {
        board.set_cell(marker.square, None);
    }
    Some(marker.square)
}

fn relocate(board: &mut Board, piece: Piece, to: Square) -> MoveRecord {
    let from = piece.square;
    let mut record = MoveRecord {
        piece,
        from,
        to,
        captured: None,
        en_passant_capture: false,
        castled_rook: None,
        created_marker: None,
        promoted_to: None,
    };

    if piece.kind == PieceKind::Pawn && is_double_step(from, to) {
        if let Ok(skipped) = Square::new(from.file(), (from.rank() + to.rank()) / 2) {
            clear_marker(board, piece.colour);
            board.set_marker(
                piece.colour,
                Some(EnPassantMarker {
                    square: skipped,
                    pawn_id: piece.id,
                }),
            );
            board.set_cell(skipped, Some(Occupant::Marker(piece.colour)));
            record.created_marker = Some(skipped);
        }
    }

    if matches!(piece.kind, PieceKind::Rook | PieceKind::King) && !piece.has_moved {
        if let Some(stored) = board.piece_mut(piece.colour, piece.id) {
            stored.has_moved = true;
        }
    }

    let file_delta = to.file() - from.file();
    if piece.kind == PieceKind::King && file_delta.abs() == 2 {
        if let Some((rook, rook_to)) = castling_rook(board, piece.colour, from, file_delta) {
            relocate(board, rook, rook_to);
            record.castled_rook = Some((rook.square, rook_to));
        }
    }

    let (captured, en_passant) = resolve_capture(board, &piece, to);
    record.captured = captured;
    record.en_passant_capture = en_passant;

    board.set_cell(from, None);
    board.set_cell(
        to,
        Some(Occupant::Piece {
            colour: piece.colour,
            id: piece.id,
        }),
    );
    if let Some(stored) = board.piece_mut(piece.colour, piece.id) {
        stored.square = to;
    }

    record
}

/// Remove whatever `mover` captures by landing on `target`. Returns the
/// captured piece and whether it was taken en passant.
fn resolve_capture(board: &mut Board, mover: &Piece, target: Square) -> (Option<Piece>, bool) {
    match board.occupant(target) {
        Some(Occupant::Piece { colour, id }) => {
            let captured = board.slot(colour, id);
            board.set_slot(colour, id, None);
            if board.marker(colour).is_some_and(|marker| marker.pawn_id == id) {
                clear_marker(board, colour);
            }
            (captured, false)
        }
        Some(Occupant::Marker(owner)) => {
            let marker = board.marker(owner);
            clear_marker(board, owner);
            if mover.kind != PieceKind::Pawn || owner == mover.colour {
                return (None, false);
            }
            let Some(victim) = marker.and_then(|m| board.slot(owner, m.pawn_id)) else {
                return (None, false);
            };
            board.set_slot(owner, victim.id, None);
            board.set_cell(victim.square, None);
            (Some(victim), true)
        }
        None => (None, false),
    }
}

fn clear_marker(board: &mut Board, colour: Colour) {
    if let Some(marker) = board.marker(colour) {
        if board.occupant(marker.square) == Some(Occupant::Marker(colour)) {
            board.set_cell(marker.square, None);
        }
        board.set_marker(colour, None);
    }
}

/// Exactly the cells and slots a probe touched, for restoring them.
#[derive(Debug, Clone, Copy)]
struct ProbeUndo {
    mover: Piece,
    to: Square,
    to_cell: Option<Occupant>,
    captured: Option<Piece>,
    en_passant_victim: Option<Piece>,
}

fn apply_probe(board: &mut Board, mover: Piece, to: Square) -> ProbeUndo {
    let to_cell = board.occupant(to);
    let mut captured = None;
    let mut en_passant_victim = None;

    match to_cell {
        Some(Occupant::Piece { colour, id }) => {
            captured = board.slot(colour, id);
            board.set_slot(colour, id, None);
        }
        Some(Occupant::Marker(owner))
            if mover.kind == PieceKind::Pawn && owner != mover.colour =>
        {
            if let Some(victim) = board
                .marker(owner)
                .and_then(|marker| board.slot(owner, marker.pawn_id))
            {
                board.set_slot(owner, victim.id, None);
                board.set_cell(victim.square, None);
                en_passant_victim = Some(victim);
            }
        }
        _ => {}
    }

    board.set_cell(mover.square, None);
    board.set_cell(
        to,
        Some(Occupant::Piece {
            colour: mover.colour,
            id: mover.id,
        }),
    );
    if let Some(stored) = board.piece_mut(mover.colour, mover.id) {
        stored.square = to;
    }

    ProbeUndo {
        mover,
        to,
        to_cell,
        captured,
        en_passant_victim,
    }
}

fn revert_probe(board: &mut Board, undo: ProbeUndo) {
    board.set_slot(undo.mover.colour, undo.mover.id, Some(undo.mover));
    board.set_cell(
        undo.mover.square,
        Some(Occupant::Piece {
            colour: undo.mover.colour,
            id: undo.mover.id,
        }),
    );
    board.set_cell(undo.to, undo.to_cell);
    if let Some(captured) = undo.captured {
        board.set_slot(captured.colour, captured.id, Some(captured));
    }
    if let Some(victim) = undo.en_passant_victim {
        board.insert(victim);
    }
}

/// Speculatively move the piece on `from` to `to`, test whether its own king
/// is then in check, and restore the board exactly.
///
/// Only the mover's relocation and the capture are simulated; a castling
/// rook stays put because castling is already gated on attacked squares.
pub fn probe_leaves_king_in_check(board: &mut Board, from: Square, to: Square) -> bool {
    let Some(mover) = board.piece_at(from).copied() else {
        return false;
    };
    let undo = apply_probe(board, mover, to);
    let in_check = is_in_check(board, mover.colour);
    revert_probe(board, undo);
    in_check
}
