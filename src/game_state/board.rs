//! Piece registry and occupancy grid.
//!
//! `Board` exclusively owns every piece record. Each colour has a fixed table
//! of sixteen slots indexed by piece id and the grid maps squares back to
//! `(colour, id)`. Pieces never point back at the board; every generator and
//! executor function takes the board as an explicit parameter.
//!
//! Invariant: the grid cell of a live piece and the `square` stored in its
//! registry slot always agree.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::BACK_RANK_LAYOUT;
use crate::game_state::chess_types::*;

/// Grid plus the two colour registries plus the two en passant marker slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [file][rank]
    grid: [[Option<Occupant>; 8]; 8],
    registry: [[Option<Piece>; REGISTRY_SLOTS]; 2],
    en_passant: [Option<EnPassantMarker>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces, used to set up custom positions.
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            registry: [[None; REGISTRY_SLOTS]; 2],
            en_passant: [None; 2],
        }
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        for colour in Colour::ALL {
            for file in 0..8i8 {
                let pawn_square = Square::from_index((colour.pawn_rank() * 8 + file) as u8);
                let back_square = Square::from_index((colour.home_rank() * 8 + file) as u8);
                board.insert(Piece {
                    kind: PieceKind::Pawn,
                    colour,
                    id: file as PieceId,
                    square: pawn_square,
                    has_moved: false,
                });
                board.insert(Piece {
                    kind: BACK_RANK_LAYOUT[file as usize],
                    colour,
                    id: file as PieceId + 8,
                    square: back_square,
                    has_moved: false,
                });
            }
        }
        board
    }

    /// Place a piece for a custom position.
    ///
    /// Kings must use slot 12 and nothing else may; markers cannot be placed
    /// directly. Fails if the square or the slot is already taken.
    pub fn place(
        &mut self,
        kind: PieceKind,
        colour: Colour,
        id: PieceId,
        square: Square,
    ) -> Result<(), ChessErrors> {
        let valid_id = (id as usize) < REGISTRY_SLOTS
            && kind != PieceKind::EnPassantMarker
            && ((kind == PieceKind::King) == (id == KING_ID));
        if !valid_id {
            return Err(ChessErrors::InvalidPieceId { id, kind });
        }
        if self.occupant(square).is_some() || self.registry[colour.index()][id as usize].is_some() {
            return Err(ChessErrors::SlotOccupied { colour, id, square });
        }
        self.insert(Piece {
            kind,
            colour,
            id,
            square,
            has_moved: false,
        });
        Ok(())
    }

    /// Override the moved flag of a live piece, for custom positions.
    pub fn set_has_moved(
        &mut self,
        colour: Colour,
        id: PieceId,
        has_moved: bool,
    ) -> Result<(), ChessErrors> {
        let piece = self
            .registry
            .get_mut(colour.index())
            .and_then(|slots| slots.get_mut(id as usize))
            .and_then(Option::as_mut)
            .ok_or(ChessErrors::UnknownPiece { colour, id })?;
        piece.has_moved = has_moved;
        Ok(())
    }

    #[inline]
    pub fn occupant(&self, square: Square) -> Option<Occupant> {
        self.grid[square.file() as usize][square.rank() as usize]
    }

    /// The registry piece on a square. Markers are not pieces and yield `None`.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        match self.occupant(square)? {
            Occupant::Piece { colour, id } => self.piece(colour, id),
            Occupant::Marker(_) => None,
        }
    }

    #[inline]
    pub fn piece(&self, colour: Colour, id: PieceId) -> Option<&Piece> {
        self.registry[colour.index()]
            .get(id as usize)
            .and_then(Option::as_ref)
    }

    pub fn king(&self, colour: Colour) -> Result<&Piece, ChessErrors> {
        self.piece(colour, KING_ID)
            .ok_or(ChessErrors::MissingKing(colour))
    }

    /// Live pieces of one colour in slot order.
    pub fn pieces(&self, colour: Colour) -> impl Iterator<Item = &Piece> + '_ {
        self.registry[colour.index()].iter().flatten()
    }

    #[inline]
    pub fn marker(&self, colour: Colour) -> Option<EnPassantMarker> {
        self.en_passant[colour.index()]
    }

    /// Whether a moving piece may pass over the square: empty or only an
    /// en passant marker.
    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        matches!(self.occupant(square), None | Some(Occupant::Marker(_)))
    }

    /// Colour of the registry piece on the square, ignoring markers.
    #[inline]
    pub fn piece_colour_at(&self, square: Square) -> Option<Colour> {
        match self.occupant(square)? {
            Occupant::Piece { colour, .. } => Some(colour),
            Occupant::Marker(_) => None,
        }
    }

    /// Verify that grid cells, registry slots and marker slots agree.
    pub fn is_consistent(&self) -> bool {
        for colour in Colour::ALL {
            for (slot, entry) in self.registry[colour.index()].iter().enumerate() {
                if let Some(piece) = entry {
                    let at_square = self.occupant(piece.square);
                    if piece.id as usize != slot
                        || piece.colour != colour
                        || at_square != Some(Occupant::Piece { colour, id: piece.id })
                    {
                        return false;
                    }
                }
            }
            if let Some(marker) = self.en_passant[colour.index()] {
                let shadowed = self.piece(colour, marker.pawn_id);
                if self.occupant(marker.square) != Some(Occupant::Marker(colour))
                    || !matches!(shadowed, Some(p) if p.kind == PieceKind::Pawn)
                {
                    return false;
                }
            }
        }
        for file in 0..8 {
            for rank in 0..8 {
                let square = Square::from_index((rank * 8 + file) as u8);
                match self.occupant(square) {
                    Some(Occupant::Piece { colour, id }) => {
                        if self.piece(colour, id).map(|p| p.square) != Some(square) {
                            return false;
                        }
                    }
                    Some(Occupant::Marker(colour)) => {
                        if self.marker(colour).map(|m| m.square) != Some(square) {
                            return false;
                        }
                    }
                    None => {}
                }
            }
        }
        true
    }

    /// Read-only copy of the grid for drawing and comparison.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [[None; 8]; 8];
        for (file, column) in self.grid.iter().enumerate() {
            for (rank, cell) in column.iter().enumerate() {
                let square = Square::from_index((rank * 8 + file) as u8);
                cells[file][rank] = match cell {
                    Some(Occupant::Piece { colour, id }) => {
                        self.piece(*colour, *id).map(|piece| SnapshotCell {
                            kind: piece.kind,
                            colour: piece.colour,
                            id: piece.id,
                            square,
                            has_moved: piece.has_moved,
                        })
                    }
                    Some(Occupant::Marker(colour)) => {
                        self.marker(*colour).map(|marker| SnapshotCell {
                            kind: PieceKind::EnPassantMarker,
                            colour: *colour,
                            id: marker.pawn_id,
                            square,
                            has_moved: false,
                        })
                    }
                    None => None,
                };
            }
        }
        BoardSnapshot { cells }
    }

    // --- Raw mutation, used by the move executor only ---

    pub(crate) fn insert(&mut self, piece: Piece) {
        self.set_cell(
            piece.square,
            Some(Occupant::Piece {
                colour: piece.colour,
                id: piece.id,
            }),
        );
        self.registry[piece.colour.index()][piece.id as usize] = Some(piece);
    }

    #[inline]
    pub(crate) fn set_cell(&mut self, square: Square, occupant: Option<Occupant>) {
        self.grid[square.file() as usize][square.rank() as usize] = occupant;
    }

    #[inline]
    pub(crate) fn slot(&self, colour: Colour, id: PieceId) -> Option<Piece> {
        self.registry[colour.index()][id as usize]
    }

    #[inline]
    pub(crate) fn set_slot(&mut self, colour: Colour, id: PieceId, piece: Option<Piece>) {
        self.registry[colour.index()][id as usize] = piece;
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, colour: Colour, id: PieceId) -> Option<&mut Piece> {
        self.registry[colour.index()][id as usize].as_mut()
    }

    #[inline]
    pub(crate) fn set_marker(&mut self, colour: Colour, marker: Option<EnPassantMarker>) {
        self.en_passant[colour.index()] = marker;
    }
}

/// One drawable cell of a [`BoardSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotCell {
    pub kind: PieceKind,
    pub colour: Colour,
    /// Registry id; for markers, the id of the shadowed pawn.
    pub id: PieceId,
    pub square: Square,
    pub has_moved: bool,
}

/// Immutable view of the whole grid, indexed `[file][rank]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    cells: [[Option<SnapshotCell>; 8]; 8],
}

impl BoardSnapshot {
    #[inline]
    pub fn get(&self, square: Square) -> Option<SnapshotCell> {
        self.cells[square.file() as usize][square.rank() as usize]
    }

    /// Occupied cells, markers included, file-major.
    pub fn cells(&self) -> impl Iterator<Item = SnapshotCell> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }

    /// Occupied cells without en passant markers, i.e. what gets drawn.
    pub fn drawable(&self) -> impl Iterator<Item = SnapshotCell> + '_ {
        self.cells()
            .filter(|cell| cell.kind != PieceKind::EnPassantMarker)
    }
}
