//! Value types shared by every subsystem: squares, square sets, colours,
//! piece kinds and piece records.
//!
//! Squares are `(file, rank)` pairs in `0..=7`. Rank 0 is White's home rank
//! and White pawns advance toward rank 7. Construction through
//! [`Square::new`] is the single bounds check of the engine; everything else
//! works on already validated squares.

use std::fmt;

use crate::chess_errors::ChessErrors;

/// Side to move, and the owner of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub const ALL: [Colour; 2] = [Colour::White, Colour::Black];

    /// Validate a raw colour tag: 0 is white, 1 is black.
    pub fn from_index(index: u8) -> Result<Self, ChessErrors> {
        match index {
            0 => Ok(Colour::White),
            1 => Ok(Colour::Black),
            other => Err(ChessErrors::InvalidColour(other)),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Colour::White => 0,
            Colour::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Rank holding the back-rank pieces at setup.
    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Colour::White => 0,
            Colour::Black => 7,
        }
    }

    /// Rank holding the pawns at setup; double steps start here.
    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => 6,
        }
    }

    /// Rank on which a pawn of this colour promotes.
    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Colour::White => 7,
            Colour::Black => 0,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "white"),
            Colour::Black => write!(f, "black"),
        }
    }
}

/// Piece kind. Colour is carried separately.
///
/// `EnPassantMarker` is the transient pseudo-piece left on the square a pawn
/// skipped; it never has moves of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    EnPassantMarker,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
            PieceKind::EnPassantMarker => 6,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Rook or queen: attacks along ranks and files.
    #[inline]
    pub const fn slides_orthogonally(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }

    /// Bishop or queen: attacks along diagonals.
    #[inline]
    pub const fn slides_diagonally(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }
}

/// Registry slot of a piece. Pawns use their starting file (`0..=7`), back
/// rank pieces use starting file + 8. Shared across colours.
pub type PieceId = u8;

/// Both kings live in slot 12.
pub const KING_ID: PieceId = 12;
/// Queen-side (a-file) rook.
pub const QUEEN_SIDE_ROOK_ID: PieceId = 8;
/// King-side (h-file) rook.
pub const KING_SIDE_ROOK_ID: PieceId = 15;
/// Slots per colour.
pub const REGISTRY_SLOTS: usize = 16;

/// A board square, `(file, rank)` with both in `0..=7`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    /// Validate a raw coordinate pair.
    pub fn new(file: i8, rank: i8) -> Result<Self, ChessErrors> {
        if (0..=7).contains(&file) && (0..=7).contains(&rank) {
            Ok(Self { file, rank })
        } else {
            Err(ChessErrors::InvalidCoordinate { file, rank })
        }
    }

    /// Square from a `0..=63` index with `0 == (0, 0)` and `63 == (7, 7)`.
    #[inline]
    pub(crate) const fn from_index(index: u8) -> Self {
        Self {
            file: (index % 8) as i8,
            rank: (index / 8) as i8,
        }
    }

    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// The square `(d_file, d_rank)` away, if it is still on the board.
    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::new(self.file + d_file, self.rank + d_rank).ok()
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.file, self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file as u8),
            char::from(b'1' + self.rank as u8)
        )
    }
}

/// A set of squares backed by a 64-bit mask, bit `rank * 8 + file`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl std::ops::BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// Iterates a [`SquareSet`] from `(0, 0)` upward.
#[derive(Debug, Clone)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareSetIter {}

/// One registry entry: a live piece with stable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
    pub id: PieceId,
    pub square: Square,
    /// Only tracked for rooks and kings (castling eligibility).
    pub has_moved: bool,
}

/// The two-square advance shadow a pawn leaves behind for one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassantMarker {
    /// The skipped square.
    pub square: Square,
    /// Registry id of the pawn that made the double step.
    pub pawn_id: PieceId,
}

/// Content of one grid cell when it is not empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// A registry piece, addressed by its slot.
    Piece { colour: Colour, id: PieceId },
    /// The en passant marker owned by this colour.
    Marker(Colour),
}

impl Occupant {
    #[inline]
    pub const fn colour(self) -> Colour {
        match self {
            Occupant::Piece { colour, .. } => colour,
            Occupant::Marker(colour) => colour,
        }
    }
}
