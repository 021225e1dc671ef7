//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type shared by the board, the move
//! executor, the game state machine and the configuration layer. Variants fall
//! into three groups:
//! - precondition violations (`InvalidCoordinate`, `InvalidColour`,
//!   `EmptySquare`) that a conforming caller never triggers because it only
//!   submits squares drawn from `legal_moves`;
//! - board construction failures raised while placing custom positions;
//! - turn-sequencing and configuration failures.
//!
//! Rejected moves and pending promotions are not errors; they are reported
//! through `MoveOutcome`.

use thiserror::Error;

use crate::game_state::chess_types::{Colour, PieceId, PieceKind, Square};
use crate::game_state::game_state::GameResult;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A file or rank outside `0..=7` was supplied.
    #[error("coordinate ({file}, {rank}) is off the board")]
    InvalidCoordinate { file: i8, rank: i8 },

    /// A colour index other than 0 (white) or 1 (black) was supplied.
    #[error("colour index {0} is neither white (0) nor black (1)")]
    InvalidColour(u8),

    /// The square holds no piece to move or inspect.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// No live piece occupies this registry slot.
    #[error("{colour} has no live piece with id {id}")]
    UnknownPiece { colour: Colour, id: PieceId },

    /// The registry has no king for a side, so king safety is undefined.
    #[error("{0} has no king on the board")]
    MissingKing(Colour),

    /// A piece was placed over an existing occupant or registry slot.
    #[error("cannot place {colour} piece {id} on {square}: already occupied")]
    SlotOccupied {
        colour: Colour,
        id: PieceId,
        square: Square,
    },

    /// A piece id outside `0..=15`, or a king on a slot other than 12.
    #[error("piece id {id} is not valid for a {kind:?}")]
    InvalidPieceId { id: PieceId, kind: PieceKind },

    /// Only queen, rook, bishop and knight are valid promotion targets.
    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotionKind(PieceKind),

    /// `complete_promotion` was called with no promotion outstanding.
    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// The turn cannot be concluded while a promotion choice is outstanding.
    #[error("a promotion must be completed before the turn can conclude")]
    PromotionInProgress,

    /// The game already reached a terminal result.
    #[error("the game is already over: {0:?}")]
    GameOver(GameResult),

    /// An option name that the rule set does not recognise.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// An option value that could not be interpreted for its option.
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOptionValue { name: String, value: String },
}
