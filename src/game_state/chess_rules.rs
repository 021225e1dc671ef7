//! Canonical rule constants and the configurable rule set.
//!
//! `RuleSet::default()` reproduces the reference behaviour of the engine:
//! pinned pieces are immobilized and the only stalemate cause is running out
//! of legal moves. `RuleSet::fide()` switches on the chess-correct variants.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::PieceKind;
use crate::utils::game_log::{LogSink, Verbosity};

/// Back rank at setup, indexed by file. The piece id is `file + 8`.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File the king starts on.
pub const KING_START_FILE: i8 = 4;

/// King file delta when castling toward the a-file / h-file.
pub const CASTLE_QUEEN_SIDE_DELTA: i8 = -2;
pub const CASTLE_KING_SIDE_DELTA: i8 = 2;

/// Rook files before and after castling, `(from, to)`.
pub const QUEEN_SIDE_ROOK_FILES: (i8, i8) = (0, 3);
pub const KING_SIDE_ROOK_FILES: (i8, i8) = (7, 5);

/// Plies without a pawn move or capture that end the game under the
/// fifty-move rule.
pub const FIFTY_MOVE_PLIES: u16 = 100;

/// Occurrences of one position that end the game by repetition.
pub const REPETITION_LIMIT: usize = 3;

/// How the legal-move pipeline treats a pinned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinRule {
    /// A pinned piece has no legal moves at all, even along the pin line.
    #[default]
    Immobilize,
    /// No pin pre-filter: only the self-check probe decides, so a pinned
    /// piece may still move along the pin line or capture the pinner.
    SlideAlongLine,
}

/// Configurable behaviour of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub pin_rule: PinRule,
    pub fifty_move_rule: bool,
    pub threefold_repetition: bool,
    pub verbosity: Verbosity,
    pub log_sink: LogSink,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            pin_rule: PinRule::Immobilize,
            fifty_move_rule: false,
            threefold_repetition: false,
            verbosity: Verbosity::default(),
            log_sink: LogSink::default(),
        }
    }
}

impl RuleSet {
    /// Chess-correct pins plus both draw rules.
    pub fn fide() -> Self {
        Self {
            pin_rule: PinRule::SlideAlongLine,
            fifty_move_rule: true,
            threefold_repetition: true,
            ..Self::default()
        }
    }

    /// Set one option by name, in the style of engine `setoption` commands.
    ///
    /// Names are case-insensitive: `PinRule` (`immobilize` | `slide`),
    /// `FiftyMoveRule` and `ThreefoldRepetition` (`true` | `false`),
    /// `Verbosity` (`silent` | `minimal` | `normal` | `verbose`),
    /// `LogSink` (`buffer` | `console`).
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        let invalid = || ChessErrors::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        let lowered = value.trim().to_ascii_lowercase();

        match name.trim().to_ascii_lowercase().as_str() {
            "pinrule" => {
                self.pin_rule = match lowered.as_str() {
                    "immobilize" => PinRule::Immobilize,
                    "slide" | "slidealongline" => PinRule::SlideAlongLine,
                    _ => return Err(invalid()),
                };
            }
            "fiftymoverule" => {
                self.fifty_move_rule = lowered.parse::<bool>().map_err(|_| invalid())?;
            }
            "threefoldrepetition" => {
                self.threefold_repetition = lowered.parse::<bool>().map_err(|_| invalid())?;
            }
            "verbosity" => {
                self.verbosity = match lowered.as_str() {
                    "silent" => Verbosity::Silent,
                    "minimal" => Verbosity::Minimal,
                    "normal" => Verbosity::Normal,
                    "verbose" => Verbosity::Verbose,
                    _ => return Err(invalid()),
                };
            }
            "logsink" => {
                self.log_sink = match lowered.as_str() {
                    "buffer" => LogSink::Buffer,
                    "console" => LogSink::Console,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(ChessErrors::UnknownOption(name.to_owned())),
        }
        Ok(())
    }
}
