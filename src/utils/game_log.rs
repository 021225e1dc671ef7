//! Game event log.
//!
//! Every state change the game makes is recorded as a `GameEvent`. Events
//! are queued for a renderer to drain (a `Captured` event means "remove that
//! sprite") and, filtered by `Verbosity`, formatted as `info string` lines
//! into the log's sink.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};

use crate::game_state::chess_types::{Colour, Piece, PieceKind, Square, SquareSet};
use crate::game_state::game_state::GameResult;

/// How much text the log produces. Events are queued at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// No text output.
    Silent = 0,
    /// Checks and results only.
    Minimal = 1,
    /// Every move, capture and promotion.
    #[default]
    Normal = 2,
    /// Also marker expiry.
    Verbose = 3,
}

/// Where formatted lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSink {
    /// Keep lines in memory only.
    #[default]
    Buffer,
    /// Keep lines and echo them to stdout.
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Moved {
        colour: Colour,
        kind: PieceKind,
        from: Square,
        to: Square,
    },
    Captured {
        piece: Piece,
        en_passant: bool,
    },
    Castled {
        colour: Colour,
        rook_from: Square,
        rook_to: Square,
    },
    PromotionRequested {
        colour: Colour,
        square: Square,
    },
    Promoted {
        colour: Colour,
        square: Square,
        kind: PieceKind,
    },
    MarkerExpired {
        colour: Colour,
        square: Square,
    },
    /// `checkers` holds the squares of every piece giving check.
    Check {
        colour: Colour,
        checkers: SquareSet,
    },
    GameOver(GameResult),
}

impl GameEvent {
    /// Lowest verbosity at which the event is written out.
    pub fn level(&self) -> Verbosity {
        match self {
            GameEvent::Check { .. } | GameEvent::GameOver(_) => Verbosity::Minimal,
            GameEvent::MarkerExpired { .. } => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }
}

fn kind_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Pawn => "pawn",
        PieceKind::Rook => "rook",
        PieceKind::Knight => "knight",
        PieceKind::Bishop => "bishop",
        PieceKind::Queen => "queen",
        PieceKind::King => "king",
        PieceKind::EnPassantMarker => "marker",
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "info string ")?;
        match self {
            GameEvent::Moved {
                colour,
                kind,
                from,
                to,
            } => write!(f, "{colour} {} {from} {to}", kind_name(*kind)),
            GameEvent::Captured { piece, en_passant } => {
                write!(f, "captured {} {} on {}", piece.colour, kind_name(piece.kind), piece.square)?;
                if *en_passant {
                    write!(f, " en passant")?;
                }
                Ok(())
            }
            GameEvent::Castled {
                colour,
                rook_from,
                rook_to,
            } => write!(f, "{colour} castles, rook {rook_from} {rook_to}"),
            GameEvent::PromotionRequested { colour, square } => {
                write!(f, "{colour} pawn promotes on {square}, awaiting choice")
            }
            GameEvent::Promoted {
                colour,
                square,
                kind,
            } => write!(f, "{colour} pawn on {square} becomes {}", kind_name(*kind)),
            GameEvent::MarkerExpired { colour, square } => {
                write!(f, "{colour} en passant marker on {square} expired")
            }
            GameEvent::Check { colour, checkers } => {
                write!(f, "{colour} is in check")?;
                for (n, square) in checkers.iter().enumerate() {
                    write!(f, "{}{square}", if n == 0 { " from " } else { " " })?;
                }
                Ok(())
            }
            GameEvent::GameOver(result) => match result {
                GameResult::Checkmate { loser } => write!(f, "checkmate, {loser} loses"),
                GameResult::Stalemate { colour, cause } => {
                    write!(f, "stalemate ({cause:?}), {colour} to move")
                }
                GameResult::Timeout { loser } => write!(f, "timeout, {loser} loses"),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameLog {
    verbosity: Verbosity,
    sink: LogSink,
    lines: Vec<String>,
    events: VecDeque<GameEvent>,
}

impl GameLog {
    pub fn new(verbosity: Verbosity, sink: LogSink) -> Self {
        Self {
            verbosity,
            sink,
            ..Self::default()
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    pub fn sink(&self) -> LogSink {
        self.sink
    }

    pub fn set_sink(&mut self, sink: LogSink) {
        self.sink = sink;
    }

    pub fn record(&mut self, event: GameEvent) {
        if self.verbosity != Verbosity::Silent && event.level() <= self.verbosity {
            let line = event.to_string();
            if self.sink == LogSink::Console {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}").ok();
            }
            self.lines.push(line);
        }
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn events_queue_even_when_silent() {
        let mut log = GameLog::new(Verbosity::Silent, LogSink::Buffer);
        log.record(GameEvent::Check {
            colour: Colour::White,
            checkers: SquareSet::EMPTY,
        });
        assert!(log.lines().is_empty());
        assert_eq!(log.drain_events().len(), 1);
        assert!(log.drain_events().is_empty());
    }

    #[test]
    fn verbosity_filters_lines() {
        let mut log = GameLog::new(Verbosity::Minimal, LogSink::Buffer);
        log.record(GameEvent::Moved {
            colour: Colour::White,
            kind: PieceKind::Pawn,
            from: sq(4, 1),
            to: sq(4, 3),
        });
        log.record(GameEvent::Check {
            colour: Colour::Black,
            checkers: [sq(7, 4)].into_iter().collect(),
        });
        assert_eq!(log.lines(), ["info string black is in check from h5".to_owned()]);

        log.set_verbosity(Verbosity::Verbose);
        log.record(GameEvent::MarkerExpired {
            colour: Colour::White,
            square: sq(4, 2),
        });
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("info string white en passant marker on e3 expired")
        );
    }

    #[test]
    fn move_lines_use_algebraic_squares() {
        let event = GameEvent::Moved {
            colour: Colour::Black,
            kind: PieceKind::Knight,
            from: sq(6, 7),
            to: sq(5, 5),
        };
        assert_eq!(event.to_string(), "info string black knight g8 f6");
    }

    #[test]
    fn double_check_lists_both_checkers() {
        let event = GameEvent::Check {
            colour: Colour::White,
            checkers: [sq(3, 2), sq(4, 7)].into_iter().collect(),
        };
        assert_eq!(event.to_string(), "info string white is in check from d3 e8");
    }
}
