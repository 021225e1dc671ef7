//! Turn sequencing and terminal-state detection.
//!
//! `Game` owns the single `Board` of a game plus everything that survives
//! between plies: whose turn it is, a pending promotion, the check flag,
//! clocks, repetition history and the event log. Callers drive it with
//! `attempt_move` / `complete_promotion` followed by `conclude_turn`.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::{Board, BoardSnapshot};
use crate::game_state::chess_rules::{RuleSet, FIFTY_MOVE_PLIES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{
    begin_turn, move_piece, promote, MoveOutcome, MoveRecord, PendingPromotion, Rejection,
};
use crate::move_generation::legal_move_checks::{checkers, is_in_check};
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for};
use crate::search::zobrist::position_key;
use crate::utils::game_log::{GameEvent, GameLog, LogSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StalemateCause {
    NoLegalMoves,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Terminal outcome. Once reached it latches for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Checkmate { loser: Colour },
    Stalemate { colour: Colour, cause: StalemateCause },
    Timeout { loser: Colour },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingMove(Colour),
    PromotionPending(PendingPromotion),
    Over(GameResult),
}

/// What `conclude_turn` reports to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Ongoing { check: bool },
    Over(GameResult),
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rules: RuleSet,
    phase: GamePhase,
    active: Colour,
    in_check: bool,

    // --- Clocks / move counters ---
    halfmove_clock: u16,
    fullmove_number: u16,

    // --- Repetition support ---
    position_history: Vec<u64>,

    log: GameLog,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position under the default rules.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self::build(Board::new_game(), Colour::White, rules)
    }

    /// Start from a custom position. Both kings must be present.
    pub fn from_board(board: Board, active: Colour, rules: RuleSet) -> Result<Self, ChessErrors> {
        for colour in Colour::ALL {
            board.king(colour)?;
        }
        Ok(Self::build(board, active, rules))
    }

    fn build(board: Board, active: Colour, rules: RuleSet) -> Self {
        let key = position_key(&board, active);
        Self {
            in_check: is_in_check(&board, active),
            board,
            rules,
            phase: GamePhase::AwaitingMove(active),
            active,
            halfmove_clock: 0,
            fullmove_number: 1,
            position_history: vec![key],
            log: GameLog::new(rules.verbosity, rules.log_sink),
        }
    }

    /// Change one rule option mid-game. See [`RuleSet::set_option`].
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        self.rules.set_option(name, value)?;
        self.log.set_verbosity(self.rules.verbosity);
        self.log.set_sink(self.rules.log_sink);
        Ok(())
    }

    /// Legal destinations for the piece on `square`. Empty unless that piece
    /// belongs to the side awaiting a move.
    pub fn legal_moves(&self, square: Square) -> SquareSet {
        let GamePhase::AwaitingMove(active) = self.phase else {
            return SquareSet::EMPTY;
        };
        match self.board.piece_at(square) {
            Some(piece) if piece.colour == active => legal_moves_for(&self.board, piece, self.rules.pin_rule),
            _ => SquareSet::EMPTY,
        }
    }

    /// Try to move the piece on `from` to `to`.
    ///
    /// `Applied` completes the ply and hands the turn over. A pawn reaching
    /// its last rank yields `PendingPromotion` with the board untouched.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessErrors> {
        let active = match self.phase {
            GamePhase::AwaitingMove(active) => active,
            GamePhase::PromotionPending(_) => {
                return Ok(MoveOutcome::Rejected(Rejection::PromotionPending));
            }
            GamePhase::Over(result) => return Ok(MoveOutcome::Rejected(Rejection::GameOver(result))),
        };

        let piece = *self.board.piece_at(from).ok_or(ChessErrors::EmptySquare(from))?;
        if piece.colour != active {
            return Ok(MoveOutcome::Rejected(Rejection::NotYourPiece));
        }
        if !legal_moves_for(&self.board, &piece, self.rules.pin_rule).contains(to) {
            return Ok(MoveOutcome::Rejected(Rejection::IllegalDestination));
        }

        let outcome = move_piece(&mut self.board, from, to)?;
        match outcome {
            MoveOutcome::Applied(record) => {
                self.record_move(&record);
                self.turnover(active);
            }
            MoveOutcome::PendingPromotion(pending) => {
                self.phase = GamePhase::PromotionPending(pending);
                self.log.record(GameEvent::PromotionRequested {
                    colour: pending.colour,
                    square: pending.destination,
                });
            }
            MoveOutcome::Rejected(_) => {}
        }
        Ok(outcome)
    }

    /// Finish the outstanding promotion with `kind` and hand the turn over.
    pub fn complete_promotion(&mut self, kind: PieceKind) -> Result<MoveRecord, ChessErrors> {
        let GamePhase::PromotionPending(pending) = self.phase else {
            return Err(ChessErrors::NoPendingPromotion);
        };
        let record = promote(&mut self.board, &pending, kind)?;
        self.record_move(&record);
        self.turnover(pending.colour);
        Ok(record)
    }

    /// Evaluate the position for the side to move: check flag, then
    /// checkmate or stalemate, then the optional draw rules.
    pub fn conclude_turn(&mut self) -> Result<TurnStatus, ChessErrors> {
        let colour = match self.phase {
            GamePhase::AwaitingMove(colour) => colour,
            GamePhase::PromotionPending(_) => return Err(ChessErrors::PromotionInProgress),
            GamePhase::Over(result) => return Ok(TurnStatus::Over(result)),
        };
        self.board.king(colour)?;

        self.in_check = is_in_check(&self.board, colour);
        let result = if !has_any_legal_move(&self.board, colour, self.rules.pin_rule) {
            Some(if self.in_check {
                GameResult::Checkmate { loser: colour }
            } else {
                GameResult::Stalemate {
                    colour,
                    cause: StalemateCause::NoLegalMoves,
                }
            })
        } else if self.rules.fifty_move_rule && self.halfmove_clock >= FIFTY_MOVE_PLIES {
            Some(GameResult::Stalemate {
                colour,
                cause: StalemateCause::FiftyMoveRule,
            })
        } else if self.rules.threefold_repetition && self.current_repetitions() >= REPETITION_LIMIT {
            Some(GameResult::Stalemate {
                colour,
                cause: StalemateCause::ThreefoldRepetition,
            })
        } else {
            None
        };

        if let Some(result) = result {
            self.latch(result);
            return Ok(TurnStatus::Over(result));
        }
        if self.in_check {
            let checkers = checkers(&self.board, colour).iter().map(|piece| piece.square).collect();
            self.log.record(GameEvent::Check { colour, checkers });
        }
        Ok(TurnStatus::Ongoing {
            check: self.in_check,
        })
    }

    /// External clock signal: `loser` ran out of time.
    pub fn declare_timeout(&mut self, loser: Colour) -> Result<GameResult, ChessErrors> {
        if let GamePhase::Over(result) = self.phase {
            return Err(ChessErrors::GameOver(result));
        }
        let result = GameResult::Timeout { loser };
        self.latch(result);
        Ok(result)
    }

    fn latch(&mut self, result: GameResult) {
        self.phase = GamePhase::Over(result);
        self.log.record(GameEvent::GameOver(result));
    }

    fn record_move(&mut self, record: &MoveRecord) {
        let colour = record.piece.colour;
        self.log.record(GameEvent::Moved {
            colour,
            kind: record.piece.kind,
            from: record.from,
            to: record.to,
        });
        if let Some(piece) = record.captured {
            self.log.record(GameEvent::Captured {
                piece,
                en_passant: record.en_passant_capture,
            });
        }
        if let Some((rook_from, rook_to)) = record.castled_rook {
            self.log.record(GameEvent::Castled {
                colour,
                rook_from,
                rook_to,
            });
        }
        if let Some(kind) = record.promoted_to {
            self.log.record(GameEvent::Promoted {
                colour,
                square: record.to,
                kind,
            });
        }

        if record.piece.kind == PieceKind::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
    }

    /// Hand the turn to the other colour and expire its stale marker.
    fn turnover(&mut self, mover: Colour) {
        let next = mover.opposite();
        if mover == Colour::Black {
            self.fullmove_number += 1;
        }
        if let Some(square) = begin_turn(&mut self.board, next) {
            self.log.record(GameEvent::MarkerExpired { colour: next, square });
        }
        self.active = next;
        self.phase = GamePhase::AwaitingMove(next);
        self.position_history.push(position_key(&self.board, next));
    }

    fn current_repetitions(&self) -> usize {
        match self.position_history.last() {
            Some(key) => self.position_history.iter().filter(|&k| k == key).count(),
            None => 0,
        }
    }

    // --- Read-only accessors ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn active_colour(&self) -> Colour {
        self.active
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.phase {
            GamePhase::PromotionPending(pending) => Some(pending),
            _ => None,
        }
    }

    /// Check flag as of the last `conclude_turn`.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.log.drain_events()
    }

    pub fn log_lines(&self) -> &[String] {
        self.log.lines()
    }

    pub fn log_sink(&self) -> LogSink {
        self.log.sink()
    }
}
