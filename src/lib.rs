//! Crate root module declarations for the Tabula Chess rules engine.
//!
//! This file exposes the engine's subsystems (board and game state, move
//! generation and execution, position hashing, and utility helpers) so
//! binaries, tests, benches and an external rendering loop can import stable
//! module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod zobrist;
}

pub mod utils {
    pub mod game_log;
    pub mod render_game_state;
}
