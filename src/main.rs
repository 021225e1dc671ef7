use std::env;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};

use tabula_chess::chess_errors::ChessErrors;
use tabula_chess::game_state::chess_rules::RuleSet;
use tabula_chess::game_state::chess_types::{PieceKind, Square};
use tabula_chess::game_state::game_state::{Game, TurnStatus};
use tabula_chess::move_generation::legal_move_apply::MoveOutcome;
use tabula_chess::move_generation::legal_move_generator::all_legal_moves;
use tabula_chess::utils::game_log::LogSink;
use tabula_chess::utils::render_game_state::render_board;

const MAX_PLIES: usize = 400;

/// Random self-play driver: `tabula_chess [seed] [option=value ...]`.
fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| rand::rng().next_u64());

    let mut rules = RuleSet::fide();
    rules.log_sink = LogSink::Console;
    for arg in args.iter().filter(|a| a.contains('=')) {
        if let Some((name, value)) = arg.split_once('=') {
            rules.set_option(name, value)?;
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::with_rules(rules);
    println!("info string seed {seed}");

    for _ in 0..MAX_PLIES {
        let choices: Vec<(Square, Square)> = all_legal_moves(game.board(), game.active_colour(), rules.pin_rule)
            .iter()
            .flat_map(|(piece, moves)| moves.iter().map(move |to| (piece.square, to)))
            .collect();
        let Some(&(from, to)) = choices.choose(&mut rng) else {
            break;
        };

        if let MoveOutcome::PendingPromotion(_) = game.attempt_move(from, to)? {
            let kind = PieceKind::PROMOTIONS.choose(&mut rng).copied().unwrap_or(PieceKind::Queen);
            game.complete_promotion(kind)?;
        }
        if let TurnStatus::Over(result) = game.conclude_turn()? {
            println!("result {result:?}");
            break;
        }
    }

    println!("{}", render_board(&game.board_snapshot()));
    Ok(())
}
