//! Seeded random fog-of-war games driven through the board controller.
//!
//! The player's side is played with simulated clicks, the other side with
//! public `play_move` calls. Each finished game is rewound to the start and
//! replayed to the end, and the final positions must match.
//!
//! Run with:
//! `cargo run --release --bin random_fog_game`
//! `cargo run --release --bin random_fog_game -- --games 50 --seed 7 --verbose`

use rand::seq::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

use fog_chessboard::board::board_config::BoardConfig;
use fog_chessboard::board::chessboard::{Chessboard, GameResult};
use fog_chessboard::board::interaction::InteractionState;
use fog_chessboard::board::surface::RecordingSurface;
use fog_chessboard::game_state::chess_types::Color;
use fog_chessboard::move_generation::legal_move_generator::generate_legal_moves;
use fog_chessboard::moves::chess_move::ChessMove;

struct RunConfig {
    games: u32,
    seed: u64,
    max_plies: u32,
    verbose: bool,
}

fn parse_args() -> Result<RunConfig, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value_of = |flag: &str| -> Result<Option<u64>, String> {
        match args.iter().position(|a| a == flag) {
            None => Ok(None),
            Some(i) => args
                .get(i + 1)
                .ok_or_else(|| format!("{flag} needs a value"))?
                .parse::<u64>()
                .map(Some)
                .map_err(|e| format!("{flag}: {e}")),
        }
    };

    Ok(RunConfig {
        games: value_of("--games")?.unwrap_or(20) as u32,
        seed: value_of("--seed")?.unwrap_or(1234),
        max_plies: value_of("--plies")?.unwrap_or(160) as u32,
        verbose: args.iter().any(|a| a == "--verbose" || a == "-v"),
    })
}

/// Play `mv` for the player the way a user would: click the piece, click the
/// target, and pick the promotion piece when offered.
fn click_move(board: &mut Chessboard<RecordingSurface>, mv: ChessMove) {
    board.activate_square(mv.from);
    board.activate_square(mv.to);

    let choice = match board.interaction_state() {
        InteractionState::Promoting { candidates, .. } => candidates
            .iter()
            .find(|candidate| Some(candidate.piece.kind) == mv.promotion)
            .map(|candidate| candidate.square),
        _ => None,
    };
    if let Some(square) = choice {
        board.activate_square(square);
    }
}

struct GameReport {
    plies: u32,
    result: GameResult,
    replay_ok: bool,
}

fn play_one_game(rng: &mut StdRng, config: &RunConfig) -> Result<GameReport, String> {
    let player = if rng.random_bool(0.5) { Color::White } else { Color::Black };
    let mut board = BoardConfig::new("random")
        .with_fog(true)
        .with_color(player)
        .build(RecordingSurface::new())
        .map_err(|e| e.to_string())?;

    let mut plies = 0;
    while plies < config.max_plies && !board.is_terminated() {
        let mover = board.turn_color();
        if mover == player {
            let moves = board.get_legal_moves(None).map_err(|e| e.to_string())?;
            let Some(mv) = moves.choose(rng).copied() else {
                break;
            };
            click_move(&mut board, mv);
        } else {
            let moves = generate_legal_moves(board.position());
            let Some(mv) = moves.choose(rng).copied() else {
                break;
            };
            board.play_move(&mv.to_long_algebraic()).map_err(|e| e.to_string())?;
        }

        if board.turn_color() == mover {
            // The move did not go through; nothing else to try from here.
            break;
        }
        board.surface_mut().take();
        plies += 1;
    }

    let end_fen = board.fen();
    let rewound = board.first_position();
    let replayed = board.last_position();
    let replay_ok = rewound == replayed && board.fen() == end_fen;

    if config.verbose {
        println!(
            "player {player:?}: {plies} plies, {:?}, replay {}",
            board.query_game_result(),
            if replay_ok { "ok" } else { "MISMATCH" }
        );
    }

    Ok(GameReport {
        plies,
        result: board.query_game_result(),
        replay_ok,
    })
}

fn main() -> Result<(), String> {
    let config = parse_args()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut total_plies = 0u64;
    let mut decisive = 0u32;
    let mut failures = 0u32;

    for _ in 0..config.games {
        let report = play_one_game(&mut rng, &config)?;
        total_plies += u64::from(report.plies);
        if matches!(report.result, GameResult::White | GameResult::Black) {
            decisive += 1;
        }
        if !report.replay_ok {
            failures += 1;
        }
    }

    println!(
        "{} games, {} plies, {} decisive, {} replay mismatches",
        config.games, total_plies, decisive, failures
    );

    if failures > 0 {
        return Err(format!("{failures} game(s) did not replay to the same position"));
    }
    Ok(())
}
