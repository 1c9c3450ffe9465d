//! Interactive text board.
//!
//! Run with:
//! `cargo run -- --fog`
//! `cargo run -- --black --no-hints --pieces my_pieces`

use fog_chessboard::board::board_config::BoardConfig;
use fog_chessboard::game_state::chess_types::Color;
use fog_chessboard::session::command_loop::run_stdio_loop;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let has_flag = |flag: &str| args.iter().any(|a| a == flag);

    let mut config = BoardConfig::new("stdio")
        .with_fog(has_flag("--fog"))
        .with_hints(!has_flag("--no-hints"));

    if has_flag("--black") {
        config = config.with_color(Color::Black);
    }

    if let Some(path) = args
        .iter()
        .position(|a| a == "--pieces")
        .and_then(|i| args.get(i + 1))
    {
        config = config.with_piece_path(path.clone());
    }

    run_stdio_loop(config)
}
