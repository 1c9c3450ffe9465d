//! Crate root module declarations for the fog chessboard project.
//!
//! This file exposes the rules engine (game state, move generation, utility
//! helpers), the board controller with its fog projection and rendering
//! contract, and the stdio session so binaries, tests, and hosts can import
//! stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_castling;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
}

pub mod board {
    pub mod board_config;
    pub mod board_errors;
    pub mod chessboard;
    pub mod coordinates;
    pub mod fog;
    pub mod highlight;
    pub mod interaction;
    pub mod position_store;
    pub mod replay;
    pub mod surface;
    pub mod text_surface;
}

pub mod session {
    pub mod command_loop;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_frame;
}
