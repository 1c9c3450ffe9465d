use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Snapshots every field a move can touch so undo also restores positions
/// that were rebuilt outside normal move application.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: ChessMove,
    pub prev_pieces: [[u64; 6]; 2],
    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}

impl UndoState {
    pub fn capture(game_state: &GameState, mv: ChessMove) -> Self {
        Self {
            mv,
            prev_pieces: game_state.pieces,
            prev_side_to_move: game_state.side_to_move,
            prev_castling_rights: game_state.castling_rights,
            prev_en_passant_square: game_state.en_passant_square,
            prev_halfmove_clock: game_state.halfmove_clock,
            prev_fullmove_number: game_state.fullmove_number,
        }
    }

    pub fn restore(&self, game_state: &mut GameState) {
        game_state.pieces = self.prev_pieces;
        game_state.side_to_move = self.prev_side_to_move;
        game_state.castling_rights = self.prev_castling_rights;
        game_state.en_passant_square = self.prev_en_passant_square;
        game_state.halfmove_clock = self.prev_halfmove_clock;
        game_state.fullmove_number = self.prev_fullmove_number;
        game_state.recalc_occupancy();
    }
}
