use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

/// Something that lists the moves available to the side to move.
pub trait MoveGenerator: Send + Sync {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ChessMove>;

    /// Union of all destination squares.
    fn destinations(&self, game_state: &GameState) -> u64 {
        self.generate_moves(game_state)
            .iter()
            .fold(0u64, |acc, mv| acc | (1u64 << mv.to))
    }
}
