use std::fmt;

use crate::board::board_errors::BoardResult;
use crate::board::chessboard::Chessboard;
use crate::board::surface::RenderSurface;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;

/// Called with the long algebraic move the player is about to make. Returning
/// `false` drops the move silently.
pub type MoveCallback = Box<dyn FnMut(&str) -> bool>;

pub const DEFAULT_PIECE_PATH: &str = "default_pieces";

pub struct BoardConfig {
    pub board_id: String,
    pub position: String,
    pub color: Color,
    pub on_move: MoveCallback,
    pub hints: bool,
    pub fog: bool,
    pub piece_path: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_id: "board".to_string(),
            position: STARTING_POSITION_FEN.to_string(),
            color: Color::White,
            on_move: Box::new(|_: &str| true),
            hints: true,
            fog: false,
            piece_path: DEFAULT_PIECE_PATH.to_string(),
        }
    }
}

impl fmt::Debug for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardConfig")
            .field("board_id", &self.board_id)
            .field("position", &self.position)
            .field("color", &self.color)
            .field("hints", &self.hints)
            .field("fog", &self.fog)
            .field("piece_path", &self.piece_path)
            .finish_non_exhaustive()
    }
}

impl BoardConfig {
    pub fn new(board_id: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, fen: impl Into<String>) -> Self {
        self.position = fen.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_on_move(mut self, on_move: impl FnMut(&str) -> bool + 'static) -> Self {
        self.on_move = Box::new(on_move);
        self
    }

    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_fog(mut self, fog: bool) -> Self {
        self.fog = fog;
        self
    }

    pub fn with_piece_path(mut self, piece_path: impl Into<String>) -> Self {
        self.piece_path = piece_path.into();
        self
    }

    /// Create the controller and draw the first frame on `surface`.
    pub fn build<S: RenderSurface>(self, surface: S) -> BoardResult<Chessboard<S>> {
        Chessboard::new(self, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_errors::BoardError;
    use crate::board::surface::RecordingSurface;

    #[test]
    fn defaults_match_a_fresh_board() {
        let config = BoardConfig::new("main");
        assert_eq!(config.board_id, "main");
        assert_eq!(config.position, STARTING_POSITION_FEN);
        assert_eq!(config.color, Color::White);
        assert!(config.hints);
        assert!(!config.fog);
        assert_eq!(config.piece_path, "default_pieces");
        assert!(format!("{config:?}").contains("fog: false"));
    }

    #[test]
    fn bad_position_fails_to_build() {
        let result = BoardConfig::new("main")
            .with_position("8/8/8 w - - 0 1")
            .build(RecordingSurface::new());
        assert!(matches!(result, Err(BoardError::InvalidPosition(_))));
    }
}
