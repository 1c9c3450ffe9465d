//! Authoritative position plus the fog projection derived from it.
//!
//! All position changes go through here so the projection is rebuilt after
//! every one of them.

use log::debug;

use crate::board::board_errors::{BoardError, BoardResult};
use crate::board::fog::{project_fog, resolve_phantom_move, FogOutcome, FogProjection};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::game_status;
use crate::move_generation::legal_move_generator::{generate_legal_moves, legal_moves_from};
use crate::moves::chess_move::ChessMove;
use crate::utils::long_algebraic::MoveRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Checkmate { winner: Color },
    Draw,
}

#[derive(Debug, Clone)]
pub struct PositionStore {
    authoritative: GameState,
    player: Color,
    fog_enabled: bool,
    // Present while fog is on and both kings are still on the board.
    projection: Option<FogProjection>,
    fog_terminal: bool,
}

impl PositionStore {
    pub fn new(fen: &str, player: Color, fog_enabled: bool) -> BoardResult<Self> {
        let authoritative = GameState::from_fen(fen).map_err(BoardError::InvalidPosition)?;
        let mut store = Self {
            authoritative,
            player,
            fog_enabled,
            projection: None,
            fog_terminal: false,
        };
        store.reproject();
        Ok(store)
    }

    #[inline]
    pub fn current_position(&self) -> &GameState {
        &self.authoritative
    }

    #[inline]
    pub fn visible_position(&self) -> Option<&GameState> {
        self.projection.as_ref().map(|projection| &projection.visible)
    }

    /// The position the player is shown: the projection when there is one.
    #[inline]
    pub fn active_position(&self) -> &GameState {
        self.visible_position().unwrap_or(&self.authoritative)
    }

    #[inline]
    pub fn fogged_squares(&self) -> u64 {
        self.projection.as_ref().map_or(0, |projection| projection.fogged)
    }

    #[inline]
    pub fn is_fog_enabled(&self) -> bool {
        self.fog_enabled
    }

    #[inline]
    pub fn player(&self) -> Color {
        self.player
    }

    /// Replace the whole position. A malformed FEN leaves the store untouched.
    pub fn set_position(&mut self, fen: &str, player: Color) -> BoardResult<()> {
        let authoritative = GameState::from_fen(fen).map_err(BoardError::InvalidPosition)?;
        self.authoritative = authoritative;
        self.player = player;
        self.reproject();
        debug!("position set to {fen} for {player:?}");
        Ok(())
    }

    pub fn set_player(&mut self, player: Color) {
        self.player = player;
        self.reproject();
    }

    /// Validate and commit a move for whichever side is to move.
    ///
    /// Under fog the player's own moves are checked against what the player
    /// can see. A move the true board then refuses is retried as a phantom
    /// move.
    pub fn apply_move(&mut self, request: MoveRequest) -> BoardResult<ChessMove> {
        let mover = self.authoritative.side_to_move;

        let played = match &self.projection {
            Some(projection) if mover == self.player => {
                if projection.is_fogged(request.to) {
                    return Err(BoardError::IllegalMove(format!("{request} targets a fogged square")));
                }
                if !legal_moves_from(&projection.visible, request.from)
                    .iter()
                    .any(|mv| mv.to == request.to)
                {
                    return Err(BoardError::IllegalMove(format!("{request} is not available")));
                }

                match self.authoritative.play_move(request) {
                    Ok(mv) => mv,
                    Err(reason) => {
                        debug!("{reason} on the true board, trying phantom resolution");
                        let (merged, mv) =
                            resolve_phantom_move(&self.authoritative, &projection.visible, request)
                                .map_err(BoardError::IllegalMove)?;
                        self.authoritative = merged;
                        mv
                    }
                }
            }
            _ => self
                .authoritative
                .play_move(request)
                .map_err(BoardError::IllegalMove)?,
        };

        debug!("committed {played} for {mover:?}");
        self.reproject();
        Ok(played)
    }

    /// Single step take-back on the authoritative position.
    pub fn undo_last(&mut self) -> Option<ChessMove> {
        let undone = self.authoritative.unmake_move()?;
        debug!("undid {undone}");
        self.reproject();
        Some(undone)
    }

    #[inline]
    pub fn turn_color(&self) -> Color {
        self.authoritative.side_to_move
    }

    #[inline]
    pub fn is_player_turn(&self) -> bool {
        self.turn_color() == self.player
    }

    pub fn game_outcome(&self) -> GameOutcome {
        if self.fog_enabled {
            return match (
                self.authoritative.has_king(Color::White),
                self.authoritative.has_king(Color::Black),
            ) {
                (true, false) => GameOutcome::Checkmate { winner: Color::White },
                (false, true) => GameOutcome::Checkmate { winner: Color::Black },
                _ => GameOutcome::InProgress,
            };
        }

        let status = game_status(&self.authoritative);
        if !status.is_over() {
            return GameOutcome::InProgress;
        }
        match status.winner() {
            Some(winner) => GameOutcome::Checkmate { winner },
            None => GameOutcome::Draw,
        }
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.fog_terminal || self.game_outcome() != GameOutcome::InProgress
    }

    /// Moves of the position the player sees, fogged destinations excluded.
    pub fn legal_moves(&self, from: Option<Square>) -> Vec<ChessMove> {
        let position = self.active_position();
        let mut moves = match from {
            Some(square) => legal_moves_from(position, square),
            None => generate_legal_moves(position),
        };
        let fogged = self.fogged_squares();
        moves.retain(|mv| fogged & square_mask(mv.to) == 0);
        moves
    }

    fn reproject(&mut self) {
        if !self.fog_enabled {
            self.projection = None;
            self.fog_terminal = false;
            return;
        }
        match project_fog(&self.authoritative, self.player) {
            FogOutcome::Projected(projection) => {
                self.projection = Some(projection);
                self.fog_terminal = false;
            }
            FogOutcome::Terminal => {
                debug!("single king left, fog lifted");
                self.projection = None;
                self.fog_terminal = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn request(lan: &str) -> MoveRequest {
        parse_long_algebraic(lan).expect("test move should parse")
    }

    #[test]
    fn plain_moves_and_undo() {
        let mut store = PositionStore::new(STARTING_POSITION_FEN, Color::White, false).expect("start FEN");
        store.apply_move(request("e2e4")).expect("e2e4 is legal");
        assert_eq!(store.turn_color(), Color::Black);
        assert!(!store.is_player_turn());
        assert!(matches!(store.apply_move(request("e4e5")), Err(BoardError::IllegalMove(_))));

        let undone = store.undo_last().expect("one move to undo");
        assert_eq!(undone.to_long_algebraic(), "e2e4");
        assert_eq!(store.current_position().get_fen(), STARTING_POSITION_FEN);
        assert!(store.undo_last().is_none());
    }

    #[test]
    fn invalid_fen_keeps_previous_position() {
        let mut store = PositionStore::new(STARTING_POSITION_FEN, Color::White, true).expect("start FEN");
        let before = store.current_position().get_fen();
        let fogged = store.fogged_squares();
        let err = store.set_position("not a fen", Color::Black).expect_err("malformed FEN");
        assert!(matches!(err, BoardError::InvalidPosition(_)));
        assert_eq!(store.current_position().get_fen(), before);
        assert_eq!(store.fogged_squares(), fogged);
        assert_eq!(store.player(), Color::White);
    }

    #[test]
    fn fogged_destination_is_illegal() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        let mut store = PositionStore::new(fen, Color::White, true).expect("FEN should parse");
        let err = store.apply_move(request("e2e3")).expect_err("e3 is fogged");
        assert!(matches!(err, BoardError::IllegalMove(_)));
        assert_eq!(store.current_position().get_fen(), fen);
        let e3 = algebraic_to_square("e3").expect("square");
        assert!(store.legal_moves(None).iter().all(|mv| mv.to != e3));
    }

    #[test]
    fn phantom_move_commits_through_the_store() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        let mut store = PositionStore::new(fen, Color::White, true).expect("FEN should parse");
        store.apply_move(request("e2e4")).expect("phantom resolution succeeds");
        assert_eq!(store.current_position().get_fen(), "4k3/8/8/8/4P3/4n3/8/4K3 b - - 0 1");
        assert_eq!(store.turn_color(), Color::Black);
        let visible = store.visible_position().expect("fog still active");
        assert_eq!(visible.side_to_move, Color::White);
    }

    #[test]
    fn capturing_a_hidden_king_ends_a_fog_game() {
        let mut store =
            PositionStore::new("4r2k/8/8/8/8/8/8/4K3 w - - 0 1", Color::White, true).expect("FEN should parse");
        let e8 = algebraic_to_square("e8").expect("square");
        assert_eq!(store.active_position().piece_at(e8), None);

        store.apply_move(request("e1e2")).expect("king walks into the hidden rook");
        assert_eq!(store.game_outcome(), GameOutcome::InProgress);
        store.apply_move(request("e8e2")).expect("rook takes the king");

        assert!(store.is_terminated());
        assert!(store.visible_position().is_none());
        assert_eq!(store.game_outcome(), GameOutcome::Checkmate { winner: Color::Black });
    }

    #[test]
    fn classic_outcomes() {
        let store = PositionStore::new("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Color::White, false).expect("FEN");
        assert_eq!(store.game_outcome(), GameOutcome::Draw);
        let store = PositionStore::new(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            Color::White,
            false,
        )
        .expect("FEN");
        assert_eq!(store.game_outcome(), GameOutcome::Checkmate { winner: Color::Black });
        assert!(store.is_terminated());
    }
}
