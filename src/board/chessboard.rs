//! The game view controller.
//!
//! One `Chessboard` owns one game session: the position store (and its fog
//! projection), the interaction state, the replay stack and the last frame
//! pushed to the surface. Every public operation ends with `refresh_view`,
//! which projects a new frame and sends the surface only what changed.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::board::board_config::{BoardConfig, MoveCallback};
use crate::board::board_errors::{BoardError, BoardResult};
use crate::board::coordinates::Orientation;
use crate::board::highlight::{diff_frames, project_frame, BoardFrame, FrameInputs};
use crate::board::interaction::{activate, InteractionContext, InteractionEffect, InteractionState};
use crate::board::position_store::{GameOutcome, PositionStore};
use crate::board::replay::{RedoEntry, ReplayStack};
use crate::board::surface::{InputEvent, RenderSurface};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::long_algebraic::{parse_long_algebraic, MoveRequest};

/// Result as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    None,
    White,
    Black,
    Draw,
}

impl From<GameOutcome> for GameResult {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::InProgress => GameResult::None,
            GameOutcome::Checkmate { winner: Color::White } => GameResult::White,
            GameOutcome::Checkmate { winner: Color::Black } => GameResult::Black,
            GameOutcome::Draw => GameResult::Draw,
        }
    }
}

pub struct Chessboard<S: RenderSurface> {
    board_id: String,
    store: PositionStore,
    interaction: InteractionState,
    replay: ReplayStack,
    hovered: Option<Square>,
    hints: bool,
    piece_path: String,
    on_move: MoveCallback,
    surface: S,
    frame: Option<BoardFrame>,
    terminated: bool,
}

impl<S: RenderSurface> Chessboard<S> {
    pub fn new(config: BoardConfig, surface: S) -> BoardResult<Self> {
        let store = PositionStore::new(&config.position, config.color, config.fog)?;
        let mut board = Self {
            board_id: config.board_id,
            store,
            interaction: InteractionState::Idle,
            replay: ReplayStack::new(),
            hovered: None,
            hints: config.hints,
            piece_path: config.piece_path,
            on_move: config.on_move,
            surface,
            frame: None,
            terminated: false,
        };
        board.refresh_view();
        debug!("board {} ready, player {:?}", board.board_id, board.player_color());
        Ok(board)
    }

    /// Route a raw surface event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::HoverIn(square) => self.hover_in(square),
            InputEvent::HoverOut(square) => self.hover_out(square),
            InputEvent::Click(square) | InputEvent::Drop(square) => self.activate_square(square),
            InputEvent::DragStart(square) => {
                if is_on_board(square) && self.store.is_player_piece(square) {
                    self.activate_square(square);
                }
            }
            InputEvent::DragOver(_) => {}
        }
    }

    /// Feed one square activation (click or drop) to the state machine.
    pub fn activate_square(&mut self, square: Square) {
        if !is_on_board(square) || !self.store.is_player_turn() || self.terminated {
            trace!("input on square {square} ignored");
            return;
        }

        let (next, effect) = activate(&self.interaction, square, &self.store);
        trace!("{:?} -> {:?} ({:?})", self.interaction, next, effect);
        self.interaction = next;

        match effect {
            InteractionEffect::ProposeMove(request) => {
                let lan = request.to_long_algebraic();
                if (self.on_move)(&lan) {
                    self.commit_new_move(request);
                } else {
                    debug!("{lan} refused by the move callback");
                }
            }
            InteractionEffect::CommitPromotion(request) => self.commit_new_move(request),
            InteractionEffect::IllegalTarget(request) => debug!("{request} is not legal here"),
            InteractionEffect::Ignored
            | InteractionEffect::Selected(_)
            | InteractionEffect::Deselected
            | InteractionEffect::PromotionOffered
            | InteractionEffect::Blocked => {}
        }

        self.refresh_view();
    }

    pub fn hover_in(&mut self, square: Square) {
        if !is_on_board(square) {
            trace!("hover on square {square} ignored");
            return;
        }
        self.hovered = Some(square);
        self.refresh_view();
    }

    pub fn hover_out(&mut self, square: Square) {
        if self.hovered == Some(square) {
            self.hovered = None;
            self.refresh_view();
        }
    }

    /// Replace the position. Without `color` the player takes the side to move
    /// from the FEN. The board is rebuilt only when the player color changes.
    pub fn set_position(&mut self, fen: &str, color: Option<Color>) -> BoardResult<()> {
        let player = match color {
            Some(color) => color,
            None => fen
                .split_whitespace()
                .nth(1)
                .and_then(|field| field.chars().next())
                .and_then(Color::from_fen_char)
                .ok_or_else(|| BoardError::InvalidPosition(format!("no side to move in {fen}")))?,
        };

        self.store.set_position(fen, player)?;
        self.replay.clear();
        self.interaction = InteractionState::Idle;
        self.hovered = None;
        self.refresh_view();
        Ok(())
    }

    /// Legal moves the player can see, optionally restricted to one square.
    pub fn get_legal_moves(&self, square: Option<&str>) -> BoardResult<Vec<ChessMove>> {
        let from = square
            .map(|name| algebraic_to_square(name).map_err(BoardError::InvalidSquare))
            .transpose()?;
        Ok(self.store.legal_moves(from))
    }

    /// Play a move given in long algebraic notation, skipping the callback.
    pub fn play_move(&mut self, lan: &str) -> BoardResult<ChessMove> {
        self.interaction = InteractionState::Idle;
        let result = self.play_move_inner(lan);
        self.refresh_view();
        result
    }

    fn play_move_inner(&mut self, lan: &str) -> BoardResult<ChessMove> {
        if self.terminated {
            return Err(BoardError::IllegalMove(format!("{lan}: the game is over")));
        }
        let request = parse_long_algebraic(lan).map_err(BoardError::IllegalMove)?;
        let played = self.store.apply_move(request)?;
        if !self.replay.is_empty() {
            debug!("new move {played} discards {} redo entries", self.replay.len());
            self.replay.clear();
        }
        Ok(played)
    }

    /// Take back one move, keeping it for `forward`.
    pub fn backward(&mut self) -> Option<ChessMove> {
        let undone = self.store.undo_last();
        if let Some(mv) = undone {
            self.replay.push(RedoEntry::from(mv));
            self.interaction = InteractionState::Idle;
        }
        self.refresh_view();
        undone
    }

    /// Replay the most recently undone move.
    pub fn forward(&mut self) -> Option<ChessMove> {
        let replayed = self.replay_one();
        self.refresh_view();
        replayed
    }

    /// Undo everything; returns how many moves were taken back.
    pub fn first_position(&mut self) -> usize {
        let mut count = 0;
        while let Some(mv) = self.store.undo_last() {
            self.replay.push(RedoEntry::from(mv));
            count += 1;
        }
        self.interaction = InteractionState::Idle;
        self.refresh_view();
        count
    }

    /// Replay everything on the redo stack; returns how many moves were replayed.
    pub fn last_position(&mut self) -> usize {
        let mut count = 0;
        while self.replay_one().is_some() {
            count += 1;
        }
        self.refresh_view();
        count
    }

    /// Swap sides: the player takes the other color and the board turns round.
    pub fn flip_orientation(&mut self) {
        let player = self.orientation().flipped().color();
        self.store.set_player(player);
        self.interaction = InteractionState::Idle;
        self.hovered = None;
        debug!("board {} flipped, player is now {player:?}", self.board_id);
        self.refresh_view();
    }

    #[inline]
    pub fn query_game_result(&self) -> GameResult {
        self.store.game_outcome().into()
    }

    #[inline]
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    #[inline]
    pub fn player_color(&self) -> Color {
        self.store.player()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::from_color(self.store.player())
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[inline]
    pub fn is_fog_enabled(&self) -> bool {
        self.store.is_fog_enabled()
    }

    #[inline]
    pub fn turn_color(&self) -> Color {
        self.store.turn_color()
    }

    /// FEN of the authoritative position.
    pub fn fen(&self) -> String {
        self.store.current_position().get_fen()
    }

    #[inline]
    pub fn position(&self) -> &GameState {
        self.store.current_position()
    }

    #[inline]
    pub fn visible_position(&self) -> Option<&GameState> {
        self.store.visible_position()
    }

    #[inline]
    pub fn fogged_squares(&self) -> u64 {
        self.store.fogged_squares()
    }

    #[inline]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.interaction
    }

    #[inline]
    pub fn redo_entries(&self) -> &[RedoEntry] {
        self.replay.entries()
    }

    /// Last frame pushed to the surface.
    #[inline]
    pub fn frame(&self) -> Option<&BoardFrame> {
        self.frame.as_ref()
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn commit_new_move(&mut self, request: MoveRequest) {
        match self.store.apply_move(request) {
            Ok(played) => {
                if !self.replay.is_empty() {
                    debug!("new move {played} discards {} redo entries", self.replay.len());
                    self.replay.clear();
                }
            }
            Err(err) => warn!("validated move {request} failed to commit: {err}"),
        }
    }

    fn replay_one(&mut self) -> Option<ChessMove> {
        let entry = self.replay.pop()?;
        match self.store.apply_move(entry.request()) {
            Ok(played) => {
                self.interaction = InteractionState::Idle;
                debug!("replayed {played}");
                Some(played)
            }
            Err(err) => {
                warn!("could not replay {}: {err}", entry.request());
                self.replay.push(entry);
                None
            }
        }
    }

    /// Project the current state and push the difference to the surface.
    pub fn refresh_view(&mut self) {
        self.terminated = self.store.is_terminated();

        let hint_moves = if !self.hints || self.terminated {
            Vec::new()
        } else {
            match &self.interaction {
                InteractionState::Selected { origin } => self.store.legal_moves(Some(*origin)),
                InteractionState::Idle => match self.hovered {
                    Some(square) if self.store.is_player_piece(square) => self.store.legal_moves(Some(square)),
                    _ => Vec::new(),
                },
                InteractionState::Promoting { .. } => Vec::new(),
            }
        };

        let moved = if !self.store.is_fog_enabled() || self.terminated {
            self.store.current_position().last_move().map(|mv| (mv.from, mv.to))
        } else {
            None
        };

        let frame = project_frame(&FrameInputs {
            position: self.store.active_position(),
            orientation: self.orientation(),
            interaction: &self.interaction,
            hint_moves: &hint_moves,
            fogged: self.store.fogged_squares(),
            moved,
        });

        let instructions = diff_frames(self.frame.as_ref(), &frame, &self.piece_path);
        if !instructions.is_empty() {
            trace!("board {}: {} render instructions", self.board_id, instructions.len());
        }
        for instruction in &instructions {
            self.surface.apply(instruction);
        }
        self.frame = Some(frame);
    }
}
