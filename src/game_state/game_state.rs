//! Core board state representation.
//!
//! `GameState` is the authoritative model handed around by the rules engine.
//! It stores piece bitboards, occupancy caches, turn/state flags, clocks and
//! the history stacks needed for single-step undo and repetition detection.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves_from;
use crate::moves::chess_move::ChessMove;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::MoveRequest;

#[derive(Debug, Clone)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // One entry per applied move, most recent last.
    pub undo_stack: Vec<UndoState>,
    // Position keys since the state was created, current position last.
    pub position_history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),
            position_history: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let mut state = parse_fen(fen)?;
        state.position_history.push(state.position_key());
        Ok(state)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Copy of the position without undo or repetition history.
    pub fn detached(&self) -> Self {
        Self {
            pieces: self.pieces,
            occupancy_by_color: self.occupancy_by_color,
            occupancy_all: self.occupancy_all,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            undo_stack: Vec::new(),
            position_history: Vec::new(),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square_mask(square);
        for color in [Color::White, Color::Black] {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        let previous = self.remove(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= square_mask(square);
        self.recalc_occupancy();
        previous
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let previous = self.piece_at(square)?;
        self.pieces[previous.color.index()][previous.kind.index()] &= !square_mask(square);
        self.recalc_occupancy();
        Some(previous)
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }

    pub fn king_count(&self) -> u32 {
        self.pieces[Color::White.index()][PieceKind::King.index()].count_ones()
            + self.pieces[Color::Black.index()][PieceKind::King.index()].count_ones()
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.pieces[color.index()][PieceKind::King.index()] != 0
    }

    /// Hash of everything that makes two positions the same for repetition.
    pub fn position_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.pieces.hash(&mut hasher);
        self.side_to_move.hash(&mut hasher);
        self.castling_rights.hash(&mut hasher);
        self.en_passant_square.hash(&mut hasher);
        hasher.finish()
    }

    /// Find the legal move matching `request` and apply it.
    ///
    /// The state is left untouched when the request does not name a legal move.
    pub fn play_move(&mut self, request: MoveRequest) -> Result<ChessMove, String> {
        let candidates = legal_moves_from(self, request.from);
        let mut reaches_target = false;
        let mut chosen = None;
        for mv in candidates {
            if mv.to != request.to {
                continue;
            }
            reaches_target = true;
            if mv.promotion == request.promotion {
                chosen = Some(mv);
                break;
            }
        }

        let mv = match chosen {
            Some(mv) => mv,
            None if reaches_target && request.promotion.is_none() => {
                return Err(format!("Missing promotion piece for {request}"));
            }
            None => return Err(format!("Illegal move {request}")),
        };

        self.make_move(mv)?;
        Ok(mv)
    }

    /// Apply an already generated move and record it for undo.
    pub fn make_move(&mut self, mv: ChessMove) -> Result<(), String> {
        let undo = UndoState::capture(self, mv);
        let mut next = apply_move(&self.detached(), mv)?;
        next.undo_stack = std::mem::take(&mut self.undo_stack);
        next.position_history = std::mem::take(&mut self.position_history);
        next.undo_stack.push(undo);
        next.position_history.push(next.position_key());
        *self = next;
        Ok(())
    }

    /// Take back the last recorded move, if any.
    pub fn unmake_move(&mut self) -> Option<ChessMove> {
        let undo = self.undo_stack.pop()?;
        undo.restore(self);
        self.position_history.pop();
        if self.position_history.is_empty() {
            self.position_history.push(self.position_key());
        }
        Some(undo.mv)
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.undo_stack.last().map(|undo| undo.mv)
    }

    /// Number of times the current position has occurred.
    pub fn repetition_count(&self) -> usize {
        let key = self.position_key();
        self.position_history.iter().filter(|k| **k == key).count()
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn request(lan: &str) -> crate::utils::long_algebraic::MoveRequest {
        parse_long_algebraic(lan).expect("test move should parse")
    }

    #[test]
    fn play_and_unmake_restore_fen() {
        let mut game = GameState::new_game();
        game.play_move(request("e2e4")).expect("e2e4 should be legal");
        game.play_move(request("e7e5")).expect("e7e5 should be legal");
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );

        let undone = game.unmake_move().expect("one move to undo");
        assert_eq!(undone.from, 52);
        game.unmake_move().expect("second move to undo");
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert!(game.unmake_move().is_none());
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let mut game = GameState::new_game();
        let before = game.get_fen();
        assert!(game.play_move(request("e2e5")).is_err());
        assert!(game.play_move(request("e7e5")).is_err());
        assert_eq!(game.get_fen(), before);
        assert!(game.undo_stack.is_empty());
    }

    #[test]
    fn promotion_requires_a_piece() {
        let mut game = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let err = game.play_move(request("a7a8")).expect_err("promotion piece is mandatory");
        assert!(err.contains("promotion"));
        let mv = game.play_move(request("a7a8n")).expect("underpromotion is legal");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(
            game.piece_at(56),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
    }

    #[test]
    fn put_and_remove_keep_occupancy_in_sync() {
        let mut game = GameState::new_empty();
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(game.put(knight, 20), None);
        assert_eq!(game.occupancy_all, 1 << 20);
        let queen = Piece::new(Color::White, PieceKind::Queen);
        assert_eq!(game.put(queen, 20), Some(knight));
        assert_eq!(game.occupancy_by_color[Color::Black.index()], 0);
        assert_eq!(game.remove(20), Some(queen));
        assert_eq!(game.occupancy_all, 0);
        assert_eq!(game.remove(20), None);
    }

    #[test]
    fn repetition_counts_knight_shuffles() {
        let mut game = GameState::new_game();
        for lan in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            game.play_move(request(lan)).expect("shuffle move should be legal");
        }
        assert_eq!(game.repetition_count(), 3);
    }
}
