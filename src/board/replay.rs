use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::ChessMove;
use crate::utils::long_algebraic::MoveRequest;

/// A move that was taken back and can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedoEntry {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl RedoEntry {
    #[inline]
    pub fn request(self) -> MoveRequest {
        MoveRequest::new(self.from, self.to, self.promotion)
    }
}

impl From<ChessMove> for RedoEntry {
    fn from(mv: ChessMove) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

/// Undone moves, most recently undone last.
#[derive(Debug, Clone, Default)]
pub struct ReplayStack {
    entries: Vec<RedoEntry>,
}

impl ReplayStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, entry: RedoEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<RedoEntry> {
        self.entries.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RedoEntry] {
        &self.entries
    }
}
