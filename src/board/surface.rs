//! Contract with whatever paints the board.
//!
//! The controller never draws. It hands a surface an ordered list of
//! `RenderInstruction`s and receives `InputEvent`s back from it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::board::highlight::Decoration;
use crate::game_state::chess_types::{Piece, Square};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderInstruction {
    CreateSquare {
        square: Square,
        row: u8,
        col: u8,
        light: bool,
    },
    DestroySquare {
        square: Square,
    },
    PutPiece {
        square: Square,
        piece: Piece,
        image: String,
    },
    RemovePiece {
        square: Square,
    },
    AddDecoration {
        square: Square,
        decoration: Decoration,
        image: Option<String>,
    },
    RemoveDecoration {
        square: Square,
        decoration: Decoration,
    },
}

impl RenderInstruction {
    pub fn square(&self) -> Square {
        match self {
            RenderInstruction::CreateSquare { square, .. }
            | RenderInstruction::DestroySquare { square }
            | RenderInstruction::PutPiece { square, .. }
            | RenderInstruction::RemovePiece { square }
            | RenderInstruction::AddDecoration { square, .. }
            | RenderInstruction::RemoveDecoration { square, .. } => *square,
        }
    }
}

/// Raw input reported by the surface for one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "square", rename_all = "snake_case")]
pub enum InputEvent {
    HoverIn(Square),
    HoverOut(Square),
    Click(Square),
    DragStart(Square),
    DragOver(Square),
    Drop(Square),
}

pub trait RenderSurface {
    fn apply(&mut self, instruction: &RenderInstruction);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn apply(&mut self, instruction: &RenderInstruction) {
        (**self).apply(instruction);
    }
}

/// Lets the host keep a handle on a surface it gave away.
impl<S: RenderSurface> RenderSurface for Rc<RefCell<S>> {
    fn apply(&mut self, instruction: &RenderInstruction) {
        self.borrow_mut().apply(instruction);
    }
}

/// Keeps every instruction it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    instructions: Vec<RenderInstruction>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    /// Drain the log, leaving it empty for the next batch.
    pub fn take(&mut self) -> Vec<RenderInstruction> {
        std::mem::take(&mut self.instructions)
    }
}

impl RenderSurface for RecordingSurface {
    fn apply(&mut self, instruction: &RenderInstruction) {
        self.instructions.push(instruction.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn shared_handle_records_into_the_same_log() {
        let shared = Rc::new(RefCell::new(RecordingSurface::new()));
        let mut handle = Rc::clone(&shared);
        handle.apply(&RenderInstruction::RemovePiece { square: 12 });
        handle.apply(&RenderInstruction::DestroySquare { square: 12 });
        assert_eq!(shared.borrow().instructions().len(), 2);
        assert_eq!(shared.borrow_mut().take()[1].square(), 12);
        assert!(shared.borrow().instructions().is_empty());
    }

    #[test]
    fn instructions_and_events_serialize_for_web_hosts() {
        let put = RenderInstruction::PutPiece {
            square: 4,
            piece: Piece::new(Color::White, PieceKind::King),
            image: "default_pieces/kw.svg".to_string(),
        };
        let json = serde_json::to_string(&put).expect("instruction serializes");
        assert_eq!(
            json,
            r#"{"op":"put_piece","square":4,"piece":{"color":"white","kind":"king"},"image":"default_pieces/kw.svg"}"#
        );

        let event: InputEvent = serde_json::from_str(r#"{"event":"click","square":28}"#).expect("event parses");
        assert_eq!(event, InputEvent::Click(28));
    }
}
