//! Per-square decorations and the frames built from them.
//!
//! A `BoardFrame` is a complete picture of what the player should see. It is
//! a pure function of the controller state, and consecutive frames are diffed
//! into render instructions so the surface only ever receives changes.

use serde::{Deserialize, Serialize};

use crate::board::coordinates::{grid_squares, Orientation};
use crate::board::interaction::InteractionState;
use crate::board::surface::RenderInstruction;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Selected,
    Hinted,
    HintedCapturable,
    Fogged,
    Moved,
    Covered,
    PromotionChoice(Piece),
}

const FLAG_ORDER: [(Decoration, u8); 6] = [
    (Decoration::Selected, 1 << 0),
    (Decoration::Hinted, 1 << 1),
    (Decoration::HintedCapturable, 1 << 2),
    (Decoration::Fogged, 1 << 3),
    (Decoration::Moved, 1 << 4),
    (Decoration::Covered, 1 << 5),
];

fn flag_bit(decoration: Decoration) -> Option<u8> {
    FLAG_ORDER
        .iter()
        .find(|(flag, _)| *flag == decoration)
        .map(|(_, bit)| *bit)
}

/// Decorations on one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightSet {
    bits: u8,
    promotion_choice: Option<Piece>,
}

impl HighlightSet {
    pub fn insert(&mut self, decoration: Decoration) {
        match decoration {
            Decoration::PromotionChoice(piece) => self.promotion_choice = Some(piece),
            flag => self.bits |= flag_bit(flag).unwrap_or(0),
        }
    }

    pub fn remove(&mut self, decoration: Decoration) {
        match decoration {
            Decoration::PromotionChoice(piece) => {
                if self.promotion_choice == Some(piece) {
                    self.promotion_choice = None;
                }
            }
            flag => self.bits &= !flag_bit(flag).unwrap_or(0),
        }
    }

    pub fn contains(&self, decoration: Decoration) -> bool {
        match decoration {
            Decoration::PromotionChoice(piece) => self.promotion_choice == Some(piece),
            flag => self.bits & flag_bit(flag).unwrap_or(0) != 0,
        }
    }

    #[inline]
    pub fn promotion_choice(&self) -> Option<Piece> {
        self.promotion_choice
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0 && self.promotion_choice.is_none()
    }

    /// Decorations in a fixed order, promotion choice last.
    pub fn iter(&self) -> impl Iterator<Item = Decoration> + '_ {
        FLAG_ORDER
            .iter()
            .filter(|(_, bit)| self.bits & bit != 0)
            .map(|(flag, _)| *flag)
            .chain(self.promotion_choice.map(Decoration::PromotionChoice))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareView {
    pub piece: Option<Piece>,
    pub highlights: HighlightSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFrame {
    pub orientation: Orientation,
    // Indexed by square.
    pub squares: [SquareView; 64],
}

impl BoardFrame {
    #[inline]
    pub fn view(&self, square: Square) -> &SquareView {
        &self.squares[square as usize]
    }

    /// Squares carrying `decoration`, from a1 upwards.
    pub fn squares_with(&self, decoration: Decoration) -> Vec<Square> {
        (0..64u8)
            .filter(|sq| self.squares[*sq as usize].highlights.contains(decoration))
            .collect()
    }
}

/// Everything a frame is computed from.
pub struct FrameInputs<'a> {
    pub position: &'a GameState,
    pub orientation: Orientation,
    pub interaction: &'a InteractionState,
    /// Moves whose destinations are hinted; empty when hints are off.
    pub hint_moves: &'a [ChessMove],
    pub fogged: u64,
    /// Endpoints of the last move, when they may be shown.
    pub moved: Option<(Square, Square)>,
}

pub fn project_frame(inputs: &FrameInputs<'_>) -> BoardFrame {
    let mut squares = [SquareView::default(); 64];

    for (square, view) in squares.iter_mut().enumerate() {
        let square = square as Square;
        view.piece = inputs.position.piece_at(square);
        if inputs.fogged & square_mask(square) != 0 {
            view.highlights.insert(Decoration::Fogged);
        }
    }

    if let Some((from, to)) = inputs.moved {
        squares[from as usize].highlights.insert(Decoration::Moved);
        squares[to as usize].highlights.insert(Decoration::Moved);
    }

    match inputs.interaction {
        InteractionState::Idle => {}
        InteractionState::Selected { origin } => {
            squares[*origin as usize].highlights.insert(Decoration::Selected);
        }
        InteractionState::Promoting { candidates, .. } => {
            for (square, view) in squares.iter_mut().enumerate() {
                match candidates.iter().find(|c| c.square as usize == square) {
                    Some(candidate) => view.highlights.insert(Decoration::PromotionChoice(candidate.piece)),
                    None => view.highlights.insert(Decoration::Covered),
                }
            }
        }
    }

    if !inputs.interaction.is_promoting() {
        for mv in inputs.hint_moves {
            let highlights = &mut squares[mv.to as usize].highlights;
            highlights.insert(Decoration::Hinted);
            if mv.is_capture() {
                highlights.insert(Decoration::HintedCapturable);
            }
        }
    }

    BoardFrame {
        orientation: inputs.orientation,
        squares,
    }
}

#[inline]
pub fn piece_image(piece_path: &str, piece: Piece) -> String {
    format!("{piece_path}/{}.svg", piece.code())
}

fn decoration_image(piece_path: &str, decoration: Decoration) -> Option<String> {
    match decoration {
        Decoration::PromotionChoice(piece) => Some(piece_image(piece_path, piece)),
        _ => None,
    }
}

/// Instructions turning `previous` into `next` on the surface.
///
/// With no previous frame, or a different orientation, every square is torn
/// down and recreated in grid order before anything is placed on it.
pub fn diff_frames(previous: Option<&BoardFrame>, next: &BoardFrame, piece_path: &str) -> Vec<RenderInstruction> {
    let mut out = Vec::new();

    let previous = match previous {
        Some(frame) if frame.orientation == next.orientation => frame,
        stale => {
            if let Some(frame) = stale {
                for (_, square) in grid_squares(frame.orientation) {
                    out.push(RenderInstruction::DestroySquare { square });
                }
            }
            for (grid, square) in grid_squares(next.orientation) {
                out.push(RenderInstruction::CreateSquare {
                    square,
                    row: grid.row,
                    col: grid.col,
                    light: is_light_square(square),
                });
            }
            for (_, square) in grid_squares(next.orientation) {
                push_square_contents(&mut out, square, next.view(square), piece_path);
            }
            return out;
        }
    };

    for (_, square) in grid_squares(next.orientation) {
        let before = previous.view(square);
        let after = next.view(square);
        if before == after {
            continue;
        }

        for decoration in before.highlights.iter() {
            if !after.highlights.contains(decoration) {
                out.push(RenderInstruction::RemoveDecoration { square, decoration });
            }
        }
        if before.piece != after.piece {
            if before.piece.is_some() {
                out.push(RenderInstruction::RemovePiece { square });
            }
            if let Some(piece) = after.piece {
                out.push(RenderInstruction::PutPiece {
                    square,
                    piece,
                    image: piece_image(piece_path, piece),
                });
            }
        }
        for decoration in after.highlights.iter() {
            if !before.highlights.contains(decoration) {
                out.push(RenderInstruction::AddDecoration {
                    square,
                    decoration,
                    image: decoration_image(piece_path, decoration),
                });
            }
        }
    }
    out
}

fn push_square_contents(out: &mut Vec<RenderInstruction>, square: Square, view: &SquareView, piece_path: &str) {
    if let Some(piece) = view.piece {
        out.push(RenderInstruction::PutPiece {
            square,
            piece,
            image: piece_image(piece_path, piece),
        });
    }
    for decoration in view.highlights.iter() {
        out.push(RenderInstruction::AddDecoration {
            square,
            decoration,
            image: decoration_image(piece_path, decoration),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::interaction::promotion_candidates;
    use crate::move_generation::legal_move_generator::legal_moves_from;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn highlight_set_keeps_flags_in_order() {
        let mut set = HighlightSet::default();
        assert!(set.is_empty());
        set.insert(Decoration::Moved);
        set.insert(Decoration::Selected);
        set.insert(Decoration::PromotionChoice(Piece::new(Color::White, PieceKind::Rook)));
        let listed: Vec<_> = set.iter().collect();
        assert_eq!(
            listed,
            vec![
                Decoration::Selected,
                Decoration::Moved,
                Decoration::PromotionChoice(Piece::new(Color::White, PieceKind::Rook)),
            ]
        );
        set.remove(Decoration::Selected);
        assert!(!set.contains(Decoration::Selected));
        assert!(set.contains(Decoration::Moved));
    }

    #[test]
    fn selection_and_hints_are_projected() {
        let game = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let interaction = InteractionState::Selected { origin: sq("e4") };
        let hints = legal_moves_from(&game, sq("e4"));
        let inputs = FrameInputs {
            position: &game,
            orientation: Orientation::White,
            interaction: &interaction,
            hint_moves: &hints,
            fogged: 0,
            moved: None,
        };
        let frame = project_frame(&inputs);

        assert_eq!(frame.squares_with(Decoration::Selected), vec![sq("e4")]);
        assert_eq!(frame.squares_with(Decoration::Hinted), vec![sq("d5"), sq("e5")]);
        assert_eq!(frame.squares_with(Decoration::HintedCapturable), vec![sq("d5")]);
        // Same inputs, same frame.
        assert_eq!(project_frame(&inputs), frame);
    }

    #[test]
    fn promotion_covers_everything_but_the_choices() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let interaction = InteractionState::Promoting {
            origin: sq("a7"),
            destination: sq("a8"),
            candidates: promotion_candidates(sq("a8"), Orientation::White, Color::White),
        };
        let frame = project_frame(&FrameInputs {
            position: &game,
            orientation: Orientation::White,
            interaction: &interaction,
            hint_moves: &[],
            fogged: 0,
            moved: None,
        });
        assert_eq!(frame.squares_with(Decoration::Covered).len(), 60);
        assert_eq!(
            frame.view(sq("a6")).highlights.promotion_choice(),
            Some(Piece::new(Color::White, PieceKind::Bishop))
        );
        assert!(frame.squares_with(Decoration::Selected).is_empty());
    }

    #[test]
    fn first_frame_builds_the_board_and_later_frames_send_deltas() {
        let game = GameState::new_game();
        let idle = InteractionState::Idle;
        let first = project_frame(&FrameInputs {
            position: &game,
            orientation: Orientation::White,
            interaction: &idle,
            hint_moves: &[],
            fogged: 0,
            moved: None,
        });
        let build = diff_frames(None, &first, "pieces");
        assert_eq!(build.len(), 64 + 32);
        assert_eq!(
            build[0],
            RenderInstruction::CreateSquare {
                square: sq("a8"),
                row: 0,
                col: 0,
                light: true
            }
        );
        assert!(diff_frames(Some(&first), &first, "pieces").is_empty());

        let selected = InteractionState::Selected { origin: sq("e2") };
        let second = project_frame(&FrameInputs {
            position: &game,
            orientation: Orientation::White,
            interaction: &selected,
            hint_moves: &[],
            fogged: 0,
            moved: None,
        });
        assert_eq!(
            diff_frames(Some(&first), &second, "pieces"),
            vec![RenderInstruction::AddDecoration {
                square: sq("e2"),
                decoration: Decoration::Selected,
                image: None
            }]
        );

        let mut flipped = second.clone();
        flipped.orientation = Orientation::Black;
        let rebuild = diff_frames(Some(&second), &flipped, "pieces");
        assert!(matches!(rebuild[0], RenderInstruction::DestroySquare { .. }));
        assert_eq!(
            rebuild[64],
            RenderInstruction::CreateSquare {
                square: sq("h1"),
                row: 0,
                col: 0,
                light: true
            }
        );
    }
}
