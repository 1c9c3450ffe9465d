//! Square activation state machine.
//!
//! `activate` is pure: it reads the board through `InteractionContext` and
//! returns the next state together with the effect the controller must carry
//! out. Committing moves and calling the acceptance callback stay with the
//! caller.

use log::trace;

use crate::board::coordinates::{grid_to_square, square_to_grid, GridPosition, Orientation};
use crate::board::position_store::PositionStore;
use crate::game_state::chess_types::*;
use crate::utils::long_algebraic::MoveRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionCandidate {
    pub square: Square,
    pub piece: Piece,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected {
        origin: Square,
    },
    Promoting {
        origin: Square,
        destination: Square,
        candidates: Vec<PromotionCandidate>,
    },
}

impl InteractionState {
    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            InteractionState::Selected { origin } | InteractionState::Promoting { origin, .. } => Some(*origin),
            InteractionState::Idle => None,
        }
    }

    #[inline]
    pub fn is_promoting(&self) -> bool {
        matches!(self, InteractionState::Promoting { .. })
    }
}

/// What the controller has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEffect {
    Ignored,
    Selected(Square),
    Deselected,
    /// Target was not a legal destination; the selection is dropped.
    IllegalTarget(MoveRequest),
    PromotionOffered,
    /// Click outside the promotion choices.
    Blocked,
    /// Ask the acceptance callback, then commit.
    ProposeMove(MoveRequest),
    /// Commit without asking.
    CommitPromotion(MoveRequest),
}

pub trait InteractionContext {
    fn player_color(&self) -> Color;
    fn is_player_piece(&self, square: Square) -> bool;
    fn is_legal_target(&self, from: Square, to: Square) -> bool;
    fn is_promotion(&self, from: Square, to: Square) -> bool;

    fn orientation(&self) -> Orientation {
        Orientation::from_color(self.player_color())
    }
}

impl InteractionContext for PositionStore {
    fn player_color(&self) -> Color {
        self.player()
    }

    fn is_player_piece(&self, square: Square) -> bool {
        self.active_position()
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.player())
    }

    fn is_legal_target(&self, from: Square, to: Square) -> bool {
        self.legal_moves(Some(from)).iter().any(|mv| mv.to == to)
    }

    fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.legal_moves(Some(from))
            .iter()
            .any(|mv| mv.to == to && mv.promotion.is_some())
    }
}

pub fn activate(
    state: &InteractionState,
    square: Square,
    ctx: &impl InteractionContext,
) -> (InteractionState, InteractionEffect) {
    match state {
        InteractionState::Promoting {
            origin,
            destination,
            candidates,
        } => match candidates.iter().find(|candidate| candidate.square == square) {
            Some(choice) => (
                InteractionState::Idle,
                InteractionEffect::CommitPromotion(MoveRequest::new(*origin, *destination, Some(choice.piece.kind))),
            ),
            None => (state.clone(), InteractionEffect::Blocked),
        },

        InteractionState::Selected { origin } if *origin == square => {
            (InteractionState::Idle, InteractionEffect::Deselected)
        }

        _ if ctx.is_player_piece(square) => (
            InteractionState::Selected { origin: square },
            InteractionEffect::Selected(square),
        ),

        InteractionState::Selected { origin } => {
            let request = MoveRequest::new(*origin, square, None);
            if !ctx.is_legal_target(*origin, square) {
                trace!("{request} is not a legal target");
                return (InteractionState::Idle, InteractionEffect::IllegalTarget(request));
            }
            if ctx.is_promotion(*origin, square) {
                let candidates = promotion_candidates(square, ctx.orientation(), ctx.player_color());
                return (
                    InteractionState::Promoting {
                        origin: *origin,
                        destination: square,
                        candidates,
                    },
                    InteractionEffect::PromotionOffered,
                );
            }
            (InteractionState::Idle, InteractionEffect::ProposeMove(request))
        }

        InteractionState::Idle => (InteractionState::Idle, InteractionEffect::Ignored),
    }
}

/// The squares in line with `destination`, nearest first, each offering one of
/// queen, rook, bishop and knight.
pub fn promotion_candidates(destination: Square, orientation: Orientation, color: Color) -> Vec<PromotionCandidate> {
    let grid = square_to_grid(destination, orientation);
    // Walk towards the middle of the board from whichever edge we are on.
    let towards_center: i8 = if grid.row < 4 { 1 } else { -1 };

    PROMOTION_ORDER
        .iter()
        .enumerate()
        .filter_map(|(distance, kind)| {
            let row = grid.row as i8 + towards_center * distance as i8;
            let row = u8::try_from(row).ok()?;
            let square = grid_to_square(GridPosition::new(row, grid.col), orientation)?;
            Some(PromotionCandidate {
                square,
                piece: Piece::new(color, *kind),
            })
        })
        .collect()
}
