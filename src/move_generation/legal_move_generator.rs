//! Move generation pipeline.
//!
//! Pseudo-legal generation gathers every piece-wise candidate. Legal
//! generation applies each candidate and drops the ones that leave the
//! mover's own king attacked.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_castling::generate_castling_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::generate_piece_moves;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;

pub struct PseudoLegalMoveGenerator;
pub struct LegalMoveGenerator;

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ChessMove> {
        let mut pseudo = Vec::with_capacity(64);
        generate_pawn_moves(game_state, &mut pseudo);
        generate_piece_moves(game_state, &mut pseudo);
        generate_castling_moves(game_state, &mut pseudo);
        pseudo
    }
}

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ChessMove> {
        let base = game_state.detached();
        let mover = base.side_to_move;

        PseudoLegalMoveGenerator
            .generate_moves(&base)
            .into_iter()
            .filter(|mv| match apply_move(&base, *mv) {
                Ok(next) => !is_king_in_check(&next, mover),
                Err(_) => false,
            })
            .collect()
    }
}

#[inline]
pub fn generate_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    LegalMoveGenerator.generate_moves(game_state)
}

/// Legal moves of the side to move starting on `square`.
pub fn legal_moves_from(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let mut moves = generate_legal_moves(game_state);
    moves.retain(|mv| mv.from == square);
    moves
}
