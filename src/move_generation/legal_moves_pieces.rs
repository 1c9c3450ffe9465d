//! Knight, bishop, rook, queen and king steps.
//!
//! All five share one shape: take the attack set of the piece, drop squares
//! held by the mover, and tag anything landing on an enemy as a capture.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

const STEPPING_KINDS: [PieceKind; 5] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub fn generate_piece_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let occupancy = game_state.occupancy_all;

    for kind in STEPPING_KINDS {
        for from in bit_squares(game_state.pieces[side.index()][kind.index()]) {
            let targets = match kind {
                PieceKind::Knight => knight_attacks(from),
                PieceKind::Bishop => bishop_attacks(from, occupancy),
                PieceKind::Rook => rook_attacks(from, occupancy),
                PieceKind::Queen => queen_attacks(from, occupancy),
                PieceKind::King => king_attacks(from),
                PieceKind::Pawn => 0,
            } & !own_occ;

            for to in bit_squares(targets) {
                let is_capture = square_mask(to) & enemy_occ != 0;
                let captured = if is_capture {
                    enemy_piece_on(game_state, to)
                } else {
                    None
                };
                out.push(ChessMove::new(
                    from,
                    to,
                    kind,
                    captured,
                    None,
                    if is_capture { FLAG_CAPTURE } else { 0 },
                ));
            }
        }
    }
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color != game_state.side_to_move)
        .map(|piece| piece.kind)
}
