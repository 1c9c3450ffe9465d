//! Attack queries used by legality filtering and castling.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    bit_squares(game_state.pieces[color.index()][PieceKind::King.index()]).next()
}

/// A side without a king is never in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attackers = &game_state.pieces[attacker_color.index()];
    let occupancy = game_state.occupancy_all;

    // Leapers are looked up in reverse: a pawn of the defending color on
    // `square` would capture exactly where attacking pawns must stand.
    if pawn_attacks(attacker_color.opposite(), square) & attackers[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & attackers[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if king_attacks(square) & attackers[PieceKind::King.index()] != 0 {
        return true;
    }

    let diagonal = attackers[PieceKind::Bishop.index()] | attackers[PieceKind::Queen.index()];
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = attackers[PieceKind::Rook.index()] | attackers[PieceKind::Queen.index()];
    rook_attacks(square, occupancy) & straight != 0
}
