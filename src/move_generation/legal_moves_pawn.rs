use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_moves_pieces::enemy_piece_on;
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::moves::leaper_attacks::pawn_attacks;

/// Pushes, double pushes, captures, en passant and all four promotions.
pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let (start_rank, promotion_rank) = match side {
        Color::White => (1u8, 7u8),
        Color::Black => (6u8, 0u8),
    };

    for from in bit_squares(game_state.pieces[side.index()][PieceKind::Pawn.index()]) {
        if let Some(to) = forward_square(side, from) {
            if square_mask(to) & empty != 0 {
                push_pawn_move(out, from, to, None, 0, promotion_rank);

                if square_rank(from) == start_rank {
                    if let Some(two_step) = forward_square(side, to) {
                        if square_mask(two_step) & empty != 0 {
                            out.push(ChessMove::new(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                FLAG_DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }

        for to in bit_squares(pawn_attacks(side, from)) {
            if square_mask(to) & enemy_occ != 0 {
                let captured = enemy_piece_on(game_state, to);
                push_pawn_move(out, from, to, captured, FLAG_CAPTURE, promotion_rank);
            } else if game_state.en_passant_square == Some(to) {
                out.push(ChessMove::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn forward_square(side: Color, from: Square) -> Option<Square> {
    match side {
        Color::White => from.checked_add(8).filter(|sq| *sq < 64),
        Color::Black => from.checked_sub(8),
    }
}

fn push_pawn_move(
    out: &mut Vec<ChessMove>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u8,
    promotion_rank: u8,
) {
    if square_rank(to) == promotion_rank {
        for promo in PROMOTION_ORDER {
            out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_pawns_have_sixteen_moves() {
        let game = GameState::new_game();
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let game = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn capture_promotion_offers_four_pieces() {
        let game = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        // a8 push promotions plus b8 capture promotions.
        assert_eq!(out.len(), 8);
        assert_eq!(out.iter().filter(|mv| mv.is_capture()).count(), 4);
    }
}
