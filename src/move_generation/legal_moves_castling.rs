use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::chess_move::{ChessMove, FLAG_CASTLING};

struct CastlingPath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: &'static [Square],
    must_be_safe: &'static [Square],
}

const WHITE_PATHS: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        must_be_empty: &[5, 6],
        must_be_safe: &[5, 6],
    },
    CastlingPath {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        must_be_empty: &[1, 2, 3],
        must_be_safe: &[3, 2],
    },
];

const BLACK_PATHS: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        must_be_empty: &[61, 62],
        must_be_safe: &[61, 62],
    },
    CastlingPath {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        must_be_empty: &[57, 58, 59],
        must_be_safe: &[59, 58],
    },
];

/// Castling needs the right, the king and rook on their home squares, an
/// empty path, and no attacked square from the king's start to its target.
pub fn generate_castling_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let own = &game_state.pieces[side.index()];
    let paths = match side {
        Color::White => &WHITE_PATHS,
        Color::Black => &BLACK_PATHS,
    };

    for path in paths {
        if game_state.castling_rights & path.right == 0
            || own[PieceKind::King.index()] & square_mask(path.king_from) == 0
            || own[PieceKind::Rook.index()] & square_mask(path.rook_from) == 0
        {
            continue;
        }
        if path
            .must_be_empty
            .iter()
            .any(|sq| game_state.occupancy_all & square_mask(*sq) != 0)
        {
            continue;
        }
        if is_square_attacked(game_state, path.king_from, enemy)
            || path
                .must_be_safe
                .iter()
                .any(|sq| is_square_attacked(game_state, *sq, enemy))
        {
            continue;
        }

        out.push(ChessMove::new(
            path.king_from,
            path.king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_castling_moves;
    use crate::game_state::game_state::GameState;

    fn castles(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_castling_moves(&game, &mut out);
        out.iter().map(|mv| mv.to_long_algebraic()).collect()
    }

    #[test]
    fn both_sides_available_on_open_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/5r2/R3K2R w KQ - 0 1"), vec!["e1c1"]);
    }

    #[test]
    fn missing_rook_blocks_castling_despite_rights() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1"), vec!["e1g1"]);
    }
}
