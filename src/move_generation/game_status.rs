//! End-of-game detection for a single position.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    KingCaptured { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } | GameStatus::KingCaptured { winner } => Some(winner),
            _ => None,
        }
    }
}

pub fn game_status(game_state: &GameState) -> GameStatus {
    let white_king = game_state.has_king(Color::White);
    let black_king = game_state.has_king(Color::Black);
    match (white_king, black_king) {
        (true, false) => return GameStatus::KingCaptured { winner: Color::White },
        (false, true) => return GameStatus::KingCaptured { winner: Color::Black },
        _ => {}
    }

    let side = game_state.side_to_move;
    if generate_legal_moves(game_state).is_empty() {
        return if is_king_in_check(game_state, side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return GameStatus::FiftyMoveRule;
    }
    if has_insufficient_material(game_state) {
        return GameStatus::InsufficientMaterial;
    }
    if game_state.repetition_count() >= REPETITION_LIMIT {
        return GameStatus::ThreefoldRepetition;
    }
    GameStatus::Ongoing
}

/// Neither side can ever mate: bare kings, a lone minor piece, or only
/// bishops that all stand on one square color.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let mut bishops = 0u64;
    let mut minors = 0u32;
    for color in [Color::White, Color::Black] {
        let own = &game_state.pieces[color.index()];
        if own[PieceKind::Pawn.index()] != 0
            || own[PieceKind::Rook.index()] != 0
            || own[PieceKind::Queen.index()] != 0
        {
            return false;
        }
        minors += own[PieceKind::Knight.index()].count_ones();
        bishops |= own[PieceKind::Bishop.index()];
        minors += own[PieceKind::Bishop.index()].count_ones();
    }

    if minors <= 1 {
        return true;
    }
    let knights = game_state.pieces[Color::White.index()][PieceKind::Knight.index()]
        | game_state.pieces[Color::Black.index()][PieceKind::Knight.index()];
    if knights != 0 {
        return false;
    }
    let light = bit_squares(bishops).filter(|sq| is_light_square(*sq)).count();
    light == 0 || light == bishops.count_ones() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str) -> GameStatus {
        game_status(&GameState::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn start_position_is_ongoing() {
        assert_eq!(game_status(&GameState::new_game()), GameStatus::Ongoing);
    }

    #[test]
    fn detects_mate_and_stalemate() {
        // Fool's mate.
        assert_eq!(
            status("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn missing_king_is_decisive() {
        let result = status("8/8/8/8/8/8/4K3/8 b - - 0 1");
        assert_eq!(result, GameStatus::KingCaptured { winner: Color::White });
        assert_eq!(result.winner(), Some(Color::White));
    }

    #[test]
    fn draw_rules() {
        assert_eq!(status("4k3/8/8/8/8/8/4P3/4K3 w - - 100 80"), GameStatus::FiftyMoveRule);
        assert_eq!(status("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"), GameStatus::InsufficientMaterial);
        // Both bishops on dark squares (c1 and f8).
        assert_eq!(status("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1"), GameStatus::InsufficientMaterial);
        assert_eq!(status("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1"), GameStatus::Ongoing);
    }
}
