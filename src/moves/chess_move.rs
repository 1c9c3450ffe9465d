//! Generated move record.
//!
//! Unlike a bare from/to request, a `ChessMove` carries everything the
//! applier needs without re-inspecting the board: the moving piece, what it
//! captures, the promotion choice and the special-move flags.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: u8,
}

impl ChessMove {
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion: Option<PieceKind>,
        flags: u8,
    ) -> Self {
        Self {
            from,
            to,
            moved_piece,
            captured_piece,
            promotion,
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    /// Long algebraic form, e.g. `e2e4` or `a7a8q`.
    pub fn to_long_algebraic(&self) -> String {
        let mut out = String::with_capacity(5);
        out.push_str(&square_to_algebraic(self.from));
        out.push_str(&square_to_algebraic(self.to));
        if let Some(promotion) = self.promotion {
            out.push(promotion.letter());
        }
        out
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_algebraic_includes_promotion_letter() {
        let quiet = ChessMove::new(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        assert_eq!(quiet.to_long_algebraic(), "e2e4");
        assert!(quiet.is_double_pawn_push());
        assert!(!quiet.is_capture());

        let promo = ChessMove::new(
            49,
            56,
            PieceKind::Pawn,
            Some(PieceKind::Rook),
            Some(PieceKind::Queen),
            FLAG_CAPTURE,
        );
        assert_eq!(promo.to_string(), "b7a8q");
        assert!(promo.is_capture());
    }
}
