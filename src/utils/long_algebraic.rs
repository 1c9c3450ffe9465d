//! Long algebraic move strings (`e2e4`, `e7e8q`).
//!
//! The board controller speaks in requests: an origin, a destination and an
//! optional promotion choice. The rules engine turns a request into a full
//! `ChessMove` by matching it against the legal move list.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

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

impl From<ChessMove> for MoveRequest {
    fn from(mv: ChessMove) -> Self {
        Self::new(mv.from, mv.to, mv.promotion)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

/// Parse a 4 or 5 character move string.
pub fn parse_long_algebraic(long_algebraic: &str) -> Result<MoveRequest, String> {
    let trimmed = long_algebraic.trim();
    if !trimmed.is_ascii() || (trimmed.len() != 4 && trimmed.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&trimmed[0..2])?;
    let to = algebraic_to_square(&trimmed[2..4])?;
    if from == to {
        return Err(format!("Move must change square: {long_algebraic}"));
    }

    let promotion = match trimmed[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch)?),
        None => None,
    };

    Ok(MoveRequest::new(from, to, promotion))
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_long_algebraic, MoveRequest};
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let plain = parse_long_algebraic("e2e4").expect("e2e4 should parse");
        assert_eq!(plain, MoveRequest::new(12, 28, None));
        assert_eq!(plain.to_string(), "e2e4");

        let promo = parse_long_algebraic("a7a8Q").expect("promotion should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_long_algebraic(), "a7a8q");
    }

    #[test]
    fn rejects_bad_strings() {
        for bad in ["", "e2", "e2e", "e2e4e5", "e2e9", "a7a8k", "e2e2", "é2e4"] {
            assert!(parse_long_algebraic(bad).is_err(), "expected rejection for {bad:?}");
        }
    }
}
