use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;

/// Produce the position after `mv`, without touching undo history.
///
/// Captures of the king are applied like any other capture.
pub fn apply_move(game_state: &GameState, mv: ChessMove) -> Result<GameState, String> {
    let from_mask = square_mask(mv.from);
    let to_mask = square_mask(mv.to);

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let on_from = game_state
        .piece_at(mv.from)
        .ok_or_else(|| format!("No piece on from-square {}", mv.from))?;
    if on_from.color != moving_color || on_from.kind != mv.moved_piece {
        return Err(format!(
            "Move {mv} does not match the board: found {on_from:?} on the from-square"
        ));
    }

    let mut next = game_state.clone();
    next.pieces[moving_color.index()][mv.moved_piece.index()] &= !from_mask;

    if mv.is_en_passant() {
        let capture_sq = match moving_color {
            Color::White => mv.to.checked_sub(8),
            Color::Black => mv.to.checked_add(8).filter(|sq| *sq < 64),
        }
        .ok_or("Invalid en-passant capture square")?;
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !square_mask(capture_sq);
    } else if mv.is_capture() {
        for kind in ALL_PIECE_KINDS {
            next.pieces[enemy_color.index()][kind.index()] &= !to_mask;
        }
    }

    let placed = mv.promotion.unwrap_or(mv.moved_piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if mv.is_castling() && mv.moved_piece == PieceKind::King {
        match (moving_color, mv.from, mv.to) {
            (Color::White, 4, 6) => move_rook(&mut next, moving_color, 7, 5),
            (Color::White, 4, 2) => move_rook(&mut next, moving_color, 0, 3),
            (Color::Black, 60, 62) => move_rook(&mut next, moving_color, 63, 61),
            (Color::Black, 60, 58) => move_rook(&mut next, moving_color, 56, 59),
            _ => return Err(format!("Castling move {mv} has no rook to move")),
        }
    }

    update_castling_rights(&mut next, mv);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if mv.moved_piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    Ok(next)
}

fn move_rook(game_state: &mut GameState, color: Color, from: Square, to: Square) {
    game_state.pieces[color.index()][PieceKind::Rook.index()] &= !square_mask(from);
    game_state.pieces[color.index()][PieceKind::Rook.index()] |= square_mask(to);
}

fn update_castling_rights(game_state: &mut GameState, mv: ChessMove) {
    if mv.moved_piece == PieceKind::King {
        game_state.castling_rights &= match game_state.side_to_move {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    // Moving from or landing on a rook corner both cost that corner's right.
    for square in [mv.from, mv.to] {
        game_state.castling_rights &= match square {
            0 => !CASTLE_WHITE_QUEENSIDE,
            7 => !CASTLE_WHITE_KINGSIDE,
            56 => !CASTLE_BLACK_QUEENSIDE,
            63 => !CASTLE_BLACK_KINGSIDE,
            _ => !0,
        };
    }
}
