//! Fog of war projection.
//!
//! The visible position is rebuilt from scratch out of the authoritative one
//! every time it changes. A square stays visible when the player owns it or
//! one of the player's pieces could move there; opposing pieces anywhere else
//! are dropped from the projection.
//!
//! Visibility is computed twice. The first pass decides which opposing pieces
//! stay on the board; the second pass runs on the reduced position, so lines
//! that open up behind a hidden piece become visible while the hidden piece's
//! own square stays fogged.

use log::debug;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_generator::PseudoLegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::utils::long_algebraic::MoveRequest;

#[derive(Debug, Clone)]
pub struct FogProjection {
    pub visible: GameState,
    pub fogged: u64,
}

impl FogProjection {
    #[inline]
    pub fn is_fogged(&self, square: Square) -> bool {
        self.fogged & square_mask(square) != 0
    }
}

#[derive(Debug, Clone)]
pub enum FogOutcome {
    Projected(FogProjection),
    /// A king has been taken; the game is over and nothing is hidden any more.
    Terminal,
}

pub fn project_fog(authoritative: &GameState, player: Color) -> FogOutcome {
    if authoritative.king_count() == 1 {
        return FogOutcome::Terminal;
    }

    let mut visible = authoritative.detached();
    if visible.side_to_move != player {
        visible.side_to_move = player;
        visible.en_passant_square = None;
    }

    let own = visible.occupancy_by_color[player.index()];
    let opponent = player.opposite();

    let reachable = PseudoLegalMoveGenerator.destinations(&visible);
    let removed = visible.occupancy_by_color[opponent.index()] & !reachable & !own;
    for square in bit_squares(removed) {
        visible.remove(square);
    }

    // Lifting hidden pieces opens lines, so reachability is taken again.
    let reachable = PseudoLegalMoveGenerator.destinations(&visible);
    let fogged = (!reachable & !own) | removed;

    let leaked = visible.occupancy_by_color[opponent.index()] & fogged;
    for square in bit_squares(leaked) {
        visible.remove(square);
    }

    FogOutcome::Projected(FogProjection { visible, fogged })
}

/// Retry a move the authoritative position rejected because of a piece the
/// player cannot see.
///
/// Every non-king piece of the opponent is lifted off a scratch copy, the move
/// is played on that copy and on the visible position, then the lifted pieces
/// are put back where they stood. The result takes its placement from the
/// scratch copy and its turn, castling, en-passant and clocks from the visible
/// attempt. Nothing is touched when either attempt fails.
pub fn resolve_phantom_move(
    authoritative: &GameState,
    visible: &GameState,
    request: MoveRequest,
) -> Result<(GameState, ChessMove), String> {
    let mover = authoritative.side_to_move;

    let mut scratch = authoritative.detached();
    let mut lifted: Vec<(Square, Piece)> = Vec::new();
    for kind in ALL_PIECE_KINDS {
        if kind == PieceKind::King {
            continue;
        }
        for square in bit_squares(scratch.pieces[mover.opposite().index()][kind.index()]) {
            lifted.push((square, Piece::new(mover.opposite(), kind)));
        }
    }
    for (square, _) in &lifted {
        scratch.remove(*square);
    }

    let played = scratch.play_move(request)?;
    let mut visible_attempt = visible.detached();
    visible_attempt.play_move(request)?;

    for (square, piece) in &lifted {
        scratch.put(*piece, *square);
    }

    let mut merged = authoritative.clone();
    merged.pieces = scratch.pieces;
    merged.recalc_occupancy();
    merged.side_to_move = visible_attempt.side_to_move;
    merged.castling_rights = visible_attempt.castling_rights;
    merged.en_passant_square = visible_attempt
        .en_passant_square
        .filter(|sq| merged.occupancy_all & square_mask(*sq) == 0);
    merged.halfmove_clock = visible_attempt.halfmove_clock;
    merged.fullmove_number = visible_attempt.fullmove_number;

    merged.undo_stack.push(UndoState::capture(authoritative, played));
    merged.position_history.push(merged.position_key());

    debug!(
        "phantom move {} resolved with {} hidden piece(s) lifted",
        request,
        lifted.len()
    );
    Ok((merged, played))
}
