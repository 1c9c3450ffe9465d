//! Terminal-oriented Unicode board renderer.
//!
//! Draws what the player is shown, in the player's orientation, with one
//! marker character per square for its strongest decoration.

use crate::board::coordinates::grid_squares;
use crate::board::highlight::{BoardFrame, Decoration, HighlightSet, SquareView};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// One cell of the 8x8 grid, top-left first.
pub type Grid = [[Option<(Square, SquareView)>; 8]; 8];

pub fn render_frame(frame: &BoardFrame) -> String {
    let mut grid: Grid = [[None; 8]; 8];
    for (position, square) in grid_squares(frame.orientation) {
        grid[position.row as usize][position.col as usize] = Some((square, *frame.view(square)));
    }
    render_grid(&grid)
}

/// Render a grid of squares. Empty cells are left blank.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();

    let files: String = (0..8)
        .map(|col| {
            grid[0][col]
                .map(|(square, _)| char::from(b'a' + square_file(square)))
                .unwrap_or(' ')
        })
        .flat_map(|file| [file, ' '])
        .collect();

    out.push_str("  ");
    out.push_str(&files);
    out.push('\n');

    for row in grid {
        let rank = row
            .iter()
            .flatten()
            .next()
            .map(|(square, _)| char::from(b'1' + square_rank(*square)))
            .unwrap_or(' ');
        out.push(rank);
        out.push(' ');

        for cell in row {
            match cell {
                Some((_, view)) => {
                    out.push(cell_glyph(view));
                    out.push(decoration_marker(&view.highlights));
                }
                None => out.push_str("  "),
            }
        }

        out.push(rank);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(files.trim_end());
    out
}

fn cell_glyph(view: &SquareView) -> char {
    match (view.highlights.promotion_choice(), view.piece) {
        (Some(choice), _) => piece_to_unicode(choice),
        (None, Some(piece)) => piece_to_unicode(piece),
        (None, None) => '·',
    }
}

fn decoration_marker(highlights: &HighlightSet) -> char {
    if highlights.contains(Decoration::Selected) {
        '*'
    } else if highlights.promotion_choice().is_some() {
        '='
    } else if highlights.contains(Decoration::Covered) {
        '#'
    } else if highlights.contains(Decoration::HintedCapturable) {
        'x'
    } else if highlights.contains(Decoration::Hinted) {
        'o'
    } else if highlights.contains(Decoration::Moved) {
        '\''
    } else if highlights.contains(Decoration::Fogged) {
        '~'
    } else {
        ' '
    }
}

/// Marker legend shown by the interactive front-end.
pub const MARKER_LEGEND: &str = "* selected  o hint  x capture  ' last move  ~ fog  = promotion choice  # covered";

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

/// Squares of a frame carrying `decoration`, as algebraic names.
pub fn describe_squares(frame: &BoardFrame, decoration: Decoration) -> String {
    frame
        .squares_with(decoration)
        .into_iter()
        .map(square_to_algebraic)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::coordinates::Orientation;

    fn start_frame(orientation: Orientation) -> BoardFrame {
        let game = GameState::new_game();
        let mut squares = [SquareView::default(); 64];
        for (square, view) in squares.iter_mut().enumerate() {
            view.piece = game.piece_at(square as Square);
        }
        BoardFrame { orientation, squares }
    }

    #[test]
    fn white_view_has_rank_eight_on_top() {
        let text = render_frame(&start_frame(Orientation::White));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].trim_end(), "  a b c d e f g h");
        assert!(lines[1].starts_with("8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ "));
        assert!(lines[8].starts_with("1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ "));
    }

    #[test]
    fn black_view_is_mirrored() {
        let text = render_frame(&start_frame(Orientation::Black));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0].trim_end(), "  h g f e d c b a");
        assert!(lines[1].starts_with("1 ♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖ "));
    }

    #[test]
    fn markers_follow_decorations() {
        let mut frame = start_frame(Orientation::White);
        frame.squares[12].highlights.insert(Decoration::Selected);
        frame.squares[28].highlights.insert(Decoration::Hinted);
        frame.squares[60].highlights.insert(Decoration::Fogged);
        let text = render_frame(&frame);
        assert!(text.contains("♙*"));
        assert!(text.contains("·o"));
        assert!(text.contains("♚~"));
        assert_eq!(describe_squares(&frame, Decoration::Hinted), "e4");
    }
}
