//! Square <-> grid mapping for both board orientations.
//!
//! White orientation puts rank 8 on row 0 and file a on col 0. Black
//! orientation mirrors both axes: rank 1 on row 0 and file h on col 0.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{make_square, square_file, square_rank, Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    White,
    Black,
}

impl Orientation {
    #[inline]
    pub const fn from_color(color: Color) -> Self {
        match color {
            Color::White => Orientation::White,
            Color::Black => Orientation::Black,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Orientation::White => Color::White,
            Orientation::Black => Color::Black,
        }
    }

    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u8,
    pub col: u8,
}

impl GridPosition {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

pub const fn square_to_grid(square: Square, orientation: Orientation) -> GridPosition {
    let file = square_file(square);
    let rank = square_rank(square);
    match orientation {
        Orientation::White => GridPosition::new(7 - rank, file),
        Orientation::Black => GridPosition::new(rank, 7 - file),
    }
}

/// `None` when the grid position lies off the board.
pub const fn grid_to_square(grid: GridPosition, orientation: Orientation) -> Option<Square> {
    if grid.row > 7 || grid.col > 7 {
        return None;
    }
    let square = match orientation {
        Orientation::White => make_square(grid.col, 7 - grid.row),
        Orientation::Black => make_square(7 - grid.col, grid.row),
    };
    Some(square)
}

/// Every square in row-major grid order, top-left first.
pub fn grid_squares(orientation: Orientation) -> impl Iterator<Item = (GridPosition, Square)> {
    (0..8u8).flat_map(move |row| {
        (0..8u8).map(move |col| {
            let grid = GridPosition::new(row, col);
            let square = match orientation {
                Orientation::White => make_square(col, 7 - row),
                Orientation::Black => make_square(7 - col, row),
            };
            (grid, square)
        })
    })
}
