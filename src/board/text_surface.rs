use crate::board::coordinates::GridPosition;
use crate::board::highlight::SquareView;
use crate::board::surface::{RenderInstruction, RenderSurface};
use crate::game_state::chess_types::Square;
use crate::utils::render_frame::{render_grid, Grid};

#[derive(Debug, Clone, Copy)]
struct TextCell {
    grid: GridPosition,
    view: SquareView,
}

/// Mirrors what it has been told to draw and renders it as Unicode text.
#[derive(Debug, Clone)]
pub struct TextSurface {
    cells: [Option<TextCell>; 64],
}

impl Default for TextSurface {
    fn default() -> Self {
        Self { cells: [None; 64] }
    }
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the surface currently shows on `square`, if the square exists.
    pub fn view(&self, square: Square) -> Option<SquareView> {
        self.cells[square as usize].map(|cell| cell.view)
    }

    pub fn square_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn render(&self) -> String {
        let mut grid: Grid = [[None; 8]; 8];
        for (square, cell) in self.cells.iter().enumerate() {
            if let Some(cell) = cell {
                grid[cell.grid.row as usize][cell.grid.col as usize] = Some((square as Square, cell.view));
            }
        }
        render_grid(&grid)
    }

    fn cell_mut(&mut self, square: Square) -> Option<&mut SquareView> {
        self.cells[square as usize].as_mut().map(|cell| &mut cell.view)
    }
}

impl RenderSurface for TextSurface {
    fn apply(&mut self, instruction: &RenderInstruction) {
        match instruction {
            RenderInstruction::CreateSquare { square, row, col, .. } => {
                self.cells[*square as usize] = Some(TextCell {
                    grid: GridPosition::new(*row, *col),
                    view: SquareView::default(),
                });
            }
            RenderInstruction::DestroySquare { square } => self.cells[*square as usize] = None,
            RenderInstruction::PutPiece { square, piece, .. } => {
                if let Some(view) = self.cell_mut(*square) {
                    view.piece = Some(*piece);
                }
            }
            RenderInstruction::RemovePiece { square } => {
                if let Some(view) = self.cell_mut(*square) {
                    view.piece = None;
                }
            }
            RenderInstruction::AddDecoration { square, decoration, .. } => {
                if let Some(view) = self.cell_mut(*square) {
                    view.highlights.insert(*decoration);
                }
            }
            RenderInstruction::RemoveDecoration { square, decoration } => {
                if let Some(view) = self.cell_mut(*square) {
                    view.highlights.remove(*decoration);
                }
            }
        }
    }
}
