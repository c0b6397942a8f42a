use crate::controller::Command;
use crate::grid::Grid;

/// Translates raw pointer and slider readings into controller commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    cell_size: f32,
    rows: usize,
    cols: usize,
}

impl PointerInput {
    pub fn new(cell_size: f32, rows: usize, cols: usize) -> Self {
        Self {
            cell_size,
            rows,
            cols,
        }
    }

    pub fn for_grid(cell_size: f32, grid: &Grid) -> Self {
        Self::new(cell_size, grid.rows(), grid.cols())
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Map a point relative to the grid's top-left corner onto `(row, col)`.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(self.cell_size > 0.0) || !(x >= 0.0) || !(y >= 0.0) {
            return None;
        }
        let row = (y / self.cell_size).floor() as usize;
        let col = (x / self.cell_size).floor() as usize;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    pub fn click(&self, x: f32, y: f32) -> Option<Command> {
        self.cell_at(x, y)
            .map(|(row, col)| Command::ToggleCell { row, col })
    }

    /// Turn a rate slider reading into a positive interval.
    pub fn tick_from_slider(value: f64) -> u64 {
        if value.is_nan() {
            return 1;
        }
        value.round().max(1.0) as u64
    }

    pub fn rate_change(value: f64) -> Command {
        Command::SetTickInterval(Self::tick_from_slider(value))
    }
}
