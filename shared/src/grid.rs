use crate::error::LifeError;
use crate::grid::CellState::{Alive, Dead};
use rand::Rng;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Alive => Dead,
            Dead => Alive,
        }
    }
}

/// One generation of the automaton on a fixed-size torus.
///
/// Dimensions are fixed at construction. The generation counter starts at 0,
/// grows by one per committed step and drops back to 0 on `randomize`/`clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<CellState>>,
    rows: usize,
    cols: usize,
    generation: u64,
}

impl Grid {
    /// An all-dead grid at generation 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self, LifeError> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        Ok(Grid {
            cells: vec![vec![Dead; cols]; rows],
            rows,
            cols,
            generation: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, LifeError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), LifeError> {
        self.check_bounds(row, col)?;
        self.cells[row][col] = state;
        Ok(())
    }

    /// Rows top to bottom, for renderers.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Replace every cell with an independent draw: alive with probability `live_probability`.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        live_probability: f64,
    ) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&live_probability) {
            return Err(LifeError::InvalidProbability(live_probability));
        }

        let mut new_cells = vec![vec![Dead; self.cols]; self.rows];
        for row in new_cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = if rng.random_bool(live_probability) { Alive } else { Dead };
            }
        }
        self.cells = new_cells;
        self.generation = 0;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells = vec![vec![Dead; self.cols]; self.rows];
        self.generation = 0;
    }

    /// Flip a single cell. Returns the state it now holds.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<CellState, LifeError> {
        self.check_bounds(row, col)?;
        let cell = &mut self.cells[row][col];
        *cell = cell.toggled();
        Ok(*cell)
    }

    /// Count the number of alive neighbors for a cell, wrapping around every edge.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8, LifeError> {
        self.check_bounds(row, col)?;
        Ok(self.alive_neighbors(row, col))
    }

    /// Compute the successor of this grid without touching it.
    ///
    /// Every count is taken from `self`, so no partially updated state can
    /// leak into a neighbor's decision.
    pub fn next_generation(&self) -> Grid {
        let mut next_cells = vec![vec![Dead; self.cols]; self.rows];

        for (row, next_row) in next_cells.iter_mut().enumerate() {
            for (col, next_cell) in next_row.iter_mut().enumerate() {
                let alive_neighbors = self.alive_neighbors(row, col);

                *next_cell = match (self.cells[row][col], alive_neighbors) {
                    (Alive, 2..=3) => Alive, // Survives
                    (Dead, 3) => Alive,      // Becomes alive
                    _ => Dead,               // Dies or remains dead
                };
            }
        }

        Grid {
            cells: next_cells,
            rows: self.rows,
            cols: self.cols,
            generation: self.generation + 1,
        }
    }

    /// Advance the grid by one step. Returns whether any cell changed.
    pub fn advance(&mut self) -> bool {
        let next = self.next_generation();
        let changed = next.cells != self.cells;
        *self = next;
        changed
    }

    fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for dr in [-1, 0, 1] {
            for dc in [-1, 0, 1] {
                if dr == 0 && dc == 0 {
                    // Skip the current cell
                    continue;
                }

                let neighbor_row = (row as isize + dr).rem_euclid(self.rows as isize) as usize;
                let neighbor_col = (col as isize + dc).rem_euclid(self.cols as isize) as usize;

                if self.cells[neighbor_row][neighbor_col].is_alive() {
                    count += 1;
                }
            }
        }

        count
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), LifeError> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
