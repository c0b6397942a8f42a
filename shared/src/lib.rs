//! A live cell dies if it has fewer than two live neighbors.
//! A live cell with two or three live neighbors lives on to the next generation.
//! A live cell with more than three live neighbors dies.
//! A dead cell will be brought back to live if it has exactly three live neighbors.
//!
//! The grid is a torus: the top edge touches the bottom edge and the left edge
//! touches the right one, so every cell has exactly eight neighbors.

pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod scheduler;

pub use controller::{Command, Renderer, RunState, SimulationConfig, SimulationController};
pub use error::LifeError;
pub use grid::{CellState, Grid};
pub use input::PointerInput;
pub use scheduler::{Scheduler, TimerId};
