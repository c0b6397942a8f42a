use thiserror::Error;

/// Precondition violations reported by the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("tick interval must be positive, got {0} ms")]
    InvalidInterval(u64),
    #[error("live probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}
