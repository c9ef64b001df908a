// Common traits and error types shared by the mesh and the grid engine

use crate::grid::cell::{to_signed, CellId, CellRect, Position};

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    InvalidDimensions {
        rows: usize,
        cols: usize,
    },
    InvalidGap(f32),
    /// Attempted bounds, signed so a shift past row or column 0 shows as negative
    OutOfBounds {
        rows: (isize, isize),
        cols: (isize, isize),
        max_row: usize,
        max_col: usize,
    },
    InvalidRange {
        rect: CellRect,
        max_row: usize,
        max_col: usize,
    },
    PositionOccupied(Position),
    CellNotFound(CellId),
    ConfigurationError(String),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid grid dimensions {}x{}", rows, cols)
            }
            GridError::InvalidGap(gap) => write!(f, "Invalid grid spacing {}", gap),
            GridError::OutOfBounds {
                rows,
                cols,
                max_row,
                max_col,
            } => write!(
                f,
                "Rectangle rows {}..={}, cols {}..={} is out of bounds, max is ({}, {})",
                rows.0, rows.1, cols.0, cols.1, max_row, max_col
            ),
            GridError::InvalidRange {
                rect,
                max_row,
                max_col,
            } => write!(
                f,
                "Invalid range {}, max is ({}, {})",
                rect, max_row, max_col
            ),
            GridError::PositionOccupied(pos) => {
                write!(f, "Target position already occupied at {}", pos)
            }
            GridError::CellNotFound(id) => write!(f, "Cell {} not found", id),
            GridError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}

/// Read-only view shared by everything that tracks grid occupancy
pub trait GridTrait {
    /// (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Check if a position is occupied
    fn is_cell_occupied(&self, row: usize, col: usize) -> GridResult<bool>;

    /// Get the number of occupied positions
    fn occupied_cells(&self) -> usize;

    /// Which cell covers a position, for grids that track identity
    fn cell_at(&self, _row: usize, _col: usize) -> Option<CellId> {
        None
    }

    /// Validate coordinates against grid bounds
    fn validate_coordinates(&self, row: usize, col: usize) -> GridResult<()> {
        let (rows, cols) = self.dimensions();
        if row >= rows || col >= cols {
            let (row, col) = (to_signed(row), to_signed(col));
            return Err(GridError::OutOfBounds {
                rows: (row, row),
                cols: (col, col),
                max_row: rows.saturating_sub(1),
                max_col: cols.saturating_sub(1),
            });
        }
        Ok(())
    }
}
