// Cell identity and rectangle geometry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistent identity of a placed cell, never reused within a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}

/// Grid index as a signed value, saturating for indices past `isize::MAX`
pub(crate) fn to_signed(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}

/// Inclusive rectangle of grid positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl CellRect {
    /// Returns `None` unless start <= end on both axes
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Option<Self> {
        if row_start > row_end || col_start > col_end {
            return None;
        }
        Some(Self {
            row_start,
            row_end,
            col_start,
            col_end,
        })
    }

    pub fn single(pos: Position) -> Self {
        Self {
            row_start: pos.row,
            row_end: pos.row,
            col_start: pos.col,
            col_end: pos.col,
        }
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    pub fn width(&self) -> usize {
        self.col_end - self.col_start + 1
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn top_left(&self) -> Position {
        Position::new(self.row_start, self.col_start)
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(self.row_end, self.col_end)
    }

    /// Shift by a signed delta; `None` if any bound would go negative or overflow
    pub fn translated(&self, delta_rows: isize, delta_cols: isize) -> Option<Self> {
        Some(Self {
            row_start: self.row_start.checked_add_signed(delta_rows)?,
            row_end: self.row_end.checked_add_signed(delta_rows)?,
            col_start: self.col_start.checked_add_signed(delta_cols)?,
            col_end: self.col_end.checked_add_signed(delta_cols)?,
        })
    }

    pub fn fits_within(&self, rows: usize, cols: usize) -> bool {
        self.row_end < rows && self.col_end < cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.row_start..=self.row_end).contains(&pos.row)
            && (self.col_start..=self.col_end).contains(&pos.col)
    }

    pub fn intersects(&self, other: &CellRect) -> bool {
        self.row_start <= other.row_end
            && other.row_start <= self.row_end
            && self.col_start <= other.col_end
            && other.col_start <= self.col_end
    }

    /// Row-major iteration over every covered position
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.row_start..=self.row_end)
            .flat_map(move |row| (self.col_start..=self.col_end).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..={}, cols {}..={}",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

/// A placed block on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub rect: CellRect,
    pub color: Option<String>,
}

impl Cell {
    pub(crate) fn new(id: CellId, rect: CellRect) -> Self {
        Self {
            id,
            rect,
            color: None,
        }
    }
}
