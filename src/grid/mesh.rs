// Occupancy mesh - one used/free flag per grid position
// Holds no cell identity; the engine keeps it in sync with the placed cells.

use crate::grid::cell::{CellRect, Position};
use crate::grid::traits::{GridResult, GridTrait};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMesh {
    rows: usize,
    cols: usize,
    used: Vec<bool>,
}

impl OccupancyMesh {
    /// Dimensions must already have passed `GridConfig::validate`
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            used: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// `None` when the position lies outside the mesh
    #[inline]
    pub fn is_used(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.used[self.offset(row, col)])
        } else {
            None
        }
    }

    /// True if every position in the rectangle is free. The rectangle must lie inside the mesh.
    pub fn is_free(&self, rect: &CellRect) -> bool {
        self.first_used(rect).is_none()
    }

    /// First used position inside the rectangle, scanning row-major
    pub fn first_used(&self, rect: &CellRect) -> Option<Position> {
        rect.positions()
            .find(|pos| self.used[self.offset(pos.row, pos.col)])
    }

    /// Unconditionally flip a region. No bounds checking: callers validate first.
    pub(crate) fn set_region(&mut self, rect: &CellRect, used: bool) {
        for row in rect.row_start..=rect.row_end {
            let start = self.offset(row, rect.col_start);
            let end = self.offset(row, rect.col_end);
            self.used[start..=end].fill(used);
        }
    }

    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|used| **used).count()
    }

    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(move |(i, _)| Position::new(i / self.cols, i % self.cols))
    }
}

impl GridTrait for OccupancyMesh {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn is_cell_occupied(&self, row: usize, col: usize) -> GridResult<bool> {
        self.validate_coordinates(row, col)?;
        Ok(self.used[self.offset(row, col)])
    }

    fn occupied_cells(&self) -> usize {
        self.used_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::traits::GridError;

    #[test]
    fn test_new_mesh_is_free() {
        let mesh = OccupancyMesh::new(3, 4);
        assert_eq!(mesh.used_count(), 0);
        assert_eq!(mesh.free_positions().count(), 12);
        assert!(mesh.is_free(&CellRect::new(0, 2, 0, 3).unwrap()));
    }

    #[test]
    fn test_set_region_marks_only_rectangle() {
        let mut mesh = OccupancyMesh::new(4, 4);
        let rect = CellRect::new(1, 2, 2, 3).unwrap();
        mesh.set_region(&rect, true);

        assert_eq!(mesh.used_count(), 4);
        for row in 0..4 {
            for col in 0..4 {
                let expected = rect.contains(Position::new(row, col));
                assert_eq!(mesh.is_used(row, col), Some(expected));
            }
        }

        mesh.set_region(&CellRect::single(Position::new(1, 2)), false);
        assert_eq!(mesh.used_count(), 3);
        assert!(!mesh.is_free(&rect));
    }

    #[test]
    fn test_first_used_reports_row_major_hit() {
        let mut mesh = OccupancyMesh::new(3, 3);
        mesh.set_region(&CellRect::single(Position::new(2, 0)), true);
        mesh.set_region(&CellRect::single(Position::new(1, 2)), true);
        let whole = CellRect::new(0, 2, 0, 2).unwrap();
        assert_eq!(mesh.first_used(&whole), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_is_used_out_of_range() {
        let mesh = OccupancyMesh::new(2, 2);
        assert_eq!(mesh.is_used(2, 0), None);
        assert_eq!(mesh.is_used(0, 2), None);
        assert!(matches!(
            mesh.is_cell_occupied(5, 5),
            Err(GridError::OutOfBounds { max_row: 1, max_col: 1, .. })
        ));
    }
}
