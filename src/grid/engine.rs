// Grid engine - owns the placed cells and the occupancy mesh.
// Every mutation is validated up front and applied in full, so a rejected
// operation never leaves the mesh or a cell half-updated.

use crate::config::GridConfig;
use crate::grid::cell::{to_signed, Cell, CellId, CellRect, Position};
use crate::grid::mesh::OccupancyMesh;
use crate::grid::traits::{GridError, GridResult, GridTrait};
use log::{debug, warn};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Grid {
    config: GridConfig,
    mesh: OccupancyMesh,
    // Creation order, which is also ascending id order
    cells: Vec<Cell>,
    // Cells whose footprint is tentatively cleared in the mesh mid-gesture
    vacated: HashSet<CellId>,
    next_id: u64,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, gap: f32) -> GridResult<Self> {
        Self::from_config(GridConfig::new(rows, cols).with_gap(gap))
    }

    pub fn from_config(config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        debug!(
            "Creating {}x{} grid (gap {}rem)",
            config.rows, config.cols, config.gap
        );
        Ok(Self {
            mesh: OccupancyMesh::new(config.rows, config.cols),
            config,
            cells: Vec::new(),
            vacated: HashSet::new(),
            next_id: 0,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn mesh(&self) -> &OccupancyMesh {
        &self.mesh
    }

    /// Live cells in creation order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.slot(id).ok().map(|slot| &self.cells[slot])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.mesh.free_positions()
    }

    pub fn is_vacated(&self, id: CellId) -> bool {
        self.vacated.contains(&id)
    }

    // Ids are handed out in increasing order and cells are only ever appended,
    // so the vector stays sorted by id.
    fn slot(&self, id: CellId) -> GridResult<usize> {
        self.cells
            .binary_search_by_key(&id, |cell| cell.id)
            .map_err(|_| GridError::CellNotFound(id))
    }

    fn out_of_bounds(&self, rows: (isize, isize), cols: (isize, isize)) -> GridError {
        GridError::OutOfBounds {
            rows,
            cols,
            max_row: self.rows() - 1,
            max_col: self.cols() - 1,
        }
    }

    /// Place a new 1x1 cell
    pub fn add_cell(&mut self, row: usize, col: usize) -> GridResult<CellId> {
        self.validate_coordinates(row, col)?;
        let rect = CellRect::single(Position::new(row, col));

        if let Some(pos) = self.collision(&rect, None) {
            warn!("Rejected new cell at ({}, {}): occupied", row, col);
            return Err(GridError::PositionOccupied(pos));
        }

        let id = CellId(self.next_id);
        self.next_id += 1;
        self.mesh.set_region(&rect, true);
        self.cells.push(Cell::new(id, rect));

        debug!("📦 Added cell {} at ({}, {})", id, row, col);
        self.debug_check();
        Ok(id)
    }

    pub fn remove_cell(&mut self, id: CellId) -> GridResult<Cell> {
        let slot = self.slot(id)?;
        let cell = self.cells.remove(slot);
        // A vacated footprint is already clear in the mesh
        if !self.vacated.remove(&id) {
            self.mesh.set_region(&cell.rect, false);
        }

        debug!("🗑️  Removed cell {} from {}", id, cell.rect);
        self.debug_check();
        Ok(cell)
    }

    /// Translate a cell. The new rectangle may overlap the cell's own old footprint.
    pub fn move_cell(
        &mut self,
        id: CellId,
        delta_rows: isize,
        delta_cols: isize,
    ) -> GridResult<CellRect> {
        let slot = self.slot(id)?;
        let old = self.cells[slot].rect;

        let target = match old.translated(delta_rows, delta_cols) {
            Some(rect) if rect.fits_within(self.rows(), self.cols()) => rect,
            _ => {
                warn!(
                    "Rejected move of cell {} by ({}, {}): out of bounds",
                    id, delta_rows, delta_cols
                );
                let shift = |v: usize, d: isize| to_signed(v).saturating_add(d);
                return Err(self.out_of_bounds(
                    (shift(old.row_start, delta_rows), shift(old.row_end, delta_rows)),
                    (shift(old.col_start, delta_cols), shift(old.col_end, delta_cols)),
                ));
            }
        };

        self.commit(slot, target)
    }

    /// Replace a cell's rectangle outright (resize, possibly also shifting it)
    pub fn deform_cell(
        &mut self,
        id: CellId,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> GridResult<CellRect> {
        let slot = self.slot(id)?;

        let target = match CellRect::new(row_start, row_end, col_start, col_end) {
            Some(rect) if rect.fits_within(self.rows(), self.cols()) => rect,
            _ => {
                warn!(
                    "Rejected resize of cell {}: invalid range rows {}..={}, cols {}..={}",
                    id, row_start, row_end, col_start, col_end
                );
                return Err(GridError::InvalidRange {
                    rect: CellRect {
                        row_start,
                        row_end,
                        col_start,
                        col_end,
                    },
                    max_row: self.rows() - 1,
                    max_col: self.cols() - 1,
                });
            }
        };

        self.commit(slot, target)
    }

    /// Pure metadata update, never touches the mesh
    pub fn set_cell_color(&mut self, id: CellId, color: impl Into<String>) -> GridResult<()> {
        let slot = self.slot(id)?;
        let color = color.into();
        debug!("🎨 Cell {} color -> {}", id, color);
        self.cells[slot].color = Some(color);
        Ok(())
    }

    /// Remove every cell. Ids already handed out are still never reused.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.vacated.clear();
        self.mesh = OccupancyMesh::new(self.rows(), self.cols());
    }

    /// Clear a cell's footprint in the mesh while a gesture is in flight.
    /// The cell keeps its bounds, and other cells still cannot be placed over it.
    pub fn vacate(&mut self, id: CellId) -> GridResult<CellRect> {
        let slot = self.slot(id)?;
        let rect = self.cells[slot].rect;
        if self.vacated.insert(id) {
            self.mesh.set_region(&rect, false);
        }
        Ok(rect)
    }

    /// Undo `vacate`. No-op if the cell is not vacated.
    /// A rejected move or resize keeps the vacancy; only this call or a
    /// successful commit ends it.
    pub fn restore(&mut self, id: CellId) -> GridResult<()> {
        let slot = self.slot(id)?;
        let rect = self.cells[slot].rect;
        if self.vacated.remove(&id) {
            self.mesh.set_region(&rect, true);
        }
        Ok(())
    }

    /// First position of `rect` that belongs to another cell. `moving` names the
    /// cell being relocated, whose own footprint does not count as a collision.
    /// Vacated cells still block, even though the mesh shows them free.
    fn collision(&self, rect: &CellRect, moving: Option<CellId>) -> Option<Position> {
        let own = moving
            .and_then(|id| self.cell(id))
            .map(|cell| cell.rect);
        let vacated: Vec<CellRect> = self
            .cells
            .iter()
            .filter(|cell| Some(cell.id) != moving && self.vacated.contains(&cell.id))
            .map(|cell| cell.rect)
            .collect();

        rect.positions().find(|pos| {
            let used = self.mesh.is_used(pos.row, pos.col).unwrap_or(false);
            (used && !own.is_some_and(|own| own.contains(*pos)))
                || vacated.iter().any(|other| other.contains(*pos))
        })
    }

    fn commit(&mut self, slot: usize, target: CellRect) -> GridResult<CellRect> {
        let id = self.cells[slot].id;
        let old = self.cells[slot].rect;

        if let Some(pos) = self.collision(&target, Some(id)) {
            warn!("Rejected update of cell {} to {}: {} is occupied", id, target, pos);
            return Err(GridError::PositionOccupied(pos));
        }

        self.mesh.set_region(&old, false);
        self.mesh.set_region(&target, true);
        self.vacated.remove(&id);
        self.cells[slot].rect = target;

        debug!("Cell {} moved from {} to {}", id, old, target);
        self.debug_check();
        Ok(target)
    }

    /// True when cells are pairwise disjoint and the mesh marks exactly the
    /// positions covered by non-vacated cells.
    pub fn is_consistent(&self) -> bool {
        let mut expected = OccupancyMesh::new(self.rows(), self.cols());
        for (i, cell) in self.cells.iter().enumerate() {
            if !cell.rect.fits_within(self.rows(), self.cols()) {
                return false;
            }
            if self.cells[i + 1..]
                .iter()
                .any(|other| other.rect.intersects(&cell.rect))
            {
                return false;
            }
            if !self.vacated.contains(&cell.id) {
                expected.set_region(&cell.rect, true);
            }
        }
        expected == self.mesh
    }

    fn debug_check(&self) {
        debug_assert!(self.is_consistent(), "grid mesh out of sync with cells");
    }
}

impl GridTrait for Grid {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn is_cell_occupied(&self, row: usize, col: usize) -> GridResult<bool> {
        self.mesh.is_cell_occupied(row, col)
    }

    fn occupied_cells(&self) -> usize {
        self.mesh.used_count()
    }

    fn cell_at(&self, row: usize, col: usize) -> Option<CellId> {
        let pos = Position::new(row, col);
        self.cells
            .iter()
            .find(|cell| cell.rect.contains(pos))
            .map(|cell| cell.id)
    }
}
