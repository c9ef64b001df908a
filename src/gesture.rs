// Drag sessions - per-gesture state for moving or resizing a cell with a pointer.
// The footprint is vacated for the length of the gesture so the renderer can
// show the slots underneath as free; finishing commits through the engine and
// cancelling puts the footprint back.

use crate::geometry::{GridGeometry, Point};
use crate::grid::cell::{CellId, CellRect, Position};
use crate::grid::engine::Grid;
use crate::grid::traits::GridResult;
use log::debug;

/// Snap radius for moves, as a fraction of the dragged cell's larger side
const MOVE_SNAP_RATIO: f32 = 0.7;
/// Snap radius for resizes, as a fraction of the resized cell's larger side
const RESIZE_SNAP_RATIO: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Translate the whole cell, anchored on its top-left slot
    Move,
    /// Drag the bottom-right corner, keeping the top-left fixed
    Resize,
}

#[derive(Debug)]
#[must_use = "a drag session must be finished or cancelled to restore the mesh"]
pub struct DragSession {
    id: CellId,
    kind: DragKind,
    origin: CellRect,
    start: Point,
    current: Point,
}

impl DragSession {
    pub fn begin(grid: &mut Grid, id: CellId, kind: DragKind, pointer: Point) -> GridResult<Self> {
        let origin = grid.vacate(id)?;
        debug!("Started {:?} drag of cell {} from {}", kind, id, origin);
        Ok(Self {
            id,
            kind,
            origin,
            start: pointer,
            current: pointer,
        })
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn origin(&self) -> CellRect {
        self.origin
    }

    pub fn update(&mut self, pointer: Point) {
        self.current = pointer;
    }

    /// Pointer travel since the gesture began
    pub fn offset(&self) -> (f32, f32) {
        (self.current.x - self.start.x, self.current.y - self.start.y)
    }

    /// Free slot the dragged anchor currently snaps to, if any is close enough
    pub fn snapped_anchor(&self, grid: &Grid, geometry: &GridGeometry) -> Option<Position> {
        let (dx, dy) = self.offset();
        let footprint = geometry.cell_rect(&self.origin);

        let (anchor, max_distance) = match self.kind {
            DragKind::Move => {
                let anchor = geometry.slot_rect(self.origin.top_left()).center();
                let reach = footprint.width.max(footprint.height) * MOVE_SNAP_RATIO;
                (anchor.offset(dx, dy), reach)
            }
            DragKind::Resize => {
                let anchor = geometry.slot_rect(self.origin.bottom_right()).center();
                let width = (footprint.width + dx).max(0.0);
                let height = (footprint.height + dy).max(0.0);
                (anchor.offset(dx, dy), width.max(height) * RESIZE_SNAP_RATIO)
            }
        };

        geometry.closest_slot(anchor, max_distance, grid.free_positions())
    }

    /// Commit the gesture. `Ok(None)` means nothing was close enough to snap to
    /// and the cell was put back where it started.
    pub fn finish(self, grid: &mut Grid, geometry: &GridGeometry) -> GridResult<Option<CellRect>> {
        let Some(target) = self.snapped_anchor(grid, geometry) else {
            debug!("Drag of cell {} ended without a target", self.id);
            grid.restore(self.id)?;
            return Ok(None);
        };

        let committed = match self.kind {
            DragKind::Move => grid.move_cell(
                self.id,
                target.row as isize - self.origin.row_start as isize,
                target.col as isize - self.origin.col_start as isize,
            ),
            DragKind::Resize => grid.deform_cell(
                self.id,
                self.origin.row_start,
                target.row,
                self.origin.col_start,
                target.col,
            ),
        };

        match committed {
            Ok(rect) => Ok(Some(rect)),
            Err(e) => {
                // The engine leaves a rejected cell vacated; put it back before reporting
                grid.restore(self.id)?;
                Err(e)
            }
        }
    }

    pub fn cancel(self, grid: &mut Grid) -> GridResult<()> {
        debug!("Cancelled drag of cell {}", self.id);
        grid.restore(self.id)
    }
}
