// Block Grid: placement engine for non-overlapping rectangular cells on a fixed grid.
// Gesture and rendering layers drive it through `Grid`'s validated mutations
// and redraw from the resulting state.

pub mod config;
pub mod display;
pub mod geometry;
pub mod gesture;
pub mod grid;

// Re-export main types for convenience
pub use config::GridConfig;
pub use display::{print_grid, render_grid};
pub use geometry::{GridGeometry, PixelRect, Point};
pub use gesture::{DragKind, DragSession};
pub use grid::{
    Cell, CellId, CellRect, Grid, GridError, GridResult, GridTrait, OccupancyMesh, Position,
};
