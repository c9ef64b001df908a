// Grid module - occupancy mesh, cell geometry and the placement engine

pub mod cell;
pub mod engine;
pub mod mesh;
pub mod traits;

// Re-export the main grid types for easy access
pub use cell::{Cell, CellId, CellRect, Position};
pub use engine::Grid;
pub use mesh::OccupancyMesh;
pub use traits::{GridError, GridResult, GridTrait};

// Re-export common types used by all grids
pub use crate::config::GridConfig;
