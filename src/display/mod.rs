// Display module for text rendering of grids
pub mod formatters;

// Re-export main functions
pub use formatters::{format_cell_id, print_grid, render_grid};
