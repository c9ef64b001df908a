// Text rendering of grid occupancy, one three-character column per slot

use crate::grid::cell::CellId;
use crate::grid::traits::GridTrait;

/// Format a cell id for display (last 2 decimal digits)
pub fn format_cell_id(id: CellId) -> String {
    format!("{:>2}", id.0 % 100)
}

fn write_column_headers(out: &mut String, cols: usize) {
    out.push_str("    ");
    for col in 0..cols {
        out.push_str(&format!(" {:2}", col));
    }
    out.push('\n');
}

fn write_row_prefix(out: &mut String, row: usize) {
    out.push_str(&format!("{:2}: ", row));
}

/// Render a grid as text: `.` for free slots, the cell id for slots a known
/// cell covers, `#` for used slots without identity (a bare mesh).
pub fn render_grid<G: GridTrait + ?Sized>(grid: &G) -> String {
    let (rows, cols) = grid.dimensions();
    let mut out = String::new();

    out.push_str(&format!(
        "=== GRID ({} x {}) - {} used ===\n",
        rows,
        cols,
        grid.occupied_cells()
    ));
    write_column_headers(&mut out, cols);

    for row in 0..rows {
        write_row_prefix(&mut out, row);
        for col in 0..cols {
            let used = grid.is_cell_occupied(row, col).unwrap_or(false);
            match (used, grid.cell_at(row, col)) {
                (false, _) => out.push_str(" . "),
                (true, Some(id)) => {
                    out.push_str(&format_cell_id(id));
                    out.push(' ');
                }
                (true, None) => out.push_str(" # "),
            }
        }
        out.push('\n');
    }
    out
}

/// Print the grid to stdout
pub fn print_grid<G: GridTrait + ?Sized>(grid: &G) {
    println!("{}", render_grid(grid));
}
