//! Property-based invariant tests for the grid engine.
//!
//! 1. After any sequence of operations the mesh marks exactly the positions
//!    covered by live cells, and no two cells overlap.
//! 2. Rejected move/deform calls leave mesh and cells unchanged.
//! 3. Add followed by remove of the same cell restores the mesh.
//! 4. Vacate/restore cycles never disturb committed state.

use block_grid::*;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add(usize, usize),
    Remove(usize),
    Move(usize, isize, isize),
    Deform(usize, usize, usize, usize, usize),
    Vacate(usize),
    Restore(usize),
}

fn op_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..rows + 1, 0..cols + 1).prop_map(|(r, c)| Op::Add(r, c)),
        1 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), -3isize..=3, -3isize..=3).prop_map(|(i, dr, dc)| Op::Move(i, dr, dc)),
        2 => (any::<usize>(), 0..rows + 1, 0..rows + 1, 0..cols + 1, 0..cols + 1)
            .prop_map(|(i, rs, re, cs, ce)| Op::Deform(i, rs, re, cs, ce)),
        1 => any::<usize>().prop_map(Op::Vacate),
        1 => any::<usize>().prop_map(Op::Restore),
    ]
}

fn pick(grid: &Grid, i: usize) -> CellId {
    let cells = grid.cells();
    if cells.is_empty() {
        // Never issued, so always unknown
        CellId(u64::MAX)
    } else {
        cells[i % cells.len()].id
    }
}

fn apply(grid: &mut Grid, op: &Op) {
    let _ = match *op {
        Op::Add(r, c) => grid.add_cell(r, c).map(|_| ()),
        Op::Remove(i) => {
            let id = pick(grid, i);
            grid.remove_cell(id).map(|_| ())
        }
        Op::Move(i, dr, dc) => {
            let id = pick(grid, i);
            grid.move_cell(id, dr, dc).map(|_| ())
        }
        Op::Deform(i, rs, re, cs, ce) => {
            let id = pick(grid, i);
            grid.deform_cell(id, rs, re, cs, ce).map(|_| ())
        }
        Op::Vacate(i) => {
            let id = pick(grid, i);
            grid.vacate(id).map(|_| ())
        }
        Op::Restore(i) => {
            let id = pick(grid, i);
            grid.restore(id)
        }
    };
}

fn restore_all(grid: &mut Grid) {
    let ids: Vec<CellId> = grid.cells().iter().map(|c| c.id).collect();
    for id in ids {
        grid.restore(id).unwrap();
    }
}

fn coverage_matches(grid: &Grid) -> bool {
    (0..grid.rows()).all(|r| {
        (0..grid.cols()).all(|c| {
            let covering = grid
                .cells()
                .iter()
                .filter(|cell| cell.rect.contains(Position::new(r, c)))
                .count();
            covering <= 1 && grid.mesh().is_used(r, c) == Some(covering == 1)
        })
    })
}

fn grid_script(max_len: usize) -> impl Strategy<Value = (usize, usize, Vec<Op>)> {
    (1usize..=6, 1usize..=6).prop_flat_map(move |(rows, cols)| {
        (
            Just(rows),
            Just(cols),
            proptest::collection::vec(op_strategy(rows, cols), 0..=max_len),
        )
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Mesh mirrors cell coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mesh_matches_cell_coverage((rows, cols, ops) in grid_script(60)) {
        let mut grid = Grid::new(rows, cols, 0.0).unwrap();
        for op in &ops {
            apply(&mut grid, op);
            prop_assert!(grid.is_consistent(), "inconsistent after {:?}", op);
        }
        restore_all(&mut grid);
        prop_assert!(coverage_matches(&grid));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Rejections are atomic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_mutations_change_nothing(
        (rows, cols, ops) in grid_script(40),
        target in any::<usize>(),
        dr in -4isize..=4,
        dc in -4isize..=4,
        bounds in (0usize..8, 0usize..8, 0usize..8, 0usize..8),
    ) {
        let mut grid = Grid::new(rows, cols, 0.0).unwrap();
        for op in &ops {
            apply(&mut grid, op);
        }
        restore_all(&mut grid);
        prop_assume!(!grid.is_empty());
        let id = pick(&grid, target);

        let mesh = grid.mesh().clone();
        let cells = grid.cells().to_vec();
        if grid.move_cell(id, dr, dc).is_err() {
            prop_assert_eq!(grid.mesh(), &mesh);
            prop_assert_eq!(grid.cells(), &cells[..]);
        }

        let mesh = grid.mesh().clone();
        let cells = grid.cells().to_vec();
        let (rs, re, cs, ce) = bounds;
        if grid.deform_cell(id, rs, re, cs, ce).is_err() {
            prop_assert_eq!(grid.mesh(), &mesh);
            prop_assert_eq!(grid.cells(), &cells[..]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Add then remove is the identity on the mesh
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_remove_round_trip((rows, cols, ops) in grid_script(30), r in 0usize..6, c in 0usize..6) {
        let mut grid = Grid::new(rows, cols, 0.0).unwrap();
        for op in &ops {
            apply(&mut grid, op);
        }
        restore_all(&mut grid);
        let before = grid.mesh().clone();

        if let Ok(id) = grid.add_cell(r, c) {
            grid.remove_cell(id).unwrap();
            prop_assert_eq!(grid.mesh(), &before);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Vacate + restore leaves committed state intact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn vacate_restore_round_trip((rows, cols, ops) in grid_script(30), picks in proptest::collection::vec(any::<usize>(), 1..5)) {
        let mut grid = Grid::new(rows, cols, 0.0).unwrap();
        for op in &ops {
            apply(&mut grid, op);
        }
        restore_all(&mut grid);
        prop_assume!(!grid.is_empty());

        let mesh = grid.mesh().clone();
        let cells = grid.cells().to_vec();
        let ids: Vec<CellId> = picks.iter().map(|i| pick(&grid, *i)).collect();
        for id in &ids {
            grid.vacate(*id).unwrap();
        }
        for id in &ids {
            grid.restore(*id).unwrap();
        }
        prop_assert_eq!(grid.mesh(), &mesh);
        prop_assert_eq!(grid.cells(), &cells[..]);
    }
}
