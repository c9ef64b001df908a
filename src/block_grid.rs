use block_grid::{print_grid, CellId, Grid, GridConfig, GridError, GridResult};
use log::{debug, info, warn};
use rand::Rng;

fn show_help() {
    println!("Usage: block_grid [command]");
    println!();
    println!("Commands:");
    println!("  (no args)            Replay the startup layout script");
    println!("  random [steps]       Random add/move/resize/remove run on a 6x8 grid");
    println!("  config <file.json>   Random run on a grid loaded from a JSON config");
    println!("  help                 Show this help message");
    println!();
}

/// The layout the editor opens with: three cells on a diagonal, shuffled around
fn startup_script() -> GridResult<Grid> {
    let mut grid = Grid::new(3, 3, 0.5)?;

    let first = grid.add_cell(0, 0)?;
    let second = grid.add_cell(1, 1)?;
    grid.add_cell(2, 2)?;

    grid.move_cell(first, 1, 0)?;
    grid.move_cell(first, 1, 0)?;
    grid.move_cell(first, 0, 1)?;
    grid.deform_cell(second, 0, 1, 1, 2)?;
    grid.deform_cell(first, 2, 2, 0, 1)?;

    // Growing the wide cell upward would swallow the resized one
    if let Err(e) = grid.deform_cell(first, 1, 2, 0, 1) {
        warn!("⚠️ {}", e);
    }

    grid.set_cell_color(second, "#4a90d9")?;
    Ok(grid)
}

fn random_run(mut grid: Grid, steps: usize) -> GridResult<Grid> {
    let mut rng = rand::thread_rng();
    let (rows, cols) = (grid.rows(), grid.cols());
    let (mut accepted, mut rejected) = (0usize, 0usize);

    for _ in 0..steps {
        let ids: Vec<CellId> = grid.cells().iter().map(|c| c.id).collect();
        let pick = (!ids.is_empty()).then(|| ids[rng.gen_range(0..ids.len())]);

        let outcome = match (rng.gen_range(0..10), pick) {
            (0..=3, _) | (_, None) => grid
                .add_cell(rng.gen_range(0..rows), rng.gen_range(0..cols))
                .map(|_| ()),
            (4..=6, Some(id)) => grid
                .move_cell(id, rng.gen_range(-2..=2), rng.gen_range(-2..=2))
                .map(|_| ()),
            (7..=8, Some(id)) => {
                let rect = grid.cell(id).map(|c| c.rect).ok_or(GridError::CellNotFound(id))?;
                grid.deform_cell(
                    id,
                    rect.row_start,
                    rect.row_start + rng.gen_range(0..3),
                    rect.col_start,
                    rect.col_start + rng.gen_range(0..3),
                )
                .map(|_| ())
            }
            (_, Some(id)) => grid.remove_cell(id).map(|_| ()),
        };

        match outcome {
            Ok(()) => accepted += 1,
            Err(e) => {
                rejected += 1;
                debug!("rejected: {}", e);
            }
        }
    }

    info!(
        "🎲 {} steps: {} applied, {} rejected, {} cells live, consistent: {}",
        steps,
        accepted,
        rejected,
        grid.len(),
        grid.is_consistent()
    );
    Ok(grid)
}

fn dump(grid: &Grid) -> Result<(), Box<dyn std::error::Error>> {
    print_grid(grid);
    println!("{}", serde_json::to_string_pretty(grid.cells())?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("-h") | Some("--help") => {
            show_help();
            Ok(())
        }
        Some("random") => {
            let steps = match args.get(2) {
                Some(raw) => raw.parse()?,
                None => 200,
            };
            let grid = random_run(Grid::new(6, 8, 0.5)?, steps)?;
            dump(&grid)
        }
        Some("config") => {
            let Some(path) = args.get(2) else {
                println!("❌ config needs a path to a JSON file");
                return Ok(());
            };
            let config = GridConfig::from_json_file(path)?;
            info!("📋 Loaded {}x{} grid from {}", config.rows, config.cols, path);
            let grid = random_run(Grid::from_config(config)?, 200)?;
            dump(&grid)
        }
        Some(unknown) => {
            println!("❌ Unknown command: {}", unknown);
            println!("Run 'block_grid help' for usage information");
            Ok(())
        }
        None => {
            let grid = startup_script()?;
            info!("✅ Startup layout ready with {} cells", grid.len());
            dump(&grid)
        }
    }
}
