use std::error::Error;
use std::fs;
use std::time::Instant;

use hexmap::{HexGrid, MapConfig, TerrainGenerator, populate_settlements, render_to_png, to_json};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

// ---------- Entry ----------
// Usage: hexmap [config.json]
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("hexmap=info".parse()?),
        )
        .init();

    let started = Instant::now();
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            MapConfig::from_json_file(path)?
        }
        None => MapConfig::default(),
    };

    let mut grid = HexGrid::try_new(config.radius)?;
    info!("Built grid of radius {} with {} cells", grid.radius(), grid.len());

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut generator = TerrainGenerator::new(config.start_terrain);
    let written = generator.populate(&mut grid, &mut rng);
    info!("Assigned terrain to {} cells (seed {})", written, config.seed);

    if config.settlements {
        let written = populate_settlements(&mut grid, &mut rng);
        info!("Assigned settlements to {} cells", written);
    }

    fs::write(&config.snapshot_path, to_json(&grid)?)?;
    info!("Wrote snapshot to {}", config.snapshot_path.display());

    if let Some(image_path) = &config.image_path {
        render_to_png(&grid, &config.render_config(), image_path)?;
        info!("Rendered {} outlines to {}", config.orientation, image_path.display());
    }

    info!("Elapsed time: {:.2?}", started.elapsed());
    Ok(())
}
