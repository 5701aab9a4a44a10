use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use torus_life::Dimension;
use torus_life::Grid;
use torus_life::driver;
use torus_life::driver::RunConfig;
use torus_life::render::Style;

const DEFAULT_WIDTH: Dimension = 20;
const DEFAULT_HEIGHT: Dimension = 20;
const DEFAULT_DENSITY: f64 = 0.1;

/// Conway's Game of Life on a wrap-around grid, drawn to the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of columns of a randomly seeded grid
    #[arg(long, default_value_t = DEFAULT_WIDTH, allow_negative_numbers = true)]
    width: Dimension,

    /// Number of rows of a randomly seeded grid
    #[arg(long, default_value_t = DEFAULT_HEIGHT, allow_negative_numbers = true)]
    height: Dimension,

    /// Probability of each cell starting alive
    #[arg(short, long, default_value_t = DEFAULT_DENSITY, allow_negative_numbers = true)]
    density: f64,

    /// Seed for the random grid. Runs with the same seed start from the same grid.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a saved state file instead of a random grid
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["width", "height", "density", "seed"])]
    load: Option<PathBuf>,

    /// Write the last generation to this file when the run ends
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Milliseconds between generations
    #[arg(short, long = "interval-ms", value_name = "MILLISECONDS", default_value_t = 1_000)]
    interval_ms: u64,

    /// Stop after this many generations. Runs until interrupted otherwise.
    #[arg(short, long)]
    generations: Option<u64>,

    /// How cells are drawn: ascii or braille
    #[arg(long, default_value_t = Style::Ascii)]
    style: Style,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut grid = match (&args.load, args.seed) {
        (Some(path), _) => Grid::load(path)
            .with_context(|| format!("Failed to load grid from {}", path.display()))?,
        (None, Some(seed)) => Grid::seeded(args.width, args.height, args.density, seed)
            .context("Failed to create grid")?,
        (None, None) => {
            Grid::random(args.width, args.height, args.density).context("Failed to create grid")?
        }
    };

    let config = RunConfig {
        interval: Duration::from_millis(args.interval_ms),
        generations: args.generations,
        style: args.style,
        save: args.save,
    };

    let mut stdout = io::stdout();
    driver::run(&mut grid, &config, &mut stdout).context("Run failed")?;

    Ok(())
}
