use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;

use crate::grid::Grid;
use crate::grid::GridError;
use crate::render::Frame;
use crate::render::Style;

/// Time between two generations when nothing else is asked for.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Time from the start of one generation to the start of the next
    pub interval: Duration,

    /// Stop after this many generations. `None` runs until the process is killed.
    pub generations: Option<u64>,

    pub style: Style,

    /// Where to write the grid once the loop ends
    pub save: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            generations: None,
            style: Style::default(),
            save: None,
        }
    }
}

/// Draw `grid` to `out` and advance it, once per `config.interval`.
///
/// Each frame clears the screen and starts with an `Iter: <n>` line, `n` counting from 0. Returns
/// the number of generations the grid was advanced by.
pub fn run<W: Write>(grid: &mut Grid, config: &RunConfig, out: &mut W) -> Result<u64, GridError> {
    let mut frame = Frame::new(config.style);
    let mut iter: u64 = 0;

    info!(
        width = grid.width(),
        height = grid.height(),
        style = %frame.style(),
        "Starting run"
    );

    while config.generations.is_none_or(|n| iter < n) {
        let t = Instant::now();

        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print(format!("Iter: {iter}")),
            cursor::MoveToNextLine(1),
        )?;

        for line in frame.render(grid).lines() {
            queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        out.flush()?;

        grid.advance();
        iter += 1;

        debug!(iter, population = grid.population(), "Generation done");

        let time_left = config.interval.saturating_sub(t.elapsed());
        if !time_left.is_zero() {
            thread::sleep(time_left);
        }
    }

    if let Some(path) = &config.save {
        grid.save(path)?;
        info!(path = %path.display(), iter, "Saved final generation");
    }

    Ok(iter)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::RunConfig;
    use super::run;
    use crate::grid::Grid;
    use crate::render::Style;

    fn config(generations: u64) -> RunConfig {
        RunConfig {
            interval: Duration::ZERO,
            generations: Some(generations),
            ..RunConfig::default()
        }
    }

    #[test]
    fn prints_one_frame_per_generation() {
        let mut grid = Grid::seeded(10, 10, 0.3, 3).unwrap();
        let mut expected = grid.clone();
        let mut out = Vec::new();

        let n = run(&mut grid, &config(3), &mut out).unwrap();
        assert_eq!(n, 3);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Iter: 0"));
        assert!(out.contains("Iter: 1"));
        assert!(out.contains("Iter: 2"));
        assert!(!out.contains("Iter: 3"));

        for _ in 0..3 {
            expected.advance();
        }
        assert_eq!(grid, expected);
    }

    #[test]
    fn frame_shows_cells() {
        let mut grid = Grid::seeded(4, 2, 1.0, 0).unwrap();
        let mut out = Vec::new();

        run(&mut grid, &config(1), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("****").count(), 2);
    }

    #[test]
    fn zero_generations_does_nothing() {
        let mut grid = Grid::seeded(5, 5, 0.5, 9).unwrap();
        let before = grid.clone();
        let mut out = Vec::new();

        assert_eq!(run(&mut grid, &config(0), &mut out).unwrap(), 0);
        assert!(out.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn braille_run() {
        let mut grid = Grid::seeded(4, 4, 1.0, 0).unwrap();
        let mut out = Vec::new();
        let braille = RunConfig {
            style: Style::Braille,
            ..config(1)
        };

        run(&mut grid, &braille, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\u{28FF}\u{28FF}"));
    }

    #[test]
    fn saves_final_generation() {
        let path = std::env::temp_dir().join(format!(
            "torus_life_driver_{}.json",
            std::process::id()
        ));
        let mut grid = Grid::seeded(8, 6, 0.4, 11).unwrap();
        let mut out = Vec::new();
        let saving = RunConfig {
            save: Some(path.clone()),
            ..config(2)
        };

        run(&mut grid, &saving, &mut out).unwrap();

        let saved = Grid::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(saved, grid);
    }
}
