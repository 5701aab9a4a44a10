use std::fs;
use std::io;
use std::mem;
use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::Dimension;
use crate::cell::Cell;
use crate::cell::CellIndex;
use crate::cell::NEIGHBORHOOD;
use crate::state::ALIVE;
use crate::state::BoardState;
use crate::state::DEAD;
use crate::state::StateError;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid dimension {width}x{height}, both sides must be positive")]
    InvalidDimension { width: Dimension, height: Dimension },

    #[error("Malformed state: {0}")]
    MalformedState(#[from] StateError),

    #[error("Failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A fixed size Life board whose edges wrap around in both directions.
///
/// Cells live in a single buffer, row after row, and refer to their neighbors by index into that
/// buffer. The neighbor indices are computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,

    /// `width * height` cells, where `(x, y)` lives at `y * width + x`
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `width` by `height` grid where every cell is independently alive with
    /// probability `live_density`.
    ///
    /// The density is not clamped. Anything `<= 0` gives an empty grid and anything `> 1` a full
    /// one.
    pub fn new<R>(
        width: Dimension,
        height: Dimension,
        live_density: f64,
        rng: &mut R,
    ) -> Result<Self, GridError>
    where
        R: Rng + ?Sized,
    {
        let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(GridError::InvalidDimension { width, height }),
        };

        // The cell buffer has to be addressable
        let bytes = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(mem::size_of::<Cell>()));
        if bytes.is_none_or(|b| b > isize::MAX as usize) {
            return Err(GridError::InvalidDimension { width, height });
        }

        if !(0.0..=1.0).contains(&live_density) {
            warn!(live_density, "Live density outside of [0, 1], using it as-is");
        }

        let grid = Self::wire(w, h, |_, _| rng.random::<f64>() < live_density);
        debug!(
            width = w,
            height = h,
            population = grid.population(),
            "Seeded grid"
        );

        Ok(grid)
    }

    /// Like [`Grid::new`], with a generator seeded from `seed`. The same seed always gives the
    /// same grid.
    pub fn seeded(
        width: Dimension,
        height: Dimension,
        live_density: f64,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(width, height, live_density, &mut rng)
    }

    /// Like [`Grid::new`], using the thread local generator.
    pub fn random(
        width: Dimension,
        height: Dimension,
        live_density: f64,
    ) -> Result<Self, GridError> {
        Self::new(width, height, live_density, &mut rand::rng())
    }

    /// Rebuild a grid from its saved form. Fails without building anything if the rows do not
    /// match the declared size.
    pub fn from_state(state: &BoardState) -> Result<Self, GridError> {
        let (width, height) = state.validate()?;

        let mut alive = vec![false; width * height];
        for (x, y, a) in state.cells() {
            alive[y * width + x] = a;
        }

        Ok(Self::wire(width, height, |x, y| alive[y * width + x]))
    }

    /// Snapshot the current generation. Row `y`, column `x` is `*` if the cell at `(x, y)` is
    /// alive and a space otherwise.
    pub fn to_state(&self) -> BoardState {
        let rows: Vec<String> = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.is_alive(x, y) { ALIVE } else { DEAD })
                    .collect()
            })
            .collect();

        // Both sides were validated against `Dimension` at construction
        BoardState::new(self.width as Dimension, self.height as Dimension, rows)
    }

    /// Read a grid from a JSON state file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let state = BoardState::from_json(&json)?;
        let grid = Self::from_state(&state)?;

        debug!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            "Loaded grid"
        );

        Ok(grid)
    }

    /// Write the current generation to a JSON state file, replacing it if it exists.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        let path = path.as_ref();
        let json = self.to_state().to_json().map_err(GridError::Encode)?;
        fs::write(path, json)?;

        debug!(path = %path.display(), "Saved grid");

        Ok(())
    }

    /// Move every cell forward by one generation.
    ///
    /// All cells decide their next state from the current generation before any of them changes.
    pub fn advance(&mut self) {
        for i in 0..self.cells.len() {
            let live = self.live_neighbors(i);
            self.cells[i].prepare_step(live);
        }

        for cell in &mut self.cells {
            cell.commit_step();
        }

        trace!(population = self.population(), "Advanced grid");
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` is outside of the grid.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.xy_from(x, y)]
    }

    /// Panics if `(x, y)` is outside of the grid.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_alive()
    }

    /// Overwrite the state of a single cell. Panics if `(x, y)` is outside of the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.xy_from(x, y);
        self.cells[i].set_alive(alive);
    }

    /// Coordinates of the neighbors of `(x, y)`, in the order they were wired.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); NEIGHBORHOOD] {
        let neighbors = *self.cell(x, y).neighbors();
        neighbors.map(|i| self.xy_to(i))
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Allocate the cells, asking `alive` for the initial state of each one, and connect every
    /// cell to its 8 wrapped neighbors.
    fn wire<F>(width: usize, height: usize, mut alive: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let xl = (x + width - 1) % width;
                let xr = (x + 1) % width;
                let yt = (y + height - 1) % height;
                let yb = (y + 1) % height;

                let at = |x: usize, y: usize| -> CellIndex { y * width + x };

                let neighbors = [
                    at(xl, yt),
                    at(x, yt),
                    at(xr, yt),
                    at(xl, y),
                    at(xr, y),
                    at(xl, yb),
                    at(x, yb),
                    at(xr, yb),
                ];

                cells.push(Cell::new(alive(x, y), neighbors));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    fn live_neighbors(&self, i: CellIndex) -> u8 {
        self.cells[i]
            .neighbors()
            .iter()
            .filter(|&&n| self.cells[n].is_alive())
            .count() as u8
    }

    fn xy_to(&self, i: CellIndex) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    fn xy_from(&self, x: usize, y: usize) -> CellIndex {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        y * self.width + x
    }
}
