use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::Dimension;

/// Character marking a live cell in `cellstext`. Anything else is dead.
pub const ALIVE: char = '*';

/// Character written for a dead cell.
pub const DEAD: char = ' ';

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to parse state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid dimension {width}x{height}, both sides must be positive")]
    Dimension { width: Dimension, height: Dimension },

    #[error("Expected {expected} rows, but got {got}")]
    RowCount { expected: Dimension, got: usize },

    #[error("Row {row} has {got} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: Dimension,
        got: usize,
    },
}

/// The saved form of a grid: its size and one string per row, one character per column.
///
/// On disk this is a JSON object
///
/// ```notrust
/// { "width": 4, "height": 2, "cellstext": [" ** ", "*  *"] }
/// ```
///
/// Neighbor topology is never stored, it is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub width: Dimension,
    pub height: Dimension,

    #[serde(rename = "cellstext")]
    pub rows: Vec<String>,
}

impl BoardState {
    pub fn new(width: Dimension, height: Dimension, rows: Vec<String>) -> Self {
        Self {
            width,
            height,
            rows,
        }
    }

    /// Parse a state from its JSON text. Only the structure is checked here, see
    /// [`BoardState::validate`] for the shape.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check that there are `height` rows of exactly `width` characters each, and return the
    /// dimensions as sizes.
    pub fn validate(&self) -> Result<(usize, usize), StateError> {
        let (width, height) = match (usize::try_from(self.width), usize::try_from(self.height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(StateError::Dimension {
                    width: self.width,
                    height: self.height,
                });
            }
        };

        if self.rows.len() != height {
            return Err(StateError::RowCount {
                expected: self.height,
                got: self.rows.len(),
            });
        }

        for (row, text) in self.rows.iter().enumerate() {
            let got = text.chars().count();

            if got != width {
                return Err(StateError::RowLength {
                    row,
                    expected: self.width,
                    got,
                });
            }
        }

        Ok((width, height))
    }

    /// Iterate over every cell as `(x, y, alive)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .map(move |(x, c)| (x, y, c == ALIVE))
        })
    }
}
