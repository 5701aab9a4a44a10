pub mod cell;
pub mod driver;
pub mod grid;
pub mod render;
pub mod state;

pub use grid::Grid;
pub use grid::GridError;
pub use state::BoardState;

/// Side length as given by callers. Signed so that bad input can be represented and rejected.
pub type Dimension = i32;
