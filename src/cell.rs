/// Neighbor counts that bring a dead cell to life, one bit per count.
///
/// Bit `i` is on when `i` live neighbors cause a birth, so `0b1000` is b3.
const BIRTHS: u16 = 0b0_0000_1000;

/// Neighbor counts that keep a live cell alive, one bit per count (s23).
const SURVIVALS: u16 = 0b0_0000_1100;

/// Index of a [`Cell`] in the flat cell buffer owned by a [`Grid`](crate::grid::Grid).
pub type CellIndex = usize;

/// Number of cells in a Moore neighborhood
pub const NEIGHBORHOOD: usize = 8;

/// Apply B3/S23 to a single site.
///
/// `live_neighbors` above 8 is impossible on a grid, and is treated as death.
pub const fn next_state(alive: bool, live_neighbors: u8) -> bool {
    if live_neighbors as usize > NEIGHBORHOOD {
        return false;
    }

    let n: u16 = 1 << live_neighbors;

    if alive {
        SURVIVALS & n == n
    } else {
        BIRTHS & n == n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Current state
    alive: bool,

    /// State computed by [`Cell::prepare_step`], not visible until [`Cell::commit_step`].
    pending: bool,

    /// Indices of the 8 toroidally adjacent cells, in the order
    ///
    /// ```notrust
    ///   0 1 2
    ///   3 . 4
    ///   5 6 7
    /// ```
    ///
    /// Set once when the grid is wired and never touched afterwards.
    neighbors: [CellIndex; NEIGHBORHOOD],
}

impl Cell {
    pub(crate) const fn new(alive: bool, neighbors: [CellIndex; NEIGHBORHOOD]) -> Self {
        Self {
            alive,
            pending: alive,
            neighbors,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn neighbors(&self) -> &[CellIndex; NEIGHBORHOOD] {
        &self.neighbors
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
        self.pending = alive;
    }

    /// Decide the next state from the number of live neighbors, as counted in the committed
    /// generation. The current state is left untouched.
    pub fn prepare_step(&mut self, live_neighbors: u8) {
        self.pending = next_state(self.alive, live_neighbors);
    }

    /// Make the prepared state current.
    pub fn commit_step(&mut self) {
        self.alive = self.pending;
    }
}
