//! Double-buffered hexagonal board.

use hexlife_core::{in_population_bounds, BoardConfig, Position, MAX_POP, MIN_POP};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A finite, non-wrapping board of hex cells holding population values.
///
/// Reads always see the committed cells. Edits go to a staging copy that
/// only becomes visible on [`Board::commit_batch`].
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<f64>,
    staging: Vec<f64>,
    batch_open: bool,
}

impl Board {
    /// Create an all-empty board. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![MIN_POP; size],
            staging: vec![MIN_POP; size],
            batch_open: false,
        }
    }

    /// Create a board with every cell randomly empty or full
    pub fn random<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Self {
        let mut board = Self::new(width, height);
        board.randomize(rng);
        board
    }

    /// Create a randomized board from configuration
    pub fn from_config<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Self {
        Self::random(config.width, config.height, rng)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_valid_coordinate(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Committed value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the board. Check with
    /// [`Board::is_valid_coordinate`] or use [`Board::value_at`].
    pub fn get_value(&self, x: i32, y: i32) -> f64 {
        match self.value_at(Position::new(x, y)) {
            Some(value) => value,
            None => panic!(
                "coordinate ({}, {}) is outside the {}x{} board",
                x, y, self.width, self.height
            ),
        }
    }

    /// Committed value at `pos`, or `None` off the board
    pub fn value_at(&self, pos: Position) -> Option<f64> {
        self.index(pos.x, pos.y).map(|index| self.cells[index])
    }

    /// Committed values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.cells
    }

    /// Iterator over all committed cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &value)| (self.index_to_pos(i), value))
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Start a new batch: staging becomes a copy of the committed cells,
    /// dropping any uncommitted edits.
    pub fn open_batch(&mut self) {
        if self.batch_open {
            trace!("Discarding uncommitted batch");
        }
        self.staging.copy_from_slice(&self.cells);
        self.batch_open = true;
    }

    pub fn is_batch_open(&self) -> bool {
        self.batch_open
    }

    /// Overwrite a staged value. Not range checked.
    pub fn set_staged_value(&mut self, x: i32, y: i32, value: f64) {
        let index = self.staged_index(x, y);
        self.staging[index] = value;
    }

    /// Add `delta` to a staged value. A result outside
    /// `[MIN_POP, MAX_POP]` is dropped and the staged value kept.
    pub fn adjust_staged_value(&mut self, x: i32, y: i32, delta: f64) {
        let index = self.staged_index(x, y);
        let adjusted = self.staging[index] + delta;
        if in_population_bounds(adjusted) {
            self.staging[index] = adjusted;
        } else {
            trace!(x, y, delta, "Rejected out-of-range adjustment");
        }
    }

    /// Publish the staged cells. Does nothing when no batch is open.
    pub fn commit_batch(&mut self) {
        if !self.batch_open {
            return;
        }
        std::mem::swap(&mut self.cells, &mut self.staging);
        self.batch_open = false;
    }

    /// Empty every cell and commit.
    pub fn clear(&mut self) {
        self.open_batch();
        self.staging.fill(MIN_POP);
        self.commit_batch();
    }

    /// Set every committed cell to `MIN_POP` or `MAX_POP` with even odds.
    /// Writes the committed cells directly and drops any open batch.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(0.5) { MAX_POP } else { MIN_POP };
        }
        self.batch_open = false;
    }

    /// In-bounds hex neighbors of `(x, y)`
    pub fn neighbors(&self, x: i32, y: i32) -> impl Iterator<Item = Position> + '_ {
        Position::new(x, y)
            .hex_neighbors()
            .filter(move |pos| self.is_valid_coordinate(pos.x, pos.y))
    }

    /// Sum of committed neighbor populations around `(x, y)`, excluding
    /// the cell itself. Off-board neighbors contribute nothing.
    pub fn count_live_neighbors(&self, x: i32, y: i32) -> f64 {
        Position::new(x, y)
            .hex_neighbors()
            .filter_map(|pos| self.value_at(pos))
            .sum()
    }

    /// Summary of the committed cells
    pub fn census(&self) -> Census {
        let mut census = Census {
            cell_count: self.cells.len(),
            ..Census::default()
        };
        for &value in &self.cells {
            census.total_population += value;
            if value > MIN_POP {
                census.occupied_cells += 1;
            }
            if value >= MAX_POP {
                census.saturated_cells += 1;
            }
        }
        census
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_valid_coordinate(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Index into the staging cells, opening a batch first if needed.
    fn staged_index(&mut self, x: i32, y: i32) -> usize {
        if !self.batch_open {
            self.open_batch();
        }
        match self.index(x, y) {
            Some(index) => index,
            None => panic!(
                "coordinate ({}, {}) is outside the {}x{} board",
                x, y, self.width, self.height
            ),
        }
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }
}

/// Population summary of a committed board
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Census {
    /// Sum of every cell's population
    pub total_population: f64,
    /// Cells with any population
    pub occupied_cells: usize,
    /// Cells at carrying capacity
    pub saturated_cells: usize,
    pub cell_count: usize,
}

impl Census {
    /// Mean population per cell
    pub fn density(&self) -> f64 {
        if self.cell_count == 0 {
            0.0
        } else {
            self.total_population / self.cell_count as f64
        }
    }
}
