//! Headless simulation driver for a single board.

use crate::board::{Board, Census};
use crate::step::StepController;
use hexlife_core::{BoardConfig, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, event, info, instrument, Level};

/// Default number of ticks between census summaries
pub const DEFAULT_CENSUS_INTERVAL: u64 = 100;

pub struct Simulation {
    board: Board,
    controller: StepController,
    config: BoardConfig,
    rng: ChaCha8Rng,
    tick: u64,
    census_interval: u64,
}

impl Simulation {
    /// Build a simulation over a freshly randomized board
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let board = Board::from_config(&config, &mut rng);

        info!(
            event = "simulation_created",
            width = config.width,
            height = config.height,
            seed = config.seed,
            "Created board"
        );

        Ok(Self {
            board,
            controller: StepController::new(),
            config,
            rng,
            tick: 0,
            census_interval: DEFAULT_CENSUS_INTERVAL,
        })
    }

    /// Emit a census summary every `interval` ticks (minimum 1)
    pub fn with_census_interval(mut self, interval: u64) -> Self {
        self.census_interval = interval.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Ticks completed since creation or the last reset
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance the board by one tick
    pub fn step(&mut self) -> Census {
        let summary = self.controller.advance(&mut self.board);
        self.tick += 1;

        let census = self.board.census();
        debug!(
            tick = self.tick,
            declined = summary.declined,
            grown = summary.grown,
            held = summary.held,
            occupied = census.occupied_cells,
            "Tick complete"
        );

        if self.tick % self.census_interval == 0 {
            self.emit_census(&census);
        }

        census
    }

    /// Run the simulation for the specified number of ticks
    #[instrument(skip(self), fields(start_tick = self.tick))]
    pub fn run(&mut self, ticks: u64) -> Census {
        info!("Running simulation for {} ticks", ticks);

        let mut census = self.board.census();
        for _ in 0..ticks {
            census = self.step();
        }

        info!(
            event = "run_complete",
            final_tick = self.tick,
            total_population = census.total_population,
            occupied_cells = census.occupied_cells,
            "Run complete"
        );

        census
    }

    /// Re-randomize the board and restart the tick count
    pub fn reset(&mut self) {
        self.board.randomize(&mut self.rng);
        self.tick = 0;
        info!(event = "simulation_reset", "Board re-randomized");
    }

    /// Empty the board and restart the tick count
    pub fn clear(&mut self) {
        self.board.clear();
        self.tick = 0;
        info!(event = "simulation_cleared", "Board cleared");
    }

    fn emit_census(&self, census: &Census) {
        info!(
            event = "population_census",
            tick = self.tick,
            total_population = census.total_population,
            occupied_cells = census.occupied_cells,
            saturated_cells = census.saturated_cells,
            density = format!("{:.3}", census.density()),
            "Population census"
        );

        event!(
            Level::INFO,
            gauge_name = "occupied_cells",
            gauge_value = census.occupied_cells,
            tick = self.tick,
            "Occupied cells gauge"
        );
    }
}
