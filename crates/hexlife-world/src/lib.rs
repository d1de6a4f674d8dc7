//! Board and step engine.
//!
//! This module implements the hexagonal board, the probabilistic step rule
//! and a headless simulation driver around them.

pub mod board;
pub mod simulation;
pub mod step;

pub use board::{Board, Census};
pub use simulation::Simulation;
pub use step::{rule, StepController, StepSummary, Transition};
