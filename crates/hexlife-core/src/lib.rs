//! Core types and constants for the hexagonal probabilistic Game of Life.

pub mod config;
pub mod error;
pub mod population;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use population::*;
pub use types::*;
