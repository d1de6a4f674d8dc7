//! Population bounds, per-tick step size and rule thresholds.

/// Carrying capacity of a cell.
pub const MAX_POP: f64 = 1.0;

/// Population of an empty cell.
pub const MIN_POP: f64 = 0.0;

/// Largest change a single cell can see in one tick.
pub const STEP_POP_DELTA: f64 = 0.1;

/// Value of an empty cell one tick after meeting the birth condition.
pub const JUST_BORN: f64 = MIN_POP + STEP_POP_DELTA;

/// Value of a full cell one tick after meeting a death condition.
pub const STARTED_DYING: f64 = MAX_POP - STEP_POP_DELTA;

/// Neighbor sums at or above this overpopulate a cell.
pub const OVERCROWDED_AT: f64 = 4.0;

/// Neighbor sums at or below this leave a cell lonely.
pub const LONELY_AT: f64 = 1.0;

/// Inclusive lower bound of the neighbor sum that grows a cell.
pub const GROWTH_MIN: f64 = 2.5;

/// Inclusive upper bound of the neighbor sum that grows a cell.
pub const GROWTH_MAX: f64 = 3.5;

/// Whether `value` lies within `[MIN_POP, MAX_POP]`.
pub fn in_population_bounds(value: f64) -> bool {
    (MIN_POP..=MAX_POP).contains(&value)
}
