//! The probabilistic step rule.

use crate::board::Board;
use hexlife_core::{GROWTH_MAX, GROWTH_MIN, LONELY_AT, OVERCROWDED_AT, STEP_POP_DELTA};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What the rule does to a cell for a given neighbor sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Overcrowded or lonely: lose one step of population
    Decline,
    /// Gain one step of population
    Grow,
    /// No change
    Hold,
}

impl Transition {
    /// Population delta to apply, if any
    pub fn delta(&self) -> Option<f64> {
        match self {
            Transition::Decline => Some(-STEP_POP_DELTA),
            Transition::Grow => Some(STEP_POP_DELTA),
            Transition::Hold => None,
        }
    }
}

/// Classify a neighbor population sum.
///
/// The sums are fractional but the thresholds are the classic integer
/// ones; both are compared as-is.
pub fn rule(neighbors: f64) -> Transition {
    if neighbors >= OVERCROWDED_AT || neighbors <= LONELY_AT {
        Transition::Decline
    } else if (GROWTH_MIN..=GROWTH_MAX).contains(&neighbors) {
        Transition::Grow
    } else {
        Transition::Hold
    }
}

/// Per-tick tally of attempted transitions. A change rejected at a
/// population bound still counts under the transition that was attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    pub declined: usize,
    pub grown: usize,
    pub held: usize,
}

impl StepSummary {
    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Decline => self.declined += 1,
            Transition::Grow => self.grown += 1,
            Transition::Hold => self.held += 1,
        }
    }
}

/// Advances a board by one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepController;

impl StepController {
    pub fn new() -> Self {
        Self
    }

    /// Apply the rule to every cell from the committed snapshot and commit
    /// all changes together.
    pub fn advance(&self, board: &mut Board) -> StepSummary {
        let mut summary = StepSummary::default();

        board.open_batch();

        for y in 0..board.height() {
            for x in 0..board.width() {
                // Neighbor sums read committed cells only.
                let neighbors = board.count_live_neighbors(x, y);
                let transition = rule(neighbors);
                if let Some(delta) = transition.delta() {
                    board.adjust_staged_value(x, y, delta);
                }
                summary.record(transition);
            }
        }

        board.commit_batch();

        trace!(
            declined = summary.declined,
            grown = summary.grown,
            held = summary.held,
            "Step committed"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlife_core::{JUST_BORN, MAX_POP, MIN_POP, STARTED_DYING};

    /// 3x3 board with `center` at (1, 1) and the listed cells full.
    fn setup(center: f64, live: &[(i32, i32)]) -> Board {
        let mut board = Board::new(3, 3);
        board.clear();

        board.open_batch();
        board.set_staged_value(1, 1, center);
        for &(x, y) in live {
            board.set_staged_value(x, y, MAX_POP);
        }
        board.commit_batch();
        board
    }

    #[test]
    fn test_rule_thresholds() {
        assert_eq!(rule(0.0), Transition::Decline);
        assert_eq!(rule(1.0), Transition::Decline);
        assert_eq!(rule(1.5), Transition::Hold);
        assert_eq!(rule(2.0), Transition::Hold);
        assert_eq!(rule(2.5), Transition::Grow);
        assert_eq!(rule(3.0), Transition::Grow);
        assert_eq!(rule(3.5), Transition::Grow);
        assert_eq!(rule(3.75), Transition::Hold);
        assert_eq!(rule(4.0), Transition::Decline);
        assert_eq!(rule(6.0), Transition::Decline);
    }

    #[test]
    fn test_lonely_death() {
        let mut board = setup(MAX_POP, &[]);
        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), STARTED_DYING);
    }

    #[test]
    fn test_lonely_death_one() {
        let mut board = setup(MAX_POP, &[(1, 0)]);
        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), STARTED_DYING);
    }

    #[test]
    fn test_overpopulation_death() {
        // Four of (1, 1)'s six neighbors.
        let mut board = setup(MAX_POP, &[(1, 0), (1, 2), (0, 1), (2, 1)]);
        assert_eq!(board.count_live_neighbors(1, 1), 4.0);

        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), STARTED_DYING);
    }

    #[test]
    fn test_birth() {
        let mut board = setup(MIN_POP, &[(1, 0), (0, 1), (1, 2)]);
        assert_eq!(board.count_live_neighbors(1, 1), 3.0);

        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), JUST_BORN);
    }

    #[test]
    fn test_stasis_live() {
        let mut board = setup(MAX_POP, &[(0, 1), (1, 0)]);
        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), MAX_POP);
    }

    #[test]
    fn test_stasis_dead() {
        let mut board = setup(MIN_POP, &[(0, 1), (1, 0)]);
        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), MIN_POP);
    }

    #[test]
    fn test_growth_capped_at_max() {
        let mut board = setup(MAX_POP, &[(1, 0), (0, 1), (1, 2)]);
        let summary = StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), MAX_POP);
        assert!(summary.grown >= 1);
    }

    #[test]
    fn test_reads_pre_tick_snapshot() {
        // (1, 0) and (0, 1) are visited before (1, 1) and both decline.
        // Read in place, (1, 1) would see 2.3 and hold instead of growing.
        let mut board = setup(MIN_POP, &[(0, 1), (1, 2)]);
        board.open_batch();
        board.set_staged_value(1, 0, 0.5);
        board.commit_batch();
        assert_eq!(board.count_live_neighbors(1, 1), 2.5);

        StepController::new().advance(&mut board);
        assert_eq!(board.get_value(1, 1), JUST_BORN);
        assert!((board.get_value(1, 0) - 0.4).abs() < 1e-12);
        assert_eq!(board.get_value(0, 1), STARTED_DYING);
    }

    #[test]
    fn test_gradual_birth() {
        let mut board = setup(MIN_POP, &[(1, 0), (0, 1), (1, 2)]);
        let controller = StepController::new();

        controller.advance(&mut board);
        assert_eq!(board.get_value(1, 1), JUST_BORN);

        // The lonely neighbors fade to 0.9 each, a sum of ~2.7: still growing.
        controller.advance(&mut board);
        assert!(board.get_value(1, 1) > JUST_BORN);
        assert!(board.get_value(1, 1) < MAX_POP);
    }

    #[test]
    fn test_summary_counts_every_cell() {
        let mut board = setup(MAX_POP, &[]);
        let summary = StepController::new().advance(&mut board);
        assert_eq!(summary.declined + summary.grown + summary.held, 9);
        assert!(!board.is_batch_open());
    }
}
