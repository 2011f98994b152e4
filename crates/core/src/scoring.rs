//! Score and difficulty tracking.
//!
//! Clearing several rows in one move pays quadratically more than
//! clearing them one at a time, and every award scales with the
//! current difficulty. Landing or dropping a piece high on the field
//! pays small bonuses on top. Difficulty itself climbs one level per
//! [`ROWS_PER_LEVEL`] cleared rows.

use blockfall_types::{DROP_BONUS_STEPS, LANDING_BONUS_STEPS, ROWS_PER_LEVEL, ROW_CLEAR_BASE};

/// Running score, cleared-row total, and the difficulty level derived
/// from them.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    score: u32,
    rows: u32,
    difficulty: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self {
            score: 0,
            rows: 0,
            difficulty: 1,
        }
    }

    /// Record a landed piece and the rows it cleared. `fall_steps` is
    /// how many natural falls the piece took before landing; setting a
    /// piece down near the top takes more skill and pays a placement
    /// bonus. Returns the difficulty after the move, which the landing
    /// itself may have pushed up.
    pub fn on_move_complete(&mut self, rows_cleared: u32, fall_steps: u32) -> u32 {
        self.rows += rows_cleared;
        self.difficulty = Self::calculate_difficulty(self.rows);

        let increment = if rows_cleared > 0 {
            rows_cleared * ROW_CLEAR_BASE * rows_cleared * self.difficulty
        } else {
            self.difficulty
        };
        self.score += increment;

        if fall_steps < LANDING_BONUS_STEPS {
            self.score += LANDING_BONUS_STEPS - fall_steps;
        }

        self.difficulty
    }

    /// Award the hard-drop bonus. `fall_steps` is how many natural
    /// falls the piece had taken when the drop started; dropping from
    /// higher up pays more.
    pub fn on_drop(&mut self, fall_steps: u32) {
        if fall_steps <= DROP_BONUS_STEPS {
            self.score += DROP_BONUS_STEPS - fall_steps;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn calculate_difficulty(rows: u32) -> u32 {
        rows / ROWS_PER_LEVEL + 1
    }
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new()
    }
}
