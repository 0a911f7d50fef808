//! SessionMetrics - rate and score figures for a practice session
//!
//! - moves_per_minute = moves / elapsed * 60 (0 when elapsed <= 0)
//! - average_energy   = mean of the retained energy history
//! - energy_score     = min(100, average_energy * multiplier * 1000)
//! - rhythm_score     = min(100, moves_per_minute * 2)
//!
//! Scores clamp at 100 only; inputs are never negative.

use serde::{Deserialize, Serialize};

use super::MovementHistory;
use crate::styles::StyleProfile;

const SCORE_CAP: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub total_moves: u64,
    pub session_duration: f64,
    pub moves_per_minute: f32,
    pub average_energy: f32,
    pub energy_score: f32,
    pub rhythm_score: f32,
}

impl SessionMetrics {
    pub fn compute(
        total_moves: u64,
        history: &MovementHistory,
        elapsed_secs: f64,
        profile: &StyleProfile,
    ) -> Self {
        if elapsed_secs <= 0.0 {
            return Self::default();
        }

        let moves_per_minute = (total_moves as f64 / elapsed_secs * 60.0) as f32;
        let average_energy = history.mean();
        let energy_score =
            (average_energy * profile.energy_multiplier * 1000.0).min(SCORE_CAP);
        let rhythm_score = (moves_per_minute * 2.0).min(SCORE_CAP);

        Self {
            total_moves,
            session_duration: elapsed_secs,
            moves_per_minute,
            average_energy,
            energy_score,
            rhythm_score,
        }
    }

    /// Display rounding: one decimal for rates, scores and duration;
    /// average energy reported x1000 with two decimals
    pub fn rounded(&self) -> Self {
        Self {
            total_moves: self.total_moves,
            session_duration: (self.session_duration * 10.0).round() / 10.0,
            moves_per_minute: round_to(self.moves_per_minute, 1),
            average_energy: round_to(self.average_energy * 1000.0, 2),
            energy_score: round_to(self.energy_score, 1),
            rhythm_score: round_to(self.rhythm_score, 1),
        }
    }
}

fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}
