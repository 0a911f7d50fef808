// AnalyzerSession - per-session movement energy and move counting
//
// Algorithm per frame:
// 1. First frame: store as baseline, energy = 0
// 2. Later frames: energy = Σ |p_t - p_(t-1)| over the key joints (3D)
// 3. Push energy into the bounded history
// 4. With at least `smoothing_window` samples, compare the mean of the newest
//    window against the style threshold; strictly above counts a move
// 5. The current frame always becomes the next baseline
//
// There is no debounce: a sustained high-energy stretch counts a move on
// every frame while the rolling mean stays above the threshold.

use super::{MovementHistory, SessionMetrics};
use crate::config::MovementConfig;
use crate::pose::{displacement, PoseFrame, KEY_POINTS};
use crate::styles::StyleProfile;

/// Result of feeding one frame to the analyzer
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MoveDetection {
    /// Energy sample recorded for this frame
    pub energy: f32,
    /// Rolling mean crossed the style threshold on this frame
    pub move_detected: bool,
    /// Running move count after this frame
    pub move_count: u64,
}

/// Summed displacement of the key joints between two frames
pub fn movement_energy(previous: &PoseFrame, current: &PoseFrame) -> f32 {
    KEY_POINTS
        .iter()
        .map(|&joint| displacement(&previous[joint], &current[joint]))
        .sum()
}

/// Movement state for one practice session; reset on analysis-style change
#[derive(Debug, Clone)]
pub struct AnalyzerSession {
    history: MovementHistory,
    move_count: u64,
    previous: Option<PoseFrame>,
    smoothing_window: usize,
}

impl AnalyzerSession {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            history: MovementHistory::new(config.history_capacity),
            move_count: 0,
            previous: None,
            smoothing_window: config.smoothing_window.max(1),
        }
    }

    /// Energy for `frame` relative to the stored baseline; replaces the baseline
    pub fn calculate_movement_energy(&mut self, frame: &PoseFrame) -> f32 {
        let energy = self
            .previous
            .as_ref()
            .map(|previous| movement_energy(previous, frame))
            .unwrap_or(0.0);
        self.previous = Some(frame.clone());
        energy
    }

    /// Record one frame and decide whether it completes a move
    pub fn detect_dance_moves(
        &mut self,
        frame: &PoseFrame,
        profile: &StyleProfile,
    ) -> MoveDetection {
        let energy = self.calculate_movement_energy(frame);
        self.history.push(energy);

        let move_detected = self
            .history
            .recent_mean(self.smoothing_window)
            .is_some_and(|recent| recent > profile.move_threshold);

        if move_detected {
            self.move_count += 1;
        }

        MoveDetection {
            energy,
            move_detected,
            move_count: self.move_count,
        }
    }

    /// Metrics for an explicit elapsed duration
    pub fn metrics_at(&self, elapsed_secs: f64, profile: &StyleProfile) -> SessionMetrics {
        SessionMetrics::compute(self.move_count, &self.history, elapsed_secs, profile)
    }

    /// Drop history, move count and the energy baseline
    pub fn reset(&mut self) {
        self.history.clear();
        self.move_count = 0;
        self.previous = None;
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    pub fn history(&self) -> &MovementHistory {
        &self.history
    }
}

impl Default for AnalyzerSession {
    fn default() -> Self {
        Self::new(&MovementConfig::default())
    }
}
