//! Configuration management for dynamic parameter tuning
//!
//! This module provides runtime configuration loading from JSON files so beat
//! extraction, beat-sync tolerance, movement detection and loop pacing can be
//! adjusted without recompilation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub beat_extraction: BeatExtractionConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Offline beat extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatExtractionConfig {
    /// Audio is resampled to this rate before analysis
    pub sample_rate: u32,
    /// FFT window size in samples
    pub window_size: usize,
    /// Hop size between onset envelope frames
    pub hop_size: usize,
    /// Centre of the tempo prior in BPM
    pub start_bpm: f32,
    /// Lowest tempo considered
    pub min_bpm: f32,
    /// Highest tempo considered
    pub max_bpm: f32,
    /// How strongly the beat tracker sticks to the estimated period
    pub tightness: f32,
}

impl Default for BeatExtractionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22_050,
            window_size: 2048,
            hop_size: 512,
            start_bpm: 120.0,
            min_bpm: 40.0,
            max_bpm: 240.0,
            tightness: 100.0,
        }
    }
}

/// Beat-sync animator parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// A beat is hit when |elapsed - beat| is strictly below this
    pub tolerance_secs: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: 0.2,
        }
    }
}

/// Movement energy tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Maximum retained energy samples
    pub history_capacity: usize,
    /// Samples averaged for move detection
    pub smoothing_window: usize,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            smoothing_window: 5,
        }
    }
}

/// Per-frame loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Target frames per second for loop pacing
    pub frame_rate: f64,
    /// Identical feedback phrases are not repeated within this window
    pub feedback_cooldown_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            feedback_cooldown_ms: 1_500,
        }
    }
}

impl RuntimeConfig {
    /// Seconds per frame, falling back to 30 FPS on a non-positive rate
    pub fn frame_period_secs(&self) -> f64 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / 30.0
        }
    }
}

/// Default file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub beat_record: PathBuf,
    pub tracking_log: PathBuf,
    pub song_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            beat_record: PathBuf::from("beat_data.json"),
            tracking_log: PathBuf::from("dance_tracking_data.csv"),
            song_dir: PathBuf::from("songfolder"),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// Missing or unparsable files fall back to [`AppConfig::default`] with a
    /// logged warning. Missing sections fall back individually.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/dance_config.json")
    }
}
