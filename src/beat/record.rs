//! Persisted beat record: `{style, song, tempo, beats}` as pretty-printed JSON.
//!
//! Written once by `analyze-beats`, read once at tracker start. A missing file
//! is reported as [`BeatError::RecordMissing`] so callers can print guidance.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::BeatAnalysis;
use crate::error::BeatError;
use crate::styles::InstructionStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatRecord {
    /// Instruction style id the song was analysed for
    pub style: String,
    /// Audio file path as given to the extractor
    pub song: String,
    pub tempo: f64,
    /// Beat timestamps in seconds, non-decreasing
    pub beats: Vec<f64>,
}

impl BeatRecord {
    pub fn new(style: InstructionStyle, song: &Path, analysis: BeatAnalysis) -> Self {
        Self {
            style: style.id().to_string(),
            song: song.display().to_string(),
            tempo: analysis.tempo,
            beats: analysis.beats,
        }
    }

    /// Parsed style, `None` when the record names an unknown style
    pub fn instruction_style(&self) -> Option<InstructionStyle> {
        self.style.parse().ok()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(format!("tempo must be finite and positive, got {}", self.tempo));
        }
        if let Some(bad) = self.beats.iter().find(|b| !b.is_finite() || **b < 0.0) {
            return Err(format!("beat timestamp out of range: {}", bad));
        }
        if let Some(pos) = self.beats.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(format!(
                "beats must be non-decreasing (index {}: {} > {})",
                pos,
                self.beats[pos],
                self.beats[pos + 1]
            ));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BeatError> {
        if !path.exists() {
            return Err(BeatError::RecordMissing {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|err| BeatError::RecordInvalid {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let record: BeatRecord =
            serde_json::from_str(&contents).map_err(|err| BeatError::RecordInvalid {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;

        record
            .validate()
            .map_err(|reason| BeatError::RecordInvalid {
                path: path.display().to_string(),
                reason,
            })?;

        Ok(record)
    }

    pub fn save(&self, path: &Path) -> Result<(), BeatError> {
        let write_failed = |reason: String| BeatError::RecordWriteFailed {
            path: path.display().to_string(),
            reason,
        };

        let json = serde_json::to_string_pretty(self).map_err(|err| write_failed(err.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| write_failed(err.to_string()))?;
        }
        fs::write(path, json).map_err(|err| write_failed(err.to_string()))?;

        tracing::info!(
            "[BeatExtractor] Saved {} beats to {}",
            self.beats.len(),
            path.display()
        );
        Ok(())
    }
}
