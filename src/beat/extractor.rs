// BeatExtractor - offline tempo and beat timestamps from an audio file
//
// Pipeline: decode (mono) -> resample -> onset envelope -> tempo -> DP beat
// tracking -> frame * hop / sample_rate seconds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::onset::{normalize_std, OnsetEnvelope};
use super::tempo::estimate_tempo;
use super::tracker::BeatTracker;
use crate::audio::{read_wav, DecodedAudio};
use crate::config::BeatExtractionConfig;
use crate::error::BeatError;

/// Tempo estimate plus beat timestamps in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatAnalysis {
    pub tempo: f64,
    pub beats: Vec<f64>,
}

pub struct BeatExtractor {
    config: BeatExtractionConfig,
    onset: OnsetEnvelope,
}

impl BeatExtractor {
    pub fn new(config: BeatExtractionConfig) -> Self {
        let onset = OnsetEnvelope::new(config.window_size, config.hop_size);
        Self { config, onset }
    }

    /// Decode `path` and extract its beats
    pub fn extract(&self, path: &Path) -> Result<BeatAnalysis, BeatError> {
        tracing::info!("[BeatExtractor] Loading {}", path.display());
        let audio = read_wav(path)?;
        tracing::debug!(
            "[BeatExtractor] Decoded {:.2}s at {} Hz",
            audio.duration_secs(),
            audio.sample_rate
        );
        self.analyze(&audio)
    }

    /// Extract beats from already decoded audio
    pub fn analyze(&self, audio: &DecodedAudio) -> Result<BeatAnalysis, BeatError> {
        let target_rate = if self.config.sample_rate > 0 {
            self.config.sample_rate
        } else {
            audio.sample_rate
        };
        if target_rate == 0 {
            return Err(BeatError::NoBeatsDetected {
                reason: "audio has a zero sample rate".to_string(),
            });
        }

        let audio = audio.resampled(target_rate);
        if audio.samples.len() < self.onset.window_size() {
            return Err(BeatError::NoBeatsDetected {
                reason: format!(
                    "audio too short: {} samples, need at least {}",
                    audio.samples.len(),
                    self.onset.window_size()
                ),
            });
        }

        let envelope = self.onset.compute(&audio.samples);
        let normalized = normalize_std(&envelope).ok_or_else(|| BeatError::NoBeatsDetected {
            reason: "silent or flat audio".to_string(),
        })?;

        let frame_rate = target_rate as f64 / self.onset.hop_size() as f64;
        let tempo = estimate_tempo(&envelope, frame_rate, &self.config).ok_or_else(|| {
            BeatError::NoBeatsDetected {
                reason: "no periodic onset pattern".to_string(),
            }
        })?;

        let period = 60.0 * frame_rate / tempo;
        let frames = BeatTracker::new(self.config.tightness as f64).track(&normalized, period);
        if frames.is_empty() {
            return Err(BeatError::NoBeatsDetected {
                reason: format!("beat tracker found no beats at {:.1} BPM", tempo),
            });
        }

        let hop = self.onset.hop_size() as f64;
        let beats: Vec<f64> = frames
            .into_iter()
            .map(|frame| frame as f64 * hop / target_rate as f64)
            .collect();

        tracing::info!(
            "[BeatExtractor] Tempo {:.1} BPM, {} beats over {:.2}s",
            tempo,
            beats.len(),
            audio.duration_secs()
        );

        Ok(BeatAnalysis { tempo, beats })
    }
}

impl Default for BeatExtractor {
    fn default() -> Self {
        Self::new(BeatExtractionConfig::default())
    }
}
