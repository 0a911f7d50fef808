// Tempo estimation by weighted autocorrelation of the onset envelope
//
// 1. Smooth the envelope (gaussian, one frame deviation), remove its mean and
//    autocorrelate for lags covering [min_bpm, max_bpm]
// 2. Weight each lag with a log2-gaussian prior centred on start_bpm
//    (one octave standard deviation)
// 3. Take the best weighted lag and refine it with parabolic interpolation

use super::onset::{convolve_same, gaussian_kernel, normalize_std};
use crate::config::BeatExtractionConfig;

/// Octave spread of the tempo prior
const PRIOR_STD_OCTAVES: f64 = 1.0;

/// Envelope smoothing before autocorrelation, in frames
const SMOOTHING_SIGMA_FRAMES: f32 = 1.0;

/// Convert a BPM value to an envelope lag in frames
pub fn bpm_to_lag(bpm: f64, frame_rate: f64) -> f64 {
    60.0 * frame_rate / bpm
}

/// Prior weight of `bpm` relative to `start_bpm`
pub fn tempo_prior(bpm: f64, start_bpm: f64) -> f64 {
    let octaves = (bpm / start_bpm).log2() / PRIOR_STD_OCTAVES;
    (-0.5 * octaves * octaves).exp()
}

/// Raw autocorrelation of the mean-removed envelope up to `max_lag`
pub fn autocorrelate(envelope: &[f32], max_lag: usize) -> Vec<f64> {
    if envelope.is_empty() {
        return Vec::new();
    }
    let mean = envelope.iter().map(|&v| v as f64).sum::<f64>() / envelope.len() as f64;
    let centred: Vec<f64> = envelope.iter().map(|&v| v as f64 - mean).collect();

    (0..=max_lag.min(centred.len() - 1))
        .map(|lag| {
            centred[..centred.len() - lag]
                .iter()
                .zip(&centred[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Estimate the dominant tempo in BPM, `None` when nothing periodic is found
pub fn estimate_tempo(
    envelope: &[f32],
    frame_rate: f64,
    config: &BeatExtractionConfig,
) -> Option<f64> {
    let min_bpm = config.min_bpm.max(1.0) as f64;
    let max_bpm = (config.max_bpm as f64).max(min_bpm + 1.0);
    let start_bpm = (config.start_bpm as f64).clamp(min_bpm, max_bpm);

    let min_lag = bpm_to_lag(max_bpm, frame_rate).floor().max(1.0) as usize;
    let max_lag = bpm_to_lag(min_bpm, frame_rate).ceil() as usize;
    if envelope.len() <= min_lag + 1 || normalize_std(envelope).is_none() {
        return None;
    }

    let smoothed = convolve_same(envelope, &gaussian_kernel(3, SMOOTHING_SIGMA_FRAMES));
    let acf = autocorrelate(&smoothed, max_lag + 1);
    let upper = max_lag.min(acf.len().saturating_sub(2));
    if upper < min_lag {
        return None;
    }

    let weighted = |lag: usize| -> f64 {
        let bpm = 60.0 * frame_rate / lag as f64;
        acf[lag] * tempo_prior(bpm, start_bpm)
    };

    let (best_lag, best_score) = (min_lag..=upper)
        .map(|lag| (lag, weighted(lag)))
        .fold((0usize, 0.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });

    if best_lag == 0 || best_score <= 0.0 {
        return None;
    }

    let refined = if best_lag > min_lag && best_lag < upper {
        let (a, b, c) = (weighted(best_lag - 1), best_score, weighted(best_lag + 1));
        let denom = a - 2.0 * b + c;
        if denom.abs() > f64::EPSILON {
            best_lag as f64 + (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
        } else {
            best_lag as f64
        }
    } else {
        best_lag as f64
    };

    let bpm = 60.0 * frame_rate / refined;
    bpm.is_finite().then(|| bpm.clamp(min_bpm, max_bpm))
}
