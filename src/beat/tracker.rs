// Dynamic-programming beat tracker (Ellis 2007)
//
// Given a normalized onset envelope and a target period P (frames):
// 1. Local score: envelope smoothed by a gaussian of width P/32 over [-P, P]
// 2. cumscore[i] = local[i] + max_j (cumscore[j] - tightness * ln²((i-j)/P))
//    for j in [i - 2P, i - P/2]; the best j becomes backlink[i]
// 3. Last beat: the latest local maximum of cumscore reaching half the
//    median of all local maxima
// 4. Follow backlinks to the start, then trim weak leading/trailing beats
//
// Backlinks always step back at least one frame, so the resulting beat frames
// are strictly increasing.

use super::onset::{convolve_same, gaussian_kernel};

/// Envelope values below this share of the maximum do not start a beat chain
const FIRST_BEAT_FLOOR: f32 = 0.01;

/// Beat-frame tracker for a fixed tempo
#[derive(Debug, Clone, Copy)]
pub struct BeatTracker {
    tightness: f64,
}

impl BeatTracker {
    pub fn new(tightness: f64) -> Self {
        Self {
            tightness: tightness.max(0.0),
        }
    }

    /// Beat frame indices for `envelope` at `period` frames per beat
    pub fn track(&self, envelope: &[f32], period: f64) -> Vec<usize> {
        if envelope.is_empty() || !period.is_finite() || period < 1.0 {
            return Vec::new();
        }

        let local = local_score(envelope, period);
        let (cumscore, backlink) = self.accumulate(&local, period);

        let Some(last) = last_beat(&cumscore) else {
            return Vec::new();
        };

        let mut beats = vec![last];
        let mut cursor = last;
        while let Some(prev) = backlink[cursor] {
            beats.push(prev);
            cursor = prev;
        }
        beats.reverse();

        trim_weak_beats(&local, beats)
    }

    fn accumulate(&self, local: &[f32], period: f64) -> (Vec<f64>, Vec<Option<usize>>) {
        let n = local.len();
        let max_back = (2.0 * period).round() as usize;
        let min_back = ((period / 2.0).round() as usize).max(1);
        let floor = FIRST_BEAT_FLOOR * local.iter().copied().fold(0.0f32, f32::max);

        let mut cumscore = vec![0.0f64; n];
        let mut backlink: Vec<Option<usize>> = vec![None; n];
        let mut chain_started = false;

        for i in 0..n {
            let mut best: Option<(usize, f64)> = None;
            if i >= min_back {
                for j in i.saturating_sub(max_back)..=i - min_back {
                    let ratio = (i - j) as f64 / period;
                    let score = cumscore[j] - self.tightness * ratio.ln().powi(2);
                    if best.map_or(true, |(_, b)| score > b) {
                        best = Some((j, score));
                    }
                }
            }

            cumscore[i] = local[i] as f64 + best.map_or(0.0, |(_, score)| score);

            if !chain_started && local[i] < floor {
                backlink[i] = None;
            } else {
                chain_started = true;
                backlink[i] = best.map(|(j, _)| j);
            }
        }

        (cumscore, backlink)
    }
}

/// Onset envelope smoothed around each beat candidate
fn local_score(envelope: &[f32], period: f64) -> Vec<f32> {
    let radius = period.round() as usize;
    convolve_same(envelope, &gaussian_kernel(radius, (period / 32.0) as f32))
}

fn last_beat(cumscore: &[f64]) -> Option<usize> {
    let n = cumscore.len();
    let maxima: Vec<usize> = (0..n)
        .filter(|&i| {
            let above_prev = i == 0 || cumscore[i] > cumscore[i - 1];
            let above_next = i + 1 == n || cumscore[i] >= cumscore[i + 1];
            i > 0 && above_prev && above_next
        })
        .collect();

    if maxima.is_empty() {
        return None;
    }

    let mut values: Vec<f64> = maxima.iter().map(|&i| cumscore[i]).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    let threshold = 0.5 * median;

    maxima.into_iter().rev().find(|&i| cumscore[i] >= threshold)
}

fn trim_weak_beats(local: &[f32], beats: Vec<usize>) -> Vec<usize> {
    if beats.is_empty() {
        return beats;
    }
    let rms = (beats.iter().map(|&b| (local[b] as f64).powi(2)).sum::<f64>()
        / beats.len() as f64)
        .sqrt();
    let threshold = 0.5 * rms;

    let start = beats
        .iter()
        .position(|&b| local[b] as f64 >= threshold)
        .unwrap_or(beats.len());
    let end = beats
        .iter()
        .rposition(|&b| local[b] as f64 >= threshold)
        .map_or(start, |i| i + 1);

    beats[start..end.max(start)].to_vec()
}
