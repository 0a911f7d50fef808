// OnsetEnvelope - offline spectral flux onset strength
//
// Algorithm:
// 1. Pad the signal by window/2 zeros on both sides so frame t is centred on
//    sample t * hop
// 2. Hann-window each frame and compute the FFT magnitude spectrum
// 3. Compress: log(1 + |X[k]|)
// 4. Flux: SF_t = Σ max(0, S_t[k] - S_(t-1)[k]); the first frame is 0
//
// Unlike a streaming detector no thresholding or peak picking happens here;
// the beat tracker consumes the whole envelope.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Spectral flux onset strength for a whole signal
pub struct OnsetEnvelope {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    window_size: usize,
    hop_size: usize,
}

impl OnsetEnvelope {
    pub fn new(window_size: usize, hop_size: usize) -> Self {
        let window_size = window_size.max(2);
        let hop_size = hop_size.max(1);

        // Pre-compute Hann window to reduce spectral leakage
        let window = (0..window_size)
            .map(|i| {
                0.5 * (1.0
                    - ((2.0 * std::f32::consts::PI * i as f32) / (window_size as f32 - 1.0)).cos())
            })
            .collect();

        let fft = FftPlanner::new().plan_fft_forward(window_size);

        Self {
            fft,
            window,
            window_size,
            hop_size,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of envelope frames produced for `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            1 + len / self.hop_size
        }
    }

    /// Onset strength per hop, one value per frame
    pub fn compute(&self, samples: &[f32]) -> Vec<f32> {
        let frames = self.frame_count(samples.len());
        if frames == 0 {
            return Vec::new();
        }

        let pad = self.window_size / 2;
        let mut padded = vec![0.0f32; pad];
        padded.extend_from_slice(samples);
        padded.resize(pad + samples.len() + pad + self.window_size, 0.0);

        let mut envelope = Vec::with_capacity(frames);
        let mut prev_spectrum: Option<Vec<f32>> = None;

        for frame in 0..frames {
            let start = frame * self.hop_size;
            let spectrum = self.log_magnitude_spectrum(&padded[start..start + self.window_size]);
            let flux = prev_spectrum
                .as_deref()
                .map(|prev| spectral_flux(prev, &spectrum))
                .unwrap_or(0.0);
            envelope.push(flux);
            prev_spectrum = Some(spectrum);
        }

        envelope
    }

    /// Log-compressed magnitude spectrum (size = window_size / 2 + 1)
    fn log_magnitude_spectrum(&self, audio: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = audio
            .iter()
            .zip(self.window.iter())
            .map(|(sample, window_val)| Complex::new(sample * window_val, 0.0))
            .collect();

        self.fft.process(&mut buffer);

        buffer[..self.window_size / 2 + 1]
            .iter()
            .map(|c| c.norm().ln_1p())
            .collect()
    }
}

/// Sum of positive spectral differences between consecutive frames
///
/// SF(t) = Σ max(0, |X_t[k]| - |X_(t-1)[k]|)
pub fn spectral_flux(previous: &[f32], current: &[f32]) -> f32 {
    current
        .iter()
        .zip(previous.iter())
        .map(|(curr, prev)| (curr - prev).max(0.0))
        .sum()
}

/// Symmetric gaussian kernel of `2 * radius + 1` taps, peak 1
pub fn gaussian_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    let sigma = sigma.max(f32::EPSILON);
    (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect()
}

/// Convolution with a centred odd-length kernel, output length = input length
pub fn convolve_same(signal: &[f32], kernel: &[f32]) -> Vec<f32> {
    let half = kernel.len() / 2;
    (0..signal.len())
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .filter_map(|(k, &w)| {
                    (i + k)
                        .checked_sub(half)
                        .and_then(|j| signal.get(j))
                        .map(|&v| v * w)
                })
                .sum()
        })
        .collect()
}

/// Divide by the sample standard deviation; returns `None` for a flat envelope
pub fn normalize_std(envelope: &[f32]) -> Option<Vec<f32>> {
    if envelope.len() < 2 {
        return None;
    }
    let n = envelope.len() as f64;
    let mean = envelope.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = envelope
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / (n - 1.0);
    let std = variance.sqrt();
    if !std.is_finite() || std <= f64::EPSILON {
        return None;
    }
    Some(envelope.iter().map(|&v| (v as f64 / std) as f32).collect())
}
