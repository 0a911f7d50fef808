// Demo data - synthetic landmark streams and click tracks
//
// Landmark frames start from the standing reference pose. Each landmark i at
// frame n is offset by
//   dx = A * sin(0.1 n + 0.2 i),  dy = A * cos(0.1 n + 0.3 i)
// plus uniform noise, with x/y clamped to [0, 1]. A seeded StdRng keeps the
// stream reproducible. Frames can be dropped at random to simulate the pose
// estimator losing the dancer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use super::source::{Capture, LandmarkSource};
use crate::error::SessionError;
use crate::pose::{Landmark, PoseFrame};

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub seed: u64,
    /// Sinusoidal sway amplitude in normalized image units
    pub amplitude: f32,
    /// Uniform noise half-width added to x and y
    pub jitter: f32,
    /// Probability that a frame has no pose
    pub dropout: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            amplitude: 0.1,
            jitter: 0.02,
            dropout: 0.0,
        }
    }
}

pub struct DemoGenerator {
    config: DemoConfig,
    rng: StdRng,
    frame: u64,
    base: PoseFrame,
}

impl DemoGenerator {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            frame: 0,
            base: PoseFrame::standing(),
        }
    }

    /// Next synthetic frame, `None` when this frame is dropped
    pub fn next_frame(&mut self) -> Option<PoseFrame> {
        let n = self.frame as f32;
        self.frame += 1;

        if self.config.dropout > 0.0 && self.rng.gen_bool(self.config.dropout.clamp(0.0, 1.0)) {
            return None;
        }

        let amplitude = self.config.amplitude;
        let jitter = self.config.jitter.abs();
        let landmarks = self
            .base
            .landmarks()
            .iter()
            .enumerate()
            .map(|(i, lm)| {
                let i = i as f32;
                let noise_x = if jitter > 0.0 { self.rng.gen_range(-jitter..=jitter) } else { 0.0 };
                let noise_y = if jitter > 0.0 { self.rng.gen_range(-jitter..=jitter) } else { 0.0 };
                let x = lm.x + amplitude * (0.1 * n + 0.2 * i).sin() + noise_x;
                let y = lm.y + amplitude * (0.1 * n + 0.3 * i).cos() + noise_y;
                let z = self.rng.gen_range(-0.1..=0.1f32);
                let visibility = self.rng.gen_range(0.9..=1.0f32);
                Landmark::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0), z, visibility)
            })
            .collect();

        PoseFrame::new(landmarks).ok()
    }
}

/// Finite demo stream usable wherever a landmark source is expected
pub struct DemoSource {
    generator: DemoGenerator,
    remaining: usize,
}

impl DemoSource {
    pub fn new(config: DemoConfig, frames: usize) -> Self {
        Self {
            generator: DemoGenerator::new(config),
            remaining: frames,
        }
    }
}

impl LandmarkSource for DemoSource {
    fn next_capture(&mut self) -> Result<Capture, SessionError> {
        if self.remaining == 0 {
            return Ok(Capture::End);
        }
        self.remaining -= 1;
        Ok(Capture::from(self.generator.next_frame()))
    }
}

/// Write a mono 16-bit click track: decaying noise bursts on every beat,
/// starting a quarter second in
pub fn write_click_track(
    path: &Path,
    bpm: f64,
    duration_secs: f64,
    sample_rate: u32,
    seed: u64,
) -> Result<(), hound::Error> {
    const BURST_SECS: f64 = 0.03;
    const FIRST_BEAT_SECS: f64 = 0.25;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let total = (duration_secs * sample_rate as f64) as usize;
    let mut samples = vec![0.0f32; total];

    if bpm > 0.0 {
        let period = 60.0 / bpm;
        let burst_len = (BURST_SECS * sample_rate as f64) as usize;
        let mut beat = FIRST_BEAT_SECS;
        while beat < duration_secs {
            let start = (beat * sample_rate as f64) as usize;
            for k in 0..burst_len {
                if let Some(sample) = samples.get_mut(start + k) {
                    let decay = (-(k as f32) / (burst_len as f32 / 5.0)).exp();
                    *sample = 0.8 * decay * rng.gen_range(-1.0..=1.0f32);
                }
            }
            beat += period;
        }
    }

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample((sample * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}
