// WAV decoding and resampling shared by beat extraction and playback
//
// Every decoder output is mono f32 in [-1, 1]. Multi-channel files are
// averaged per frame; integer formats are scaled by their bit depth.

use std::path::Path;

use crate::error::BeatError;

/// Mono PCM decoded from a file
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Linear-interpolated copy at `target_rate`
    pub fn resampled(&self, target_rate: u32) -> DecodedAudio {
        DecodedAudio {
            samples: resample_linear(&self.samples, self.sample_rate, target_rate),
            sample_rate: target_rate,
        }
    }
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav") || ext.eq_ignore_ascii_case("wave"))
        .unwrap_or(false)
}

fn map_hound_error(path: &Path, err: hound::Error) -> BeatError {
    match err {
        hound::Error::IoError(io) => BeatError::AudioOpenFailed {
            path: path.display().to_string(),
            reason: io.to_string(),
        },
        other => BeatError::UnsupportedFormat {
            path: path.display().to_string(),
            details: other.to_string(),
        },
    }
}

/// Decode a WAV file to mono f32
pub fn read_wav(path: &Path) -> Result<DecodedAudio, BeatError> {
    if !path.is_file() {
        return Err(BeatError::AudioOpenFailed {
            path: path.display().to_string(),
            reason: "file not found".to_string(),
        });
    }
    if !has_wav_extension(path) {
        return Err(BeatError::UnsupportedFormat {
            path: path.display().to_string(),
            details: "only PCM/float WAV audio can be decoded".to_string(),
        });
    }

    let mut reader = hound::WavReader::open(path).map_err(|err| map_hound_error(path, err))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(BeatError::UnsupportedFormat {
            path: path.display().to_string(),
            details: "zero channels".to_string(),
        });
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|err| map_hound_error(path, err))?,
        hound::SampleFormat::Int => match spec.bits_per_sample {
            8 | 16 | 24 | 32 => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(|err| map_hound_error(path, err))?
            }
            bits => {
                return Err(BeatError::UnsupportedFormat {
                    path: path.display().to_string(),
                    details: format!("unsupported bits_per_sample={}", bits),
                })
            }
        },
    };

    let channels = spec.channels as usize;
    let samples = if channels == 1 {
        samples
    } else {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Linear interpolation resampler
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == 0 || to_rate == 0 || from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).floor() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            let frac = (pos - idx as f64) as f32;
            let a = samples[idx.min(last)];
            let b = samples[(idx + 1).min(last)];
            (1.0 - frac) * a + frac * b
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn write_i16(path: &Path, channels: u16, frames: &[[i16; 2]]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for ch in 0..channels as usize {
                writer.write_sample(frame[ch]).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_stereo_is_mixed_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_i16(&path, 2, &[[16384, 0], [-16384, -16384]]);

        let audio = read_wav(&path).unwrap();
        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.samples.len(), 2);
        assert!((audio.samples[0] - 0.25).abs() < 1e-4);
        assert!((audio.samples[1] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_float_wav_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for v in [0.0f32, 0.5, -0.75] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let audio = read_wav(&path).unwrap();
        assert_eq!(audio.samples, vec![0.0, 0.5, -0.75]);
    }

    #[test]
    fn test_missing_file_is_open_failure() {
        let err = read_wav(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(matches!(err, BeatError::AudioOpenFailed { .. }));
    }

    #[test]
    fn test_other_codecs_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"ID3not really audio").unwrap();

        let err = read_wav(&path).unwrap_err();
        assert_eq!(err.code(), 3002);
    }

    #[test]
    fn test_garbage_wav_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"RIFF----WAVEjunkjunkjunk").unwrap();

        let err = read_wav(&path).unwrap_err();
        assert!(matches!(
            err,
            BeatError::UnsupportedFormat { .. } | BeatError::AudioOpenFailed { .. }
        ));
    }

    #[test]
    fn test_resample_halves_length() {
        let input: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let output = resample_linear(&input, 44100, 22050);

        assert_eq!(output.len(), 50);
        assert_eq!(output[0], 0.0);
        assert!((output[10] - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_resample_interpolates_upwards() {
        let output = resample_linear(&[0.0, 1.0], 1, 2);
        assert_eq!(output, vec![0.0, 0.5, 1.0, 1.0]);
    }
}
