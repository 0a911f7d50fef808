// MusicPlayer - fire-and-forget song playback on a background thread
//
// The song is decoded up front on the caller's thread. A detached thread then
// owns the cpal output stream (streams are not Send on every host), reports
// whether the stream started over a rendezvous channel, and keeps the stream
// alive until the song ends or the stop flag is raised.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::wav::read_wav;
use crate::error::{ErrorCode, PlaybackError};

/// Control handle for a playing song
///
/// Dropping the handle raises the stop flag; the playback thread notices it
/// on its next poll and releases the output device.
#[derive(Debug)]
pub struct PlaybackHandle {
    stop: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    duration_secs: f64,
}

impl PlaybackHandle {
    fn new(duration_secs: f64) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
            duration_secs,
        }
    }

    /// True until the song ends or `stop` is called
    pub fn is_playing(&self) -> bool {
        !self.stop.load(Ordering::Acquire) && !self.finished.load(Ordering::Acquire)
    }

    pub fn stop(&self) -> Result<(), PlaybackError> {
        if !self.is_playing() {
            return Err(PlaybackError::AlreadyStopped);
        }
        self.stop.store(true, Ordering::Release);
        tracing::info!("[Playback] Stop requested");
        Ok(())
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// Starts songs on the default output device
#[derive(Debug, Default, Clone, Copy)]
pub struct MusicPlayer;

impl MusicPlayer {
    pub fn new() -> Self {
        Self
    }

    /// Decode `path` and start playing it; returns once the stream is running
    pub fn play(&self, path: &Path) -> Result<PlaybackHandle, PlaybackError> {
        let audio = read_wav(path).map_err(|err| PlaybackError::DecodeFailed {
            reason: err.message(),
        })?;

        let handle = PlaybackHandle::new(audio.duration_secs());
        backend::start(audio, Arc::clone(&handle.stop), Arc::clone(&handle.finished))?;

        tracing::info!(
            "[Playback] Playing {} ({:.1}s)",
            path.display(),
            handle.duration_secs
        );
        Ok(handle)
    }
}

#[cfg(all(feature = "playback", not(target_os = "android")))]
mod backend {
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    use crate::audio::DecodedAudio;
    use crate::error::PlaybackError;

    const POLL_INTERVAL: Duration = Duration::from_millis(20);

    pub(super) fn start(
        audio: DecodedAudio,
        stop: Arc<AtomicBool>,
        finished: Arc<AtomicBool>,
    ) -> Result<(), PlaybackError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), PlaybackError>>(1);

        thread::Builder::new()
            .name("music-playback".to_string())
            .spawn(move || {
                let stream = match open_stream(audio, Arc::clone(&finished)) {
                    Ok(stream) => stream,
                    Err(err) => {
                        finished.store(true, Ordering::Release);
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                while !stop.load(Ordering::Acquire) && !finished.load(Ordering::Acquire) {
                    thread::sleep(POLL_INTERVAL);
                }
                drop(stream);
                finished.store(true, Ordering::Release);
                tracing::debug!("[Playback] Output stream released");
            })
            .map_err(|e| PlaybackError::StreamOpenFailed {
                reason: format!("failed to spawn playback thread: {}", e),
            })?;

        ready_rx.recv().map_err(|_| PlaybackError::StreamOpenFailed {
            reason: "playback thread exited before starting".to_string(),
        })?
    }

    fn open_stream(
        audio: DecodedAudio,
        finished: Arc<AtomicBool>,
    ) -> Result<cpal::Stream, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlaybackError::DeviceUnavailable {
                reason: "No default output device found".to_string(),
            })?;

        let config = device
            .default_output_config()
            .map_err(|e| PlaybackError::StreamOpenFailed {
                reason: format!("Failed to get default output config: {:?}", e),
            })?;

        let stream_config: cpal::StreamConfig = config.clone().into();
        let channels_count = stream_config.channels as usize;
        let samples = Arc::new(audio.resampled(stream_config.sample_rate.0).samples);
        let position = Arc::new(AtomicUsize::new(0));

        let err_fn = |err| tracing::warn!("[Playback] Output stream error: {}", err);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut pos = position.load(Ordering::Relaxed);
                    for frame in data.chunks_mut(channels_count.max(1)) {
                        let sample = samples.get(pos).copied().unwrap_or(0.0);
                        frame.fill(sample);
                        pos += 1;
                    }
                    position.store(pos, Ordering::Relaxed);
                    if pos >= samples.len() {
                        finished.store(true, Ordering::Release);
                    }
                },
                err_fn,
                None,
            ),
            _ => {
                return Err(PlaybackError::StreamOpenFailed {
                    reason: "Only F32 sample format is currently supported for output".to_string(),
                })
            }
        }
        .map_err(|e| PlaybackError::StreamOpenFailed {
            reason: format!("{:?}", e),
        })?;

        stream.play().map_err(|e| PlaybackError::StreamOpenFailed {
            reason: format!("Output start failed: {}", e),
        })?;

        Ok(stream)
    }
}

#[cfg(not(all(feature = "playback", not(target_os = "android"))))]
mod backend {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use crate::audio::DecodedAudio;
    use crate::error::PlaybackError;

    pub(super) fn start(
        _audio: DecodedAudio,
        _stop: Arc<AtomicBool>,
        _finished: Arc<AtomicBool>,
    ) -> Result<(), PlaybackError> {
        Err(PlaybackError::DeviceUnavailable {
            reason: "built without the playback feature".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_song_is_decode_failure() {
        let err = MusicPlayer::new()
            .play(Path::new("/no/such/song.wav"))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::DecodeFailed { .. }));
        assert_eq!(err.code(), 5003);
    }

    #[test]
    fn test_stop_is_reported_once() {
        let handle = PlaybackHandle::new(3.0);
        assert!(handle.is_playing());

        handle.stop().unwrap();
        assert!(!handle.is_playing());
        assert_eq!(handle.stop(), Err(PlaybackError::AlreadyStopped));
    }

    #[test]
    fn test_finished_song_is_not_playing() {
        let handle = PlaybackHandle::new(1.0);
        handle.finished.store(true, Ordering::Release);
        assert!(!handle.is_playing());
    }

    #[test]
    fn test_drop_raises_stop_flag() {
        let handle = PlaybackHandle::new(1.0);
        let stop = Arc::clone(&handle.stop);
        drop(handle);
        assert!(stop.load(Ordering::Acquire));
    }
}
