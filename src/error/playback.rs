// Music playback error types
//
// Playback failures are never fatal: the tracker logs them and keeps running
// without audio.

use crate::error::ErrorCode;
use log::warn;
use std::fmt;

/// Playback error code constants
///
/// Error code range: 5001-5004
pub struct PlaybackErrorCodes {}

impl PlaybackErrorCodes {
    /// No usable output device
    pub const DEVICE_UNAVAILABLE: i32 = 5001;

    /// Output stream could not be built or started
    pub const STREAM_OPEN_FAILED: i32 = 5002;

    /// Song could not be decoded for playback
    pub const DECODE_FAILED: i32 = 5003;

    /// Stop requested on a player that already finished
    pub const ALREADY_STOPPED: i32 = 5004;
}

/// Log a playback error as a non-fatal notice
pub fn log_playback_error(err: &PlaybackError, context: &str) {
    warn!(
        "Playback notice in {}: code={}, component=MusicPlayer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Music playback errors
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// No default output device, or playback compiled out
    DeviceUnavailable { reason: String },

    /// Output stream could not be opened
    StreamOpenFailed { reason: String },

    /// Song file could not be decoded
    DecodeFailed { reason: String },

    /// Player already finished or was stopped
    AlreadyStopped,
}

impl ErrorCode for PlaybackError {
    fn code(&self) -> i32 {
        match self {
            PlaybackError::DeviceUnavailable { .. } => PlaybackErrorCodes::DEVICE_UNAVAILABLE,
            PlaybackError::StreamOpenFailed { .. } => PlaybackErrorCodes::STREAM_OPEN_FAILED,
            PlaybackError::DecodeFailed { .. } => PlaybackErrorCodes::DECODE_FAILED,
            PlaybackError::AlreadyStopped => PlaybackErrorCodes::ALREADY_STOPPED,
        }
    }

    fn message(&self) -> String {
        match self {
            PlaybackError::DeviceUnavailable { reason } => {
                format!("Audio output unavailable: {}", reason)
            }
            PlaybackError::StreamOpenFailed { reason } => {
                format!("Failed to open output stream: {}", reason)
            }
            PlaybackError::DecodeFailed { reason } => format!("Failed to decode song: {}", reason),
            PlaybackError::AlreadyStopped => "Playback already stopped".to_string(),
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaybackError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaybackError {}
