// Beat extraction and beat record error types

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Beat error code constants
///
/// Error code range: 3001-3006
pub struct BeatErrorCodes {}

impl BeatErrorCodes {
    /// Audio file could not be opened or read
    pub const AUDIO_OPEN_FAILED: i32 = 3001;

    /// Audio codec or sample layout is not supported
    pub const UNSUPPORTED_FORMAT: i32 = 3002;

    /// Audio decoded fine but no beat could be tracked
    pub const NO_BEATS_DETECTED: i32 = 3003;

    /// Beat record file does not exist
    pub const RECORD_MISSING: i32 = 3004;

    /// Beat record exists but is not a valid record
    pub const RECORD_INVALID: i32 = 3005;

    /// Beat record could not be written
    pub const RECORD_WRITE_FAILED: i32 = 3006;
}

/// Log a beat error with structured context
pub fn log_beat_error(err: &BeatError, context: &str) {
    error!(
        "Beat error in {}: code={}, component=BeatExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the offline beat extraction step and by beat record IO
///
/// These are propagated to the caller without retry. A missing record is
/// fatal for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum BeatError {
    /// Audio source could not be opened (IO class)
    AudioOpenFailed { path: String, reason: String },

    /// Audio source uses a codec or sample format we cannot decode
    UnsupportedFormat { path: String, details: String },

    /// Too little audio or no rhythmic content
    NoBeatsDetected { reason: String },

    /// Beat record has not been produced yet
    RecordMissing { path: String },

    /// Beat record failed to parse or violates its invariants
    RecordInvalid { path: String, reason: String },

    /// Beat record could not be persisted
    RecordWriteFailed { path: String, reason: String },
}

impl ErrorCode for BeatError {
    fn code(&self) -> i32 {
        match self {
            BeatError::AudioOpenFailed { .. } => BeatErrorCodes::AUDIO_OPEN_FAILED,
            BeatError::UnsupportedFormat { .. } => BeatErrorCodes::UNSUPPORTED_FORMAT,
            BeatError::NoBeatsDetected { .. } => BeatErrorCodes::NO_BEATS_DETECTED,
            BeatError::RecordMissing { .. } => BeatErrorCodes::RECORD_MISSING,
            BeatError::RecordInvalid { .. } => BeatErrorCodes::RECORD_INVALID,
            BeatError::RecordWriteFailed { .. } => BeatErrorCodes::RECORD_WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            BeatError::AudioOpenFailed { path, reason } => {
                format!("Failed to open audio {}: {}", path, reason)
            }
            BeatError::UnsupportedFormat { path, details } => {
                format!("Unsupported audio format in {}: {}", path, details)
            }
            BeatError::NoBeatsDetected { reason } => format!("No beats detected: {}", reason),
            BeatError::RecordMissing { path } => format!(
                "No beat record found at {}. Run `dance_cli analyze-beats` first.",
                path
            ),
            BeatError::RecordInvalid { path, reason } => {
                format!("Invalid beat record {}: {}", path, reason)
            }
            BeatError::RecordWriteFailed { path, reason } => {
                format!("Failed to write beat record {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for BeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BeatError::{} (code {}): {}",
            self.variant_name(),
            self.code(),
            self.message()
        )
    }
}

impl BeatError {
    fn variant_name(&self) -> &'static str {
        match self {
            BeatError::AudioOpenFailed { .. } => "AudioOpenFailed",
            BeatError::UnsupportedFormat { .. } => "UnsupportedFormat",
            BeatError::NoBeatsDetected { .. } => "NoBeatsDetected",
            BeatError::RecordMissing { .. } => "RecordMissing",
            BeatError::RecordInvalid { .. } => "RecordInvalid",
            BeatError::RecordWriteFailed { .. } => "RecordWriteFailed",
        }
    }
}

impl std::error::Error for BeatError {}
