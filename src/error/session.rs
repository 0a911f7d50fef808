// Practice session error types

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Session error code constants
///
/// Error code range: 4001-4005
pub struct SessionErrorCodes {}

impl SessionErrorCodes {
    /// Style name does not match any configured style
    pub const UNKNOWN_STYLE: i32 = 4001;

    /// Landmark frame has the wrong shape
    pub const INVALID_FRAME: i32 = 4002;

    /// Landmark source could not be opened or read
    pub const FRAME_SOURCE_FAILED: i32 = 4003;

    /// Tracking log could not be written
    pub const TRACKING_LOG_FAILED: i32 = 4004;

    /// Session export could not be written
    pub const EXPORT_FAILED: i32 = 4005;
}

/// Log a session error with structured context
pub fn log_session_error(err: &SessionError, context: &str) {
    error!(
        "Session error in {}: code={}, component=PracticeSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while running a practice session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Unknown style identifier
    UnknownStyle { name: String },

    /// Frame does not carry exactly the expected landmark count
    InvalidFrame { expected: usize, actual: usize },

    /// Landmark source failure (open, read or parse)
    FrameSourceFailed { reason: String },

    /// Tracking log write failure
    TrackingLogFailed { reason: String },

    /// Session export write failure
    ExportFailed { reason: String },
}

impl ErrorCode for SessionError {
    fn code(&self) -> i32 {
        match self {
            SessionError::UnknownStyle { .. } => SessionErrorCodes::UNKNOWN_STYLE,
            SessionError::InvalidFrame { .. } => SessionErrorCodes::INVALID_FRAME,
            SessionError::FrameSourceFailed { .. } => SessionErrorCodes::FRAME_SOURCE_FAILED,
            SessionError::TrackingLogFailed { .. } => SessionErrorCodes::TRACKING_LOG_FAILED,
            SessionError::ExportFailed { .. } => SessionErrorCodes::EXPORT_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            SessionError::UnknownStyle { name } => format!("Unknown dance style: {}", name),
            SessionError::InvalidFrame { expected, actual } => format!(
                "Invalid landmark frame: expected {} landmarks, got {}",
                expected, actual
            ),
            SessionError::FrameSourceFailed { reason } => {
                format!("Landmark source failed: {}", reason)
            }
            SessionError::TrackingLogFailed { reason } => {
                format!("Tracking log write failed: {}", reason)
            }
            SessionError::ExportFailed { reason } => format!("Session export failed: {}", reason),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<csv::Error> for SessionError {
    fn from(err: csv::Error) -> Self {
        SessionError::TrackingLogFailed {
            reason: err.to_string(),
        }
    }
}
