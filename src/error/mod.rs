// Error types for the dance trainer
//
// This module defines custom error types for beat extraction, practice sessions
// and music playback, providing structured error handling with numeric codes
// that the CLI and log output report alongside the message.

mod beat;
mod playback;
mod session;

pub use beat::{log_beat_error, BeatError, BeatErrorCodes};
pub use playback::{log_playback_error, PlaybackError, PlaybackErrorCodes};
pub use session::{log_session_error, SessionError, SessionErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent reporting at the CLI
/// boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
