// IO module - landmark sources and the files a practice session produces
//
// - source: LandmarkSource trait, Capture, in-memory source
// - replay: JSON Lines landmark files (read and write)
// - demo: seeded synthetic landmark streams and click tracks
// - tracking_log: per-frame landmark CSV
// - session_export: per-export session summary CSV

pub mod demo;
pub mod replay;
pub mod session_export;
pub mod source;
pub mod tracking_log;

pub use demo::{write_click_track, DemoConfig, DemoGenerator, DemoSource};
pub use replay::{LandmarkRecord, ReplaySource, ReplayWriter};
pub use session_export::{append_session_export, default_export_file_name, SessionExportRow};
pub use source::{Capture, LandmarkSource, MemorySource};
pub use tracking_log::{tracking_log_header, TrackingLog};
