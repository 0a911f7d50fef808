// TrackingLog - per-frame landmark CSV
//
// Header: frame, x_0, y_0, z_0, visibility_0, ..., visibility_32
// Rows without a pose keep the frame number and leave all 132 landmark
// fields empty.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SessionError;
use crate::pose::{PoseFrame, LANDMARK_COUNT};

const FIELDS_PER_LANDMARK: usize = 4;

pub fn tracking_log_header() -> Vec<String> {
    let mut header = Vec::with_capacity(1 + LANDMARK_COUNT * FIELDS_PER_LANDMARK);
    header.push("frame".to_string());
    for i in 0..LANDMARK_COUNT {
        header.push(format!("x_{}", i));
        header.push(format!("y_{}", i));
        header.push(format!("z_{}", i));
        header.push(format!("visibility_{}", i));
    }
    header
}

pub struct TrackingLog<W: Write> {
    writer: csv::Writer<W>,
    rows_written: u64,
}

impl TrackingLog<File> {
    /// Create (truncate) the log file and write the header
    pub fn create(path: &Path) -> Result<Self, SessionError> {
        let file = File::create(path).map_err(|err| SessionError::TrackingLogFailed {
            reason: format!("failed to create {}: {}", path.display(), err),
        })?;
        tracing::info!("[Tracker] Logging landmarks to {}", path.display());
        Self::new(file)
    }
}

impl<W: Write> TrackingLog<W> {
    pub fn new(inner: W) -> Result<Self, SessionError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(false)
            .from_writer(inner);
        writer.write_record(tracking_log_header())?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Append one row for `frame_number`
    pub fn record(&mut self, frame_number: u64, frame: Option<&PoseFrame>) -> Result<(), SessionError> {
        let mut row = Vec::with_capacity(1 + LANDMARK_COUNT * FIELDS_PER_LANDMARK);
        row.push(frame_number.to_string());
        match frame {
            Some(frame) => {
                for lm in frame.landmarks() {
                    row.push(lm.x.to_string());
                    row.push(lm.y.to_string());
                    row.push(lm.z.to_string());
                    row.push(lm.visibility.to_string());
                }
            }
            None => row.resize(1 + LANDMARK_COUNT * FIELDS_PER_LANDMARK, String::new()),
        }
        self.writer.write_record(&row)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<(), SessionError> {
        self.writer.flush().map_err(|err| SessionError::TrackingLogFailed {
            reason: err.to_string(),
        })
    }

    pub fn into_inner(self) -> Result<W, SessionError> {
        self.writer
            .into_inner()
            .map_err(|err| SessionError::TrackingLogFailed {
                reason: err.to_string(),
            })
    }
}
