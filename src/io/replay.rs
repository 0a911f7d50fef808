//! JSON Lines landmark replay files.
//!
//! One object per line: `{"landmarks": [[x, y, z, visibility], ...]}` with
//! exactly 33 entries, or `{"landmarks": null}` for a frame without a pose.
//! Blank lines are ignored.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::source::{Capture, LandmarkSource};
use crate::error::SessionError;
use crate::pose::{Landmark, PoseFrame};

/// Serialized form of one captured frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub landmarks: Option<Vec<Landmark>>,
}

impl From<Option<&PoseFrame>> for LandmarkRecord {
    fn from(frame: Option<&PoseFrame>) -> Self {
        Self {
            landmarks: frame.map(|f| f.landmarks().to_vec()),
        }
    }
}

/// Reads captures back from a replay file
pub struct ReplaySource<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        let file = File::open(path).map_err(|err| SessionError::FrameSourceFailed {
            reason: format!("failed to open {}: {}", path.display(), err),
        })?;
        tracing::info!("[Replay] Reading landmarks from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_capture(&mut self) -> Result<Capture, SessionError> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line.map_err(|err| SessionError::FrameSourceFailed {
                reason: format!("read error at line {}: {}", self.line_no, err),
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let record: LandmarkRecord =
                serde_json::from_str(&line).map_err(|err| SessionError::FrameSourceFailed {
                    reason: format!("line {}: {}", self.line_no, err),
                })?;

            return match record.landmarks {
                Some(landmarks) => PoseFrame::new(landmarks).map(Capture::Pose),
                None => Ok(Capture::NoPose),
            };
        }
        Ok(Capture::End)
    }
}

/// Writes captures as a replay file
pub struct ReplayWriter<W: Write> {
    writer: W,
    frames_written: usize,
}

impl ReplayWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SessionError> {
        let file = File::create(path).map_err(|err| SessionError::FrameSourceFailed {
            reason: format!("failed to create {}: {}", path.display(), err),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReplayWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    pub fn write(&mut self, frame: Option<&PoseFrame>) -> Result<(), SessionError> {
        let write_failed = |reason: String| SessionError::FrameSourceFailed { reason };

        serde_json::to_writer(&mut self.writer, &LandmarkRecord::from(frame))
            .map_err(|err| write_failed(err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| write_failed(err.to_string()))?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn finish(mut self) -> Result<W, SessionError> {
        self.writer
            .flush()
            .map_err(|err| SessionError::FrameSourceFailed {
                reason: err.to_string(),
            })?;
        Ok(self.writer)
    }
}
