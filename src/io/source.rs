// LandmarkSource - where per-frame landmarks come from
//
// The pose estimator itself is external. A source yields one capture per
// loop iteration: a detected pose, a frame without a pose, or end of stream.

use std::collections::VecDeque;

use crate::error::SessionError;
use crate::pose::PoseFrame;

/// One loop iteration worth of pose input
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    Pose(PoseFrame),
    /// Camera frame without a detected person
    NoPose,
    /// Source exhausted
    End,
}

impl Capture {
    pub fn into_pose(self) -> Option<PoseFrame> {
        match self {
            Capture::Pose(frame) => Some(frame),
            Capture::NoPose | Capture::End => None,
        }
    }
}

impl From<Option<PoseFrame>> for Capture {
    fn from(frame: Option<PoseFrame>) -> Self {
        frame.map_or(Capture::NoPose, Capture::Pose)
    }
}

pub trait LandmarkSource {
    /// Next capture. [`SessionError::InvalidFrame`] marks a single malformed
    /// frame; any other error means the source is unusable.
    fn next_capture(&mut self) -> Result<Capture, SessionError>;
}

/// Pre-built captures, mostly for tests and piping generated frames
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    frames: VecDeque<Option<PoseFrame>>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = Option<PoseFrame>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for MemorySource {
    fn next_capture(&mut self) -> Result<Capture, SessionError> {
        Ok(self.frames.pop_front().map_or(Capture::End, Capture::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_yields_in_order_then_ends() {
        let mut source = MemorySource::new([Some(PoseFrame::standing()), None]);

        assert_eq!(
            source.next_capture().unwrap(),
            Capture::Pose(PoseFrame::standing())
        );
        assert_eq!(source.next_capture().unwrap(), Capture::NoPose);
        assert_eq!(source.next_capture().unwrap(), Capture::End);
        assert_eq!(source.next_capture().unwrap(), Capture::End);
    }

    #[test]
    fn test_into_pose() {
        assert!(Capture::Pose(PoseFrame::standing()).into_pose().is_some());
        assert!(Capture::NoPose.into_pose().is_none());
        assert!(Capture::End.into_pose().is_none());
    }
}
