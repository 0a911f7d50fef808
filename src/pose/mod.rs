//! Pose data model shared by the classifier, movement tracker and logs.
//!
//! A [`PoseFrame`] is exactly [`LANDMARK_COUNT`] landmarks in the MediaPipe
//! Pose index scheme. Every geometric rule addresses landmarks through
//! [`Joint`] so the index scheme is defined in one place.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::SessionError;

pub mod classifier;
pub mod geometry;

pub use classifier::{Classification, PoseClassifier, PoseLabel};
pub use geometry::{calculate_angle, displacement};

/// Landmarks per frame produced by the pose estimator
pub const LANDMARK_COUNT: usize = 33;

/// A single estimated body keypoint
///
/// `x`/`y` are normalized image coordinates (y grows downward), `z` is
/// relative depth and `visibility` is the estimator's confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }
}

impl From<[f32; 4]> for Landmark {
    fn from([x, y, z, visibility]: [f32; 4]) -> Self {
        Self::new(x, y, z, visibility)
    }
}

impl From<Landmark> for [f32; 4] {
    fn from(lm: Landmark) -> Self {
        [lm.x, lm.y, lm.z, lm.visibility]
    }
}

/// Named body joints of the MediaPipe Pose index scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl Joint {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Joints whose displacement contributes to movement energy
pub const KEY_POINTS: [Joint; 12] = [
    Joint::LeftShoulder,
    Joint::RightShoulder,
    Joint::LeftElbow,
    Joint::RightElbow,
    Joint::LeftWrist,
    Joint::RightWrist,
    Joint::LeftHip,
    Joint::RightHip,
    Joint::LeftKnee,
    Joint::RightKnee,
    Joint::LeftAnkle,
    Joint::RightAnkle,
];

/// One frame of landmarks; immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Build a frame, rejecting anything but [`LANDMARK_COUNT`] landmarks
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, SessionError> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(SessionError::InvalidFrame {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    /// Frame with every landmark at the image centre, fully visible
    pub fn centered() -> Self {
        Self {
            landmarks: vec![Landmark::new(0.5, 0.5, 0.0, 1.0); LANDMARK_COUNT],
        }
    }

    /// Reference upright pose: arms hanging, legs straight, feet under hips
    ///
    /// Matches none of the step rules. Used as the base of synthetic
    /// landmark streams.
    pub fn standing() -> Self {
        let mut landmarks = vec![Landmark::new(0.5, 0.45, 0.0, 1.0); LANDMARK_COUNT];
        let joints = [
            (Joint::Nose, 0.50, 0.15),
            (Joint::LeftShoulder, 0.60, 0.30),
            (Joint::RightShoulder, 0.40, 0.30),
            (Joint::LeftElbow, 0.62, 0.40),
            (Joint::RightElbow, 0.38, 0.40),
            (Joint::LeftWrist, 0.63, 0.50),
            (Joint::RightWrist, 0.37, 0.50),
            (Joint::LeftHip, 0.55, 0.60),
            (Joint::RightHip, 0.45, 0.60),
            (Joint::LeftKnee, 0.55, 0.75),
            (Joint::RightKnee, 0.45, 0.75),
            (Joint::LeftAnkle, 0.55, 0.90),
            (Joint::RightAnkle, 0.45, 0.90),
        ];
        for (joint, x, y) in joints {
            landmarks[joint.index()] = Landmark::new(x, y, 0.0, 1.0);
        }
        Self { landmarks }
    }

    /// Copy of this frame with one joint replaced
    pub fn with_joint(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.landmarks[joint.index()] = landmark;
        self
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl Index<Joint> for PoseFrame {
    type Output = Landmark;

    fn index(&self, joint: Joint) -> &Landmark {
        &self.landmarks[joint.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requires_full_landmark_set() {
        let err = PoseFrame::new(vec![Landmark::default(); 12]).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidFrame {
                expected: 33,
                actual: 12
            }
        );
        assert!(PoseFrame::new(vec![Landmark::default(); 33]).is_ok());
    }

    #[test]
    fn test_joint_indices_match_pose_scheme() {
        assert_eq!(Joint::LeftShoulder.index(), 11);
        assert_eq!(Joint::RightWrist.index(), 16);
        assert_eq!(Joint::LeftHip.index(), 23);
        assert_eq!(Joint::RightAnkle.index(), 28);
    }

    #[test]
    fn test_landmark_serializes_as_quad() {
        let lm = Landmark::new(0.1, 0.2, 0.3, 0.9);
        let json = serde_json::to_string(&lm).unwrap();
        let back: Landmark = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lm);
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_with_joint_replaces_only_that_joint() {
        let frame = PoseFrame::centered()
            .with_joint(Joint::RightWrist, Landmark::new(0.7, 0.1, 0.0, 1.0));
        assert_eq!(frame[Joint::RightWrist].y, 0.1);
        assert_eq!(frame[Joint::LeftWrist].y, 0.5);
    }
}
