// PoseClassifier - rule-based dance step recognition
//
// This module decides which dance step a frame shows by running an ordered
// list of independent geometric rules over fixed joints. Every rule that
// matches overwrites the current label (last match wins), so the rule order
// is part of the behaviour and must stay exactly as listed in STEP_RULES.
//
// Generic sequence (all styles but bhajan):
// 1. hand_up:     right wrist above right shoulder
// 2. bend_knee:   hip-knee-ankle angle below 120 degrees
// 3. step_left:   left ankle more than 0.1 left of left hip
// 4. rotate_hand: right wrist above right elbow, offset sideways by more than 0.1
// 5. rotate_body: shoulder span wider than 0.4
//
// Bhajan short-circuits to two rules: both hands up, else either hand rotating.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::calculate_angle;
use super::{Joint, PoseFrame};
use crate::styles::InstructionStyle;

/// Knee angle below which the knee counts as bent (degrees, unnormalized)
const KNEE_BEND_MAX_DEGREES: f32 = 120.0;
/// Lateral ankle offset for a step to the left
const STEP_OFFSET: f32 = 0.1;
/// Horizontal wrist/elbow offset for a hand rotation
const ROTATE_HAND_OFFSET: f32 = 0.1;
/// Horizontal shoulder span for a body rotation
const SHOULDER_SPAN: f32 = 0.4;

/// Pose labels shared by the classifier and the stick-figure animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseLabel {
    Neutral,
    HandUp,
    BendKnee,
    StepLeft,
    RotateHand,
    RotateBody,
    BhajanFootTapLeft,
    BhajanFootTapRight,
    BhajanPrayer,
    BhajanClap,
}

impl PoseLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PoseLabel::Neutral => "neutral",
            PoseLabel::HandUp => "hand_up",
            PoseLabel::BendKnee => "bend_knee",
            PoseLabel::StepLeft => "step_left",
            PoseLabel::RotateHand => "rotate_hand",
            PoseLabel::RotateBody => "rotate_body",
            PoseLabel::BhajanFootTapLeft => "bhajan_foot_tap_left",
            PoseLabel::BhajanFootTapRight => "bhajan_foot_tap_right",
            PoseLabel::BhajanPrayer => "bhajan_prayer",
            PoseLabel::BhajanClap => "bhajan_clap",
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: PoseLabel,
    /// True when any rule matched
    pub is_correct: bool,
    /// Spoken instruction for every matched rule, in evaluation order
    pub instructions: Vec<String>,
}

impl Classification {
    fn neutral() -> Self {
        Self {
            label: PoseLabel::Neutral,
            is_correct: false,
            instructions: Vec::new(),
        }
    }

    fn matched(&mut self, label: PoseLabel, instruction: String) {
        self.label = label;
        self.is_correct = true;
        self.instructions.push(instruction);
    }
}

struct StepRule {
    label: PoseLabel,
    ordinal: &'static str,
    phrase: &'static str,
    matches: fn(&PoseFrame) -> bool,
}

const STEP_RULES: [StepRule; 5] = [
    StepRule {
        label: PoseLabel::HandUp,
        ordinal: "one",
        phrase: "raise your hand up",
        matches: hand_up,
    },
    StepRule {
        label: PoseLabel::BendKnee,
        ordinal: "two",
        phrase: "bend your knee",
        matches: bend_knee,
    },
    StepRule {
        label: PoseLabel::StepLeft,
        ordinal: "three",
        phrase: "step to the left",
        matches: step_left,
    },
    StepRule {
        label: PoseLabel::RotateHand,
        ordinal: "four",
        phrase: "rotate your hand",
        matches: rotate_right_hand,
    },
    StepRule {
        label: PoseLabel::RotateBody,
        ordinal: "five",
        phrase: "rotate your body",
        matches: rotate_body,
    },
];

fn hand_up(frame: &PoseFrame) -> bool {
    // image y grows downward
    frame[Joint::RightWrist].y < frame[Joint::RightShoulder].y
}

fn bend_knee(frame: &PoseFrame) -> bool {
    let knee_angle = calculate_angle(
        &frame[Joint::RightHip],
        &frame[Joint::RightKnee],
        &frame[Joint::RightAnkle],
    );
    knee_angle < KNEE_BEND_MAX_DEGREES
}

fn step_left(frame: &PoseFrame) -> bool {
    frame[Joint::LeftAnkle].x < frame[Joint::LeftHip].x - STEP_OFFSET
}

fn hand_rotating(frame: &PoseFrame, wrist: Joint, elbow: Joint) -> bool {
    let wrist = &frame[wrist];
    let elbow = &frame[elbow];
    wrist.y < elbow.y && (wrist.x - elbow.x).abs() > ROTATE_HAND_OFFSET
}

fn rotate_right_hand(frame: &PoseFrame) -> bool {
    hand_rotating(frame, Joint::RightWrist, Joint::RightElbow)
}

fn rotate_body(frame: &PoseFrame) -> bool {
    (frame[Joint::RightShoulder].x - frame[Joint::LeftShoulder].x).abs() > SHOULDER_SPAN
}

fn both_hands_up(frame: &PoseFrame) -> bool {
    frame[Joint::RightWrist].y < frame[Joint::RightShoulder].y
        && frame[Joint::LeftWrist].y < frame[Joint::LeftShoulder].y
}

fn either_hand_rotating(frame: &PoseFrame) -> bool {
    hand_rotating(frame, Joint::RightWrist, Joint::RightElbow)
        || hand_rotating(frame, Joint::LeftWrist, Joint::LeftElbow)
}

/// Stateless per-frame step classifier
#[derive(Debug, Default, Clone, Copy)]
pub struct PoseClassifier;

impl PoseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one frame for the given style
    ///
    /// A frame without a detected pose is neutral and incorrect; no rule is
    /// evaluated for it.
    pub fn classify(&self, frame: Option<&PoseFrame>, style: InstructionStyle) -> Classification {
        let Some(frame) = frame else {
            return Classification::neutral();
        };

        match style {
            InstructionStyle::Bhajan => self.classify_bhajan(frame),
            _ => self.classify_steps(frame, style),
        }
    }

    fn classify_bhajan(&self, frame: &PoseFrame) -> Classification {
        let mut result = Classification::neutral();
        if both_hands_up(frame) {
            result.matched(
                PoseLabel::HandUp,
                "Bhajan: Raise both hands up".to_string(),
            );
        } else if either_hand_rotating(frame) {
            result.matched(
                PoseLabel::RotateHand,
                "Bhajan: Rotate your hand".to_string(),
            );
        }
        result
    }

    fn classify_steps(&self, frame: &PoseFrame, style: InstructionStyle) -> Classification {
        let mut result = Classification::neutral();
        for rule in &STEP_RULES {
            if (rule.matches)(frame) {
                result.matched(
                    rule.label,
                    format!("Step {}, {} for {}", rule.ordinal, rule.phrase, style),
                );
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
