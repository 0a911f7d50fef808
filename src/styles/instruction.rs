// InstructionStyle - styles of the instruction / beat-sync path
//
// Each style owns a four-step animation cycle that the beat-sync animator
// walks through on every hit beat, and a default song used when beat
// extraction is started from a style alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::SessionError;
use crate::pose::PoseLabel;

/// Facial expression drawn on the stick figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Neutral,
    Smile,
    Closed,
}

/// One step of an animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub pose: PoseLabel,
    pub expression: Expression,
    /// Hand cymbals, only drawn with the clap pose
    pub cymbals: bool,
}

const fn step(pose: PoseLabel, expression: Expression, cymbals: bool) -> AnimationFrame {
    AnimationFrame {
        pose,
        expression,
        cymbals,
    }
}

const fn smile(pose: PoseLabel) -> AnimationFrame {
    step(pose, Expression::Smile, false)
}

const BHAJAN_CYCLE: [AnimationFrame; 4] = [
    smile(PoseLabel::BhajanFootTapLeft),
    smile(PoseLabel::BhajanFootTapRight),
    step(PoseLabel::BhajanPrayer, Expression::Closed, false),
    step(PoseLabel::BhajanClap, Expression::Smile, true),
];

const BOLLYWOOD_CYCLE: [AnimationFrame; 4] = [
    smile(PoseLabel::HandUp),
    smile(PoseLabel::StepLeft),
    smile(PoseLabel::BendKnee),
    smile(PoseLabel::RotateHand),
];

const BHOJPURI_CYCLE: [AnimationFrame; 4] = [
    smile(PoseLabel::StepLeft),
    smile(PoseLabel::BendKnee),
    smile(PoseLabel::HandUp),
    smile(PoseLabel::RotateBody),
];

const POP_CYCLE: [AnimationFrame; 4] = [
    smile(PoseLabel::HandUp),
    smile(PoseLabel::RotateHand),
    smile(PoseLabel::StepLeft),
    smile(PoseLabel::Neutral),
];

const HIPHOP_CYCLE: [AnimationFrame; 4] = [
    smile(PoseLabel::BendKnee),
    smile(PoseLabel::RotateBody),
    smile(PoseLabel::HandUp),
    smile(PoseLabel::Neutral),
];

/// Fallback for a session running without an instruction style
pub const NEUTRAL_CYCLE: [AnimationFrame; 1] = [smile(PoseLabel::Neutral)];

/// Styles of the instruction / beat-sync path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionStyle {
    Bhajan,
    Bollywood,
    Bhojpuri,
    Pop,
    Hiphop,
}

impl InstructionStyle {
    /// Ordered like the number keys `1`..`5`
    pub const ALL: [InstructionStyle; 5] = [
        InstructionStyle::Bhajan,
        InstructionStyle::Bollywood,
        InstructionStyle::Bhojpuri,
        InstructionStyle::Pop,
        InstructionStyle::Hiphop,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InstructionStyle::Bhajan => "bhajan",
            InstructionStyle::Bollywood => "bollywood",
            InstructionStyle::Bhojpuri => "bhojpuri",
            InstructionStyle::Pop => "pop",
            InstructionStyle::Hiphop => "hiphop",
        }
    }

    /// Style bound to a number key, `'1'` being bhajan
    pub fn from_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn animation_cycle(self) -> &'static [AnimationFrame] {
        match self {
            InstructionStyle::Bhajan => &BHAJAN_CYCLE,
            InstructionStyle::Bollywood => &BOLLYWOOD_CYCLE,
            InstructionStyle::Bhojpuri => &BHOJPURI_CYCLE,
            InstructionStyle::Pop => &POP_CYCLE,
            InstructionStyle::Hiphop => &HIPHOP_CYCLE,
        }
    }

    /// Song file name for this style inside the song directory
    pub fn song_file_name(self) -> &'static str {
        match self {
            InstructionStyle::Bhajan => "NepaliVajan.wav",
            InstructionStyle::Bollywood => "BollywoodSong.wav",
            InstructionStyle::Bhojpuri => "BhojpuriSong.wav",
            InstructionStyle::Pop => "PopSong.wav",
            InstructionStyle::Hiphop => "HipHopSong.wav",
        }
    }

    pub fn default_song(self, song_dir: &Path) -> PathBuf {
        song_dir.join(self.song_file_name())
    }
}

impl fmt::Display for InstructionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InstructionStyle {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        InstructionStyle::ALL
            .into_iter()
            .find(|style| style.id() == wanted)
            .ok_or_else(|| SessionError::UnknownStyle {
                name: s.to_string(),
            })
    }
}
