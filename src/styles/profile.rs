// StyleProfile - per-style movement thresholds and scoring multipliers
//
// Each analysis style carries the rolling-average energy threshold above which
// a frame counts as a move, and the multiplier applied when turning mean
// energy into an energy score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Styles of the movement-analysis path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisStyle {
    #[default]
    #[serde(rename = "Hip Hop")]
    HipHop,
    Ballet,
    Contemporary,
    Latin,
    #[serde(rename = "Bhajan Nepali")]
    BhajanNepali,
}

/// Immutable configuration bundle for one analysis style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    pub style: AnalysisStyle,
    pub emoji: &'static str,
    pub description: &'static str,
    pub characteristics: [&'static str; 3],
    /// Rolling-average energy must exceed this to count a move
    pub move_threshold: f32,
    /// Scales mean energy into the energy score
    pub energy_multiplier: f32,
}

const PROFILES: [StyleProfile; 5] = [
    StyleProfile {
        style: AnalysisStyle::HipHop,
        emoji: "🎤",
        description: "Urban street dance with strong beats",
        characteristics: ["High energy", "Sharp movements", "Rhythm focus"],
        move_threshold: 0.15,
        energy_multiplier: 1.2,
    },
    StyleProfile {
        style: AnalysisStyle::Ballet,
        emoji: "🩰",
        description: "Classical dance with graceful movements",
        characteristics: ["Graceful", "Controlled", "Precise"],
        move_threshold: 0.08,
        energy_multiplier: 0.8,
    },
    StyleProfile {
        style: AnalysisStyle::Contemporary,
        emoji: "🌊",
        description: "Modern expressive dance style",
        characteristics: ["Fluid", "Expressive", "Creative"],
        move_threshold: 0.12,
        energy_multiplier: 1.0,
    },
    StyleProfile {
        style: AnalysisStyle::Latin,
        emoji: "💃",
        description: "Passionate Latin American dances",
        characteristics: ["Passionate", "Rhythmic", "Energetic"],
        move_threshold: 0.18,
        energy_multiplier: 1.3,
    },
    StyleProfile {
        style: AnalysisStyle::BhajanNepali,
        emoji: "🙏",
        description: "Traditional Nepali devotional dance",
        characteristics: ["Spiritual", "Traditional", "Meditative"],
        move_threshold: 0.10,
        energy_multiplier: 0.9,
    },
];

impl AnalysisStyle {
    pub const ALL: [AnalysisStyle; 5] = [
        AnalysisStyle::HipHop,
        AnalysisStyle::Ballet,
        AnalysisStyle::Contemporary,
        AnalysisStyle::Latin,
        AnalysisStyle::BhajanNepali,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnalysisStyle::HipHop => "Hip Hop",
            AnalysisStyle::Ballet => "Ballet",
            AnalysisStyle::Contemporary => "Contemporary",
            AnalysisStyle::Latin => "Latin",
            AnalysisStyle::BhajanNepali => "Bhajan Nepali",
        }
    }

    pub fn profile(self) -> &'static StyleProfile {
        // PROFILES is ordered like ALL
        &PROFILES[self as usize]
    }
}

impl fmt::Display for AnalysisStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisStyle {
    type Err = SessionError;

    /// Accepts display names case-insensitively, ignoring spaces, `-` and `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        AnalysisStyle::ALL
            .into_iter()
            .find(|style| normalize(style.name()) == wanted)
            .ok_or_else(|| SessionError::UnknownStyle {
                name: s.to_string(),
            })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
