// PracticeSession - everything that happens to a single frame
//
// Per frame:
// 1. Classify the pose for the active instruction style
// 2. Feed the pose to the movement analyzer (skipped without a pose)
// 3. Tick the beat-sync animator with the elapsed time
// 4. Report the classification, move decision and the animation frame to draw
//
// The session carries one style of each taxonomy. Switching the instruction
// style swaps the animation cycle in place; switching the analysis style
// restarts movement tracking, and session time restarts at the first frame
// processed after the switch.

use serde::Serialize;

use crate::analysis::{AnalyzerSession, MoveDetection, SessionMetrics};
use crate::beat::BeatRecord;
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::pose::{Classification, PoseClassifier, PoseFrame};
use crate::render::StickFigure;
use crate::styles::{AnalysisStyle, AnimationFrame, InstructionStyle};
use crate::sync::BeatSyncAnimator;

/// What one frame produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub elapsed_secs: f64,
    pub classification: Classification,
    /// `None` when the frame had no pose
    pub detection: Option<MoveDetection>,
    /// A beat was hit on this frame
    pub on_beat: bool,
    pub animation: AnimationFrame,
}

pub struct PracticeSession {
    instruction_style: InstructionStyle,
    analysis_style: AnalysisStyle,
    classifier: PoseClassifier,
    analyzer: AnalyzerSession,
    animator: BeatSyncAnimator,
    /// Elapsed time at which the current analysis session began; `None` until
    /// the first frame after a restart
    analysis_started_secs: Option<f64>,
}

impl PracticeSession {
    pub fn new(
        instruction_style: InstructionStyle,
        analysis_style: AnalysisStyle,
        beats: Vec<f64>,
        config: &AppConfig,
    ) -> Self {
        tracing::info!(
            "[Session] Starting: instruction style {}, analysis style {}, {} beats",
            instruction_style,
            analysis_style,
            beats.len()
        );
        Self {
            instruction_style,
            analysis_style,
            classifier: PoseClassifier::new(),
            analyzer: AnalyzerSession::new(&config.movement),
            animator: BeatSyncAnimator::new(
                beats,
                instruction_style.animation_cycle(),
                &config.sync,
            ),
            analysis_started_secs: Some(0.0),
        }
    }

    /// Session driven by a stored beat record; the record names the style
    pub fn from_record(
        record: &BeatRecord,
        analysis_style: AnalysisStyle,
        config: &AppConfig,
    ) -> Result<Self, SessionError> {
        let style: InstructionStyle = record.style.parse()?;
        Ok(Self::new(style, analysis_style, record.beats.clone(), config))
    }

    pub fn instruction_style(&self) -> InstructionStyle {
        self.instruction_style
    }

    pub fn analysis_style(&self) -> AnalysisStyle {
        self.analysis_style
    }

    pub fn set_instruction_style(&mut self, style: InstructionStyle) {
        if style == self.instruction_style {
            return;
        }
        tracing::info!(
            "[Session] Instruction style {} -> {}",
            self.instruction_style,
            style
        );
        self.instruction_style = style;
        self.animator.set_cycle(style.animation_cycle());
    }

    pub fn set_analysis_style(&mut self, style: AnalysisStyle) {
        if style == self.analysis_style {
            return;
        }
        tracing::info!(
            "[Session] Analysis style {} -> {}, movement tracking restarted",
            self.analysis_style,
            style
        );
        self.analysis_style = style;
        self.analyzer.reset();
        self.analysis_started_secs = None;
    }

    pub fn process_frame(&mut self, frame: Option<&PoseFrame>, elapsed_secs: f64) -> FrameReport {
        self.analysis_started_secs.get_or_insert(elapsed_secs);
        let classification = self.classifier.classify(frame, self.instruction_style);
        let profile = self.analysis_style.profile();
        let detection = frame.map(|frame| self.analyzer.detect_dance_moves(frame, profile));
        let on_beat = self.animator.tick(elapsed_secs);

        if on_beat {
            tracing::debug!(
                "[Session] Beat hit at {:.3}s, cycle index {}",
                elapsed_secs,
                self.animator.cycle_index()
            );
        }

        FrameReport {
            elapsed_secs,
            classification,
            detection,
            on_beat,
            animation: self.animator.current_frame(),
        }
    }

    /// Metrics for the current analysis session; `elapsed_secs` is measured
    /// on the same clock as `process_frame`
    pub fn metrics(&self, elapsed_secs: f64) -> SessionMetrics {
        let duration = self
            .analysis_started_secs
            .map_or(0.0, |started| (elapsed_secs - started).max(0.0));
        self.analyzer.metrics_at(duration, self.analysis_style.profile())
    }

    pub fn stick_figure(&self) -> StickFigure {
        StickFigure::from_frame(self.animator.current_frame())
    }

    pub fn analyzer(&self) -> &AnalyzerSession {
        &self.analyzer
    }

    pub fn animator(&self) -> &BeatSyncAnimator {
        &self.animator
    }
}
