// Tracker - the per-frame practice loop
//
// Each iteration:
// 1. Drain interactive controls (quit, style switch)
// 2. Pull one capture from the landmark source
// 3. Run the frame through the practice session
// 4. Announce instructions, append the tracking-log row
// 5. Sleep out the rest of the frame period (wall clock only)
//
// A malformed frame is logged and treated as a frame without a pose; any other
// source error ends the run. Playback is only polled, never waited on.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use serde::Serialize;

use super::controls::{Control, ControlInput};
use super::feedback::FeedbackSink;
use super::pacer::FramePacer;
use super::session::{FrameReport, PracticeSession};
use crate::analysis::SessionMetrics;
use crate::audio::PlaybackHandle;
use crate::config::RuntimeConfig;
use crate::error::{log_playback_error, log_session_error, SessionError};
use crate::io::{Capture, LandmarkSource, TrackingLog};
use crate::styles::{AnalysisStyle, InstructionStyle};

/// Where elapsed session time comes from
#[derive(Debug, Clone, Copy)]
pub enum SessionClock {
    /// Real time since the run started; frames are paced
    Wall,
    /// `frame_index * frame_period`; no sleeping, used for replays and tests
    Simulated { frame_period_secs: f64 },
}

impl SessionClock {
    pub fn simulated(runtime: &RuntimeConfig) -> Self {
        SessionClock::Simulated {
            frame_period_secs: runtime.frame_period_secs(),
        }
    }

    fn elapsed_secs(&self, started: Instant, frame_index: u64) -> f64 {
        match *self {
            SessionClock::Wall => started.elapsed().as_secs_f64(),
            SessionClock::Simulated { frame_period_secs } => frame_index as f64 * frame_period_secs,
        }
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSummary {
    pub frames: u64,
    pub frames_with_pose: u64,
    pub invalid_frames: u64,
    pub correct_frames: u64,
    pub beats_hit: u64,
    pub quit_requested: bool,
    pub instruction_style: InstructionStyle,
    pub analysis_style: AnalysisStyle,
    pub metrics: SessionMetrics,
}

pub struct Tracker<W: Write = File> {
    session: PracticeSession,
    clock: SessionClock,
    frame_period_secs: f64,
    tracking_log: Option<TrackingLog<W>>,
    playback: Option<PlaybackHandle>,
    max_frames: Option<u64>,
}

impl<W: Write> Tracker<W> {
    pub fn new(session: PracticeSession, runtime: &RuntimeConfig, clock: SessionClock) -> Self {
        Self {
            session,
            clock,
            frame_period_secs: runtime.frame_period_secs(),
            tracking_log: None,
            playback: None,
            max_frames: None,
        }
    }

    pub fn with_tracking_log(mut self, log: TrackingLog<W>) -> Self {
        self.tracking_log = Some(log);
        self
    }

    pub fn with_playback(mut self, playback: PlaybackHandle) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    /// Run until the source ends, `q` is pressed or the frame limit is hit
    pub fn run(
        &mut self,
        source: &mut dyn LandmarkSource,
        controls: &mut dyn ControlInput,
        feedback: &mut dyn FeedbackSink,
    ) -> Result<TrackerSummary, SessionError> {
        self.run_with(source, controls, feedback, |_| {})
    }

    /// Like [`Tracker::run`], handing every frame report to `on_frame`
    pub fn run_with(
        &mut self,
        source: &mut dyn LandmarkSource,
        controls: &mut dyn ControlInput,
        feedback: &mut dyn FeedbackSink,
        mut on_frame: impl FnMut(&FrameReport),
    ) -> Result<TrackerSummary, SessionError> {
        let started = Instant::now();
        let mut pacer = FramePacer::new(self.frame_period_secs);
        let mut summary = TrackerSummary {
            frames: 0,
            frames_with_pose: 0,
            invalid_frames: 0,
            correct_frames: 0,
            beats_hit: 0,
            quit_requested: false,
            instruction_style: self.session.instruction_style(),
            analysis_style: self.session.analysis_style(),
            metrics: SessionMetrics::default(),
        };
        let mut music_finished_logged = false;
        let mut elapsed = 0.0;

        tracing::info!("[Tracker] Practice loop started (clock: {:?})", self.clock);

        loop {
            if self.max_frames.is_some_and(|max| summary.frames >= max) {
                tracing::info!("[Tracker] Frame limit reached");
                break;
            }

            if self.apply_controls(controls.poll()) {
                summary.quit_requested = true;
                break;
            }

            let frame = match source.next_capture() {
                Ok(Capture::End) => break,
                Ok(capture) => capture.into_pose(),
                Err(err @ SessionError::InvalidFrame { .. }) => {
                    tracing::warn!("[Tracker] Frame {} dropped: {}", summary.frames + 1, err);
                    summary.invalid_frames += 1;
                    None
                }
                Err(err) => {
                    log_session_error(&err, "Tracker::run");
                    return Err(err);
                }
            };

            elapsed = self.clock.elapsed_secs(started, summary.frames);
            summary.frames += 1;

            let report = self.session.process_frame(frame.as_ref(), elapsed);
            if frame.is_some() {
                summary.frames_with_pose += 1;
            }
            if report.classification.is_correct {
                summary.correct_frames += 1;
            }
            if report.on_beat {
                summary.beats_hit += 1;
            }

            let now = Instant::now();
            for instruction in &report.classification.instructions {
                feedback.announce(instruction, now);
            }

            if let Some(log) = self.tracking_log.as_mut() {
                log.record(summary.frames, frame.as_ref())?;
            }

            on_frame(&report);

            if !music_finished_logged && self.playback.as_ref().is_some_and(|p| !p.is_playing()) {
                tracing::info!("[Tracker] Music finished at {:.1}s", elapsed);
                music_finished_logged = true;
            }

            if matches!(self.clock, SessionClock::Wall) {
                pacer.wait();
            }
        }

        self.finish(&mut summary, elapsed)?;
        Ok(summary)
    }

    /// Returns true when a quit was requested
    fn apply_controls(&mut self, controls: Vec<Control>) -> bool {
        for control in controls {
            match control {
                Control::Quit => {
                    tracing::info!("[Tracker] Quit requested");
                    return true;
                }
                Control::SelectStyle(style) => self.session.set_instruction_style(style),
            }
        }
        false
    }

    fn finish(&mut self, summary: &mut TrackerSummary, elapsed: f64) -> Result<(), SessionError> {
        if let Some(log) = self.tracking_log.as_mut() {
            log.flush()?;
        }
        if let Some(playback) = self.playback.take() {
            if playback.is_playing() {
                if let Err(err) = playback.stop() {
                    log_playback_error(&err, "Tracker::finish");
                }
            }
        }

        summary.instruction_style = self.session.instruction_style();
        summary.analysis_style = self.session.analysis_style();
        summary.metrics = self.session.metrics(elapsed);

        let shown = summary.metrics.rounded();
        tracing::info!(
            "[Tracker] Session finished: {} frames, {} moves, {:.1} moves/min, energy {:.1}, rhythm {:.1}",
            summary.frames,
            shown.total_moves,
            shown.moves_per_minute,
            shown.energy_score,
            shown.rhythm_score
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::io::MemorySource;
    use crate::pose::{Joint, Landmark, PoseFrame};
    use std::collections::VecDeque;

    struct ScriptedControls(VecDeque<Vec<Control>>);

    impl ControlInput for ScriptedControls {
        fn poll(&mut self) -> Vec<Control> {
            self.0.pop_front().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct RecordingSink(Vec<String>);

    impl FeedbackSink for RecordingSink {
        fn announce(&mut self, phrase: &str, _now: Instant) -> bool {
            self.0.push(phrase.to_string());
            true
        }
    }

    struct BrokenSource;

    impl LandmarkSource for BrokenSource {
        fn next_capture(&mut self) -> Result<Capture, SessionError> {
            Err(SessionError::FrameSourceFailed {
                reason: "camera unplugged".to_string(),
            })
        }
    }

    struct OneBadFrame(bool);

    impl LandmarkSource for OneBadFrame {
        fn next_capture(&mut self) -> Result<Capture, SessionError> {
            if self.0 {
                return Ok(Capture::End);
            }
            self.0 = true;
            Err(SessionError::InvalidFrame {
                expected: 33,
                actual: 2,
            })
        }
    }

    fn runtime() -> RuntimeConfig {
        RuntimeConfig {
            frame_rate: 1.0,
            feedback_cooldown_ms: 0,
        }
    }

    fn tracker(beats: Vec<f64>) -> Tracker<Vec<u8>> {
        let session = PracticeSession::new(
            InstructionStyle::Pop,
            AnalysisStyle::HipHop,
            beats,
            &AppConfig::default(),
        );
        let runtime = runtime();
        Tracker::new(session, &runtime, SessionClock::simulated(&runtime))
    }

    fn hand_up() -> PoseFrame {
        PoseFrame::standing().with_joint(Joint::RightWrist, Landmark::new(0.40, 0.10, 0.0, 1.0))
    }

    #[test]
    fn test_runs_until_source_ends() {
        let mut tracker = tracker(vec![1.0, 3.0]);
        let mut source = MemorySource::new([Some(hand_up()), None, Some(PoseFrame::standing()), None]);
        let mut sink = RecordingSink::default();
        let mut reports = Vec::new();

        let summary = tracker
            .run_with(&mut source, &mut ScriptedControls(VecDeque::new()), &mut sink, |r| {
                reports.push(r.clone())
            })
            .unwrap();

        assert_eq!(summary.frames, 4);
        assert_eq!(summary.frames_with_pose, 2);
        assert_eq!(summary.correct_frames, 1);
        // frames at 0, 1, 2 and 3 s
        assert_eq!(summary.beats_hit, 2);
        assert!(reports[1].on_beat && reports[3].on_beat);
        assert!((reports[3].elapsed_secs - 3.0).abs() < 1e-9);
        assert_eq!(sink.0, vec!["Step one, raise your hand up for pop".to_string()]);
        assert!(!summary.quit_requested);
    }

    #[test]
    fn test_quit_stops_before_next_frame() {
        let mut tracker = tracker(Vec::new());
        let mut source = MemorySource::new(vec![None; 10]);
        let mut controls = ScriptedControls(VecDeque::from(vec![vec![], vec![], vec![Control::Quit]]));

        let summary = tracker
            .run(&mut source, &mut controls, &mut RecordingSink::default())
            .unwrap();

        assert_eq!(summary.frames, 2);
        assert!(summary.quit_requested);
        assert_eq!(source.remaining(), 8);
    }

    #[test]
    fn test_style_key_switches_instruction_style() {
        let mut tracker = tracker(Vec::new());
        let mut source = MemorySource::new([Some(hand_up())]);
        let mut controls = ScriptedControls(VecDeque::from(vec![vec![Control::SelectStyle(
            InstructionStyle::Bhajan,
        )]]));
        let mut sink = RecordingSink::default();

        let summary = tracker.run(&mut source, &mut controls, &mut sink).unwrap();

        assert_eq!(summary.instruction_style, InstructionStyle::Bhajan);
        // one hand up is not the bhajan both-hands pose
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_invalid_frame_counts_as_blank() {
        let mut tracker = tracker(Vec::new());
        let summary = tracker
            .run(&mut OneBadFrame(false), &mut ScriptedControls(VecDeque::new()), &mut RecordingSink::default())
            .unwrap();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.invalid_frames, 1);
        assert_eq!(summary.frames_with_pose, 0);
    }

    #[test]
    fn test_source_failure_aborts() {
        let mut tracker = tracker(Vec::new());
        let err = tracker
            .run(&mut BrokenSource, &mut ScriptedControls(VecDeque::new()), &mut RecordingSink::default())
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::FrameSourceFailed {
                reason: "camera unplugged".to_string()
            }
        );
    }

    #[test]
    fn test_tracking_log_gets_every_frame() {
        let runtime = runtime();
        let session = PracticeSession::new(
            InstructionStyle::Hiphop,
            AnalysisStyle::Ballet,
            Vec::new(),
            &AppConfig::default(),
        );
        let mut tracker = Tracker::new(session, &runtime, SessionClock::simulated(&runtime))
            .with_tracking_log(TrackingLog::new(Vec::new()).unwrap())
            .with_max_frames(3);
        let mut source = MemorySource::new(vec![Some(PoseFrame::standing()); 5]);

        let summary = tracker
            .run(&mut source, &mut ScriptedControls(VecDeque::new()), &mut RecordingSink::default())
            .unwrap();
        assert_eq!(summary.frames, 3);

        let log = tracker.tracking_log.take().unwrap();
        assert_eq!(log.rows_written(), 3);
    }

    #[test]
    fn test_metrics_use_simulated_time() {
        let mut tracker = tracker(Vec::new());
        let mut source = MemorySource::new(vec![Some(PoseFrame::standing()); 11]);
        let summary = tracker
            .run(&mut source, &mut ScriptedControls(VecDeque::new()), &mut RecordingSink::default())
            .unwrap();
        // last frame index 10 at 1 FPS
        assert!((summary.metrics.session_duration - 10.0).abs() < 1e-9);
        assert_eq!(summary.metrics.total_moves, 0);
    }
}
