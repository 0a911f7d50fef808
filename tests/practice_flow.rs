// Library-level flow: click track -> beat record -> practice loop

use dance_trainer::beat::{BeatExtractor, BeatRecord};
use dance_trainer::config::AppConfig;
use dance_trainer::error::{BeatError, ErrorCode};
use dance_trainer::io::{write_click_track, DemoConfig, DemoSource, ReplaySource, ReplayWriter, TrackingLog};
use dance_trainer::io::{DemoGenerator, LandmarkSource};
use dance_trainer::runtime::{LogAnnouncer, NoControls, PracticeSession, SessionClock, Tracker};
use dance_trainer::styles::{AnalysisStyle, InstructionStyle};

fn record_for_click_track(dir: &std::path::Path, bpm: f64) -> BeatRecord {
    let song = dir.join("song.wav");
    write_click_track(&song, bpm, 10.0, 22_050, 3).unwrap();

    let analysis = BeatExtractor::default().extract(&song).unwrap();
    let record = BeatRecord::new(InstructionStyle::Bollywood, &song, analysis);
    let path = dir.join("beat_data.json");
    record.save(&path).unwrap();
    BeatRecord::load(&path).unwrap()
}

#[test]
fn practice_loop_follows_extracted_beats() {
    let dir = tempfile::tempdir().unwrap();
    let record = record_for_click_track(dir.path(), 120.0);
    assert!(record.validate().is_ok());

    let config = AppConfig::default();
    let session = PracticeSession::from_record(&record, AnalysisStyle::HipHop, &config).unwrap();
    let log_path = dir.path().join("tracking.csv");
    let mut tracker = Tracker::new(session, &config.runtime, SessionClock::simulated(&config.runtime))
        .with_tracking_log(TrackingLog::create(&log_path).unwrap());

    let mut source = DemoSource::new(DemoConfig::default(), 300);
    let mut feedback = LogAnnouncer::new(config.runtime.feedback_cooldown_ms);
    let summary = tracker.run(&mut source, &mut NoControls, &mut feedback).unwrap();

    assert_eq!(summary.frames, 300);
    assert_eq!(summary.frames_with_pose, 300);
    // beats every 0.5 s over ~10 s of frames, each reachable within tolerance
    assert!(summary.beats_hit >= 15, "beats hit: {}", summary.beats_hit);
    assert!(summary.metrics.total_moves > 0);
    assert!(summary.metrics.energy_score <= 100.0);
    assert!(summary.metrics.rhythm_score <= 100.0);

    let rows = std::fs::read_to_string(&log_path).unwrap().lines().count();
    assert_eq!(rows, 301);
}

#[test]
fn replayed_frames_match_generated_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frames.jsonl");

    let config = DemoConfig {
        dropout: 0.3,
        ..DemoConfig::default()
    };
    let mut generator = DemoGenerator::new(config.clone());
    let mut writer = ReplayWriter::create(&path).unwrap();
    let frames: Vec<_> = (0..40).map(|_| generator.next_frame()).collect();
    for frame in &frames {
        writer.write(frame.as_ref()).unwrap();
    }
    writer.finish().unwrap();

    let mut replay = ReplaySource::open(&path).unwrap();
    let mut demo = DemoSource::new(config, 40);
    for _ in 0..=40 {
        assert_eq!(replay.next_capture().unwrap(), demo.next_capture().unwrap());
    }
}

#[test]
fn missing_record_has_its_own_code() {
    let err = BeatRecord::load(std::path::Path::new("/nonexistent/beat_data.json")).unwrap_err();
    assert!(matches!(err, BeatError::RecordMissing { .. }));
    assert_eq!(err.code(), dance_trainer::error::BeatErrorCodes::RECORD_MISSING);
}
