use super::*;
use crate::error::{BeatError, ErrorCode};
use crate::io::demo::write_click_track;
use std::path::Path;

fn median_interval(beats: &[f64]) -> f64 {
    let mut intervals: Vec<f64> = beats.windows(2).map(|pair| pair[1] - pair[0]).collect();
    intervals.sort_by(|a, b| a.total_cmp(b));
    intervals[intervals.len() / 2]
}

fn assert_valid_beats(beats: &[f64]) {
    assert!(beats.iter().all(|&b| b >= 0.0));
    assert!(
        beats.windows(2).all(|pair| pair[0] < pair[1]),
        "beats not strictly increasing: {:?}",
        beats
    );
}

#[test]
fn test_click_track_at_120_bpm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicks.wav");
    write_click_track(&path, 120.0, 12.0, 44_100, 1).unwrap();

    let analysis = BeatExtractor::default().extract(&path).unwrap();

    assert!(
        (analysis.tempo - 120.0).abs() < 8.0,
        "tempo {:.1}",
        analysis.tempo
    );
    assert!(analysis.beats.len() >= 10, "{} beats", analysis.beats.len());
    assert_valid_beats(&analysis.beats);

    let median = median_interval(&analysis.beats);
    assert!((0.45..=0.55).contains(&median), "median interval {:.3}", median);
}

#[test]
fn test_click_track_at_100_bpm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicks.wav");
    write_click_track(&path, 100.0, 12.0, 22_050, 2).unwrap();

    let analysis = BeatExtractor::default().extract(&path).unwrap();

    assert!(
        (analysis.tempo - 100.0).abs() < 8.0,
        "tempo {:.1}",
        analysis.tempo
    );
    assert_valid_beats(&analysis.beats);
    let median = median_interval(&analysis.beats);
    assert!((0.55..=0.65).contains(&median), "median interval {:.3}", median);
}

#[test]
fn test_silent_audio_has_no_beats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silence.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..22_050 * 3 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let err = BeatExtractor::default().extract(&path).unwrap_err();
    assert!(matches!(err, BeatError::NoBeatsDetected { .. }));
}

#[test]
fn test_too_short_audio_has_no_beats() {
    let audio = crate::audio::DecodedAudio {
        samples: vec![0.5; 100],
        sample_rate: 22_050,
    };
    let err = BeatExtractor::default().analyze(&audio).unwrap_err();
    assert_eq!(err.code(), 3003);
}

#[test]
fn test_unreadable_file_is_io_error() {
    let err = BeatExtractor::default()
        .extract(Path::new("/nowhere/song.wav"))
        .unwrap_err();
    assert!(matches!(err, BeatError::AudioOpenFailed { .. }));
}

#[test]
fn test_extracted_record_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let song = dir.path().join("clicks.wav");
    write_click_track(&song, 120.0, 8.0, 22_050, 3).unwrap();

    let analysis = BeatExtractor::default().extract(&song).unwrap();
    let record = BeatRecord::new(crate::styles::InstructionStyle::Hiphop, &song, analysis.clone());
    let record_path = dir.path().join("beat_data.json");
    record.save(&record_path).unwrap();

    let loaded = BeatRecord::load(&record_path).unwrap();
    assert_eq!(loaded.beats, analysis.beats);
    assert_eq!(loaded.style, "hiphop");
}
