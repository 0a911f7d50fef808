use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn cli(workdir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dance_cli"));
    command.current_dir(workdir).env("RUST_LOG", "warn");
    command
}

fn run(workdir: &Path, args: &[&str]) -> Output {
    cli(workdir)
        .args(args)
        .output()
        .expect("failed to run dance_cli")
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout UTF-8");
    serde_json::from_str(stdout.trim()).expect("JSON payload on stdout")
}

#[test]
fn styles_lists_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["styles"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("bhojpuri"));
    assert!(stdout.contains("NepaliVajan.wav"));
    assert!(stdout.contains("Bhajan Nepali"));
    assert!(stdout.contains("Contemporary"));
}

#[test]
fn track_without_beat_record_explains_next_step() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["track", "--simulate", "--no-music"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("analyze-beats"), "stderr was: {stderr}");
    assert!(!dir.path().join("dance_tracking_data.csv").exists());
}

#[test]
fn unknown_style_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["analyze-beats", "--style", "tango"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("tango"));
}

#[test]
fn demo_data_to_tracking_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let output = run(
        root,
        &[
            "demo-data",
            "--output",
            "frames.jsonl",
            "--frames",
            "300",
            "--clicks",
            "clicks.wav",
        ],
    );
    assert!(output.status.success(), "demo-data failed: {:?}", output);
    let replay = fs::read_to_string(root.join("frames.jsonl")).unwrap();
    assert_eq!(replay.lines().count(), 300);

    let output = run(
        root,
        &["analyze-beats", "--style", "pop", "--song", "clicks.wav"],
    );
    assert!(output.status.success(), "analyze-beats failed: {:?}", output);
    let record: Value =
        serde_json::from_str(&fs::read_to_string(root.join("beat_data.json")).unwrap()).unwrap();
    assert_eq!(record["style"], "pop");
    let tempo = record["tempo"].as_f64().unwrap();
    assert!((tempo - 120.0).abs() < 10.0, "tempo {tempo}");
    assert!(record["beats"].as_array().unwrap().len() >= 10);

    let output = run(
        root,
        &[
            "track",
            "--simulate",
            "--no-music",
            "--replay",
            "frames.jsonl",
            "--analysis-style",
            "latin",
        ],
    );
    assert!(output.status.success(), "track failed: {:?}", output);
    let summary = stdout_json(&output);
    assert_eq!(summary["frames"], 300);
    assert_eq!(summary["analysis_style"], "Latin");
    assert_eq!(summary["instruction_style"], "pop");
    assert!(summary["beats_hit"].as_u64().unwrap() >= 10);

    let log = fs::read_to_string(root.join("dance_tracking_data.csv")).unwrap();
    assert_eq!(log.lines().count(), 301);
    assert!(log.starts_with("frame,x_0,y_0,z_0,visibility_0"));
}

#[test]
fn analyze_exports_session_row() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let output = run(
        root,
        &["demo-data", "--output", "frames.jsonl", "--frames", "90"],
    );
    assert!(output.status.success());

    let output = run(
        root,
        &[
            "analyze",
            "--replay",
            "frames.jsonl",
            "--style",
            "Hip Hop",
            "--export",
            "sessions.csv",
        ],
    );
    assert!(output.status.success(), "analyze failed: {:?}", output);
    let report = stdout_json(&output);
    assert_eq!(report["frames"], 90);
    assert_eq!(report["frames_with_pose"], 90);

    let csv = fs::read_to_string(root.join("sessions.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("timestamp,dance_style,total_moves"));
    assert!(lines[1].contains("Hip Hop"));
}

#[test]
fn render_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["render", "--style", "bhajan", "--step", "3", "--output", "clap.svg"],
    );
    assert!(output.status.success());

    let svg = fs::read_to_string(dir.path().join("clap.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("</svg>"));
}
