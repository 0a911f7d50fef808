use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use dance_trainer::analysis::{AnalyzerSession, SessionMetrics};
use dance_trainer::audio::MusicPlayer;
use dance_trainer::beat::{BeatExtractor, BeatRecord};
use dance_trainer::config::AppConfig;
use dance_trainer::error::{log_playback_error, BeatError};
use dance_trainer::io::{
    append_session_export, default_export_file_name, write_click_track, Capture, DemoConfig,
    DemoGenerator, DemoSource, LandmarkSource, ReplaySource, ReplayWriter, SessionExportRow,
    TrackingLog,
};
use dance_trainer::render::StickFigure;
use dance_trainer::runtime::{
    ControlInput, LogAnnouncer, NoControls, PracticeSession, SessionClock, StdinControls, Tracker,
};
use dance_trainer::styles::{AnalysisStyle, InstructionStyle};

#[derive(Parser, Debug)]
#[command(
    name = "dance_cli",
    about = "Dance practice trainer: beat extraction, pose instruction and movement scoring"
)]
struct Cli {
    /// Configuration file (defaults to assets/dance_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract tempo and beat timestamps from a song and store the beat record
    AnalyzeBeats {
        /// Instruction style (bhajan, bollywood, bhojpuri, pop, hiphop)
        #[arg(long)]
        style: String,
        /// WAV file; defaults to the style's song in the song directory
        #[arg(long)]
        song: Option<PathBuf>,
        /// Beat record path (defaults to paths.beat_record)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the practice loop against a stored beat record
    Track(TrackArgs),
    /// Score movement in a landmark replay without instructions or music
    Analyze {
        #[arg(long)]
        replay: PathBuf,
        /// Analysis style display name, e.g. "Hip Hop"
        #[arg(long, default_value = "Hip Hop")]
        style: String,
        /// Append the summary to a session export CSV (default file name if no path)
        #[arg(long, num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
    /// Write a synthetic landmark replay (and optionally a click track)
    DemoData {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 300)]
        frames: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0.1)]
        amplitude: f32,
        /// Probability of a frame without a pose
        #[arg(long, default_value_t = 0.0)]
        dropout: f64,
        /// Also write a click track WAV here
        #[arg(long)]
        clicks: Option<PathBuf>,
        #[arg(long, default_value_t = 120.0)]
        bpm: f64,
    },
    /// Render one animation step of a style as SVG
    Render {
        #[arg(long)]
        style: String,
        /// Step within the style's animation cycle
        #[arg(long, default_value_t = 0)]
        step: usize,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List both style tables
    Styles,
}

#[derive(Args, Debug)]
struct TrackArgs {
    /// Beat record path (defaults to paths.beat_record)
    #[arg(long)]
    record: Option<PathBuf>,
    /// Analysis style display name, e.g. "Hip Hop"
    #[arg(long, default_value = "Hip Hop")]
    analysis_style: String,
    /// Landmark replay (JSON Lines); synthetic frames are used otherwise
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Synthetic frame count when no replay is given
    #[arg(long, default_value_t = 300)]
    demo_frames: usize,
    /// Tracking log CSV (defaults to paths.tracking_log)
    #[arg(long)]
    log: Option<PathBuf>,
    #[arg(long)]
    no_log: bool,
    #[arg(long)]
    no_music: bool,
    /// Read `q` and `1`-`5` from stdin
    #[arg(long)]
    interactive: bool,
    /// Derive time from the frame index instead of the wall clock
    #[arg(long)]
    simulate: bool,
    #[arg(long)]
    max_frames: Option<u64>,
    /// Append the summary to a session export CSV (default file name if no path)
    #[arg(long, num_args = 0..=1)]
    export: Option<Option<PathBuf>>,
}

fn main() -> ExitCode {
    dance_trainer::init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::AnalyzeBeats {
            style,
            song,
            output,
        } => run_analyze_beats(&config, &style, song, output),
        Commands::Track(args) => run_track(&config, args),
        Commands::Analyze {
            replay,
            style,
            export,
        } => run_analyze(&config, &replay, &style, export),
        Commands::DemoData {
            output,
            frames,
            seed,
            amplitude,
            dropout,
            clicks,
            bpm,
        } => {
            let demo = DemoConfig {
                seed,
                amplitude,
                dropout,
                ..DemoConfig::default()
            };
            run_demo_data(&config, &output, frames, demo, clicks.as_deref(), bpm)
        }
        Commands::Render {
            style,
            step,
            output,
        } => run_render(&style, step, output),
        Commands::Styles => run_styles(),
    }
}

fn run_analyze_beats(
    config: &AppConfig,
    style: &str,
    song: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let style: InstructionStyle = style.parse()?;
    let song = song.unwrap_or_else(|| style.default_song(&config.paths.song_dir));
    let output = output.unwrap_or_else(|| config.paths.beat_record.clone());

    let extractor = BeatExtractor::new(config.beat_extraction.clone());
    let analysis = extractor
        .extract(&song)
        .with_context(|| format!("extracting beats from {}", song.display()))?;
    let record = BeatRecord::new(style, &song, analysis);
    record
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Tempo: {:.1} BPM, {} beats -> {}",
        record.tempo,
        record.beats.len(),
        output.display()
    );
    Ok(ExitCode::from(0))
}

fn run_track(config: &AppConfig, args: TrackArgs) -> Result<ExitCode> {
    let record_path = args
        .record
        .clone()
        .unwrap_or_else(|| config.paths.beat_record.clone());
    let record = match BeatRecord::load(&record_path) {
        Ok(record) => record,
        Err(err @ BeatError::RecordMissing { .. }) => bail!(
            "{}\nRun `dance_cli analyze-beats --style <style>` first to create it.",
            err
        ),
        Err(err) => return Err(err).with_context(|| format!("loading {}", record_path.display())),
    };
    let analysis_style: AnalysisStyle = args.analysis_style.parse()?;
    let session = PracticeSession::from_record(&record, analysis_style, config)?;

    let clock = if args.simulate {
        SessionClock::simulated(&config.runtime)
    } else {
        SessionClock::Wall
    };
    let mut tracker = Tracker::new(session, &config.runtime, clock);
    if !args.no_log {
        let log_path = args
            .log
            .clone()
            .unwrap_or_else(|| config.paths.tracking_log.clone());
        tracker = tracker.with_tracking_log(TrackingLog::create(&log_path)?);
    }
    if let Some(max) = args.max_frames {
        tracker = tracker.with_max_frames(max);
    }
    if !args.no_music {
        match MusicPlayer::new().play(Path::new(&record.song)) {
            Ok(handle) => tracker = tracker.with_playback(handle),
            Err(err) => log_playback_error(&err, "track"),
        }
    }

    let mut source: Box<dyn LandmarkSource> = match &args.replay {
        Some(path) => Box::new(ReplaySource::open(path)?),
        None => Box::new(DemoSource::new(DemoConfig::default(), args.demo_frames)),
    };
    let mut controls: Box<dyn ControlInput> = if args.interactive {
        Box::new(StdinControls::spawn().context("starting stdin controls")?)
    } else {
        Box::new(NoControls)
    };
    let mut feedback = LogAnnouncer::new(config.runtime.feedback_cooldown_ms);

    let summary = tracker.run(source.as_mut(), controls.as_mut(), &mut feedback)?;

    if let Some(export) = args.export {
        export_summary(export, summary.analysis_style, &summary.metrics)?;
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct AnalyzeReport {
    style: AnalysisStyle,
    frames: u64,
    frames_with_pose: u64,
    metrics: SessionMetrics,
}

fn run_analyze(
    config: &AppConfig,
    replay: &Path,
    style: &str,
    export: Option<Option<PathBuf>>,
) -> Result<ExitCode> {
    let style: AnalysisStyle = style.parse()?;
    let profile = style.profile();
    let mut source = ReplaySource::open(replay)?;
    let mut analyzer = AnalyzerSession::new(&config.movement);
    let mut frames = 0u64;
    let mut frames_with_pose = 0u64;

    loop {
        let capture = match source.next_capture() {
            Ok(Capture::End) => break,
            Ok(capture) => capture,
            Err(err @ dance_trainer::error::SessionError::InvalidFrame { .. }) => {
                tracing::warn!("[Analyze] Frame {} dropped: {}", frames + 1, err);
                Capture::NoPose
            }
            Err(err) => return Err(err).context("reading replay"),
        };
        frames += 1;
        if let Some(frame) = capture.into_pose() {
            frames_with_pose += 1;
            analyzer.detect_dance_moves(&frame, profile);
        }
    }

    let elapsed = frames.saturating_sub(1) as f64 * config.runtime.frame_period_secs();
    let metrics = analyzer.metrics_at(elapsed, profile);
    if let Some(export) = export {
        export_summary(export, style, &metrics)?;
    }

    let report = AnalyzeReport {
        style,
        frames,
        frames_with_pose,
        metrics: metrics.rounded(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

fn export_summary(
    target: Option<PathBuf>,
    style: AnalysisStyle,
    metrics: &SessionMetrics,
) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let path = target.unwrap_or_else(|| PathBuf::from(default_export_file_name(now)));
    let row = SessionExportRow::new(style, metrics, now);
    append_session_export(&path, &row)?;
    eprintln!("Session exported to {}", path.display());
    Ok(())
}

fn run_demo_data(
    config: &AppConfig,
    output: &Path,
    frames: usize,
    demo: DemoConfig,
    clicks: Option<&Path>,
    bpm: f64,
) -> Result<ExitCode> {
    let demo_seed = demo.seed;
    let mut generator = DemoGenerator::new(demo);
    let mut writer = ReplayWriter::create(output)?;
    for _ in 0..frames {
        writer.write(generator.next_frame().as_ref())?;
    }
    let written = writer.frames_written();
    writer.finish()?;
    println!("Wrote {} frames to {}", written, output.display());

    if let Some(path) = clicks {
        let duration = frames as f64 * config.runtime.frame_period_secs();
        write_click_track(
            path,
            bpm,
            duration.max(1.0),
            config.beat_extraction.sample_rate,
            demo_seed,
        )
        .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {:.0} BPM click track to {}", bpm, path.display());
    }
    Ok(ExitCode::from(0))
}

fn run_render(style: &str, step: usize, output: Option<PathBuf>) -> Result<ExitCode> {
    let style: InstructionStyle = style.parse()?;
    let cycle = style.animation_cycle();
    let figure = StickFigure::from_frame(cycle[step % cycle.len()]);
    let svg = figure.to_svg();

    match output {
        Some(path) => fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{svg}"),
    }
    Ok(ExitCode::from(0))
}

fn run_styles() -> Result<ExitCode> {
    println!("Instruction styles (key: id, song):");
    for (key, style) in (1..).zip(InstructionStyle::ALL) {
        println!("  {}: {:<10} {}", key, style.id(), style.song_file_name());
    }
    println!("Analysis styles (move threshold, energy multiplier):");
    for style in AnalysisStyle::ALL {
        let profile = style.profile();
        println!(
            "  {} {:<14} {:.2} x{:.1}  {}",
            profile.emoji,
            style.name(),
            profile.move_threshold,
            profile.energy_multiplier,
            profile.description
        );
    }
    Ok(ExitCode::from(0))
}
