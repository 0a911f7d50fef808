// Session export - one CSV row per export action
//
// Columns: timestamp, dance_style, total_moves, session_duration,
// moves_per_minute, energy_score, rhythm_score. The header is written only
// when the target file is new or empty; later exports append.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

use crate::analysis::SessionMetrics;
use crate::error::SessionError;
use crate::styles::AnalysisStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExportRow {
    pub timestamp: String,
    pub dance_style: String,
    pub total_moves: u64,
    pub session_duration: f64,
    pub moves_per_minute: f32,
    pub energy_score: f32,
    pub rhythm_score: f32,
}

impl SessionExportRow {
    /// Row with display-rounded metrics and an ISO-8601 local timestamp
    pub fn new(style: AnalysisStyle, metrics: &SessionMetrics, at: NaiveDateTime) -> Self {
        let shown = metrics.rounded();
        Self {
            timestamp: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            dance_style: style.name().to_string(),
            total_moves: shown.total_moves,
            session_duration: shown.session_duration,
            moves_per_minute: shown.moves_per_minute,
            energy_score: shown.energy_score,
            rhythm_score: shown.rhythm_score,
        }
    }
}

/// `dance_session_YYYYMMDD_HHMMSS.csv`
pub fn default_export_file_name(at: NaiveDateTime) -> String {
    format!("dance_session_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Append `row` to `path`, writing the header first if the file is empty
pub fn append_session_export(path: &Path, row: &SessionExportRow) -> Result<(), SessionError> {
    let export_failed = |reason: String| SessionError::ExportFailed { reason };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| export_failed(format!("failed to open {}: {}", path.display(), err)))?;
    let needs_header = file
        .metadata()
        .map(|meta| meta.len() == 0)
        .map_err(|err| export_failed(err.to_string()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer
        .serialize(row)
        .map_err(|err| export_failed(err.to_string()))?;
    writer.flush().map_err(|err| export_failed(err.to_string()))?;

    tracing::info!("[Export] Session summary appended to {}", path.display());
    Ok(())
}
