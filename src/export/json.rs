//! JSON export and import
//!
//! Reads track sets produced by an analysis tool and writes playlist
//! reports for other tools to consume.

use crate::analysis::transitions::advise;
use crate::config::SequenceOptions;
use crate::error::{DjflowError, Result};
use crate::pipeline::GeneratedPlaylist;
use crate::strategies::Strategy;
use crate::types::{QualityReport, Track, TransitionRecommendation};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistReport {
    /// Schema version for forward compatibility
    pub version: String,
    pub metadata: ExportMetadata,
    pub strategy: Strategy,
    /// Tempo tolerance the playlist was built with
    pub tolerance: f64,
    pub options: SequenceOptions,
    pub quality: QualityReport,
    /// Ordered tracks
    pub tracks: Vec<Track>,
    /// One mixing brief per adjacent pair
    pub transitions: Vec<TransitionRecommendation>,
}

/// Export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// djflow version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
    pub track_count: usize,
    /// Input tracks left out for missing tempo or key
    pub dropped: usize,
}

impl PlaylistReport {
    /// Assemble a report for a generated playlist, including transition
    /// advice for every adjacent pair
    pub fn new(playlist: &GeneratedPlaylist, tolerance: f64, options: &SequenceOptions) -> Self {
        let options = options.normalized();
        Self {
            version: SCHEMA_VERSION.to_string(),
            metadata: ExportMetadata {
                generator_version: env!("CARGO_PKG_VERSION").to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
                track_count: playlist.tracks.len(),
                dropped: playlist.dropped,
            },
            strategy: playlist.strategy,
            tolerance,
            options,
            quality: playlist.quality,
            tracks: playlist.tracks.clone(),
            transitions: advise(&playlist.tracks, tolerance, &options),
        }
    }
}

/// Write a playlist report to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
pub fn write_json(report: &PlaylistReport, output_path: &Path) -> Result<()> {
    // Same directory keeps the rename on one filesystem
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| DjflowError::output_error(output_path, e))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        DjflowError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        DjflowError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!(
        "Wrote {} tracks and {} transitions to {}",
        report.tracks.len(),
        report.transitions.len(),
        output_path.display()
    );

    Ok(())
}

/// Read a JSON array of tracks
pub fn read_tracks(json_path: &Path) -> Result<Vec<Track>> {
    let file = File::open(json_path).map_err(|e| DjflowError::input_error(json_path, e.to_string()))?;
    let reader = BufReader::new(file);
    let tracks: Vec<Track> = serde_json::from_reader(reader)
        .map_err(|e| DjflowError::input_error(json_path, e.to_string()))?;

    debug!("Loaded {} tracks from {}", tracks.len(), json_path.display());
    Ok(tracks)
}

/// Read a previously written playlist report
pub fn read_report(json_path: &Path) -> Result<PlaylistReport> {
    let file = File::open(json_path).map_err(|e| DjflowError::input_error(json_path, e.to_string()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| DjflowError::input_error(json_path, e.to_string()))
}
