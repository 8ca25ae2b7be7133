//! Playlist orchestration
//!
//! Prepares the input (Camelot assignment, eligibility filter), resolves a
//! strategy by name, runs it, and scores the result. Every entry point
//! returns a value for every input; nothing here fails.

use crate::analysis::key::LookupKeyAssigner;
use crate::analysis::quality::evaluate;
use crate::analysis::traits::KeyAssigner;
use crate::config::SequenceOptions;
use crate::pipeline::eligibility::prepare;
use crate::strategies::Strategy;
use crate::types::{QualityReport, Track};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Result of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlaylist {
    /// Strategy that actually ran (after any fallback)
    pub strategy: Strategy,
    /// Ordered tracks
    pub tracks: Vec<Track>,
    pub quality: QualityReport,
    /// Input tracks left out for missing tempo or key
    pub dropped: usize,
}

/// Resolve a strategy name, falling back to the default for unknown names
pub fn resolve_strategy(name: &str) -> Strategy {
    match Strategy::from_name(name) {
        Some(strategy) => strategy,
        None => {
            let fallback = Strategy::default();
            warn!("Unknown strategy '{}', using {}", name, fallback);
            fallback
        }
    }
}

/// Order `tracks` with the named strategy and score the result
pub fn generate(
    tracks: &[Track],
    strategy_name: &str,
    tolerance: f64,
    options: &SequenceOptions,
) -> GeneratedPlaylist {
    generate_with(
        &LookupKeyAssigner::new(),
        tracks,
        resolve_strategy(strategy_name),
        tolerance,
        options,
    )
}

/// Like [`generate`], with an explicit strategy and key assigner
pub fn generate_with(
    assigner: &dyn KeyAssigner,
    tracks: &[Track],
    strategy: Strategy,
    tolerance: f64,
    options: &SequenceOptions,
) -> GeneratedPlaylist {
    let options = options.normalized();
    let prepared = prepare(tracks, assigner);
    if prepared.dropped > 0 {
        info!(
            "Dropped {} of {} tracks without a usable tempo or key",
            prepared.dropped,
            tracks.len()
        );
    }

    debug!(
        "Sequencing {} tracks with {} (tolerance {:.1} BPM)",
        prepared.tracks.len(),
        strategy,
        tolerance
    );
    let ordered = strategy
        .implementation()
        .arrange(&prepared.tracks, tolerance, &options);
    let quality = evaluate(&ordered, tolerance, &options);

    info!(
        "{}: {} tracks, overall quality {:.3}",
        strategy,
        ordered.len(),
        quality.overall_score
    );

    GeneratedPlaylist {
        strategy,
        tracks: ordered,
        quality,
        dropped: prepared.dropped,
    }
}

/// Run every registered strategy and report the quality of each
pub fn benchmark(
    tracks: &[Track],
    tolerance: f64,
    options: &SequenceOptions,
) -> BTreeMap<&'static str, QualityReport> {
    let assigner = LookupKeyAssigner::new();
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let playlist = generate_with(&assigner, tracks, strategy, tolerance, options);
            debug!(
                "Benchmark {}: overall {:.3}",
                strategy.name(),
                playlist.quality.overall_score
            );
            (strategy.name(), playlist.quality)
        })
        .collect()
}

/// Strategy with the highest overall score in a benchmark (first in
/// registry order on ties)
pub fn best_strategy(results: &BTreeMap<&'static str, QualityReport>) -> Option<Strategy> {
    let mut best: Option<(Strategy, f64)> = None;
    for strategy in Strategy::ALL {
        if let Some(report) = results.get(strategy.name()) {
            if best.map_or(true, |(_, score)| report.overall_score > score) {
                best = Some((strategy, report.overall_score));
            }
        }
    }
    best.map(|(strategy, _)| strategy)
}
