//! Sequence quality evaluation

use crate::analysis::compatibility::compatibility;
use crate::config::SequenceOptions;
use crate::types::{QualityReport, Track};

/// Score a finished sequence on harmonic flow, energy consistency and
/// tempo smoothness.
///
/// Sequences with fewer than two tracks have no transitions and score a
/// perfect 1.0 everywhere.
pub fn evaluate(tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> QualityReport {
    if tracks.len() < 2 {
        return QualityReport::vacuous();
    }

    let pairs = tracks.len() - 1;
    let (mut compat_sum, mut energy_sum, mut bpm_sum) = (0.0, 0.0, 0.0);
    for pair in tracks.windows(2) {
        compat_sum += compatibility(&pair[0], &pair[1], tolerance, options) as f64;
        energy_sum += (pair[1].energy as f64 - pair[0].energy as f64).abs();
        bpm_sum += (pair[1].bpm - pair[0].bpm).abs();
    }

    let avg_harmonic = compat_sum / pairs as f64;
    let avg_energy_jump = energy_sum / pairs as f64;
    let avg_bpm_jump = bpm_sum / pairs as f64;

    let harmonic_flow = avg_harmonic / 100.0;
    let energy_consistency = (1.0 - avg_energy_jump / 50.0).max(0.0);
    let bpm_smoothness = if tolerance <= 0.0 {
        if avg_bpm_jump == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        // NaN tempos (only possible when nothing was eligible) collapse to 0
        let smoothness = 1.0 - avg_bpm_jump / tolerance;
        if smoothness.is_nan() {
            0.0
        } else {
            smoothness.max(0.0)
        }
    };

    QualityReport {
        overall_score: 0.5 * harmonic_flow + 0.25 * energy_consistency + 0.25 * bpm_smoothness,
        harmonic_flow,
        energy_consistency,
        bpm_smoothness,
        avg_harmonic_score: Some(avg_harmonic),
        avg_energy_jump: Some(avg_energy_jump),
        avg_bpm_jump: Some(avg_bpm_jump),
    }
}
