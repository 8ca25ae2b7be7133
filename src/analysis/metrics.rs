//! Multi-factor transition metrics
//!
//! Combines harmonic compatibility with tempo closeness, energy direction
//! and genre affinity into a single 0-1 transition score.

use crate::analysis::compatibility::{compatibility, within_tolerance};
use crate::config::SequenceOptions;
use crate::types::{EnergyDirection, Track, TransitionMetrics};

pub const HARMONIC_WEIGHT: f64 = 0.4;
pub const BPM_WEIGHT: f64 = 0.25;
pub const ENERGY_WEIGHT: f64 = 0.25;
pub const GENRE_WEIGHT: f64 = 0.1;

const GENRE_SAME: f64 = 1.0;
const GENRE_UNKNOWN: f64 = 0.8;
const GENRE_DIFFERENT: f64 = 0.7;

/// Score the transition from `a` into `b`.
///
/// `direction` expresses the desired energy movement; `None` simply
/// prefers small energy changes.
pub fn enhanced_compatibility(
    a: &Track,
    b: &Track,
    tolerance: f64,
    direction: Option<EnergyDirection>,
    options: &SequenceOptions,
) -> TransitionMetrics {
    let harmonic_score = compatibility(a, b, tolerance, options);
    let bpm_smoothness = bpm_smoothness(a.bpm, b.bpm, tolerance);
    let energy_flow = energy_flow(a.energy, b.energy, direction);
    let genre_compatibility = genre_compatibility(a, b);

    let overall_score = HARMONIC_WEIGHT * (harmonic_score as f64 / 100.0)
        + BPM_WEIGHT * bpm_smoothness
        + ENERGY_WEIGHT * energy_flow
        + GENRE_WEIGHT * genre_compatibility;

    TransitionMetrics {
        harmonic_score,
        bpm_smoothness,
        energy_flow,
        genre_compatibility,
        overall_score,
    }
}

/// Exponential falloff of tempo difference inside the tolerance band
pub fn bpm_smoothness(a_bpm: f64, b_bpm: f64, tolerance: f64) -> f64 {
    if !within_tolerance(a_bpm, b_bpm, tolerance) {
        return 0.0;
    }
    let delta = (a_bpm - b_bpm).abs();
    if tolerance <= 0.0 {
        // Only an exact match survives a zero tolerance
        return if delta == 0.0 { 1.0 } else { 0.0 };
    }
    (-delta / (tolerance / 2.0)).exp()
}

/// How well the energy change matches the requested direction, 0-1
pub fn energy_flow(a_energy: u8, b_energy: u8, direction: Option<EnergyDirection>) -> f64 {
    let delta = b_energy as f64 - a_energy as f64;
    let flow = match direction {
        Some(EnergyDirection::Up) => delta / 50.0,
        Some(EnergyDirection::Down) => -delta / 50.0,
        Some(EnergyDirection::Maintain) => 1.0 - delta.abs() / 50.0,
        None => 1.0 - delta.abs() / 100.0,
    };
    flow.clamp(0.0, 1.0)
}

pub fn genre_compatibility(a: &Track, b: &Track) -> f64 {
    if a.genre.trim().eq_ignore_ascii_case(b.genre.trim()) {
        GENRE_SAME
    } else if a.has_unknown_genre() || b.has_unknown_genre() {
        GENRE_UNKNOWN
    } else {
        GENRE_DIFFERENT
    }
}
