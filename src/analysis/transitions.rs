//! Transition advice
//!
//! Turns an ordered sequence into one mixing brief per adjacent pair:
//! where to start fading the outgoing track, where the incoming track
//! enters, how risky the blend is, and a short note for the DJ.

use crate::analysis::metrics::enhanced_compatibility;
use crate::config::SequenceOptions;
use crate::types::{RiskLevel, Track, TrackRef, TransitionRecommendation};

/// Shortest crossfade ever recommended
const MIN_OVERLAP_SECS: f64 = 4.0;
/// Overlap always allowed regardless of track length
const BASE_OVERLAP_CAP_SECS: f64 = 6.0;
/// Share of the shorter track an overlap may cover
const OVERLAP_DURATION_SHARE: f64 = 0.2;
/// Energy change that counts as a lift or a drop in the notes
const ENERGY_NOTE_THRESHOLD: i32 = 12;

/// Build one recommendation per adjacent pair of `tracks`.
pub fn advise(tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<TransitionRecommendation> {
    tracks
        .windows(2)
        .enumerate()
        .map(|(index, pair)| recommend(index, &pair[0], &pair[1], tolerance, options))
        .collect()
}

fn recommend(
    index: usize,
    from: &Track,
    to: &Track,
    tolerance: f64,
    options: &SequenceOptions,
) -> TransitionRecommendation {
    let overlap = effective_overlap(
        options.overlap_seconds,
        from.duration_seconds,
        to.duration_seconds,
    );

    let from_mix_in = resolve_mix_in(from, overlap);
    let mix_out = resolve_mix_out(from, from_mix_in, overlap);
    let mix_in = resolve_mix_in(to, overlap);

    let fade_out_start = (mix_out - overlap).max(0.0);
    let fade_in_start = (mix_in - overlap / 2.0).max(0.0);

    let metrics = enhanced_compatibility(from, to, tolerance, None, options);
    let compatibility = (metrics.overall_score * 100.0).round().clamp(0.0, 100.0) as u8;
    let bpm_delta = to.bpm - from.bpm;
    let energy_delta = to.energy as i32 - from.energy as i32;
    let bpm_out_of_range = !(bpm_delta.abs() <= tolerance);

    TransitionRecommendation {
        index,
        from_track: TrackRef::from(from),
        to_track: TrackRef::from(to),
        fade_out_start: round2(fade_out_start),
        fade_out_end: round2(mix_out),
        fade_in_start: round2(fade_in_start),
        mix_entry: round2(mix_in),
        overlap_seconds: round2(mix_out - fade_out_start),
        bpm_delta: round2(bpm_delta),
        energy_delta,
        compatibility,
        risk_level: risk_level(compatibility, energy_delta, bpm_out_of_range),
        notes: notes(energy_delta, bpm_out_of_range, metrics.harmonic_score),
    }
}

/// Clamp the requested overlap to what the two track lengths allow
pub fn effective_overlap(requested: f64, from_duration: f64, to_duration: f64) -> f64 {
    let shorter = usable_duration(from_duration).min(usable_duration(to_duration));
    let cap = BASE_OVERLAP_CAP_SECS.max(OVERLAP_DURATION_SHARE * shorter);
    requested.min(cap).max(MIN_OVERLAP_SECS)
}

fn usable_duration(duration: f64) -> f64 {
    if duration.is_finite() {
        duration.max(0.0)
    } else {
        0.0
    }
}

/// Stored mix-in point, or a point early in the intro if none was computed
fn resolve_mix_in(track: &Track, overlap: f64) -> f64 {
    let duration = usable_duration(track.duration_seconds);
    let mix_in = if track.mix_in_point > 0.0 {
        track.mix_in_point
    } else {
        (0.1 * duration).min(MIN_OVERLAP_SECS.max(overlap / 2.0))
    };
    clamp_into(mix_in, duration)
}

/// Stored mix-out point, or a point just before the end if none was computed
fn resolve_mix_out(track: &Track, mix_in: f64, overlap: f64) -> f64 {
    let duration = usable_duration(track.duration_seconds);
    let mix_out = if track.mix_out_point > 0.0 {
        track.mix_out_point
    } else {
        (mix_in + MIN_OVERLAP_SECS).max(duration - (0.05 * duration).min(overlap))
    };
    clamp_into(mix_out, duration)
}

fn clamp_into(seconds: f64, duration: f64) -> f64 {
    if seconds.is_finite() {
        seconds.clamp(0.0, duration)
    } else {
        0.0
    }
}

fn risk_level(compatibility: u8, energy_delta: i32, bpm_out_of_range: bool) -> RiskLevel {
    let energy_jump = energy_delta.abs();
    if bpm_out_of_range || compatibility < 50 {
        RiskLevel::High
    } else if compatibility >= 80 && energy_jump <= 20 {
        RiskLevel::Low
    } else if energy_jump > 35 && compatibility < 70 {
        RiskLevel::High
    } else if compatibility >= 70 {
        RiskLevel::MediumLow
    } else {
        RiskLevel::Medium
    }
}

fn notes(energy_delta: i32, bpm_out_of_range: bool, harmonic_score: u8) -> String {
    let energy = if energy_delta >= ENERGY_NOTE_THRESHOLD {
        "energy lift"
    } else if energy_delta <= -ENERGY_NOTE_THRESHOLD {
        "energy drop"
    } else {
        "steady energy"
    };
    let tempo = if bpm_out_of_range {
        "beatmatch manually"
    } else {
        "tempo within range"
    };
    let harmonic = if harmonic_score >= 80 {
        "harmonic match"
    } else if harmonic_score >= 60 {
        "workable key change"
    } else {
        "key clash, keep the blend short"
    };
    [energy, tempo, harmonic].join("; ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
