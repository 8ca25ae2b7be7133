//! Curve-shaped strategies
//!
//! These order the set by a tempo or energy profile rather than by
//! track-to-track harmonic fit (Peak-Time Enhanced adds a light harmonic
//! smoothing pass on top of its curve).

use crate::analysis::compatibility::compatibility;
use crate::config::SequenceOptions;
use crate::strategies::collect_order;
use crate::strategies::traits::OrderingStrategy;
use crate::types::Track;
use std::cmp::Ordering;
use std::f64::consts::PI;

const PEAK_TEMPO_WEIGHT: f64 = 0.45;
const PEAK_ENERGY_WEIGHT: f64 = 0.55;
/// Exponent of the build-up side of the asymmetric peak curve (convex)
const BUILD_EXPONENT: f64 = 1.5;
/// Exponent of the release side of the asymmetric peak curve (concave)
const RELEASE_EXPONENT: f64 = 0.7;
const SMOOTHING_PASSES: usize = 3;
/// Largest energy jump a smoothing swap may leave behind (exclusive)
const MAX_SMOOTHING_ENERGY_JUMP: i32 = 20;

/// Slowest to fastest
pub struct WarmUp;

impl OrderingStrategy for WarmUp {
    fn arrange(&self, tracks: &[Track], _tolerance: f64, _options: &SequenceOptions) -> Vec<Track> {
        let mut ordered = tracks.to_vec();
        ordered.sort_by(|a, b| a.bpm.total_cmp(&b.bpm));
        ordered
    }

    fn name(&self) -> &'static str {
        "warm-up"
    }
}

/// Fastest to slowest
pub struct CoolDown;

impl OrderingStrategy for CoolDown {
    fn arrange(&self, tracks: &[Track], _tolerance: f64, _options: &SequenceOptions) -> Vec<Track> {
        let mut ordered = tracks.to_vec();
        ordered.sort_by(|a, b| b.bpm.total_cmp(&a.bpm));
        ordered
    }

    fn name(&self) -> &'static str {
        "cool-down"
    }
}

/// One symmetric build-and-release arc.
///
/// Tracks are ranked by a blend of normalised tempo and energy; the
/// lowest-ranked anchor both ends and the highest lands mid-set.
pub struct PeakTime;

impl OrderingStrategy for PeakTime {
    fn arrange(&self, tracks: &[Track], _tolerance: f64, _options: &SequenceOptions) -> Vec<Track> {
        let n = tracks.len();
        if n < 2 {
            return tracks.to_vec();
        }

        let tempo = normalize(&tracks.iter().map(|t| t.bpm).collect::<Vec<_>>());
        let energy = normalize(&tracks.iter().map(|t| t.energy as f64).collect::<Vec<_>>());
        let scores: Vec<f64> = tempo
            .iter()
            .zip(&energy)
            .map(|(t, e)| PEAK_TEMPO_WEIGHT * t + PEAK_ENERGY_WEIGHT * e)
            .collect();

        let mut by_score: Vec<usize> = (0..n).collect();
        by_score.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let curve: Vec<f64> = (0..n)
            .map(|pos| (pos as f64 / (n - 1) as f64 * PI).sin())
            .collect();

        let order = fill_positions(&rank_positions(&curve), &by_score);
        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "peak-time"
    }
}

/// Asymmetric arc peaking at `peak_position`, followed by a local search
/// that swaps tracks two apart when that improves harmonic flow without a
/// big energy jump.
pub struct PeakTimeEnhanced;

impl OrderingStrategy for PeakTimeEnhanced {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        let n = tracks.len();
        if n < 2 {
            return tracks.to_vec();
        }

        let curve = asymmetric_curve(n, options.peak_position);
        // Unlike PeakTime, tracks go onto the curve in input order, not by score
        let input_order: Vec<usize> = (0..n).collect();
        let mut order = fill_positions(&rank_positions(&curve), &input_order);

        smooth_with_swaps(tracks, &mut order, tolerance, options);
        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "peak-time-enhanced"
    }
}

/// Target intensity for each position: convex build to the peak, concave
/// release after it.
pub fn asymmetric_curve(n: usize, peak_position: f64) -> Vec<f64> {
    let len = n as f64;
    let peak = len * peak_position;
    (0..n)
        .map(|i| {
            let i = i as f64;
            if i < peak {
                (i / peak).powf(BUILD_EXPONENT)
            } else {
                1.0 - ((i - peak) / (len * (1.0 - peak_position))).powf(RELEASE_EXPONENT)
            }
        })
        .collect()
}

fn smooth_with_swaps(tracks: &[Track], order: &mut [usize], tolerance: f64, options: &SequenceOptions) {
    let n = order.len();
    if n < 3 {
        return;
    }

    let pair_range = |i: usize| i.saturating_sub(1)..(i + 3).min(n - 1);
    let flow = |order: &[usize], i: usize| -> u32 {
        pair_range(i)
            .map(|k| compatibility(&tracks[order[k]], &tracks[order[k + 1]], tolerance, options) as u32)
            .sum()
    };
    let max_jump = |order: &[usize], i: usize| -> i32 {
        pair_range(i)
            .map(|k| (tracks[order[k]].energy as i32 - tracks[order[k + 1]].energy as i32).abs())
            .max()
            .unwrap_or(0)
    };

    for _ in 0..SMOOTHING_PASSES {
        let mut swapped = false;
        for i in 0..n - 2 {
            let before = flow(order, i);
            order.swap(i, i + 2);
            if flow(order, i) > before && max_jump(order, i) < MAX_SMOOTHING_ENERGY_JUMP {
                swapped = true;
            } else {
                order.swap(i, i + 2);
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Energy alternating around the median: middle track first, then
/// next-higher and next-lower in turn.
pub struct EnergyWave;

impl OrderingStrategy for EnergyWave {
    fn arrange(&self, tracks: &[Track], _tolerance: f64, _options: &SequenceOptions) -> Vec<Track> {
        let n = tracks.len();
        if n < 2 {
            return tracks.to_vec();
        }

        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by_key(|&i| tracks[i].energy);

        let mid = n / 2;
        let mut lower = (0..mid).rev();
        let mut higher = mid + 1..n;
        let mut order = Vec::with_capacity(n);
        order.push(sorted[mid]);

        let mut rising = true;
        while order.len() < n {
            let next = if rising {
                higher.next().or_else(|| lower.next())
            } else {
                lower.next().or_else(|| higher.next())
            };
            match next {
                Some(rank) => order.push(sorted[rank]),
                None => break,
            }
            rising = !rising;
        }

        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "energy-wave"
    }
}

/// Min-max normalise into 0-1; a set with no spread maps to 0.5 everywhere
fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return vec![0.5; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

/// Positions sorted by ascending curve value, ties keeping the lower
/// position first.
///
/// Values are compared at 1e-9 resolution so mirror-image positions on a
/// symmetric curve tie exactly.
fn rank_positions(curve: &[f64]) -> Vec<usize> {
    let key = |v: f64| (v * 1e9).round();
    let mut positions: Vec<usize> = (0..curve.len()).collect();
    positions.sort_by(|&a, &b| key(curve[a]).partial_cmp(&key(curve[b])).unwrap_or(Ordering::Equal));
    positions
}

/// Put the i-th track of `tracks_in_rank_order` at the i-th ranked position
fn fill_positions(ranked_positions: &[usize], tracks_in_rank_order: &[usize]) -> Vec<usize> {
    let mut order = vec![0; ranked_positions.len()];
    for (&pos, &track) in ranked_positions.iter().zip(tracks_in_rank_order) {
        order[pos] = track;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::*;

    fn by_energy(energies: &[u8]) -> Vec<Track> {
        energies
            .iter()
            .enumerate()
            .map(|(i, &e)| Track::new(format!("t{}", i), 124.0, "8A", e))
            .collect()
    }

    fn energies(tracks: &[Track]) -> Vec<u8> {
        tracks.iter().map(|t| t.energy).collect()
    }

    #[test]
    fn test_warm_up_sorts_by_tempo() {
        let tracks = vec![
            Track::new("a", 130.0, "8A", 50),
            Track::new("b", 120.0, "8A", 50),
            Track::new("c", 128.0, "8A", 50),
        ];
        let out = WarmUp.arrange(&tracks, 6.0, &SequenceOptions::default());
        let tempos: Vec<f64> = out.iter().map(|t| t.bpm).collect();
        assert_eq!(tempos, vec![120.0, 128.0, 130.0]);
    }

    #[test]
    fn test_cool_down_sorts_descending_and_is_stable() {
        let tracks = vec![
            Track::new("a", 120.0, "8A", 50),
            Track::new("b", 130.0, "8A", 50),
            Track::new("c", 120.0, "8A", 50),
        ];
        let out = CoolDown.arrange(&tracks, 6.0, &SequenceOptions::default());
        assert_eq!(titles(&out), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_peak_time_builds_and_releases() {
        let tracks = by_energy(&[50, 10, 90, 30, 70]);
        let out = PeakTime.arrange(&tracks, 6.0, &SequenceOptions::default());
        // lowest two anchor the ends, highest in the middle
        assert_eq!(energies(&out), vec![10, 50, 90, 70, 30]);
    }

    #[test]
    fn test_peak_time_flat_set_keeps_input_order() {
        let tracks = by_energy(&[60, 60, 60, 60]);
        let out = PeakTime.arrange(&tracks, 6.0, &SequenceOptions::default());
        assert!(is_permutation(&tracks, &out));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_asymmetric_curve_shape() {
        let curve = asymmetric_curve(10, 0.7);
        assert_eq!(curve[0], 0.0);
        // rises up to the peak at position 7
        for w in curve[..8].windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!((curve[7] - 1.0).abs() < 1e-9);
        // then falls
        for w in curve[7..].windows(2) {
            assert!(w[1] < w[0]);
        }
        assert!(curve.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_peak_time_enhanced_maps_input_order_onto_curve() {
        // Identical keys, so no smoothing swap can improve anything
        let tracks = by_energy(&[90, 10, 50, 70, 30]);
        let out = PeakTimeEnhanced.arrange(&tracks, 6.0, &SequenceOptions::default());

        let ranked = rank_positions(&asymmetric_curve(5, 0.7));
        assert_eq!(ranked, vec![0, 1, 2, 4, 3]);
        for (input, &pos) in ranked.iter().enumerate() {
            assert_eq!(out[pos].title, format!("t{}", input));
        }
    }

    #[test]
    fn test_smoothing_swap_improves_flow() {
        let tracks = vec![
            Track::new("a", 124.0, "8A", 50),
            Track::new("b", 124.0, "3B", 50),
            Track::new("c", 124.0, "9A", 50),
            Track::new("d", 124.0, "8A", 50),
        ];
        let mut order = vec![0, 1, 2, 3];
        smooth_with_swaps(&tracks, &mut order, 6.0, &SequenceOptions::default());
        // 9A, 8A, 8A, 3B
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_smoothing_respects_energy_jump() {
        let tracks = vec![
            Track::new("a", 124.0, "8A", 50),
            Track::new("b", 124.0, "3B", 50),
            Track::new("c", 124.0, "9A", 50),
            Track::new("d", 124.0, "8A", 80),
        ];
        let mut order = vec![0, 1, 2, 3];
        smooth_with_swaps(&tracks, &mut order, 6.0, &SequenceOptions::default());
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_energy_wave_alternates() {
        let tracks = by_energy(&[50, 10, 40, 20, 30]);
        let out = EnergyWave.arrange(&tracks, 6.0, &SequenceOptions::default());
        assert_eq!(energies(&out), vec![30, 40, 20, 50, 10]);
    }

    #[test]
    fn test_energy_wave_even_count() {
        let tracks = by_energy(&[10, 20, 30, 40]);
        let out = EnergyWave.arrange(&tracks, 6.0, &SequenceOptions::default());
        // middle is rank 2 (30); only one higher, then the lower side drains
        assert_eq!(energies(&out), vec![30, 40, 20, 10]);
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize(&[5.0, 5.0]), vec![0.5, 0.5]);
        assert_eq!(normalize(&[0.0, 5.0, 10.0]), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_rank_positions_ties_keep_lower_first() {
        let curve: Vec<f64> = (0..5).map(|p| (p as f64 / 4.0 * PI).sin()).collect();
        assert_eq!(rank_positions(&curve), vec![0, 4, 1, 3, 2]);
    }
}
