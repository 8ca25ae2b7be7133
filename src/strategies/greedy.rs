//! Greedy harmonic strategies
//!
//! Each one grows the playlist from a start track, picking the best next
//! track against the current tail. They differ in how the start is chosen
//! and in what "best" means.

use crate::analysis::compatibility::compatibility;
use crate::config::SequenceOptions;
use crate::strategies::traits::OrderingStrategy;
use crate::strategies::{collect_order, evenly_spaced, first_max_by, first_min_by, greedy_chain};
use crate::types::Track;

/// Start candidates sampled by the enhanced harmonic strategy
const START_CANDIDATES: usize = 30;
/// Partners each start candidate is scored against
const START_PARTNERS: usize = 20;
/// Weight of the second step in the look-ahead
const LOOKAHEAD_DISCOUNT: f64 = 0.7;
/// Extra cost for a transition with no harmonic or tempo compatibility
const INCOMPATIBLE_PENALTY: f64 = 10.0;

/// Start at the slowest track and always follow with the most compatible
/// remaining one.
pub struct HarmonicFlow;

impl OrderingStrategy for HarmonicFlow {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        if tracks.len() < 2 {
            return tracks.to_vec();
        }
        let order = harmonic_flow_order(tracks, tolerance, options);
        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "harmonic-flow"
    }
}

fn harmonic_flow_order(tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<usize> {
    let start = first_min_by(tracks, |t| t.bpm).unwrap_or(0);
    greedy_chain(tracks, (0..tracks.len()).collect(), start, |tail, next| {
        compatibility(tail, next, tolerance, options) as f64
    })
}

/// Harmonic chaining with a sampled start track and two-step look-ahead.
pub struct HarmonicFlowEnhanced;

impl OrderingStrategy for HarmonicFlowEnhanced {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        if tracks.len() < 2 {
            return tracks.to_vec();
        }

        let score = |a: usize, b: usize| compatibility(&tracks[a], &tracks[b], tolerance, options) as f64;

        let start = best_start(tracks.len(), &score);
        let mut remaining: Vec<usize> = (0..tracks.len()).filter(|&i| i != start).collect();
        let mut order = vec![start];

        while !remaining.is_empty() {
            let tail = order[order.len() - 1];
            let pos = lookahead_choice(tail, &remaining, &score);
            order.push(remaining.remove(pos));
        }

        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "harmonic-flow-enhanced"
    }
}

/// Pick the start whose mean positive compatibility with a spread of
/// partners is highest.
fn best_start(n: usize, score: &impl Fn(usize, usize) -> f64) -> usize {
    let candidates = evenly_spaced(n, START_CANDIDATES);
    let pos = first_max_by(&candidates, |&candidate| {
        let others: Vec<usize> = (0..n).filter(|&i| i != candidate).collect();
        let positive: Vec<f64> = evenly_spaced(others.len(), START_PARTNERS)
            .into_iter()
            .map(|k| score(candidate, others[k]))
            .filter(|&s| s > 0.0)
            .collect();
        if positive.is_empty() {
            0.0
        } else {
            positive.iter().sum::<f64>() / positive.len() as f64
        }
    });
    pos.map(|p| candidates[p]).unwrap_or(0)
}

/// Choose the next track by `immediate + 0.7 * best follow-up`, skipping
/// candidates that cannot follow the tail at all.
fn lookahead_choice(tail: usize, remaining: &[usize], score: &impl Fn(usize, usize) -> f64) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (pos, &candidate) in remaining.iter().enumerate() {
        let immediate = score(tail, candidate);
        if immediate <= 0.0 {
            continue;
        }
        let follow_up = remaining
            .iter()
            .filter(|&&other| other != candidate)
            .map(|&other| score(candidate, other))
            .fold(0.0, f64::max);
        let total = immediate + LOOKAHEAD_DISCOUNT * follow_up;
        if best.map_or(true, |(_, b)| total > b) {
            best = Some((pos, total));
        }
    }

    match best {
        Some((pos, _)) => pos,
        // Nothing can follow the tail: fall back to the best single step
        None => first_max_by(remaining, |&candidate| score(tail, candidate)).unwrap_or(0),
    }
}

/// Start near the set's average and always take the smallest combined
/// tempo/energy/key jump.
pub struct Consistent;

impl OrderingStrategy for Consistent {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        if tracks.len() < 2 {
            return tracks.to_vec();
        }

        let n = tracks.len() as f64;
        let mean_bpm = tracks.iter().map(|t| t.bpm).sum::<f64>() / n;
        let mean_energy = tracks.iter().map(|t| t.energy as f64).sum::<f64>() / n;
        let start = first_min_by(tracks, |t| {
            (t.bpm - mean_bpm).abs() + (t.energy as f64 - mean_energy).abs() / 5.0
        })
        .unwrap_or(0);

        let order = greedy_chain(tracks, (0..tracks.len()).collect(), start, |tail, next| {
            -transition_cost(tail, next, tolerance, options)
        });
        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "consistent"
    }
}

/// Cost of moving from `a` to `b`; lower is smoother
pub fn transition_cost(a: &Track, b: &Track, tolerance: f64, options: &SequenceOptions) -> f64 {
    let compat = compatibility(a, b, tolerance, options);
    let mut cost = (a.bpm - b.bpm).abs()
        + (a.energy as f64 - b.energy as f64).abs() / 5.0
        + (100.0 - compat as f64) / 8.0;
    if compat == 0 {
        cost += INCOMPATIBLE_PENALTY;
    }
    cost
}
