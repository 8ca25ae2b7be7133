//! Playlist ordering strategies
//!
//! Ten interchangeable heuristics, grouped into two families:
//!
//! - Greedy (`greedy`, `genre`): build the set one transition at a time,
//!   always taking the best-scoring next track
//! - Curve (`curve`, `journey`): shape the set's tempo/energy profile
//!
//! None of them guarantees a globally optimal order.

pub mod curve;
pub mod genre;
pub mod greedy;
pub mod journey;
pub mod traits;

use crate::error::DjflowError;
use crate::types::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use curve::{CoolDown, EnergyWave, PeakTime, PeakTimeEnhanced, WarmUp};
pub use genre::GenreFlow;
pub use greedy::{Consistent, HarmonicFlow, HarmonicFlowEnhanced};
pub use journey::EmotionalJourney;
pub use traits::OrderingStrategy;

/// The fixed registry of ordering strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    HarmonicFlow,
    HarmonicFlowEnhanced,
    Consistent,
    GenreFlow,
    WarmUp,
    CoolDown,
    PeakTime,
    PeakTimeEnhanced,
    EnergyWave,
    EmotionalJourney,
}

impl Strategy {
    /// Every registered strategy, in registry order
    pub const ALL: [Strategy; 10] = [
        Strategy::HarmonicFlow,
        Strategy::HarmonicFlowEnhanced,
        Strategy::Consistent,
        Strategy::GenreFlow,
        Strategy::WarmUp,
        Strategy::CoolDown,
        Strategy::PeakTime,
        Strategy::PeakTimeEnhanced,
        Strategy::EnergyWave,
        Strategy::EmotionalJourney,
    ];

    /// Stable registry name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::HarmonicFlow => "harmonic-flow",
            Strategy::HarmonicFlowEnhanced => "harmonic-flow-enhanced",
            Strategy::Consistent => "consistent",
            Strategy::GenreFlow => "genre-flow",
            Strategy::WarmUp => "warm-up",
            Strategy::CoolDown => "cool-down",
            Strategy::PeakTime => "peak-time",
            Strategy::PeakTimeEnhanced => "peak-time-enhanced",
            Strategy::EnergyWave => "energy-wave",
            Strategy::EmotionalJourney => "emotional-journey",
        }
    }

    /// One-line description for selectors and help output
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::HarmonicFlow => "Greedy chain of the most key-compatible next track",
            Strategy::HarmonicFlowEnhanced => "Harmonic chain with a sampled start and two-step look-ahead",
            Strategy::Consistent => "Smallest tempo/energy/key jump at every step",
            Strategy::GenreFlow => "Genre blocks in affinity order, each smoothed internally",
            Strategy::WarmUp => "Tempo rising from slowest to fastest",
            Strategy::CoolDown => "Tempo falling from fastest to slowest",
            Strategy::PeakTime => "Single build-and-release arc peaking mid-set",
            Strategy::PeakTimeEnhanced => "Asymmetric arc with a configurable peak, locally smoothed",
            Strategy::EnergyWave => "Energy alternating around the median",
            Strategy::EmotionalJourney => "Opening, building, peak and resolution phases",
        }
    }

    /// Look up a strategy by name.
    ///
    /// Case, underscores and spaces are ignored ("Peak_Time" == "peak-time").
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL.into_iter().find(|s| s.name() == normalized)
    }

    /// Implementation backing this registry entry
    pub fn implementation(&self) -> &'static dyn OrderingStrategy {
        match self {
            Strategy::HarmonicFlow => &HarmonicFlow,
            Strategy::HarmonicFlowEnhanced => &HarmonicFlowEnhanced,
            Strategy::Consistent => &Consistent,
            Strategy::GenreFlow => &GenreFlow,
            Strategy::WarmUp => &WarmUp,
            Strategy::CoolDown => &CoolDown,
            Strategy::PeakTime => &PeakTime,
            Strategy::PeakTimeEnhanced => &PeakTimeEnhanced,
            Strategy::EnergyWave => &EnergyWave,
            Strategy::EmotionalJourney => &EmotionalJourney,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DjflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DjflowError::UnknownStrategy(s.to_string()))
    }
}

// =============================================================================
// Shared selection helpers
// =============================================================================

/// Materialise an index order as owned tracks
pub(crate) fn collect_order(tracks: &[Track], order: &[usize]) -> Vec<Track> {
    order.iter().map(|&i| tracks[i].clone()).collect()
}

/// Position of the first maximum (ties keep the earliest)
pub(crate) fn first_max_by<T, F>(items: &[T], mut score: F) -> Option<usize>
where
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (pos, item) in items.iter().enumerate() {
        let value = score(item);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Position of the first minimum (ties keep the earliest)
pub(crate) fn first_min_by<T, F>(items: &[T], mut score: F) -> Option<usize>
where
    F: FnMut(&T) -> f64,
{
    first_max_by(items, |item| -score(item))
}

/// Up to `max` indices spread evenly over `0..len`
pub(crate) fn evenly_spaced(len: usize, max: usize) -> Vec<usize> {
    if len <= max {
        (0..len).collect()
    } else {
        (0..max).map(|i| i * len / max).collect()
    }
}

/// Greedily chain `pool` from `start`, always taking the remaining track
/// with the highest `score(tail, candidate)`
pub(crate) fn greedy_chain<F>(tracks: &[Track], pool: Vec<usize>, start: usize, mut score: F) -> Vec<usize>
where
    F: FnMut(&Track, &Track) -> f64,
{
    let mut remaining: Vec<usize> = pool.into_iter().filter(|&i| i != start).collect();
    let mut order = Vec::with_capacity(remaining.len() + 1);
    order.push(start);

    while !remaining.is_empty() {
        let tail = &tracks[order[order.len() - 1]];
        let Some(pos) = first_max_by(&remaining, |&i| score(tail, &tracks[i])) else {
            break;
        };
        order.push(remaining.remove(pos));
    }
    order
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::Track;

    pub fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    /// Same multiset of titles
    pub fn is_permutation(input: &[Track], output: &[Track]) -> bool {
        let mut a = titles(input);
        let mut b = titles(output);
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    /// A small, varied set of tracks
    pub fn sample_set() -> Vec<Track> {
        vec![
            Track::new("t0", 124.0, "8A", 55).with_genre("House"),
            Track::new("t1", 126.0, "9A", 70).with_genre("House"),
            Track::new("t2", 122.0, "3B", 40).with_genre("Techno"),
            Track::new("t3", 128.0, "8B", 85).with_genre("Techno"),
            Track::new("t4", 125.0, "10A", 62),
            Track::new("t5", 127.0, "12A", 90).with_genre("Tech House"),
            Track::new("t6", 123.0, "7A", 35).with_genre("House"),
            Track::new("t7", 129.0, "9B", 78).with_genre("Trance"),
        ]
    }
}
