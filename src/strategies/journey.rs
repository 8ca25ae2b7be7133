//! Emotional Journey: a set told in four phases
//!
//! The set is split by energy into opening (lowest 25%), building (next
//! 40%), peak (top 20%) and resolution (what is left between building and
//! peak). Each phase is chained greedily toward its own energy direction
//! and the phases are played in that order.

use crate::analysis::metrics::enhanced_compatibility;
use crate::config::SequenceOptions;
use crate::strategies::traits::OrderingStrategy;
use crate::strategies::{collect_order, first_max_by, first_min_by, greedy_chain};
use crate::types::{EnergyDirection, Track};

const OPENING_SHARE: f64 = 0.25;
const BUILDING_SHARE: f64 = 0.40;
const PEAK_SHARE: f64 = 0.20;

pub struct EmotionalJourney;

impl OrderingStrategy for EmotionalJourney {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        if tracks.len() < 2 {
            return tracks.to_vec();
        }

        let directions = options.journey.phase_directions();
        let mut order = Vec::with_capacity(tracks.len());
        for (phase, direction) in split_phases(tracks).into_iter().zip(directions) {
            order.extend(arrange_phase(tracks, phase, direction, tolerance, options));
        }
        collect_order(tracks, &order)
    }

    fn name(&self) -> &'static str {
        "emotional-journey"
    }
}

/// Split track indices into (opening, building, peak, resolution).
///
/// Every phase gets at least one track while tracks remain.
fn split_phases(tracks: &[Track]) -> [Vec<usize>; 4] {
    let n = tracks.len();
    let mut sorted: Vec<usize> = (0..n).collect();
    sorted.sort_by_key(|&i| tracks[i].energy);

    let share = |fraction: f64, available: usize| ((n as f64 * fraction) as usize).max(1).min(available);
    let opening = share(OPENING_SHARE, n);
    let building = share(BUILDING_SHARE, n - opening);
    let peak = share(PEAK_SHARE, n - opening - building);

    let peak_start = n - peak;
    [
        sorted[..opening].to_vec(),
        sorted[opening..opening + building].to_vec(),
        sorted[peak_start..].to_vec(),
        sorted[opening + building..peak_start].to_vec(),
    ]
}

/// Chain one phase greedily, preferring transitions that move energy in
/// `direction`
fn arrange_phase(
    tracks: &[Track],
    phase: Vec<usize>,
    direction: EnergyDirection,
    tolerance: f64,
    options: &SequenceOptions,
) -> Vec<usize> {
    let start = match direction {
        EnergyDirection::Up => first_min_by(&phase, |&i| tracks[i].energy as f64),
        EnergyDirection::Down => first_max_by(&phase, |&i| tracks[i].energy as f64),
        EnergyDirection::Maintain => (!phase.is_empty()).then(|| phase.len() / 2),
    };
    let Some(start) = start.map(|pos| phase[pos]) else {
        return vec![];
    };

    greedy_chain(tracks, phase, start, |tail, next| {
        enhanced_compatibility(tail, next, tolerance, Some(direction), options).overall_score
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JourneyProfile;
    use crate::strategies::test_support::*;

    fn ladder(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("t{}", i), 124.0, "8A", (i * 10) as u8))
            .collect()
    }

    #[test]
    fn test_phase_sizes() {
        let tracks = ladder(10);
        let [opening, building, peak, resolution] = split_phases(&tracks);
        assert_eq!(opening.len(), 2);
        assert_eq!(building.len(), 4);
        assert_eq!(peak.len(), 2);
        assert_eq!(resolution.len(), 2);
        // peak holds the two most energetic tracks
        assert!(peak.contains(&9) && peak.contains(&8));
    }

    #[test]
    fn test_small_sets_fill_phases_in_order() {
        let tracks = ladder(2);
        let [opening, building, peak, resolution] = split_phases(&tracks);
        assert_eq!(opening, vec![0]);
        assert_eq!(building, vec![1]);
        assert!(peak.is_empty());
        assert!(resolution.is_empty());

        let [o, b, p, r] = split_phases(&ladder(3));
        assert_eq!((o.len(), b.len(), p.len(), r.len()), (1, 1, 1, 0));
    }

    #[test]
    fn test_auto_journey_shape() {
        let tracks = ladder(10);
        let out = EmotionalJourney.arrange(&tracks, 6.0, &SequenceOptions::default());
        assert!(is_permutation(&tracks, &out));

        let energies: Vec<u8> = out.iter().map(|t| t.energy).collect();
        // Building starts low and takes the biggest lift first; the peak
        // holds from its middle track; the resolution falls.
        assert_eq!(energies, vec![0, 10, 20, 50, 30, 40, 90, 80, 70, 60]);
    }

    #[test]
    fn test_fixed_down_journey() {
        let tracks = ladder(8);
        let options = SequenceOptions {
            journey: JourneyProfile::Fixed(EnergyDirection::Down),
            ..Default::default()
        };
        let out = EmotionalJourney.arrange(&tracks, 6.0, &options);
        // opening phase (lowest two) is played high to low
        assert_eq!(out[0].energy, 10);
        assert_eq!(out[1].energy, 0);
    }
}
