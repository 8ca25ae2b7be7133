//! Input preparation: Camelot assignment and the eligibility filter

use crate::analysis::key::CamelotKey;
use crate::analysis::traits::KeyAssigner;
use crate::types::Track;
use tracing::{debug, warn};

/// A track can be sequenced only with a positive tempo and a valid
/// Camelot code
pub fn is_eligible(track: &Track) -> bool {
    track.bpm.is_finite() && track.bpm > 0.0 && CamelotKey::parse(&track.camelot).is_some()
}

/// Tracks ready for a strategy, plus how many were left out
#[derive(Debug, Clone)]
pub struct PreparedTracks {
    pub tracks: Vec<Track>,
    pub dropped: usize,
}

/// Fill missing Camelot codes and cap energy at 100, then drop tracks that
/// cannot be sequenced.
///
/// If no track qualifies the input comes back unchanged (with codes
/// assigned) rather than empty.
pub fn prepare(tracks: &[Track], assigner: &dyn KeyAssigner) -> PreparedTracks {
    let mut assigned = tracks.to_vec();
    let mut filled = 0;
    for track in &mut assigned {
        track.energy = track.energy.min(100);
        if assigner.assign(track) {
            filled += 1;
        }
    }
    if filled > 0 {
        debug!("Assigned Camelot codes to {} tracks using {}", filled, assigner.name());
    }

    let (eligible, ineligible): (Vec<Track>, Vec<Track>) =
        assigned.iter().cloned().partition(is_eligible);

    for track in &ineligible {
        debug!(
            "Dropping '{}' (bpm: {}, camelot: '{}')",
            track.display_name(),
            track.bpm,
            track.camelot
        );
    }

    if eligible.is_empty() && !assigned.is_empty() {
        warn!(
            "None of the {} tracks has a usable tempo and key; sequencing them as given",
            assigned.len()
        );
        return PreparedTracks {
            tracks: assigned,
            dropped: 0,
        };
    }

    PreparedTracks {
        tracks: eligible,
        dropped: ineligible.len(),
    }
}
