//! Sequencing options shared by every strategy

use crate::error::{DjflowError, Result};
use crate::types::EnergyDirection;
use serde::{Deserialize, Serialize};

/// Energy shaping for the Emotional Journey strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyProfile {
    /// Opening and building rise, peak holds, resolution falls
    Auto,
    /// Every phase follows the same direction
    Fixed(EnergyDirection),
}

impl JourneyProfile {
    /// Direction target for each of the four phases
    /// (opening, building, peak, resolution)
    pub fn phase_directions(&self) -> [EnergyDirection; 4] {
        match self {
            JourneyProfile::Auto => [
                EnergyDirection::Up,
                EnergyDirection::Up,
                EnergyDirection::Maintain,
                EnergyDirection::Down,
            ],
            JourneyProfile::Fixed(direction) => [*direction; 4],
        }
    }
}

/// Tuning knobs for ordering, scoring and transition advice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// 1-10; higher punishes unrelated keys harder
    pub harmonic_strictness: u8,
    /// Accept the +4 / +7 "energy jump" key moves
    pub allow_experimental: bool,
    /// Group by genre in Genre Flow (otherwise Harmonic Flow is used)
    pub genre_mixing: bool,
    /// 0-1; higher keeps genres further apart
    pub genre_weight: f64,
    /// Fraction of the set at which Peak-Time Enhanced peaks (exclusive 0-1)
    pub peak_position: f64,
    pub journey: JourneyProfile,
    /// Requested crossfade length in seconds
    pub overlap_seconds: f64,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            harmonic_strictness: 7,
            allow_experimental: true,
            genre_mixing: true,
            genre_weight: 0.3,
            peak_position: 0.70,
            journey: JourneyProfile::Auto,
            overlap_seconds: 16.0,
        }
    }
}

const MIN_PEAK_POSITION: f64 = 0.05;
const MAX_PEAK_POSITION: f64 = 0.95;

impl SequenceOptions {
    /// Reject values outside their documented range
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.harmonic_strictness) {
            return Err(DjflowError::out_of_range(
                "harmonic_strictness",
                self.harmonic_strictness,
                "1-10",
            ));
        }
        if !(0.0..=1.0).contains(&self.genre_weight) {
            return Err(DjflowError::out_of_range("genre_weight", self.genre_weight, "0.0-1.0"));
        }
        if !(self.peak_position > 0.0 && self.peak_position < 1.0) {
            return Err(DjflowError::out_of_range(
                "peak_position",
                self.peak_position,
                "strictly between 0.0 and 1.0",
            ));
        }
        if !(self.overlap_seconds.is_finite() && self.overlap_seconds >= 0.0) {
            return Err(DjflowError::out_of_range(
                "overlap_seconds",
                self.overlap_seconds,
                "a non-negative number of seconds",
            ));
        }
        Ok(())
    }

    /// Clamp every field into range so the engine never sees a bad value
    pub fn normalized(&self) -> Self {
        let finite_or = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };
        let defaults = Self::default();
        Self {
            harmonic_strictness: self.harmonic_strictness.clamp(1, 10),
            allow_experimental: self.allow_experimental,
            genre_mixing: self.genre_mixing,
            genre_weight: finite_or(self.genre_weight, defaults.genre_weight).clamp(0.0, 1.0),
            peak_position: finite_or(self.peak_position, defaults.peak_position)
                .clamp(MIN_PEAK_POSITION, MAX_PEAK_POSITION),
            journey: self.journey,
            overlap_seconds: finite_or(self.overlap_seconds, defaults.overlap_seconds).max(0.0),
        }
    }
}
