//! Core data types for djflow
//!
//! Tracks come in already analysed (tempo, key, energy, mix points); every
//! other type here is derived by the engine and handed back to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Genre label meaning "not set"
pub const UNKNOWN_GENRE: &str = "Unknown";

// =============================================================================
// Musical primitives
// =============================================================================

/// The 12 pitch classes in Western music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C#/Db
    D,
    Ds, // D#/Eb
    E,
    F,
    Fs, // F#/Gb
    G,
    Gs, // G#/Ab
    A,
    As, // A#/Bb
    B,
}

impl PitchClass {
    /// Convert from numeric index (0 = C, 1 = C#, ..., 11 = B)
    pub fn from_index(index: u8) -> Option<Self> {
        match index % 12 {
            0 => Some(PitchClass::C),
            1 => Some(PitchClass::Cs),
            2 => Some(PitchClass::D),
            3 => Some(PitchClass::Ds),
            4 => Some(PitchClass::E),
            5 => Some(PitchClass::F),
            6 => Some(PitchClass::Fs),
            7 => Some(PitchClass::G),
            8 => Some(PitchClass::Gs),
            9 => Some(PitchClass::A),
            10 => Some(PitchClass::As),
            11 => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Parse a note name such as "C", "F#", "Bb" or "Db".
    ///
    /// Flats are folded onto their enharmonic sharp.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let base: u8 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let index = match chars.as_str() {
            "" => base,
            "#" | "♯" => base + 1,
            "b" | "♭" => (base + 11) % 12,
            _ => return None,
        };
        Self::from_index(index)
    }

    /// Standard notation (e.g., "C", "F#", "A#")
    pub fn to_standard_notation(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }
}

/// Major or Minor scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

// =============================================================================
// Track representation
// =============================================================================

/// An analysed track as delivered by the analysis/import collaborators.
///
/// The engine never mutates a caller's track; it only clones, reorders and
/// (for missing Camelot codes) fills in a derived field on its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Caller-assigned identifier
    #[serde(default)]
    pub track_id: i32,
    /// Display title
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Tempo in beats per minute (must be > 0 to be sequenced)
    #[serde(default, deserialize_with = "lenient_bpm")]
    pub bpm: f64,
    /// Standard key name ("Am", "F#", "C Major"), used to fill `camelot`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Camelot code ("1A" - "12B"); empty means unknown
    #[serde(default)]
    pub camelot: String,
    /// Energy level 0-100
    #[serde(default)]
    pub energy: u8,
    #[serde(default = "unknown_genre")]
    pub genre: String,
    #[serde(default)]
    pub duration_seconds: f64,
    /// Mix-in point in seconds (0 = not computed)
    #[serde(default)]
    pub mix_in_point: f64,
    /// Mix-out point in seconds (0 = not computed)
    #[serde(default)]
    pub mix_out_point: f64,
    #[serde(default)]
    pub mix_in_bars: u32,
    #[serde(default)]
    pub mix_out_bars: u32,
}

fn unknown_genre() -> String {
    UNKNOWN_GENRE.to_string()
}

/// Accept a number, a numeric string or null. Anything unusable becomes 0.0
/// so the track is dropped at sequencing time instead of failing the load.
fn lenient_bpm<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let bpm = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(bpm.filter(|b| b.is_finite()).unwrap_or(0.0))
}

impl Track {
    /// Create a track with the fields the sequencer needs; everything else
    /// starts unset.
    pub fn new(title: impl Into<String>, bpm: f64, camelot: impl Into<String>, energy: u8) -> Self {
        Self {
            track_id: 0,
            title: title.into(),
            artist: None,
            bpm,
            key: None,
            camelot: camelot.into(),
            energy: energy.min(100),
            genre: unknown_genre(),
            duration_seconds: 0.0,
            mix_in_point: 0.0,
            mix_out_point: 0.0,
            mix_in_bars: 0,
            mix_out_bars: 0,
        }
    }

    pub fn with_id(mut self, track_id: i32) -> Self {
        self.track_id = track_id;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn with_mix_points(mut self, mix_in: f64, mix_out: f64) -> Self {
        self.mix_in_point = mix_in;
        self.mix_out_point = mix_out;
        self
    }

    /// Whether the genre label is the explicit "unset" sentinel (or blank)
    pub fn has_unknown_genre(&self) -> bool {
        let genre = self.genre.trim();
        genre.is_empty() || genre.eq_ignore_ascii_case(UNKNOWN_GENRE)
    }

    /// Get a display string for the track (Artist - Title)
    pub fn display_name(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", artist, self.title),
            None => self.title.clone(),
        }
    }
}

/// Lightweight pointer to a track inside a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRef {
    pub track_id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl From<&Track> for TrackRef {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.track_id,
            title: track.title.clone(),
            artist: track.artist.clone(),
        }
    }
}

// =============================================================================
// Closed rule vocabularies
// =============================================================================

/// Desired direction of energy across a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyDirection {
    Up,
    Down,
    Maintain,
}

/// How risky a transition is to perform live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    MediumLow,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::MediumLow => "medium-low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Derived results
// =============================================================================

/// Multi-factor score of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMetrics {
    /// Camelot compatibility 0-100
    pub harmonic_score: u8,
    /// 0.0 - 1.0
    pub bpm_smoothness: f64,
    /// 0.0 - 1.0
    pub energy_flow: f64,
    /// 0.0 - 1.0
    pub genre_compatibility: f64,
    /// Weighted sum of the four factors, 0.0 - 1.0
    pub overall_score: f64,
}

/// Mixing brief for one adjacent pair in a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecommendation {
    /// Position of the pair (0 = first into second track)
    pub index: usize,
    pub from_track: TrackRef,
    pub to_track: TrackRef,
    /// Seconds into the outgoing track where its fade begins
    pub fade_out_start: f64,
    /// Seconds into the outgoing track where it is fully out
    pub fade_out_end: f64,
    /// Seconds into the incoming track where its fade begins
    pub fade_in_start: f64,
    /// Seconds into the incoming track where it should be fully in
    pub mix_entry: f64,
    pub overlap_seconds: f64,
    /// Incoming minus outgoing tempo
    pub bpm_delta: f64,
    /// Incoming minus outgoing energy
    pub energy_delta: i32,
    /// Overall transition score scaled to 0-100
    pub compatibility: u8,
    pub risk_level: RiskLevel,
    pub notes: String,
}

/// Quality summary of a finished sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub overall_score: f64,
    pub harmonic_flow: f64,
    pub energy_consistency: f64,
    pub bpm_smoothness: f64,
    /// Mean pair compatibility; `null` for sequences with no transitions
    pub avg_harmonic_score: Option<f64>,
    pub avg_energy_jump: Option<f64>,
    pub avg_bpm_jump: Option<f64>,
}

impl QualityReport {
    /// Report for a sequence with no transitions at all
    pub fn vacuous() -> Self {
        Self {
            overall_score: 1.0,
            harmonic_flow: 1.0,
            energy_consistency: 1.0,
            bpm_smoothness: 1.0,
            avg_harmonic_score: None,
            avg_energy_jump: None,
            avg_bpm_jump: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_from_name() {
        assert_eq!(PitchClass::from_name("C"), Some(PitchClass::C));
        assert_eq!(PitchClass::from_name("f#"), Some(PitchClass::Fs));
        assert_eq!(PitchClass::from_name("Bb"), Some(PitchClass::As));
        assert_eq!(PitchClass::from_name("Cb"), Some(PitchClass::B));
        assert_eq!(PitchClass::from_name("H"), None);
        assert_eq!(PitchClass::from_name(""), None);
    }

    #[test]
    fn test_unknown_genre_detection() {
        let track = Track::new("a", 120.0, "8A", 50);
        assert!(track.has_unknown_genre());
        assert!(track.clone().with_genre("").has_unknown_genre());
        assert!(!track.with_genre("House").has_unknown_genre());
    }

    #[test]
    fn test_track_deserialize_defaults() {
        let track: Track = serde_json::from_str(r#"{"title": "Solo"}"#).unwrap();
        assert_eq!(track.genre, UNKNOWN_GENRE);
        assert_eq!(track.bpm, 0.0);
        assert!(track.camelot.is_empty());
    }

    #[test]
    fn test_track_bpm_tolerates_bad_values() {
        let tracks: Vec<Track> = serde_json::from_str(
            r#"[
                {"title": "Number", "bpm": 128.5},
                {"title": "Text", "bpm": " 126 "},
                {"title": "Null", "bpm": null},
                {"title": "Garbage", "bpm": "abc"},
                {"title": "Object", "bpm": {"value": 120}}
            ]"#,
        )
        .unwrap();
        let tempos: Vec<f64> = tracks.iter().map(|t| t.bpm).collect();
        assert_eq!(tempos, vec![128.5, 126.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_risk_level_serializes_kebab_case() {
        let json = serde_json::to_string(&RiskLevel::MediumLow).unwrap();
        assert_eq!(json, "\"medium-low\"");
        assert_eq!(RiskLevel::High.to_string(), "high");
    }

    #[test]
    fn test_vacuous_report_keeps_average_keys() {
        let json = serde_json::to_value(QualityReport::vacuous()).unwrap();
        for key in ["avg_harmonic_score", "avg_energy_jump", "avg_bpm_jump"] {
            assert_eq!(json.get(key), Some(&serde_json::Value::Null), "{} missing", key);
        }
        assert_eq!(json["overall_score"], 1.0);
    }

    #[test]
    fn test_energy_is_capped() {
        assert_eq!(Track::new("loud", 128.0, "1A", 250).energy, 100);
    }
}
