//! Pairwise harmonic compatibility
//!
//! Scores how well two tracks mix on a 0-100 scale. Rules are checked in
//! priority order and the first match wins:
//!
//! | Rule                                          | Score |
//! |-----------------------------------------------|-------|
//! | tempo gap above tolerance                      | 0     |
//! | either Camelot code missing or invalid         | 10    |
//! | identical code                                 | 100   |
//! | relative major/minor (same number)             | 90    |
//! | same letter, adjacent number                   | 80    |
//! | same letter, 4 steps apart (experimental)      | 70    |
//! | same letter, 7 steps apart (experimental)      | 65    |
//! | different letter, adjacent number              | 60    |
//! | anything else                                  | max(5, 15 - strictness) |

use crate::analysis::key::CamelotKey;
use crate::config::SequenceOptions;
use crate::types::Track;

pub const SCORE_TEMPO_VETO: u8 = 0;
pub const SCORE_UNKNOWN_KEY: u8 = 10;
pub const SCORE_SAME_KEY: u8 = 100;
pub const SCORE_RELATIVE: u8 = 90;
pub const SCORE_ADJACENT: u8 = 80;
pub const SCORE_ENERGY_JUMP: u8 = 70;
pub const SCORE_FIFTH_JUMP: u8 = 65;
pub const SCORE_DIAGONAL: u8 = 60;

/// Floor for unrelated keys
const MIN_CLASH_SCORE: u8 = 5;

/// Score two tracks for harmonic mixing.
///
/// Symmetric in `a` and `b`; always in 0..=100.
pub fn compatibility(a: &Track, b: &Track, tolerance: f64, options: &SequenceOptions) -> u8 {
    if !within_tolerance(a.bpm, b.bpm, tolerance) {
        return SCORE_TEMPO_VETO;
    }

    let (Some(ka), Some(kb)) = (CamelotKey::parse(&a.camelot), CamelotKey::parse(&b.camelot)) else {
        return SCORE_UNKNOWN_KEY;
    };

    key_compatibility(ka, kb, options)
}

/// Score two parsed Camelot keys, ignoring tempo
pub fn key_compatibility(a: CamelotKey, b: CamelotKey, options: &SequenceOptions) -> u8 {
    let same_letter = a.letter() == b.letter();

    if a == b {
        return SCORE_SAME_KEY;
    }
    if a.number() == b.number() {
        // Relative major/minor
        return SCORE_RELATIVE;
    }
    if same_letter && a.is_adjacent(b) {
        return SCORE_ADJACENT;
    }
    if options.allow_experimental && same_letter {
        if a.is_offset_by(b, 4) {
            return SCORE_ENERGY_JUMP;
        }
        if a.is_offset_by(b, 7) {
            return SCORE_FIFTH_JUMP;
        }
    }
    if !same_letter && a.is_adjacent(b) {
        return SCORE_DIAGONAL;
    }

    clash_score(options.harmonic_strictness)
}

fn clash_score(strictness: u8) -> u8 {
    15u8.saturating_sub(strictness).max(MIN_CLASH_SCORE)
}

/// Whether two tempos are within the tolerance band.
///
/// Non-finite tempos are never within tolerance.
pub fn within_tolerance(a_bpm: f64, b_bpm: f64, tolerance: f64) -> bool {
    let delta = (a_bpm - b_bpm).abs();
    delta.is_finite() && delta <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(bpm: f64, code: &str) -> Track {
        Track::new(code, bpm, code, 50)
    }

    fn score(a: &str, b: &str) -> u8 {
        compatibility(&track(128.0, a), &track(128.0, b), 3.0, &SequenceOptions::default())
    }

    #[test]
    fn test_reference_examples() {
        assert_eq!(score("8A", "8A"), 100);
        assert_eq!(score("8A", "9A"), 80);
        assert_eq!(score("8A", "2B"), 8);
    }

    #[test]
    fn test_tempo_veto_wins_over_key() {
        let a = track(128.0, "8A");
        let b = track(132.0, "8A");
        assert_eq!(compatibility(&a, &b, 3.0, &SequenceOptions::default()), 0);
        let c = track(128.0, "");
        assert_eq!(compatibility(&c, &b, 3.0, &SequenceOptions::default()), 0);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let a = track(128.0, "8A");
        let b = track(131.0, "8A");
        assert_eq!(compatibility(&a, &b, 3.0, &SequenceOptions::default()), 100);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(score("", "8A"), 10);
        assert_eq!(score("8A", "13Z"), 10);
    }

    #[test]
    fn test_relative_major_minor() {
        assert_eq!(score("8A", "8B"), 90);
        assert_eq!(score("12B", "12A"), 90);
    }

    #[test]
    fn test_adjacent_wraps() {
        assert_eq!(score("12A", "1A"), 80);
        assert_eq!(score("1B", "12B"), 80);
    }

    #[test]
    fn test_experimental_moves() {
        assert_eq!(score("8A", "12A"), 70);
        assert_eq!(score("12A", "8A"), 70);
        assert_eq!(score("1B", "8B"), 65);
        assert_eq!(score("8B", "1B"), 65);
    }

    #[test]
    fn test_experimental_disabled_falls_through() {
        let options = SequenceOptions {
            allow_experimental: false,
            ..Default::default()
        };
        let a = track(128.0, "8A");
        let b = track(128.0, "12A");
        assert_eq!(compatibility(&a, &b, 3.0, &options), 8);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(score("8A", "9B"), 60);
        assert_eq!(score("1A", "12B"), 60);
    }

    #[test]
    fn test_clash_respects_strictness() {
        let lenient = SequenceOptions {
            harmonic_strictness: 1,
            ..Default::default()
        };
        let strict = SequenceOptions {
            harmonic_strictness: 10,
            ..Default::default()
        };
        let a = track(128.0, "8A");
        let b = track(128.0, "3B");
        assert_eq!(compatibility(&a, &b, 3.0, &lenient), 14);
        assert_eq!(compatibility(&a, &b, 3.0, &strict), 5);
    }

    #[test]
    fn test_symmetric_over_the_wheel() {
        let options = SequenceOptions::default();
        let codes: Vec<String> = (1..=12)
            .flat_map(|n| [format!("{}A", n), format!("{}B", n)])
            .collect();
        for x in &codes {
            for y in &codes {
                let a = track(126.0, x);
                let b = track(127.5, y);
                let forward = compatibility(&a, &b, 2.0, &options);
                assert_eq!(forward, compatibility(&b, &a, 2.0, &options), "{} vs {}", x, y);
                assert!(forward <= 100);
            }
        }
    }

    #[test]
    fn test_non_finite_tempo_is_vetoed() {
        let a = track(f64::NAN, "8A");
        let b = track(128.0, "8A");
        assert_eq!(compatibility(&a, &b, 3.0, &SequenceOptions::default()), 0);
    }
}
