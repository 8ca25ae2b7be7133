//! Key name parsing and Camelot assignment

pub mod camelot;

use crate::analysis::traits::KeyAssigner;
use crate::types::{Mode, PitchClass};

pub use camelot::{compatible_keys, to_camelot, CamelotKey, CamelotLetter};

/// Parse a standard key name into pitch class and mode.
///
/// Accepts "Am", "A#m", "Bbmin", "C", "F# Major", "D minor", "Ebmaj".
/// A bare note name is read as major.
pub fn parse_key_name(name: &str) -> Option<(PitchClass, Mode)> {
    let name = name.trim();
    let mut chars = name.char_indices();
    chars.next()?;
    // Note is the letter plus an optional accidental
    let split = match chars.next() {
        Some((i, c)) if matches!(c, '#' | 'b' | '♯' | '♭') => i + c.len_utf8(),
        Some((i, _)) => i,
        None => name.len(),
    };
    let (note, rest) = name.split_at(split);

    // "Bb" parses as B-flat; a lone "b" suffix is never a mode marker
    let pitch = PitchClass::from_name(note)?;
    let mode = match rest.trim().to_ascii_lowercase().as_str() {
        "" | "maj" | "major" => Mode::Major,
        "m" | "min" | "minor" => Mode::Minor,
        _ => return None,
    };
    Some((pitch, mode))
}

/// Built-in 24-entry key name -> Camelot lookup
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupKeyAssigner;

impl LookupKeyAssigner {
    pub fn new() -> Self {
        Self
    }
}

impl KeyAssigner for LookupKeyAssigner {
    fn camelot_for(&self, key_name: &str) -> Option<String> {
        // Already a Camelot code
        if let Some(code) = CamelotKey::parse(key_name) {
            return Some(code.to_string());
        }
        parse_key_name(key_name).map(|(pitch, mode)| to_camelot(pitch, mode).to_string())
    }

    fn name(&self) -> &'static str {
        "camelot-lookup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Track;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key_name("Am"), Some((PitchClass::A, Mode::Minor)));
        assert_eq!(parse_key_name("C"), Some((PitchClass::C, Mode::Major)));
        assert_eq!(parse_key_name("F# Major"), Some((PitchClass::Fs, Mode::Major)));
        assert_eq!(parse_key_name("Bbm"), Some((PitchClass::As, Mode::Minor)));
        assert_eq!(parse_key_name("D minor"), Some((PitchClass::D, Mode::Minor)));
        assert_eq!(parse_key_name("Ebmaj"), Some((PitchClass::Ds, Mode::Major)));
        assert_eq!(parse_key_name("Q minor"), None);
        assert_eq!(parse_key_name("A dorian"), None);
        assert_eq!(parse_key_name(""), None);
    }

    #[test]
    fn test_lookup_assigner() {
        let assigner = LookupKeyAssigner::new();
        assert_eq!(assigner.camelot_for("Am").as_deref(), Some("8A"));
        assert_eq!(assigner.camelot_for("C Major").as_deref(), Some("8B"));
        assert_eq!(assigner.camelot_for("9b").as_deref(), Some("9B"));
        assert_eq!(assigner.camelot_for("nonsense"), None);
    }

    #[test]
    fn test_assign_fills_only_missing_codes() {
        let assigner = LookupKeyAssigner::new();

        let mut missing = Track::new("a", 124.0, "", 60).with_key("Gm");
        assert!(assigner.assign(&mut missing));
        assert_eq!(missing.camelot, "6A");

        let mut present = Track::new("b", 124.0, "1B", 60).with_key("Gm");
        assert!(!assigner.assign(&mut present));
        assert_eq!(present.camelot, "1B");

        let mut unknown = Track::new("c", 124.0, "", 60);
        assert!(!assigner.assign(&mut unknown));
        assert!(unknown.camelot.is_empty());
    }
}
