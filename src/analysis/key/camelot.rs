//! Camelot Wheel notation
//!
//! The Camelot Wheel is a visual representation of musical keys that
//! makes harmonic mixing intuitive for DJs.
//!
//! - Numbers 1-12 represent positions on the wheel
//! - 'A' suffix = minor key, 'B' suffix = major key
//! - Adjacent numbers are harmonically compatible (perfect fifth)
//! - Same number, different letter = relative major/minor

use crate::types::{Mode, PitchClass};
use std::fmt;

/// Mapping from (PitchClass, Mode) to Camelot notation
///
/// Layout:
/// ```text
///      5A      5B
///    /    \  /    \
///  4A      4B      6B
///  |       |       |
///  3A      3B      7B
///    \    /  \    /
///      2A      8B
///       ...
/// ```
pub fn to_camelot(pitch: PitchClass, mode: Mode) -> &'static str {
    match (pitch, mode) {
        // Minor keys (A)
        (PitchClass::A, Mode::Minor) => "8A",   // Am
        (PitchClass::As, Mode::Minor) => "3A",  // A#m / Bbm
        (PitchClass::B, Mode::Minor) => "10A",  // Bm
        (PitchClass::C, Mode::Minor) => "5A",   // Cm
        (PitchClass::Cs, Mode::Minor) => "12A", // C#m / Dbm
        (PitchClass::D, Mode::Minor) => "7A",   // Dm
        (PitchClass::Ds, Mode::Minor) => "2A",  // D#m / Ebm
        (PitchClass::E, Mode::Minor) => "9A",   // Em
        (PitchClass::F, Mode::Minor) => "4A",   // Fm
        (PitchClass::Fs, Mode::Minor) => "11A", // F#m / Gbm
        (PitchClass::G, Mode::Minor) => "6A",   // Gm
        (PitchClass::Gs, Mode::Minor) => "1A",  // G#m / Abm

        // Major keys (B)
        (PitchClass::A, Mode::Major) => "11B",  // A
        (PitchClass::As, Mode::Major) => "6B",  // A# / Bb
        (PitchClass::B, Mode::Major) => "1B",   // B
        (PitchClass::C, Mode::Major) => "8B",   // C
        (PitchClass::Cs, Mode::Major) => "3B",  // C# / Db
        (PitchClass::D, Mode::Major) => "10B",  // D
        (PitchClass::Ds, Mode::Major) => "5B",  // D# / Eb
        (PitchClass::E, Mode::Major) => "12B",  // E
        (PitchClass::F, Mode::Major) => "7B",   // F
        (PitchClass::Fs, Mode::Major) => "2B",  // F# / Gb
        (PitchClass::G, Mode::Major) => "9B",   // G
        (PitchClass::Gs, Mode::Major) => "4B",  // G# / Ab
    }
}

/// Letter half of a Camelot code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CamelotLetter {
    /// Minor family
    A,
    /// Major family
    B,
}

impl CamelotLetter {
    pub fn flipped(self) -> Self {
        match self {
            CamelotLetter::A => CamelotLetter::B,
            CamelotLetter::B => CamelotLetter::A,
        }
    }
}

/// A parsed Camelot code such as "8A"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CamelotKey {
    /// Ring position 1-12
    number: u8,
    letter: CamelotLetter,
}

impl CamelotKey {
    /// Build a key from a ring position, rejecting anything outside 1-12
    pub fn new(number: u8, letter: CamelotLetter) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self { number, letter })
    }

    /// Ring position 1-12
    pub fn number(self) -> u8 {
        self.number
    }

    pub fn letter(self) -> CamelotLetter {
        self.letter
    }

    /// Parse "1A" - "12B" (case-insensitive, surrounding whitespace ignored)
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() < 2 {
            return None;
        }
        let letter = match code.chars().last()?.to_ascii_uppercase() {
            'A' => CamelotLetter::A,
            'B' => CamelotLetter::B,
            _ => return None,
        };
        let digits = &code[..code.len() - 1];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number: u8 = digits.parse().ok()?;
        Self::new(number, letter)
    }

    /// Ring position `k` steps clockwise, wrapping 12 -> 1
    pub fn ring_offset(self, k: u8) -> u8 {
        ((self.number - 1 + k % 12) % 12) + 1
    }

    /// Whether the two positions neighbour each other on the ring
    pub fn is_adjacent(self, other: CamelotKey) -> bool {
        self.ring_offset(1) == other.number || other.ring_offset(1) == self.number
    }

    /// Whether the two positions are `k` steps apart in either direction
    pub fn is_offset_by(self, other: CamelotKey, k: u8) -> bool {
        self.ring_offset(k) == other.number || other.ring_offset(k) == self.number
    }
}

impl fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.letter {
            CamelotLetter::A => 'A',
            CamelotLetter::B => 'B',
        };
        write!(f, "{}{}", self.number, letter)
    }
}

/// Get harmonically compatible keys (for mixing suggestions)
///
/// Returns keys that are safe to mix with the given key:
/// - Same key
/// - +1/-1 on the wheel (perfect fifth relationship)
/// - Same number, opposite letter (relative major/minor)
pub fn compatible_keys(camelot: &str) -> Vec<String> {
    let Some(key) = CamelotKey::parse(camelot) else {
        return vec![];
    };

    let minus_one = CamelotKey {
        number: key.ring_offset(11),
        ..key
    };
    let plus_one = CamelotKey {
        number: key.ring_offset(1),
        ..key
    };
    let relative = CamelotKey {
        letter: key.letter.flipped(),
        ..key
    };

    [key, plus_one, minus_one, relative]
        .iter()
        .map(ToString::to_string)
        .collect()
}
