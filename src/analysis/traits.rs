//! Analysis trait abstractions
//!
//! Key assignment is supplied from outside the engine; this trait lets a
//! caller swap the built-in lookup table for its own mapping.

use crate::types::Track;

/// Assigns Camelot codes to tracks that only carry a key name
pub trait KeyAssigner: Send + Sync {
    /// Map a key name (e.g. "Am", "F# Major") to a Camelot code.
    ///
    /// Returns `None` when the name is not recognised; must not panic.
    fn camelot_for(&self, key_name: &str) -> Option<String>;

    /// Get the name of this assigner (for logging)
    fn name(&self) -> &'static str;

    /// Fill in a missing Camelot code from the track's key name.
    ///
    /// Returns true if the track was updated.
    fn assign(&self, track: &mut Track) -> bool {
        if !track.camelot.trim().is_empty() {
            return false;
        }
        match track.key.as_deref().and_then(|k| self.camelot_for(k)) {
            Some(code) => {
                track.camelot = code;
                true
            }
            None => false,
        }
    }
}
