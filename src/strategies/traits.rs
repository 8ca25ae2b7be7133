//! Strategy trait abstraction
//!
//! Every ordering algorithm implements this trait so the dispatcher can
//! swap them by name without knowing how each one works.

use crate::config::SequenceOptions;
use crate::types::Track;

/// A pure playlist ordering algorithm
///
/// Implementations must return a permutation of `tracks`: no track is
/// dropped, duplicated or invented, and inputs of 0 or 1 tracks come back
/// unchanged. The same input always yields the same output.
pub trait OrderingStrategy: Send + Sync {
    /// Order the tracks
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track>;

    /// Get the registry name of this strategy (for logging)
    fn name(&self) -> &'static str;
}
