//! Scoring modules
//!
//! Everything here is a pure function of the tracks and options it is
//! given: pairwise compatibility, the weighted transition metrics built on
//! top of it, whole-sequence quality, and per-transition mixing advice.

pub mod compatibility;
pub mod key;
pub mod metrics;
pub mod quality;
pub mod traits;
pub mod transitions;

pub use compatibility::compatibility;
pub use key::LookupKeyAssigner;
pub use metrics::enhanced_compatibility;
pub use quality::evaluate;
pub use traits::KeyAssigner;
pub use transitions::advise;
