//! Sequencing pipeline
//!
//! The entry points callers normally use: prepare the input, run a named
//! strategy (or all of them), and score the result.

pub mod eligibility;
pub mod orchestrator;

pub use eligibility::{is_eligible, prepare, PreparedTracks};
pub use orchestrator::{
    benchmark, best_strategy, generate, generate_with, resolve_strategy, GeneratedPlaylist,
};
