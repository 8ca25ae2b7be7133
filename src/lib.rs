//! djflow - Playlist Sequencing & Transition Advice for DJs
//!
//! Takes a set of analysed tracks (tempo, Camelot key, energy, genre) and
//! orders them into a playable set, scores the result, and describes how to
//! mix each transition.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing, runtime settings and sequencing options
//! - `analysis`: Key compatibility, transition metrics, quality scoring and
//!   transition advice
//! - `strategies`: The ten ordering strategies behind one trait
//! - `pipeline`: Input preparation, strategy dispatch and benchmarking
//! - `export`: JSON track import and playlist report export
//!
//! The engine (`analysis`, `strategies`, `pipeline`) is pure: no I/O, no
//! randomness, and every entry point returns a value for every input.
//!
//! # Example
//!
//! ```
//! use djflow::{generate, SequenceOptions, Track};
//!
//! let tracks = vec![
//!     Track::new("Opener", 122.0, "8A", 40),
//!     Track::new("Builder", 124.0, "9A", 60),
//!     Track::new("Peak", 126.0, "9B", 85),
//! ];
//! let playlist = generate(&tracks, "warm-up", 6.0, &SequenceOptions::default());
//! assert_eq!(playlist.tracks[0].title, "Opener");
//! println!("Quality: {:.2}", playlist.quality.overall_score);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod strategies;
pub mod types;

// Re-export key types at crate root
pub use analysis::{advise, compatibility, enhanced_compatibility, evaluate};
pub use config::{JourneyProfile, SequenceOptions};
pub use error::{DjflowError, Result};
pub use pipeline::{benchmark, generate, GeneratedPlaylist};
pub use strategies::Strategy;
pub use types::{
    EnergyDirection, QualityReport, RiskLevel, Track, TransitionMetrics, TransitionRecommendation,
};
