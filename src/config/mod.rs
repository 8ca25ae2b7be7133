//! Configuration and CLI handling

pub mod cli;
pub mod options;
pub mod settings;

pub use cli::Cli;
pub use options::{JourneyProfile, SequenceOptions};
pub use settings::Settings;
