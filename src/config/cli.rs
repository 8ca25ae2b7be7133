//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// djflow - Playlist sequencing for DJs
///
/// Orders a set of analyzed tracks (tempo, Camelot key, energy, genre) with
/// one of ten strategies and reports transition quality and mixing advice.
#[derive(Parser, Debug)]
#[command(name = "djflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON file holding an array of tracks
    #[arg(short, long, value_name = "FILE", required_unless_present = "list_strategies")]
    pub input: Option<PathBuf>,

    /// Write the playlist report (tracks, quality, transitions) to this JSON file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Ordering strategy
    #[arg(short, long, value_name = "NAME", default_value = "harmonic-flow")]
    pub strategy: String,

    /// Tempo tolerance in BPM
    #[arg(short, long, value_name = "BPM", default_value = "6.0")]
    pub tolerance: f64,

    /// Harmonic strictness, 1 (lenient) to 10 (strict)
    #[arg(long, value_name = "N", default_value = "7")]
    pub strictness: u8,

    /// Disable the +4/+7 energy-jump key moves
    #[arg(long, default_value = "false")]
    pub no_experimental: bool,

    /// Ignore genres in genre-flow (falls back to harmonic-flow)
    #[arg(long, default_value = "false")]
    pub no_genre_mixing: bool,

    /// Preference for keeping genres apart, 0.0 to 1.0
    #[arg(long, value_name = "W", default_value = "0.3")]
    pub genre_weight: f64,

    /// Where peak-time-enhanced places its peak, as a fraction of the set
    #[arg(long, value_name = "FRACTION", default_value = "0.7")]
    pub peak_position: f64,

    /// Energy shape for emotional-journey
    #[arg(long, value_name = "SHAPE", default_value = "auto")]
    #[arg(value_parser = ["auto", "up", "down", "maintain"])]
    pub journey: String,

    /// Requested transition overlap in seconds
    #[arg(long, value_name = "SECS", default_value = "16.0")]
    pub overlap: f64,

    /// Run every strategy and compare their quality scores
    #[arg(long, default_value = "false")]
    pub benchmark: bool,

    /// Print the available strategies and exit
    #[arg(long, default_value = "false")]
    pub list_strategies: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
