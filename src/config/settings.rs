//! Runtime configuration settings

use crate::config::cli::Cli;
use crate::config::options::{JourneyProfile, SequenceOptions};
use crate::error::{DjflowError, Result};
use crate::strategies::Strategy;
use crate::types::EnergyDirection;
use std::path::PathBuf;

/// Runtime settings for the djflow binary
#[derive(Debug, Clone)]
pub struct Settings {
    /// JSON file of tracks (absent when only listing strategies)
    pub input: Option<PathBuf>,
    /// Optional JSON report path
    pub output: Option<PathBuf>,
    /// Strategy to run
    pub strategy: Strategy,
    /// Tempo tolerance in BPM
    pub tolerance: f64,
    /// Options passed to every strategy
    pub options: SequenceOptions,
    /// Compare all strategies instead of running one
    pub benchmark: bool,
    /// Print the registry and exit
    pub list_strategies: bool,
}

impl Settings {
    /// Create settings from CLI arguments.
    ///
    /// Unlike the library entry points, the CLI is strict: an unknown
    /// strategy name or an out-of-range option is reported instead of
    /// silently corrected.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let strategy: Strategy = cli.strategy.parse()?;

        if !(cli.tolerance.is_finite() && cli.tolerance >= 0.0) {
            return Err(DjflowError::out_of_range(
                "tolerance",
                cli.tolerance,
                "a non-negative number of BPM",
            ));
        }

        let options = SequenceOptions {
            harmonic_strictness: cli.strictness,
            allow_experimental: !cli.no_experimental,
            genre_mixing: !cli.no_genre_mixing,
            genre_weight: cli.genre_weight,
            peak_position: cli.peak_position,
            journey: parse_journey(&cli.journey)?,
            overlap_seconds: cli.overlap,
        };
        options.validate()?;

        Ok(Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            strategy,
            tolerance: cli.tolerance,
            options,
            benchmark: cli.benchmark,
            list_strategies: cli.list_strategies,
        })
    }
}

fn parse_journey(shape: &str) -> Result<JourneyProfile> {
    match shape.trim().to_lowercase().as_str() {
        "auto" => Ok(JourneyProfile::Auto),
        "up" => Ok(JourneyProfile::Fixed(EnergyDirection::Up)),
        "down" => Ok(JourneyProfile::Fixed(EnergyDirection::Down)),
        "maintain" => Ok(JourneyProfile::Fixed(EnergyDirection::Maintain)),
        other => Err(DjflowError::ConfigError(format!(
            "Unknown journey shape '{}' (expected auto, up, down or maintain)",
            other
        ))),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            strategy: Strategy::default(),
            tolerance: 6.0,
            options: SequenceOptions::default(),
            benchmark: false,
            list_strategies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["djflow", "--input", "set.json"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_from_cli_defaults_match_settings_default() {
        let settings = Settings::from_cli(&cli(&[])).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.strategy, defaults.strategy);
        assert_eq!(settings.tolerance, defaults.tolerance);
        assert_eq!(settings.options, defaults.options);
    }

    #[test]
    fn test_from_cli_maps_flags() {
        let settings = Settings::from_cli(&cli(&[
            "--strategy",
            "Peak_Time_Enhanced",
            "--no-experimental",
            "--no-genre-mixing",
            "--journey",
            "down",
            "--peak-position",
            "0.5",
        ]))
        .unwrap();
        assert_eq!(settings.strategy, Strategy::PeakTimeEnhanced);
        assert!(!settings.options.allow_experimental);
        assert!(!settings.options.genre_mixing);
        assert_eq!(settings.options.peak_position, 0.5);
        assert_eq!(
            settings.options.journey,
            JourneyProfile::Fixed(EnergyDirection::Down)
        );
    }

    #[test]
    fn test_from_cli_rejects_unknown_strategy() {
        let err = Settings::from_cli(&cli(&["--strategy", "shuffle"])).unwrap_err();
        assert!(matches!(err, DjflowError::UnknownStrategy(_)));
    }

    #[test]
    fn test_from_cli_rejects_out_of_range() {
        assert!(Settings::from_cli(&cli(&["--strictness", "11"])).is_err());
        assert!(Settings::from_cli(&cli(&["--peak-position", "1.0"])).is_err());
        assert!(Settings::from_cli(&cli(&["--tolerance=-1"])).is_err());
    }
}
