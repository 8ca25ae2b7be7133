//! djflow CLI entry point

use clap::Parser;
use djflow::config::{Cli, Settings};
use djflow::export::{read_tracks, write_json, PlaylistReport};
use djflow::pipeline::{self, GeneratedPlaylist};
use djflow::strategies::Strategy;
use djflow::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if settings.list_strategies {
        print_strategies();
        return ExitCode::SUCCESS;
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = cli.log_level().to_string().to_lowercase();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(settings: &Settings) -> Result<()> {
    let Some(input) = settings.input.as_deref() else {
        return Err(djflow::DjflowError::ConfigError(
            "No input file given (use --input)".to_string(),
        ));
    };
    let tracks = read_tracks(input)?;

    if settings.benchmark {
        let results = pipeline::benchmark(&tracks, settings.tolerance, &settings.options);
        println!("{:<24} {:>8} {:>9} {:>8} {:>8}", "strategy", "overall", "harmonic", "energy", "tempo");
        for strategy in Strategy::ALL {
            if let Some(report) = results.get(strategy.name()) {
                println!(
                    "{:<24} {:>8.3} {:>9.3} {:>8.3} {:>8.3}",
                    strategy.name(),
                    report.overall_score,
                    report.harmonic_flow,
                    report.energy_consistency,
                    report.bpm_smoothness
                );
            }
        }
        if let Some(best) = pipeline::best_strategy(&results) {
            println!();
            println!("Best: {}", best);
        }
        return Ok(());
    }

    let playlist = pipeline::generate_with(
        &djflow::analysis::LookupKeyAssigner::new(),
        &tracks,
        settings.strategy,
        settings.tolerance,
        &settings.options,
    );
    print_playlist(&playlist);

    if let Some(output) = settings.output.as_deref() {
        let report = PlaylistReport::new(&playlist, settings.tolerance, &settings.options);
        write_json(&report, output)?;
        println!("Report written to {}", output.display());
    }

    Ok(())
}

fn print_playlist(playlist: &GeneratedPlaylist) {
    println!("Strategy: {}", playlist.strategy);
    for (i, track) in playlist.tracks.iter().enumerate() {
        println!(
            "{:>3}. {:<40} {:>6.1} BPM  {:>3}  energy {:>3}  {}",
            i + 1,
            track.display_name(),
            track.bpm,
            track.camelot,
            track.energy,
            track.genre
        );
    }

    let quality = &playlist.quality;
    println!();
    println!(
        "Summary: overall {:.3} (harmonic {:.3}, energy {:.3}, tempo {:.3})",
        quality.overall_score,
        quality.harmonic_flow,
        quality.energy_consistency,
        quality.bpm_smoothness
    );
    if playlist.dropped > 0 {
        println!(
            "Skipped {} tracks without a usable tempo or key",
            playlist.dropped
        );
    }
}

fn print_strategies() {
    for strategy in Strategy::ALL {
        let marker = if strategy == Strategy::default() { " (default)" } else { "" };
        println!("{:<24} {}{}", strategy.name(), strategy.description(), marker);
    }
}
