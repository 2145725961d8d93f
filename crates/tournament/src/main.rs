//! Tournament CLI
//!
//! Load a roster, run the bracket to completion and report the champion.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tennis_core::OddFieldPolicy;
use tournament::{load_roster, Settings, Simulator, TextDisplay, DEFAULT_SETTINGS_PATH};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tournament", about = "Simulate a seeded single-elimination tennis tournament")]
struct Cli {
    /// Settings file (missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Roster CSV, overrides simulation.players_csv
    #[arg(short, long)]
    players: Option<PathBuf>,

    /// Random seed, overrides simulation.seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sets per match, overrides simulation.best_of
    #[arg(short, long)]
    best_of: Option<u32>,

    /// What to do with the unpaired seed of an odd field
    #[arg(long, value_parser = parse_odd_field)]
    odd_field: Option<OddFieldPolicy>,

    /// Write results as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only print the final report
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Tournament name used in the report
    #[arg(long, default_value = "Wimbledon")]
    name: String,
}

fn parse_odd_field(value: &str) -> Result<OddFieldPolicy, String> {
    match value.to_lowercase().as_str() {
        "bye" => Ok(OddFieldPolicy::Bye),
        "eliminate" => Ok(OddFieldPolicy::Eliminate),
        other => Err(format!("expected 'bye' or 'eliminate', got '{}'", other)),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load_or_default(&cli.config)?;
    if let Some(players) = cli.players {
        settings.simulation.players_csv = players;
    }
    if let Some(seed) = cli.seed {
        settings.simulation.seed = seed;
    }
    if let Some(best_of) = cli.best_of {
        settings.simulation.best_of = best_of;
    }
    if let Some(policy) = cli.odd_field {
        settings.simulation.odd_field = policy;
    }
    if let Some(output) = cli.output {
        settings.output.results_json = Some(output);
    }
    if cli.quiet {
        settings.output.live_display = false;
    }

    let competitors = load_roster(&settings.simulation.players_csv)?;
    let mut simulator = Simulator::new(cli.name, competitors, settings.simulation.clone())
        .context("invalid tournament setup")?;

    let results = if settings.output.live_display {
        simulator.run_with_display(&mut TextDisplay::stdout())
    } else {
        simulator.run()
    };

    results.print_report();

    if let Some(path) = &settings.output.results_json {
        results
            .save(path)
            .with_context(|| format!("failed to save results to {}", path.display()))?;
        info!(path = %path.display(), "results saved");
    }

    match &results.champion {
        Some(champion) => println!("Tournament Champion: {}", champion),
        None => println!("No champion: the field was empty"),
    }
    Ok(())
}
