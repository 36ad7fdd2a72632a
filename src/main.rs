//! Hotel automation entry point: CLI wiring and config-driven run.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use hotel_automation::config::ScenarioConfig;
use hotel_automation::io::events::load_events;
use hotel_automation::io::export::{export_records_csv, export_status_json};
use hotel_automation::logging;
use hotel_automation::runner::run_scenario;

#[derive(Debug, Parser)]
#[command(
    name = "hotel-automation",
    about = "Motion-driven lighting and AC control with a power cap",
    long_about = "Replays motion sensor events against a hotel topology and prints \
                  the resulting equipment status. Without --scenario or --preset \
                  the default preset is used."
)]
struct Cli {
    /// Load scenario from a TOML config file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (default, per_floor, tower).
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Replay motion events from a CSV script instead of generating them.
    #[arg(long, value_name = "PATH")]
    events: Option<PathBuf>,

    /// Override the occupancy generator seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of generated events.
    #[arg(long)]
    steps: Option<usize>,

    /// Export per-event records to CSV.
    #[arg(long, value_name = "PATH")]
    records_out: Option<PathBuf>,

    /// Export the final equipment status as JSON.
    #[arg(long, value_name = "PATH")]
    status_out: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, env = "HOTEL_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    // --scenario takes priority, then --preset, then the default preset
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::reference()
    };

    if let Some(seed) = cli.seed {
        scenario.sensors.seed = seed;
    }
    if let Some(steps) = cli.steps {
        scenario.sensors.steps = steps;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("scenario is invalid ({} error(s))", errors.len());
    }

    let script = match cli.events {
        Some(ref path) => Some(load_events(path)?),
        None => None,
    };

    let run = run_scenario(&scenario, script).context("simulation aborted")?;

    for record in &run.records {
        println!("{record}");
    }
    println!("\nMaximum allowed: {} units", run.maximum_allowed);
    println!("{}", run.summary);
    println!("\n{}", run.status);

    if let Some(ref path) = cli.records_out {
        export_records_csv(&run.records, path)
            .with_context(|| format!("failed to write records to {}", path.display()))?;
        eprintln!("Records written to {}", path.display());
    }
    if let Some(ref path) = cli.status_out {
        export_status_json(&run.status, path)
            .with_context(|| format!("failed to write status to {}", path.display()))?;
        eprintln!("Status written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn supports_preset_cli() {
        let cli = Cli::try_parse_from(["hotel-automation", "--preset", "tower"])
            .expect("parse should succeed");
        assert_eq!(cli.preset.as_deref(), Some("tower"));
        assert!(cli.scenario.is_none());
    }

    #[test]
    fn scenario_and_preset_conflict() {
        let result = Cli::try_parse_from([
            "hotel-automation",
            "--scenario",
            "hotel.toml",
            "--preset",
            "tower",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn supports_overrides() {
        let cli = Cli::try_parse_from(["hotel-automation", "--seed", "7", "--steps", "100"])
            .expect("parse should succeed");
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.steps, Some(100));
    }
}
