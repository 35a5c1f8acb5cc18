#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs wave scenarios stored as JSON files.

mod scenario;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_combat_core::{SimulationConfig, SimulationResult};
use wave_combat_system_analytics::{
    damage_by_source, kills_by_enemy_type, resolve_outcome, summarize,
};
use wave_combat_world as world;

use crate::scenario::Overrides;

/// Deterministic wave combat simulator.
#[derive(Debug, Parser)]
#[command(name = "wave-combat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulates one wave and prints its result.
    Run {
        /// Path to the scenario JSON file.
        scenario: PathBuf,
        /// Overrides the scenario seed.
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<f64>,
        /// Overrides the scenario wave number.
        #[arg(long, allow_negative_numbers = true)]
        wave_number: Option<f64>,
        /// Selects what is printed.
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
        /// Gate hp used to resolve leaks.
        #[arg(long, default_value_t = 20)]
        gate_hp: u32,
    },
    /// Simulates one wave repeatedly and fails unless every run matches.
    Verify {
        /// Path to the scenario JSON file.
        scenario: PathBuf,
        /// Number of runs to compare.
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Kill, damage and gate totals.
    Summary,
    /// Full event log and final state.
    Json,
}

/// Entry point for the wave combat command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            scenario,
            seed,
            wave_number,
            output,
            gate_hp,
        } => {
            let mut config = load_scenario(&scenario)?;
            Overrides { seed, wave_number }.apply(&mut config);
            let result = world::run(&config);
            print_result(&config, &result, output, gate_hp)
        }
        Command::Verify { scenario, runs } => {
            let config = load_scenario(&scenario)?;
            verify(&config, runs)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_scenario(path: &Path) -> Result<SimulationConfig> {
    scenario::load(path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn print_result(
    config: &SimulationConfig,
    result: &SimulationResult,
    output: OutputFormat,
    gate_hp: u32,
) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .context("failed to serialise simulation result")?;
            println!("{json}");
        }
        OutputFormat::Summary => {
            let summary = summarize(result);
            let outcome = resolve_outcome(&result.final_state, gate_hp);
            println!(
                "wave {} ended at t={}: {} events, {} kills, {} damage dealt",
                config.wave_number,
                result.final_state.time,
                summary.event_count,
                summary.kill_count,
                summary.total_damage,
            );
            println!(
                "{} alive, {} leaked, gate hp {} -> {}{}",
                outcome.alive_enemy_count,
                outcome.leaks,
                gate_hp,
                outcome.next_gate_hp,
                if outcome.wave_cleared { ", cleared" } else { "" },
            );
            for (source, amount) in damage_by_source(&result.event_log) {
                println!("  {source}: {amount} damage");
            }
            for (enemy, kills) in kills_by_enemy_type(&result.event_log) {
                println!("  {enemy}: {kills} killed");
            }
        }
    }
    Ok(())
}

fn verify(config: &SimulationConfig, runs: u32) -> Result<()> {
    let reference = world::run(config);
    let expected =
        serde_json::to_string(&reference).context("failed to serialise simulation result")?;

    for run in 2..=runs {
        let candidate = serde_json::to_string(&world::run(config))
            .context("failed to serialise simulation result")?;
        if candidate != expected {
            bail!("run {run} diverged from run 1 for seed {}", config.seed);
        }
    }

    info!(runs, seed = config.seed, "replay verified");
    println!(
        "{runs} run(s) identical: {} events, final time {}",
        reference.event_log.len(),
        reference.final_state.time
    );
    Ok(())
}
