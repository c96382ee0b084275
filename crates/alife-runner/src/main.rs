//! Headless runner: simulates the ecosystem and writes a JSON run report.

mod telemetry;

use alife_core::SimConfig;
use alife_world::{Simulation, SimulationResult, Snapshot};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Rabbit and fox ecosystem simulation
#[derive(Parser, Debug)]
#[command(name = "alife-runner")]
#[command(about = "Run the rabbit/fox/grass ecosystem and report population dynamics")]
struct Args {
    /// JSON configuration file (missing fields take their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of generations to run
    #[arg(long)]
    generations: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square grid
    #[arg(long)]
    dimension: Option<i32>,

    /// Per-cell grass regrowth probability
    #[arg(long)]
    grass_rate: Option<f64>,

    /// Log population counts every N generations (0 disables)
    #[arg(long, default_value_t = 10)]
    log_every: u64,

    /// Write the report here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Embed the final grid snapshot in the report
    #[arg(long)]
    include_snapshot: bool,

    /// Log every generation's phase tallies
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct RunReport {
    generated_at: DateTime<Utc>,
    config: SimConfig,
    result: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_snapshot: Option<SnapshotReport>,
}

#[derive(Serialize)]
struct SnapshotReport {
    dimension: i32,
    rows: Vec<Vec<u8>>,
}

impl From<&Snapshot> for SnapshotReport {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            dimension: snapshot.dimension(),
            rows: snapshot.rows(),
        }
    }
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dimension) = args.dimension {
        config.grid.dimension = dimension;
    }
    if let Some(rate) = args.grass_rate {
        config.grid.grass_rate = rate;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry(args.verbose)?;

    let config = load_config(&args)?;
    let generations = config.generations;
    let mut sim = Simulation::new(config.clone())?;

    info!(
        generations,
        seed = config.seed,
        dimension = config.grid.dimension,
        "Starting ecosystem run"
    );

    for _ in 0..generations {
        sim.step();

        let generation = sim.generation();
        if args.log_every > 0 && generation % args.log_every == 0 {
            let counts = sim.counts();
            info!(
                "Gen {}/{}: {} rabbits, {} foxes",
                generation, generations, counts.rabbits, counts.foxes
            );
        }
    }

    let result = sim.result();
    info!(
        final_rabbits = result.final_counts.rabbits,
        final_foxes = result.final_counts.foxes,
        peak_rabbits = result.summary.peak_rabbits,
        peak_foxes = result.summary.peak_foxes,
        "Run complete"
    );

    let report = RunReport {
        generated_at: Utc::now(),
        config,
        result,
        final_snapshot: args
            .include_snapshot
            .then(|| SnapshotReport::from(&sim.snapshot())),
    };
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
