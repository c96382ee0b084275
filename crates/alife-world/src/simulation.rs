//! Simulation driver: owns a habitat and records its population history.

use crate::habitat::{GenerationReport, Habitat};
use crate::snapshot::Snapshot;
use alife_core::{HistorySummary, PopulationCounts, PopulationHistory, Result, SimConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub struct Simulation {
    habitat: Habitat,
    history: PopulationHistory,
    generation: u64,
    last_report: Option<GenerationReport>,
}

impl Simulation {
    /// Validate the configuration and spawn the initial populations
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut habitat = Habitat::new(config)?;
        habitat.populate();

        info!(
            seed = habitat.config().seed,
            dimension = habitat.config().grid.dimension,
            rabbits = habitat.counts().rabbits,
            foxes = habitat.counts().foxes,
            "Simulation initialized"
        );

        Ok(Self {
            habitat,
            history: PopulationHistory::new(),
            generation: 0,
            last_report: None,
        })
    }

    /// Advance one generation, record its counts and return the new display state
    pub fn step(&mut self) -> Snapshot {
        let report = self.habitat.generation();
        self.generation += 1;
        self.history.push(report.counts);
        self.last_report = Some(report);

        debug!(
            generation = self.generation,
            rabbits = report.counts.rabbits,
            foxes = report.counts.foxes,
            moved = report.moved,
            rabbits_fed = report.rabbits_fed,
            rabbits_eaten = report.rabbits_eaten,
            rabbits_died = report.removed.rabbits,
            foxes_died = report.removed.foxes,
            rabbits_born = report.born.rabbits,
            foxes_born = report.born.foxes,
            grass_grown = report.grass_grown,
            grass_cover = report.grass_cover,
            "Generation stepped"
        );

        self.habitat.snapshot()
    }

    /// Run the simulation for the specified number of generations
    #[instrument(skip(self), fields(seed = self.habitat.config().seed))]
    pub fn run(&mut self, generations: u64) -> &PopulationHistory {
        info!("Starting simulation for {} generations", generations);

        for _ in 0..generations {
            self.step();
        }

        self.emit_run_summary();
        &self.history
    }

    /// Run the number of generations given in the configuration
    pub fn run_configured(&mut self) -> &PopulationHistory {
        let generations = self.habitat.config().generations;
        self.run(generations)
    }

    fn emit_run_summary(&self) {
        let summary = self.history.summary();
        let counts = self.counts();

        info!(
            event = "run_summary",
            generations = self.generation,
            final_rabbits = counts.rabbits,
            final_foxes = counts.foxes,
            peak_rabbits = summary.peak_rabbits,
            peak_foxes = summary.peak_foxes,
            mean_rabbits = format!("{:.1}", summary.mean_rabbits),
            mean_foxes = format!("{:.1}", summary.mean_foxes),
            rabbits_extinct_at = ?summary.rabbits_extinct_at,
            foxes_extinct_at = ?summary.foxes_extinct_at,
            "Simulation complete"
        );
    }

    /// Discard all progress and rebuild the run from its configuration
    pub fn reset(&mut self) -> Result<()> {
        let config = self.habitat.config().clone();
        *self = Self::new(config)?;
        Ok(())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn counts(&self) -> PopulationCounts {
        self.habitat.counts()
    }

    pub fn history(&self) -> &PopulationHistory {
        &self.history
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    pub fn config(&self) -> &SimConfig {
        self.habitat.config()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.habitat.snapshot()
    }

    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            generations: self.generation,
            final_counts: self.counts(),
            summary: self.history.summary(),
            history: self.history.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generations: u64,
    pub final_counts: PopulationCounts,
    pub summary: HistorySummary,
    pub history: PopulationHistory,
}
