//! The habitat: grass grid plus the rabbit and fox populations.
//!
//! A generation runs six phases in a fixed order. Each phase reads the
//! state the previous one left behind, so they must not be reordered:
//! movement, grazing, predation, removal of the dead, reproduction and
//! finally grass regrowth.

use crate::grid::Grid;
use crate::organism::Organism;
use crate::snapshot::Snapshot;
use alife_core::{Cell, PopulationCounts, Position, Result, SimConfig, Species};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Tallies from one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Populations at the end of the generation
    pub counts: PopulationCounts,
    /// Animals that took a movement step
    pub moved: usize,
    pub rabbits_fed: usize,
    pub rabbits_eaten: usize,
    /// Dead animals removed, by species
    pub removed: PopulationCounts,
    /// Offspring added, by species
    pub born: PopulationCounts,
    pub grass_grown: usize,
    pub grass_cover: usize,
}

pub struct Habitat {
    grid: Grid,
    rabbits: Vec<Organism>,
    foxes: Vec<Organism>,
    config: SimConfig,
    rng: ChaCha8Rng,
}

impl Habitat {
    /// Build an unpopulated habitat. Fails if the configuration is invalid.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let fill = if config.grid.initial_grass {
            Cell::Grass
        } else {
            Cell::Empty
        };
        let grid = Grid::new(config.grid.dimension, fill);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(Self {
            grid,
            rabbits: Vec::new(),
            foxes: Vec::new(),
            config,
            rng,
        })
    }

    /// Spawn each species' initial population at random positions
    pub fn populate(&mut self) {
        for species in Species::all() {
            let initial = self.config.species(species).initial_population;
            for _ in 0..initial {
                self.spawn(species);
            }
        }
        debug!(
            rabbits = self.rabbits.len(),
            foxes = self.foxes.len(),
            "Habitat populated"
        );
    }

    /// Add one animal of `species` at a uniformly random cell
    pub fn spawn(&mut self, species: Species) -> Position {
        let dimension = self.grid.dimension();
        let position = Position::new(
            self.rng.gen_range(0..dimension),
            self.rng.gen_range(0..dimension),
        );
        let traits = self.config.species(species).traits();
        self.add_organism(Organism::new(species, traits, position));
        position
    }

    /// Place an organism in the population matching its species
    pub fn add_organism(&mut self, mut organism: Organism) {
        organism.position = organism.position.wrap(self.grid.dimension());
        match organism.species {
            Species::Rabbit => self.rabbits.push(organism),
            Species::Fox => self.foxes.push(organism),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rabbits(&self) -> &[Organism] {
        &self.rabbits
    }

    pub fn foxes(&self) -> &[Organism] {
        &self.foxes
    }

    pub fn population(&self, species: Species) -> &[Organism] {
        match species {
            Species::Rabbit => &self.rabbits,
            Species::Fox => &self.foxes,
        }
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts::new(self.rabbits.len(), self.foxes.len())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Advance the habitat by one generation
    pub fn generation(&mut self) -> GenerationReport {
        let moved = self.move_all();
        let rabbits_fed = self.feed_rabbits();
        let rabbits_eaten = self.feed_foxes();
        let removed = self.remove_dead();
        let born = self.reproduce_all();
        let grass_grown = self.grow_grass();

        let report = GenerationReport {
            counts: self.counts(),
            moved,
            rabbits_fed,
            rabbits_eaten,
            removed,
            born,
            grass_grown,
            grass_cover: self.grid.grass_count(),
        };

        trace!(?report, "Generation complete");
        report
    }

    /// Returns the number of animals moved
    pub fn move_all(&mut self) -> usize {
        let dimension = self.grid.dimension();
        let mut moved = 0;
        for organism in self.rabbits.iter_mut().chain(self.foxes.iter_mut()) {
            organism.move_randomly(&mut self.rng, dimension);
            moved += 1;
        }
        moved
    }

    /// Rabbits on grass eat it; the rest go hungry.
    ///
    /// Grass is consumed by the first rabbit to reach it, so later rabbits
    /// on the same cell go hungry. Returns the number of rabbits fed.
    pub fn feed_rabbits(&mut self) -> usize {
        let mut fed = 0;
        for rabbit in &mut self.rabbits {
            if self.grid.consume_grass(rabbit.position) {
                rabbit.feed(1);
                fed += 1;
            } else {
                rabbit.go_hungry();
            }
        }
        fed
    }

    /// Foxes eat every rabbit sharing their cell; the rest go hungry.
    ///
    /// Foxes sharing a cell each eat, and are credited with, the whole group
    /// of rabbits there. Returns the number of rabbits killed.
    pub fn feed_foxes(&mut self) -> usize {
        let mut rabbits_at: HashMap<Position, Vec<usize>> = HashMap::new();
        for (index, rabbit) in self.rabbits.iter().enumerate() {
            rabbits_at.entry(rabbit.position).or_default().push(index);
        }

        let mut killed = 0;
        for fox in &mut self.foxes {
            match rabbits_at.get(&fox.position) {
                Some(group) => {
                    for &index in group {
                        let rabbit = &mut self.rabbits[index];
                        if rabbit.alive {
                            rabbit.alive = false;
                            killed += 1;
                        }
                    }
                    fox.feed(group.len() as u32);
                }
                None => fox.go_hungry(),
            }
        }
        killed
    }

    /// Drop every dead animal. Returns how many were removed per species.
    pub fn remove_dead(&mut self) -> PopulationCounts {
        let before = self.counts();
        self.rabbits.retain(Organism::is_alive);
        self.foxes.retain(Organism::is_alive);
        let after = self.counts();

        PopulationCounts::new(
            before.rabbits - after.rabbits,
            before.foxes - after.foxes,
        )
    }

    /// Well-fed survivors breed; offspring join after every parent is processed.
    pub fn reproduce_all(&mut self) -> PopulationCounts {
        let mut born_rabbits = Vec::new();
        let mut born_foxes = Vec::new();

        for rabbit in self.rabbits.iter_mut().filter(|r| r.can_reproduce()) {
            born_rabbits.extend(rabbit.reproduce(&mut self.rng));
        }
        for fox in self.foxes.iter_mut().filter(|f| f.can_reproduce()) {
            born_foxes.extend(fox.reproduce(&mut self.rng));
        }

        let born = PopulationCounts::new(born_rabbits.len(), born_foxes.len());
        self.rabbits.extend(born_rabbits);
        self.foxes.extend(born_foxes);
        born
    }

    /// Returns the number of cells that gained grass
    pub fn grow_grass(&mut self) -> usize {
        self.grid.grow_grass(self.config.grid.grass_rate, &mut self.rng)
    }
}
