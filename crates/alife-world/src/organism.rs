//! Organism state and lifecycle.

use alife_core::{Position, Species, SpeciesTraits};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single rabbit or fox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub species: Species,
    pub position: Position,
    /// Consecutive generations without food
    pub hunger: u32,
    /// Food eaten since birth or the last reproduction
    pub food_eaten: u32,
    pub alive: bool,
    traits: SpeciesTraits,
}

impl Organism {
    pub fn new(species: Species, traits: SpeciesTraits, position: Position) -> Self {
        Self {
            species,
            position,
            hunger: 0,
            food_eaten: 0,
            alive: true,
            traits,
        }
    }

    pub fn traits(&self) -> SpeciesTraits {
        self.traits
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Step by -1, 0 or +1 on each axis, wrapping around the grid edges
    pub fn move_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R, dimension: i32) {
        let dx = rng.gen_range(-1..=1);
        let dy = rng.gen_range(-1..=1);
        self.position = self.position.add(dx, dy).wrap(dimension);
    }

    pub fn feed(&mut self, amount: u32) {
        self.food_eaten += amount;
        self.hunger = 0;
    }

    /// Record an unfed generation; dies once hunger reaches the starvation threshold
    pub fn go_hungry(&mut self) {
        self.hunger += 1;
        if self.hunger >= self.traits.starvation_threshold {
            self.alive = false;
        }
    }

    pub fn can_reproduce(&self) -> bool {
        self.food_eaten >= self.traits.reproduction_threshold
    }

    /// Spend all accumulated food on a litter of 0..=max_offspring young.
    ///
    /// Offspring start where the parent stands.
    pub fn reproduce<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Organism> {
        self.food_eaten = 0;
        let litter = rng.gen_range(0..=self.traits.max_offspring);
        (0..litter)
            .map(|_| Organism::new(self.species, self.traits, self.position))
            .collect()
    }
}
