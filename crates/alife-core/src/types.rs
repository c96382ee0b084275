//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping on a square grid of the given dimension
    pub fn wrap(&self, dimension: i32) -> Self {
        Self {
            x: self.x.rem_euclid(dimension),
            y: self.y.rem_euclid(dimension),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The two kinds of animal living in the habitat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Rabbit,
    Fox,
}

impl Species {
    pub fn all() -> [Species; 2] {
        [Species::Rabbit, Species::Fox]
    }

    /// Reference constants for each species
    pub fn default_traits(&self) -> SpeciesTraits {
        match self {
            Species::Rabbit => SpeciesTraits {
                max_offspring: 1,
                starvation_threshold: 3,
                reproduction_threshold: 2,
            },
            Species::Fox => SpeciesTraits {
                max_offspring: 3,
                starvation_threshold: 12,
                reproduction_threshold: 1,
            },
        }
    }

    pub fn default_initial_population(&self) -> usize {
        match self {
            Species::Rabbit => 50,
            Species::Fox => 35,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Fox => "fox",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constants shared by every member of a species for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTraits {
    /// Upper bound (inclusive) on offspring per reproduction
    pub max_offspring: u32,
    /// Consecutive unfed generations that kill the animal
    pub starvation_threshold: u32,
    /// Food needed since the last reproduction before reproducing again
    pub reproduction_threshold: u32,
}

/// Grid cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Grass,
}

impl Cell {
    pub fn has_grass(&self) -> bool {
        matches!(self, Cell::Grass)
    }
}

/// What a renderer should draw for a cell.
///
/// Foxes take priority over rabbits, rabbits over grass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCell {
    Empty,
    Grass,
    Rabbit,
    Fox,
}

impl DisplayCell {
    /// Integer display code (0 empty, 1 grass, 2 rabbit, 3 fox)
    pub fn code(&self) -> u8 {
        match self {
            DisplayCell::Empty => 0,
            DisplayCell::Grass => 1,
            DisplayCell::Rabbit => 2,
            DisplayCell::Fox => 3,
        }
    }

    pub fn occupant(species: Species) -> Self {
        match species {
            Species::Rabbit => DisplayCell::Rabbit,
            Species::Fox => DisplayCell::Fox,
        }
    }
}

impl From<Cell> for DisplayCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => DisplayCell::Empty,
            Cell::Grass => DisplayCell::Grass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10), Position::new(9, 9));

        let pos = Position::new(10, 10);
        assert_eq!(pos.wrap(10), Position::new(0, 0));
    }

    #[test]
    fn test_species_defaults() {
        let rabbit = Species::Rabbit.default_traits();
        assert_eq!(rabbit.max_offspring, 1);
        assert_eq!(rabbit.starvation_threshold, 3);
        assert_eq!(rabbit.reproduction_threshold, 2);

        let fox = Species::Fox.default_traits();
        assert_eq!(fox.max_offspring, 3);
        assert_eq!(fox.starvation_threshold, 12);
        assert_eq!(fox.reproduction_threshold, 1);
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(DisplayCell::from(Cell::Empty).code(), 0);
        assert_eq!(DisplayCell::from(Cell::Grass).code(), 1);
        assert_eq!(DisplayCell::occupant(Species::Rabbit).code(), 2);
        assert_eq!(DisplayCell::occupant(Species::Fox).code(), 3);
    }

    #[test]
    fn test_species_serialization() {
        let json = serde_json::to_string(&Species::Fox).unwrap();
        assert_eq!(json, "\"fox\"");
        let species: Species = serde_json::from_str("\"rabbit\"").unwrap();
        assert_eq!(species, Species::Rabbit);
    }

    proptest! {
        #[test]
        fn wrap_always_lands_on_grid(x in -1000i32..1000, y in -1000i32..1000, dim in 1i32..100) {
            let wrapped = Position::new(x, y).wrap(dim);
            prop_assert!((0..dim).contains(&wrapped.x));
            prop_assert!((0..dim).contains(&wrapped.y));
        }
    }
}
