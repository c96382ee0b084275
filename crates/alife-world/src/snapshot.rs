//! Read-only display view of a habitat for external renderers.

use crate::habitat::Habitat;
use alife_core::{DisplayCell, Position, Species};
use serde::{Deserialize, Serialize};

/// Per-cell display state: grass cover overlaid with rabbits, then foxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    dimension: i32,
    cells: Vec<DisplayCell>,
}

fn cell_index(pos: Position, dimension: i32) -> usize {
    pos.y as usize * dimension as usize + pos.x as usize
}

impl Snapshot {
    pub fn capture(habitat: &Habitat) -> Self {
        let grid = habitat.grid();
        let dimension = grid.dimension();
        let mut cells: Vec<DisplayCell> = grid.iter().map(|(_, cell)| cell.into()).collect();

        // Foxes are drawn last so they cover rabbits on the same cell
        for species in [Species::Rabbit, Species::Fox] {
            for organism in habitat.population(species) {
                let pos = organism.position.wrap(dimension);
                cells[cell_index(pos, dimension)] = DisplayCell::occupant(species);
            }
        }

        Self { dimension, cells }
    }

    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    pub fn get(&self, pos: Position) -> DisplayCell {
        self.cells[cell_index(pos.wrap(self.dimension), self.dimension)]
    }

    /// Display codes row by row (`rows()[y][x]`)
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.dimension as usize)
            .map(|row| row.iter().map(DisplayCell::code).collect())
            .collect()
    }

    pub fn count(&self, state: DisplayCell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }
}
