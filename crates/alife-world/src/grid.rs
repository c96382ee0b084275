//! Square toroidal grass grid.

use alife_core::{Cell, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A square toroidal grid of grass cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    dimension: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    ///
    /// `dimension` must be positive; `SimConfig::validate` enforces this
    /// before a habitat builds its grid.
    pub fn new(dimension: i32, fill: Cell) -> Self {
        debug_assert!(dimension > 0, "grid dimension must be positive, got {}", dimension);
        let size = (dimension as usize).pow(2);
        Self {
            dimension,
            cells: vec![fill; size],
        }
    }

    pub fn empty(dimension: i32) -> Self {
        Self::new(dimension, Cell::Empty)
    }

    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
    }

    pub fn has_grass(&self, pos: Position) -> bool {
        self.get(pos).has_grass()
    }

    /// Remove the grass at `pos`, returning whether there was any to eat
    pub fn consume_grass(&mut self, pos: Position) -> bool {
        let index = self.pos_to_index(pos);
        let had_grass = self.cells[index].has_grass();
        self.cells[index] = Cell::Empty;
        had_grass
    }

    /// Independently sprout grass on each cell with probability `rate`.
    ///
    /// Existing grass is never removed. Returns the number of newly grassed cells.
    pub fn grow_grass<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> usize {
        let mut grown = 0;
        for cell in &mut self.cells {
            // Draw for every cell so the random stream does not depend on grass cover
            let sprouts = rng.gen::<f64>() < rate;
            if sprouts && !cell.has_grass() {
                *cell = Cell::Grass;
                grown += 1;
            }
        }
        grown
    }

    pub fn grass_count(&self) -> usize {
        self.cells.iter().filter(|c| c.has_grass()).count()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.dimension);
        wrapped.y as usize * self.dimension as usize + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.dimension;
        let y = (index as i32) / self.dimension;
        Position::new(x, y)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}
