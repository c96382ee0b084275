//! Ecosystem simulation engine.
//!
//! Rabbits graze on a toroidal grass grid, foxes hunt rabbits, and both
//! starve when they go too long without food.

pub mod grid;
pub mod organism;
pub mod habitat;
pub mod snapshot;
pub mod simulation;

pub use grid::Grid;
pub use organism::Organism;
pub use habitat::{GenerationReport, Habitat};
pub use snapshot::Snapshot;
pub use simulation::{Simulation, SimulationResult};
