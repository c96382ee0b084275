//! Population counts and time-series tracking.

use crate::Species;
use serde::{Deserialize, Serialize};

/// Number of living animals of each species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub rabbits: usize,
    pub foxes: usize,
}

impl PopulationCounts {
    pub fn new(rabbits: usize, foxes: usize) -> Self {
        Self { rabbits, foxes }
    }

    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Rabbit => self.rabbits,
            Species::Fox => self.foxes,
        }
    }

    pub fn total(&self) -> usize {
        self.rabbits + self.foxes
    }
}

/// Per-generation population counts for one run.
///
/// Entry `i` holds the counts after generation `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationHistory {
    entries: Vec<PopulationCounts>,
}

impl PopulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, counts: PopulationCounts) {
        self.entries.push(counts);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<PopulationCounts> {
        self.entries.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopulationCounts> + '_ {
        self.entries.iter()
    }

    pub fn series(&self, species: Species) -> Vec<usize> {
        self.entries.iter().map(|c| c.get(species)).collect()
    }

    pub fn rabbit_series(&self) -> Vec<usize> {
        self.series(Species::Rabbit)
    }

    pub fn fox_series(&self) -> Vec<usize> {
        self.series(Species::Fox)
    }

    /// First generation (1-based) at which the species count reached zero
    pub fn extinct_at(&self, species: Species) -> Option<u64> {
        self.entries
            .iter()
            .position(|c| c.get(species) == 0)
            .map(|i| i as u64 + 1)
    }

    pub fn summary(&self) -> HistorySummary {
        let n = self.entries.len();
        let mean = |species: Species| {
            if n == 0 {
                0.0
            } else {
                self.entries.iter().map(|c| c.get(species) as f64).sum::<f64>() / n as f64
            }
        };
        let peak = |species: Species| {
            self.entries.iter().map(|c| c.get(species)).max().unwrap_or(0)
        };

        HistorySummary {
            generations: n as u64,
            peak_rabbits: peak(Species::Rabbit),
            peak_foxes: peak(Species::Fox),
            mean_rabbits: mean(Species::Rabbit),
            mean_foxes: mean(Species::Fox),
            rabbits_extinct_at: self.extinct_at(Species::Rabbit),
            foxes_extinct_at: self.extinct_at(Species::Fox),
        }
    }
}

/// Aggregate statistics over a population history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub generations: u64,
    pub peak_rabbits: usize,
    pub peak_foxes: usize,
    pub mean_rabbits: f64,
    pub mean_foxes: f64,
    pub rabbits_extinct_at: Option<u64>,
    pub foxes_extinct_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(counts: &[(usize, usize)]) -> PopulationHistory {
        let mut history = PopulationHistory::new();
        for &(r, f) in counts {
            history.push(PopulationCounts::new(r, f));
        }
        history
    }

    #[test]
    fn test_series() {
        let history = history(&[(50, 35), (48, 36), (40, 30)]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.rabbit_series(), vec![50, 48, 40]);
        assert_eq!(history.fox_series(), vec![35, 36, 30]);
        assert_eq!(history.latest(), Some(PopulationCounts::new(40, 30)));
    }

    #[test]
    fn test_summary() {
        let history = history(&[(10, 4), (20, 2), (0, 6), (0, 0)]);
        let summary = history.summary();

        assert_eq!(summary.generations, 4);
        assert_eq!(summary.peak_rabbits, 20);
        assert_eq!(summary.peak_foxes, 6);
        assert_eq!(summary.mean_rabbits, 7.5);
        assert_eq!(summary.mean_foxes, 3.0);
        assert_eq!(summary.rabbits_extinct_at, Some(3));
        assert_eq!(summary.foxes_extinct_at, Some(4));
    }

    #[test]
    fn test_empty_summary() {
        let summary = PopulationHistory::new().summary();
        assert_eq!(summary, HistorySummary::default());
    }

    #[test]
    fn test_counts_total() {
        let counts = PopulationCounts::new(3, 4);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.get(Species::Fox), 4);
    }
}
