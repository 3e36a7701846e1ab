//! Statistics tracking for the simulation.

use crate::habitat::Habitat;
use serde::{Deserialize, Serialize};

/// Population of one habitat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitatCount {
    pub name: String,
    pub population: usize,
}

/// Statistics snapshot for one generation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Generations simulated so far
    pub generation: u64,
    /// Organisms alive after the cull
    pub population: usize,
    /// Population per habitat, in ecosystem order
    pub habitats: Vec<HabitatCount>,
    /// Children bred this generation
    pub births: usize,
    /// Children whose conception inserted a mutated gene
    pub mutations: usize,
    /// Children that stayed in their birth habitat
    pub settled: usize,
    /// Children that moved to another habitat
    pub migrated: usize,
    /// Children that fit no habitat and were removed
    pub dropped: usize,
    /// Children lost to failed migration since the simulation started
    #[serde(default)]
    pub total_dropped: usize,
    /// Organisms culled this generation
    pub deaths: usize,
    /// Highest organism generation alive
    pub lineage_depth: u32,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh population figures from the habitats
    pub fn update(&mut self, habitats: &[Habitat]) {
        self.habitats = habitats
            .iter()
            .map(|h| HabitatCount {
                name: h.name.clone(),
                population: h.population(),
            })
            .collect();
        self.population = self.habitats.iter().map(|h| h.population).sum();
        self.lineage_depth = habitats
            .iter()
            .flat_map(|h| h.wildlife.iter())
            .map(|o| o.generation)
            .max()
            .unwrap_or(0);
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:5} | Pop:{:5} | Born:{:4} | Mut:{:3} | Home:{:4} | Moved:{:4} | Lost:{:4} | Died:{:4}",
            self.generation,
            self.population,
            self.births,
            self.mutations,
            self.settled,
            self.migrated,
            self.dropped,
            self.deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in generations
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Record a snapshot if `stats.generation` falls on the interval
    pub fn maybe_record(&mut self, stats: &Stats) {
        if stats.generation % self.interval == 0 {
            self.snapshots.push(stats.clone());
        }
    }

    /// Population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.population))
            .collect()
    }

    /// Newest recorded snapshot
    pub fn latest(&self) -> Option<&Stats> {
        self.snapshots.last()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
