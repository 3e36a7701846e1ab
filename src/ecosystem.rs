//! Ecosystem simulation engine - the generation loop.

use crate::config::Config;
use crate::habitat::Habitat;
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Outcome of one migration phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Newborns that stayed in their birth habitat
    pub settled: usize,
    /// Newborns that moved to another habitat
    pub migrated: usize,
    /// Newborns that fit nowhere and were removed from the simulation
    pub dropped: usize,
}

/// The simulated world: an ordered list of habitats.
///
/// Habitat order is the display order and the order in which migrants look
/// for a new home.
pub struct Ecosystem {
    pub habitats: Vec<Habitat>,

    /// Completed generations
    pub generation: u64,

    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Ecosystem {
    /// Create an ecosystem from the configured seed world.
    ///
    /// Uses `simulation.seed` when set, otherwise a fresh random seed.
    pub fn new(config: Config) -> Self {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::new_with_seed(config, seed)
    }

    /// Create an ecosystem with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let habitats: Vec<Habitat> = config
            .habitats
            .iter()
            .map(|h| Habitat::from_config(h, &config.defaults))
            .collect();

        let mut stats = Stats::new();
        stats.update(&habitats);

        log::info!(
            "Ecosystem created: {} habitats, population={}, seed={}",
            habitats.len(),
            stats.population,
            seed
        );

        Self {
            habitats,
            generation: 0,
            stats_history: StatsHistory::new(config.logging.stats_interval),
            config,
            stats,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Run one full generation: breed, migrate, age, cull
    pub fn step(&mut self) -> &Stats {
        let population_before = self.population();

        let births = self.breed_all();
        let mutations = self
            .habitats
            .iter()
            .flat_map(|h| h.new_gen.iter())
            .filter(|o| o.mutation.is_some())
            .count();
        let migration = self.migrate();
        self.age_all();
        let deaths = self.remove_all_dead();

        self.generation += 1;
        self.stats.generation = self.generation;
        self.stats.births = births;
        self.stats.mutations = mutations;
        self.stats.settled = migration.settled;
        self.stats.migrated = migration.migrated;
        self.stats.dropped = migration.dropped;
        self.stats.total_dropped += migration.dropped;
        self.stats.deaths = deaths;
        self.stats.update(&self.habitats);
        self.stats_history.maybe_record(&self.stats);

        log::debug!("{}", self.stats.summary());
        if population_before > 0 && self.is_extinct() {
            log::info!("Population extinct at generation {}", self.generation);
        }

        &self.stats
    }

    /// Phase 1: breed every habitat. Returns the number of children.
    ///
    /// Each habitat gets its own generator seeded from the ecosystem's, so
    /// the outcome is the same with or without parallel breeding.
    pub fn breed_all(&mut self) -> usize {
        let seeds: Vec<u64> = (0..self.habitats.len()).map(|_| self.rng.gen()).collect();
        let config = &self.config;

        let breed = |(habitat, seed): (&mut Habitat, u64)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            habitat.breed_wildlife(config, &mut rng)
        };

        let births: usize = if config.simulation.parallel_breeding {
            self.habitats.par_iter_mut().zip(seeds).map(breed).sum()
        } else {
            self.habitats.iter_mut().zip(seeds).map(breed).sum()
        };

        log::debug!("Generation {}: {} births", self.generation + 1, births);
        births
    }

    /// Phase 2: settle every newborn.
    ///
    /// Newborns that can live where they were born stay. The rest queue up and,
    /// in queue order, move to the first habitat that suits them. Those that
    /// fit nowhere are gone for good. All `new_gen` lists are empty afterwards.
    pub fn migrate(&mut self) -> MigrationReport {
        let sim = &self.config.simulation;
        let mut report = MigrationReport::default();
        let mut migrants = Vec::new();

        for habitat in &mut self.habitats {
            for organism in std::mem::take(&mut habitat.new_gen) {
                if organism.can_survive(habitat, sim) {
                    habitat.settle(organism);
                    report.settled += 1;
                } else {
                    migrants.push(organism);
                }
            }
        }

        for migrant in migrants {
            match self.habitats.iter().position(|h| migrant.can_survive(h, sim)) {
                Some(idx) => {
                    log::trace!("{} migrates to {}", migrant.genome, self.habitats[idx].name);
                    self.habitats[idx].settle(migrant);
                    report.migrated += 1;
                }
                None => report.dropped += 1,
            }
        }

        if report.dropped > 0 {
            log::warn!(
                "Generation {}: {} newborns found no habitat and were removed",
                self.generation + 1,
                report.dropped
            );
        }
        log::debug!(
            "Generation {}: settled={} migrated={} dropped={}",
            self.generation + 1,
            report.settled,
            report.migrated,
            report.dropped
        );
        report
    }

    /// Phase 3: every organism in every habitat ages by one
    pub fn age_all(&mut self) {
        for habitat in &mut self.habitats {
            for organism in &mut habitat.wildlife {
                organism.get_older();
            }
        }
    }

    /// Phase 4: remove organisms whose life span is used up. Returns the
    /// number removed.
    pub fn remove_all_dead(&mut self) -> usize {
        let mut removed = 0;
        for habitat in &mut self.habitats {
            let before = habitat.wildlife.len();
            habitat.wildlife.retain(|o| o.is_alive());
            removed += before - habitat.wildlife.len();
        }
        log::debug!("Generation {}: {} deaths", self.generation + 1, removed);
        removed
    }

    /// Run the given number of generations
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Run generations with a callback after each one
    pub fn run_with_callback<F>(&mut self, generations: u64, mut callback: F)
    where
        F: FnMut(&Ecosystem),
    {
        for _ in 0..generations {
            self.step();
            callback(self);
        }
    }

    /// Name and population of every habitat, in ecosystem order
    pub fn wildlife_totals(&self) -> Vec<(&str, usize)> {
        self.habitats
            .iter()
            .map(|h| (h.name.as_str(), h.population()))
            .collect()
    }

    /// Look up a habitat by name
    pub fn habitat(&self, name: &str) -> Option<&Habitat> {
        self.habitats.iter().find(|h| h.name == name)
    }

    /// Total organisms across all habitats
    pub fn population(&self) -> usize {
        self.habitats.iter().map(Habitat::population).sum()
    }

    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number of habitats in Ecosystem: {}", self.habitats.len())
    }
}
