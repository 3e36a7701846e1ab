//! Organism structure and behavior.

use crate::config::{Config, FounderConfig, SimulationConfig, TraitDefaults, TraitLimits};
use crate::genetics::{crossover, express};
use crate::habitat::Habitat;
use crate::traits::Traits;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rule deciding whether an organism can live in a habitat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurvivalPolicy {
    /// Food, temperature and water must all fit
    Strict,
    /// Enough of the three conditions must fit (see `survival_threshold`)
    #[default]
    Scored,
}

/// An organism in the simulation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub genome: String,
    pub traits: Traits,

    /// 0 for founders, one more than the older parent otherwise
    pub generation: u32,

    /// Gene added to the pool at conception, if any
    pub mutation: Option<char>,
}

impl Organism {
    /// Create an organism without expressing its genome
    pub fn new(genome: impl Into<String>, traits: Traits) -> Self {
        Self {
            genome: genome.into(),
            traits,
            generation: 0,
            mutation: None,
        }
    }

    /// Build a founder from configuration
    pub fn from_founder(founder: &FounderConfig, defaults: &TraitDefaults) -> Self {
        let traits = Traits::new(
            founder.temp_tolerance,
            founder.water_need,
            founder.diet.iter().copied().collect(),
            founder.food_needed.unwrap_or(defaults.food_needed),
            founder.birth_rate.unwrap_or(defaults.birth_rate),
            founder.life_span.unwrap_or(defaults.life_span),
        );
        Self::new(founder.genome.clone(), traits)
    }

    /// Breed with `mate`, `self` being the mother.
    ///
    /// The child's traits start from the mother's and are then shaped by its
    /// own genome.
    pub fn breed<R: Rng + ?Sized>(&self, mate: &Organism, config: &Config, rng: &mut R) -> Organism {
        let sim = &config.simulation;
        let conception = crossover(
            &self.genome,
            &mate.genome,
            sim.mutation_rate,
            &sim.mutation_alphabet,
            rng,
        );

        let mut child = Organism {
            genome: conception.genome,
            traits: Traits::inherit(&self.traits, &config.defaults),
            generation: self.generation.max(mate.generation) + 1,
            mutation: conception.mutation,
        };
        child.express_genes(&config.limits, rng);
        child
    }

    /// Apply every gene code found in the genome. Returns the number fired.
    pub fn express_genes<R: Rng + ?Sized>(&mut self, limits: &TraitLimits, rng: &mut R) -> usize {
        express(&self.genome, &mut self.traits, limits, rng)
    }

    /// Number of habitat conditions (temperature, water, food) this organism meets
    pub fn survival_score(&self, habitat: &Habitat) -> u8 {
        let mut score = 0;
        if self.traits.temp_tolerance == habitat.temperature {
            score += 1;
        }
        if self.traits.water_need <= habitat.water {
            score += 1;
        }
        if self.finds_food(habitat) {
            score += 1;
        }
        score
    }

    /// Check whether this organism can live in `habitat`.
    ///
    /// An organism with nothing to eat there, either because its diet is
    /// empty or because the habitat offers no food, never survives.
    pub fn can_survive(&self, habitat: &Habitat, sim: &SimulationConfig) -> bool {
        if self.traits.diet.is_empty() || habitat.foods.is_empty() {
            return false;
        }
        match sim.survival_policy {
            SurvivalPolicy::Strict => {
                self.finds_food(habitat)
                    && self.traits.temp_tolerance == habitat.temperature
                    && self.traits.water_need <= habitat.water
            }
            SurvivalPolicy::Scored => self.survival_score(habitat) >= sim.survival_threshold,
        }
    }

    fn finds_food(&self, habitat: &Habitat) -> bool {
        self.traits.diet.iter().any(|food| habitat.offers(*food))
    }

    /// Age one generation. Life span may go negative.
    pub fn get_older(&mut self) {
        self.traits.decrease_life_span();
    }

    pub fn is_alive(&self) -> bool {
        self.traits.is_alive()
    }
}

impl std::fmt::Display for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (gen {})  {}", self.genome, self.generation, self.traits)
    }
}
