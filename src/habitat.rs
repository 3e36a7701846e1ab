//! Habitats: an environment plus the organisms living in it.

use crate::config::{Config, HabitatConfig, TraitDefaults};
use crate::organism::Organism;
use crate::traits::{Diet, Food};
use rand::Rng;

/// A region of the ecosystem with fixed environmental conditions
#[derive(Clone, Debug)]
pub struct Habitat {
    pub name: String,
    pub temperature: i32,
    pub water: i32,
    pub foods: Diet,

    /// Organisms living here
    pub wildlife: Vec<Organism>,

    /// Offspring bred this generation, not yet settled by migration
    pub new_gen: Vec<Organism>,
}

impl Habitat {
    /// Create an empty habitat
    pub fn new(name: impl Into<String>, temperature: i32, water: i32, foods: Diet) -> Self {
        Self {
            name: name.into(),
            temperature,
            water,
            foods,
            wildlife: Vec::new(),
            new_gen: Vec::new(),
        }
    }

    /// Build a habitat and its founders from configuration
    pub fn from_config(config: &HabitatConfig, defaults: &TraitDefaults) -> Self {
        let mut habitat = Self::new(
            config.name.clone(),
            config.temperature,
            config.water,
            config.foods.iter().copied().collect(),
        );
        habitat.wildlife = config
            .founders
            .iter()
            .map(|f| Organism::from_founder(f, defaults))
            .collect();
        habitat
    }

    /// Add an organism to the wildlife
    pub fn settle(&mut self, organism: Organism) {
        self.wildlife.push(organism);
    }

    /// Whether `food` grows here
    pub fn offers(&self, food: Food) -> bool {
        self.foods.contains(&food)
    }

    pub fn wildlife(&self) -> &[Organism] {
        &self.wildlife
    }

    pub fn population(&self) -> usize {
        self.wildlife.len()
    }

    /// Pair up the wildlife at random and breed each pair.
    ///
    /// The mother is drawn first, then the father from those left; both leave
    /// the pool. With an odd count one organism sits this generation out.
    /// Each pair has as many children as the mother's birth rate. Replaces
    /// `new_gen` and returns the number of children.
    pub fn breed_wildlife<R: Rng + ?Sized>(&mut self, config: &Config, rng: &mut R) -> usize {
        let mut parents: Vec<usize> = (0..self.wildlife.len()).collect();
        let mut new_gen = Vec::new();

        while parents.len() > 1 {
            let mom = parents.remove(rng.gen_range(0..parents.len()));
            let dad = parents.remove(rng.gen_range(0..parents.len()));

            let mother = &self.wildlife[mom];
            let father = &self.wildlife[dad];
            for _ in 0..mother.traits.birth_rate.max(0) {
                new_gen.push(mother.breed(father, config, rng));
            }
        }

        self.new_gen = new_gen;
        self.new_gen.len()
    }
}

impl std::fmt::Display for Habitat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  Life Forms: {}  Temperature: {}  Water: {}",
            self.name,
            self.wildlife.len(),
            self.temperature,
            self.water
        )
    }
}
