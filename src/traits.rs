//! Trait vector: the bounded attributes an organism's genes act on.

use crate::config::{TraitDefaults, TraitLimits};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kinds of food a habitat can offer and an organism can eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Food {
    Grass,
    Seeds,
    Leaves,
    Fruit,
}

impl Food {
    /// Every known food kind
    pub const ALL: [Food; 4] = [Food::Grass, Food::Seeds, Food::Leaves, Food::Fruit];

    pub fn name(&self) -> &'static str {
        match self {
            Food::Grass => "grass",
            Food::Seeds => "seeds",
            Food::Leaves => "leaves",
            Food::Fruit => "fruit",
        }
    }
}

impl std::fmt::Display for Food {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of foods an organism can eat
pub type Diet = BTreeSet<Food>;

/// Mutable attribute set of an organism.
///
/// Every operation clamps its field to [`TraitLimits`]. Two operations have a
/// fatal side effect: dropping the birth rate to zero or emptying the diet
/// forces `life_span` to 0, which the next cull picks up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    pub temp_tolerance: i32,
    pub water_need: i32,
    pub diet: Diet,
    /// Carried but not consulted by any survival rule
    pub food_needed: i32,
    pub birth_rate: i32,
    /// `<= 0` means dead
    pub life_span: i32,
}

impl Traits {
    pub fn new(
        temp_tolerance: i32,
        water_need: i32,
        diet: Diet,
        food_needed: i32,
        birth_rate: i32,
        life_span: i32,
    ) -> Self {
        Self {
            temp_tolerance,
            water_need,
            diet,
            food_needed,
            birth_rate,
            life_span,
        }
    }

    /// Traits for a newborn: the mother's temperature, water, birth rate and
    /// (copied) diet, with default food need and life span.
    pub fn inherit(mother: &Traits, defaults: &TraitDefaults) -> Self {
        Self {
            temp_tolerance: mother.temp_tolerance,
            water_need: mother.water_need,
            diet: mother.diet.clone(),
            food_needed: defaults.food_needed,
            birth_rate: mother.birth_rate,
            life_span: defaults.life_span,
        }
    }

    pub fn increase_temp_tolerance(&mut self, limits: &TraitLimits) {
        self.temp_tolerance = (self.temp_tolerance + 1).clamp(limits.min_temp, limits.max_temp);
    }

    pub fn decrease_temp_tolerance(&mut self, limits: &TraitLimits) {
        self.temp_tolerance = (self.temp_tolerance - 1).clamp(limits.min_temp, limits.max_temp);
    }

    pub fn increase_water_need(&mut self, limits: &TraitLimits) {
        self.water_need = (self.water_need + 1).clamp(limits.min_water, limits.max_water);
    }

    pub fn decrease_water_need(&mut self, limits: &TraitLimits) {
        self.water_need = (self.water_need - 1).clamp(limits.min_water, limits.max_water);
    }

    pub fn increase_birth_rate(&mut self, limits: &TraitLimits) {
        self.birth_rate = (self.birth_rate + 1).clamp(0, limits.max_birth);
    }

    /// Losing the last birth is fatal.
    pub fn decrease_birth_rate(&mut self) {
        self.birth_rate = (self.birth_rate - 1).max(0);
        if self.birth_rate == 0 {
            self.life_span = 0;
        }
    }

    pub fn increase_life_span(&mut self, limits: &TraitLimits) {
        self.life_span = (self.life_span + 1).min(limits.max_life);
    }

    /// No floor: negative values are simply dead.
    pub fn decrease_life_span(&mut self) {
        self.life_span -= 1;
    }

    /// Add one random food the diet does not cover yet.
    pub fn add_food_to_diet<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let missing = Food::ALL.iter().filter(|f| !self.diet.contains(*f));
        if let Some(&food) = missing.choose(rng) {
            self.diet.insert(food);
        }
    }

    /// Remove one random food. Removing the last one starves the organism.
    pub fn remove_food_from_diet<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.diet.len() <= 1 {
            self.diet.clear();
            self.life_span = 0;
            return;
        }
        if let Some(&food) = self.diet.iter().choose(rng) {
            self.diet.remove(&food);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life_span > 0
    }
}

impl std::fmt::Display for Traits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let diet: Vec<&str> = self.diet.iter().map(Food::name).collect();
        write!(
            f,
            "Temp: {}  Life Span: {}  Birth Rate: {}  Water Needed: {}  Diet: [{}]",
            self.temp_tolerance,
            self.life_span,
            self.birth_rate,
            self.water_need,
            diet.join(", ")
        )
    }
}
