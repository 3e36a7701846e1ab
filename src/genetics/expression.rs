//! Gene expression table: two-letter codes mapped to trait operations.

use crate::config::TraitLimits;
use crate::traits::Traits;
use rand::Rng;

/// A single trait mutation triggered by a gene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraitOp {
    IncreaseLifeSpan,
    DecreaseLifeSpan,
    IncreaseWaterNeed,
    DecreaseWaterNeed,
    IncreaseTempTolerance,
    DecreaseTempTolerance,
    IncreaseBirthRate,
    DecreaseBirthRate,
    AddFood,
    RemoveFood,
}

impl TraitOp {
    /// Apply this operation to a trait vector
    pub fn apply<R: Rng + ?Sized>(self, traits: &mut Traits, limits: &TraitLimits, rng: &mut R) {
        match self {
            TraitOp::IncreaseLifeSpan => traits.increase_life_span(limits),
            TraitOp::DecreaseLifeSpan => traits.decrease_life_span(),
            TraitOp::IncreaseWaterNeed => traits.increase_water_need(limits),
            TraitOp::DecreaseWaterNeed => traits.decrease_water_need(limits),
            TraitOp::IncreaseTempTolerance => traits.increase_temp_tolerance(limits),
            TraitOp::DecreaseTempTolerance => traits.decrease_temp_tolerance(limits),
            TraitOp::IncreaseBirthRate => traits.increase_birth_rate(limits),
            TraitOp::DecreaseBirthRate => traits.decrease_birth_rate(),
            TraitOp::AddFood => traits.add_food_to_diet(rng),
            TraitOp::RemoveFood => traits.remove_food_from_diet(rng),
        }
    }
}

/// Gene codes in evaluation order.
pub static GENE_TABLE: [(&str, TraitOp); 10] = [
    ("aa", TraitOp::IncreaseLifeSpan),
    ("ad", TraitOp::IncreaseWaterNeed),
    ("bb", TraitOp::DecreaseLifeSpan),
    ("bd", TraitOp::DecreaseWaterNeed),
    ("ca", TraitOp::IncreaseTempTolerance),
    ("cc", TraitOp::AddFood),
    ("cd", TraitOp::DecreaseBirthRate),
    ("db", TraitOp::DecreaseTempTolerance),
    ("dc", TraitOp::IncreaseBirthRate),
    ("dd", TraitOp::RemoveFood),
];

/// Codes from the table that occur anywhere in `genome`
pub fn active_genes(genome: &str) -> impl Iterator<Item = (&'static str, TraitOp)> + '_ {
    GENE_TABLE
        .iter()
        .copied()
        .filter(move |(code, _)| genome.contains(code))
}

/// Express a genome on a trait vector.
///
/// Each code fires at most once no matter how often it occurs. Returns the
/// number of codes that fired.
pub fn express<R: Rng + ?Sized>(
    genome: &str,
    traits: &mut Traits,
    limits: &TraitLimits,
    rng: &mut R,
) -> usize {
    let mut fired = 0;
    for (_, op) in active_genes(genome) {
        op.apply(traits, limits, rng);
        fired += 1;
    }
    fired
}
