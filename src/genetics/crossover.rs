//! Genome crossover for breeding: pooled parent genes, point mutation and
//! sampling with replacement.

use rand::seq::IteratorRandom;
use rand::Rng;

/// Genes of both parents, from which a child genome is drawn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenePool {
    genes: Vec<char>,
}

impl GenePool {
    /// Pool the mother's genes followed by the father's
    pub fn new(mother: &str, father: &str) -> Self {
        Self {
            genes: mother.chars().chain(father.chars()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// With `rate` percent chance, append one random gene from `alphabet`.
    /// Returns the inserted gene.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: u32, alphabet: &str, rng: &mut R) -> Option<char> {
        let roll: u32 = rng.gen_range(1..=100);
        if roll > rate {
            return None;
        }
        let gene = alphabet.chars().choose(rng)?;
        self.genes.push(gene);
        Some(gene)
    }

    /// Child genome length: half the pool, rounded down
    pub fn child_len(&self) -> usize {
        self.genes.len() / 2
    }

    /// Draw a child genome. Every gene is drawn from the whole pool
    /// independently, so a parent gene can appear more than once.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if self.genes.is_empty() {
            return String::new();
        }
        (0..self.child_len())
            .map(|_| self.genes[rng.gen_range(0..self.genes.len())])
            .collect()
    }
}

/// Result of combining two parent genomes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conception {
    pub genome: String,
    pub mutation: Option<char>,
}

/// Combine two genomes into a child genome.
pub fn crossover<R: Rng + ?Sized>(
    mother: &str,
    father: &str,
    mutation_rate: u32,
    alphabet: &str,
    rng: &mut R,
) -> Conception {
    let mut pool = GenePool::new(mother, father);
    let mutation = pool.mutate(mutation_rate, alphabet, rng);
    let genome = pool.draw(rng);
    Conception { genome, mutation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_child_length_without_mutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..200 {
            let child = crossover("ab", "cd", 0, "abcd", &mut rng);
            assert_eq!(child.genome.len(), 2);
            assert!(child.genome.chars().all(|c| "abcd".contains(c)));
            assert_eq!(child.mutation, None);
        }
    }

    #[test]
    fn test_child_length_uses_mutated_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        // 5 genes after mutation -> 2
        let child = crossover("ab", "cd", 100, "abcd", &mut rng);
        assert!(child.mutation.is_some());
        assert_eq!(child.genome.len(), 2);

        // 7 genes after mutation -> 3
        let child = crossover("abc", "abc", 100, "d", &mut rng);
        assert_eq!(child.mutation, Some('d'));
        assert_eq!(child.genome.len(), 3);
    }

    #[test]
    fn test_sampling_with_replacement() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // A shuffle of "ab"+"cd" could never produce "aa"; sampling can.
        let repeats = (0..500)
            .map(|_| crossover("ab", "cd", 0, "abcd", &mut rng).genome)
            .filter(|g| {
                let bytes = g.as_bytes();
                bytes[0] == bytes[1]
            })
            .count();
        assert!(repeats > 0);
    }

    #[test]
    fn test_mutation_frequency_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let trials = 20_000;

        let mutated = (0..trials)
            .filter(|_| crossover("ab", "cd", 10, "abcd", &mut rng).mutation.is_some())
            .count();

        let observed = mutated as f64 / trials as f64;
        assert!((observed - 0.10).abs() < 0.01, "observed rate {}", observed);
    }

    #[test]
    fn test_empty_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let pool = GenePool::new("", "");
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), "");

        // One mutated gene is still less than a full gene for the child
        let child = crossover("", "", 100, "abcd", &mut rng);
        assert_eq!(child.genome, "");
    }

    #[test]
    fn test_pool_order() {
        let pool = GenePool::new("ab", "cd");
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.child_len(), 2);
        assert_eq!(pool, GenePool::new("abc", "d"));
    }
}
