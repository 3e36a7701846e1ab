//! Genetics module - genome crossover and gene expression.

pub mod crossover;
pub mod expression;

pub use crossover::{crossover, Conception, GenePool};
pub use expression::{express, TraitOp, GENE_TABLE};
