//! # evosim
//!
//! Evolution simulator: organisms spread over habitats with different
//! temperature, water and food, breeding and adapting generation by generation.
//!
//! ## Generation cycle
//!
//! 1. **Breed**: each habitat pairs its wildlife at random; every pair has as
//!    many children as the mother's birth rate.
//! 2. **Migrate**: newborns that cannot live where they were born move to the
//!    first habitat that suits them, or are lost.
//! 3. **Age**: every organism loses one unit of life span.
//! 4. **Cull**: organisms with no life span left are removed.
//!
//! A child genome is drawn from the pooled parent genomes, occasionally with a
//! mutated gene added. Two-letter codes found in the genome then adjust the
//! child's traits (see [`genetics::GENE_TABLE`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use evosim::{Config, Ecosystem};
//!
//! let mut ecosystem = Ecosystem::new_with_seed(Config::default(), 42);
//! ecosystem.run(10);
//!
//! for (habitat, count) in ecosystem.wildlife_totals() {
//!     println!("{}: {}", habitat, count);
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use evosim::{Config, SurvivalPolicy};
//!
//! let mut config = Config::default();
//! config.simulation.mutation_rate = 25;
//! config.simulation.survival_policy = SurvivalPolicy::Strict;
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod ecosystem;
pub mod genetics;
pub mod habitat;
pub mod organism;
pub mod shell;
pub mod stats;
pub mod traits;

// Re-export main types
pub use config::Config;
pub use ecosystem::{Ecosystem, MigrationReport};
pub use habitat::Habitat;
pub use organism::{Organism, SurvivalPolicy};
pub use traits::{Food, Traits};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
