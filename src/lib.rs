//! # AQUARIA
//!
//! Genetic-algorithm engine for breeding simulated fish.
//!
//! The core recombines parent genomes into offspring through per-trait
//! crossover and mutation, scores genomes with a pluggable fitness model
//! driven by environment parameters, and optionally evolves the
//! neural-weight matrices a genome carries (it never runs them).
//!
//! ## Features
//!
//! - **Capability-based**: each heritable trait is a [`genetics::Gene`]
//!   with its own fitness, crossover and mutation rules
//! - **Reproducible**: every randomized operation takes an explicit,
//!   seedable random source
//! - **Concurrent-safe**: the gene registry freezes after startup, and
//!   breeding is a pure function of its inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use aquaria::config::SimulationParameters;
//! use aquaria::genetics::{BreedingEngine, Genome, Individual, TraitRegistry};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TraitRegistry::builtin());
//! let engine = BreedingEngine::new(registry.clone());
//! let params = SimulationParameters::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let pool = vec![
//!     Individual::new(Genome::random(&registry, &mut rng), 2.0),
//!     Individual::new(Genome::random(&registry, &mut rng), 1.0),
//! ];
//!
//! let offspring = engine.breed(&pool, &params, &mut rng).unwrap();
//! assert_eq!(offspring.len(), 2);
//! ```

pub mod config;
pub mod genetics;
pub mod web;

// Re-export main types
pub use config::{Config, SimulationParameters};
pub use genetics::{BreedingEngine, FitnessEvaluator, Genome, GeneticsError, TraitRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
