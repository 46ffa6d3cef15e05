//! Genetics module - gene registry, genomes, fitness scoring and breeding.

pub mod breeding;
pub mod error;
pub mod fitness;
pub mod gene;
pub mod genome;
pub mod registry;

pub use breeding::{BreedingEngine, Individual};
pub use error::GeneticsError;
pub use fitness::FitnessEvaluator;
pub use gene::{ColorGene, Gene, SizeGene, SpeedGene, MUTATION_SD};
pub use genome::{Genome, NeuralWeights, WEIGHT_MAX, WEIGHT_MIN};
pub use registry::TraitRegistry;
