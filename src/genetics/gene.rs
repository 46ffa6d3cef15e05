//! Gene capabilities and the built-in heritable traits.
//!
//! A [`Gene`] bundles everything the engine needs to know about one named
//! heritable feature: how it contributes to fitness, how two parent values
//! combine, and how a value mutates. The built-in genes (`speed`, `size`,
//! `color`) override only the fitness rule and inherit the default
//! crossover/mutation behavior.

use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

use crate::config::SimulationParameters;

use super::genome::Genome;

/// Standard deviation of the Gaussian perturbation applied on mutation.
pub const MUTATION_SD: f64 = 0.1;

/// A named heritable feature with its own fitness, crossover and mutation rules.
pub trait Gene: Send + Sync {
    /// This gene's contribution to the genome's overall fitness.
    ///
    /// Must be total: no input in the valid domain may panic.
    fn fitness(&self, genome: &Genome, params: &SimulationParameters) -> f64;

    /// Combine two parent values into a child value. Defaults to the mean.
    fn crossover(&self, a: f64, b: f64) -> f64 {
        (a + b) / 2.0
    }

    /// Perturb a value with Gaussian noise, clamped back into range.
    fn mutate(&self, value: f64, rng: &mut dyn RngCore) -> f64 {
        let noise: f64 = rng.sample(StandardNormal);
        let (lo, hi) = self.range();
        (value + noise * MUTATION_SD).clamp(lo, hi)
    }

    /// Draw a fresh random value, uniform over [0, 1].
    fn random(&self, rng: &mut dyn RngCore) -> f64 {
        rng.gen()
    }

    /// Value used when a genome is constructed without this gene.
    fn default_value(&self) -> f64 {
        0.5
    }

    /// Valid range for this gene's values.
    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Swimming speed. Fast fish catch more food, but speed is less efficient
/// on a large body.
pub struct SpeedGene;

impl Gene for SpeedGene {
    fn fitness(&self, genome: &Genome, params: &SimulationParameters) -> f64 {
        let base = genome.value("speed") * params.food_availability;
        let size_penalty = genome.value("size") * 0.5;
        base - size_penalty
    }
}

/// Body size. Larger fish deter predators but need more food.
pub struct SizeGene;

impl Gene for SizeGene {
    fn fitness(&self, genome: &Genome, params: &SimulationParameters) -> f64 {
        let size = genome.value("size");
        let predator_defense = size * (1.0 - params.predator_density);
        let food_requirement = size * (1.0 - params.food_availability);
        predator_defense - food_requirement
    }
}

/// Coloration. Camouflage peaks at the midpoint of the color range.
pub struct ColorGene;

impl Gene for ColorGene {
    fn fitness(&self, genome: &Genome, params: &SimulationParameters) -> f64 {
        let camouflage = 1.0 - (0.5 - genome.value("color")).abs();
        camouflage * (1.0 - params.predator_density)
    }
}
