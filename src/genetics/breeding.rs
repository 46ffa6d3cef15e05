//! Pairing and breeding of individuals into the next generation.
//!
//! Pairing is elitist: the pool is ranked by score, best first, and
//! neighbors are paired off. With an odd pool the lowest-scoring
//! individual sits the generation out. Each pair produces exactly two
//! children, so a pool of `n` yields `2 * (n / 2)` offspring.

use std::cmp::Ordering;
use std::sync::Arc;

use ndarray::Array2;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

use crate::config::SimulationParameters;

use super::error::GeneticsError;
use super::gene::MUTATION_SD;
use super::genome::{Genome, NeuralWeights, WEIGHT_MAX, WEIGHT_MIN};
use super::registry::TraitRegistry;

/// A genome with the score used to rank it for pairing. The score is
/// either a computed fitness or an externally supplied energy value.
#[derive(Clone, Debug)]
pub struct Individual {
    pub genome: Genome,
    pub score: f64,
}

impl Individual {
    pub fn new(genome: Genome, score: f64) -> Self {
        Self { genome, score }
    }
}

/// Produces the next generation from a pool of scored individuals.
///
/// `breed` is a pure function of (pool, params, rng): it holds no mutable
/// state beyond the frozen registry and may run concurrently across
/// independent calls. Callers wanting reproducibility supply a seeded rng.
pub struct BreedingEngine {
    registry: Arc<TraitRegistry>,
}

impl BreedingEngine {
    pub fn new(registry: Arc<TraitRegistry>) -> Self {
        Self { registry }
    }

    /// Breed the pool into offspring, flattened in pair order then child
    /// order.
    ///
    /// Fails with [`GeneticsError::EmptyPool`] on an empty pool; any
    /// per-pair failure aborts the whole call with the offending pair
    /// index attached and no offspring returned.
    pub fn breed(
        &self,
        pool: &[Individual],
        params: &SimulationParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Genome>, GeneticsError> {
        if pool.is_empty() {
            return Err(GeneticsError::EmptyPool);
        }

        // Rank best-first. The sort is stable, so ties keep pool order.
        let mut ranked: Vec<&Individual> = pool.iter().collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut offspring = Vec::with_capacity(2 * (ranked.len() / 2));
        for (pair, parents) in ranked.chunks_exact(2).enumerate() {
            let children = self
                .breed_pair(&parents[0].genome, &parents[1].genome, params, rng)
                .map_err(|source| GeneticsError::Breeding {
                    pair,
                    source: Box::new(source),
                })?;
            offspring.extend(children);
        }

        Ok(offspring)
    }

    /// Produce both children for one pair. Fails before emitting either
    /// child, so a failed pair contributes no offspring.
    fn breed_pair(
        &self,
        parent1: &Genome,
        parent2: &Genome,
        params: &SimulationParameters,
        rng: &mut dyn RngCore,
    ) -> Result<[Genome; 2], GeneticsError> {
        let first = self.breed_child(parent1, parent2, params, rng)?;
        let second = self.breed_child(parent1, parent2, params, rng)?;
        Ok([first, second])
    }

    /// Produce one child. Crossover and mutation draws are made
    /// independently per child, so siblings need not be complementary.
    fn breed_child(
        &self,
        parent1: &Genome,
        parent2: &Genome,
        params: &SimulationParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Genome, GeneticsError> {
        let mut entries = Vec::with_capacity(self.registry.len());

        for (name, gene) in self.registry.iter() {
            let v1 = parent1.value(name);
            let v2 = parent2.value(name);

            let mut value = if rng.gen::<f64>() < params.crossover_rate {
                gene.crossover(v1, v2)
            } else if rng.gen::<f64>() < 0.5 {
                v1
            } else {
                v2
            };

            if rng.gen::<f64>() < params.mutation_rate {
                value = gene.mutate(value, rng);
            }

            let (lo, hi) = gene.range();
            entries.push((name.to_string(), value.clamp(lo, hi)));
        }

        let weights = self.cross_weights(
            parent1.neural_weights(),
            parent2.neural_weights(),
            params,
            rng,
        )?;

        Ok(Genome::from_parts(entries, weights))
    }

    /// Element-wise uniform crossover of the parents' weight payloads.
    ///
    /// A parent without a payload contributes fresh random matrices of the
    /// other parent's shape; if neither carries one, the child carries
    /// none.
    fn cross_weights(
        &self,
        parent1: Option<&NeuralWeights>,
        parent2: Option<&NeuralWeights>,
        params: &SimulationParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Option<NeuralWeights>, GeneticsError> {
        let (a, b) = match (parent1, parent2) {
            (None, None) => return Ok(None),
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            (Some(a), None) => {
                let filler = NeuralWeights::random(a.wih.dim(), a.who.dim(), rng);
                (a.clone(), filler)
            }
            (None, Some(b)) => {
                let filler = NeuralWeights::random(b.wih.dim(), b.who.dim(), rng);
                (filler, b.clone())
            }
        };

        if a.wih.dim() != b.wih.dim() {
            return Err(GeneticsError::ShapeMismatch {
                matrix: "wih",
                left: a.wih.dim(),
                right: b.wih.dim(),
            });
        }
        if a.who.dim() != b.who.dim() {
            return Err(GeneticsError::ShapeMismatch {
                matrix: "who",
                left: a.who.dim(),
                right: b.who.dim(),
            });
        }

        let wih = cross_matrix(&a.wih, &b.wih, params.mutation_rate, rng);
        let who = cross_matrix(&a.who, &b.who, params.mutation_rate, rng);
        Ok(Some(NeuralWeights { wih, who }))
    }
}

/// Per-element uniform crossover followed by per-element mutation, with
/// every result clamped to the weight range.
fn cross_matrix(
    a: &Array2<f64>,
    b: &Array2<f64>,
    mutation_rate: f64,
    rng: &mut dyn RngCore,
) -> Array2<f64> {
    Array2::from_shape_fn(a.dim(), |idx| {
        let mut value = if rng.gen::<f64>() < 0.5 { a[idx] } else { b[idx] };
        if rng.gen::<f64>() < mutation_rate {
            let noise: f64 = rng.sample(StandardNormal);
            value = (value + noise * MUTATION_SD).clamp(WEIGHT_MIN, WEIGHT_MAX);
        }
        value
    })
}
