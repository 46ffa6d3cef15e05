//! Fitness scoring for genomes under environment parameters.

use std::sync::Arc;

use crate::config::SimulationParameters;

use super::genome::Genome;
use super::registry::TraitRegistry;

/// Sums each registered gene's fitness contribution for a genome.
///
/// Evaluation is total and pure: it never fails, holds no mutable state,
/// and may run in parallel across independent calls.
pub struct FitnessEvaluator {
    registry: Arc<TraitRegistry>,
}

impl FitnessEvaluator {
    pub fn new(registry: Arc<TraitRegistry>) -> Self {
        Self { registry }
    }

    /// Overall fitness: the sum of every gene's contribution, in registry
    /// order.
    pub fn evaluate(&self, genome: &Genome, params: &SimulationParameters) -> f64 {
        self.registry
            .iter()
            .map(|(_, gene)| gene.fitness(genome, params))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(Arc::new(TraitRegistry::builtin()))
    }

    #[test]
    fn test_fitness_worked_example() {
        // speed: 0.8 * 0.5 - 0.5 * 0.5 = 0.15
        // size:  0.5 * 0.8 - 0.5 * 0.5 = 0.15
        // color: 1.0 * 0.8             = 0.80
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("speed".to_string(), 0.8);
        values.insert("size".to_string(), 0.5);
        values.insert("color".to_string(), 0.5);
        let genome = Genome::from_partial(&registry, &values);

        let params = SimulationParameters {
            food_availability: 0.5,
            predator_density: 0.2,
            ..SimulationParameters::default()
        };

        let total = evaluator().evaluate(&genome, &params);
        assert!((total - 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let registry = TraitRegistry::builtin();
        let genome = Genome::from_partial(&registry, &HashMap::new());
        let params = SimulationParameters::default();

        let evaluator = evaluator();
        let a = evaluator.evaluate(&genome, &params);
        let b = evaluator.evaluate(&genome, &params);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_evaluate_total_over_extreme_inputs() {
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("speed".to_string(), f64::MAX);
        values.insert("color".to_string(), f64::MIN);
        // Clamped at construction, so evaluation stays finite.
        let genome = Genome::from_partial(&registry, &values);

        let total = evaluator().evaluate(&genome, &SimulationParameters::default());
        assert!(total.is_finite());
    }
}
