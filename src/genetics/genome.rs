//! Genome representation: ordered trait values plus optional neural weights.

use std::collections::HashMap;

use ndarray::Array2;
use rand::{Rng, RngCore};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize};

use super::registry::TraitRegistry;

/// Valid range for neural-weight matrix elements.
pub const WEIGHT_MIN: f64 = -1.0;
pub const WEIGHT_MAX: f64 = 1.0;

/// A full set of trait values for one fish, plus an optional
/// neural-weight payload.
///
/// A genome is always complete with respect to the registry it was
/// constructed against: every registered name has a value, stored in
/// registry order. It is immutable after construction; the breeding
/// pipeline produces new genomes rather than mutating parents.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    entries: Vec<(String, f64)>,
    neural_weights: Option<NeuralWeights>,
}

impl Genome {
    /// Build a genome from a possibly-incomplete map of trait values.
    ///
    /// Missing traits get their gene's default; values are clamped to each
    /// gene's valid range; unknown extra keys are ignored (extra fields such
    /// as energy live outside the genome). Never fails.
    pub fn from_partial(registry: &TraitRegistry, values: &HashMap<String, f64>) -> Genome {
        let entries = registry
            .iter()
            .map(|(name, gene)| {
                let raw = values
                    .get(name)
                    .copied()
                    .unwrap_or_else(|| gene.default_value());
                let (lo, hi) = gene.range();
                (name.to_string(), raw.clamp(lo, hi))
            })
            .collect();

        Genome {
            entries,
            neural_weights: None,
        }
    }

    /// Build a genome with a fresh random value for every registered gene.
    pub fn random(registry: &TraitRegistry, rng: &mut dyn RngCore) -> Genome {
        let entries = registry
            .iter()
            .map(|(name, gene)| {
                let (lo, hi) = gene.range();
                (name.to_string(), gene.random(rng).clamp(lo, hi))
            })
            .collect();

        Genome {
            entries,
            neural_weights: None,
        }
    }

    /// Assemble a genome from already-validated parts. Used by the breeding
    /// engine, which iterates in registry order by construction.
    pub(crate) fn from_parts(
        entries: Vec<(String, f64)>,
        neural_weights: Option<NeuralWeights>,
    ) -> Genome {
        Genome {
            entries,
            neural_weights,
        }
    }

    /// Attach a neural-weight payload.
    pub fn with_neural_weights(mut self, weights: NeuralWeights) -> Genome {
        self.neural_weights = Some(weights);
        self
    }

    /// Value for a trait, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Value for a trait. Genomes built through the registry are complete,
    /// so the 0.5 fallback only applies to traits registered after this
    /// genome was constructed.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.5)
    }

    /// Trait entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn neural_weights(&self) -> Option<&NeuralWeights> {
        self.neural_weights.as_ref()
    }
}

// Serialized as a flat JSON map (trait name -> value), with the weight
// payload under a "neural_weights" key when present. Matches the wire
// format the breeding endpoint speaks.
impl Serialize for Genome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let extra = usize::from(self.neural_weights.is_some());
        let mut map = serializer.serialize_map(Some(self.entries.len() + extra))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        if let Some(weights) = &self.neural_weights {
            map.serialize_entry("neural_weights", weights)?;
        }
        map.end()
    }
}

/// Input->hidden and hidden->output weight matrices carried opaquely by a
/// genome. The engine recombines and mutates them but never runs them.
#[derive(Clone, Debug, PartialEq)]
pub struct NeuralWeights {
    pub wih: Array2<f64>,
    pub who: Array2<f64>,
}

impl NeuralWeights {
    /// Wrap two matrices, clamping every element to [-1, 1].
    pub fn new(wih: Array2<f64>, who: Array2<f64>) -> Self {
        let clamp = |m: Array2<f64>| m.mapv(|w| w.clamp(WEIGHT_MIN, WEIGHT_MAX));
        Self {
            wih: clamp(wih),
            who: clamp(who),
        }
    }

    /// Fresh random matrices of the given shapes, uniform over [-1, 1].
    pub fn random(
        wih_shape: (usize, usize),
        who_shape: (usize, usize),
        rng: &mut dyn RngCore,
    ) -> Self {
        Self {
            wih: Array2::from_shape_fn(wih_shape, |_| rng.gen_range(WEIGHT_MIN..=WEIGHT_MAX)),
            who: Array2::from_shape_fn(who_shape, |_| rng.gen_range(WEIGHT_MIN..=WEIGHT_MAX)),
        }
    }

    /// Shapes of the two matrices, (wih, who).
    pub fn shapes(&self) -> ((usize, usize), (usize, usize)) {
        (self.wih.dim(), self.who.dim())
    }
}

// Wire format is nested row arrays (`number[][]`), not ndarray's native
// shape+flat-data encoding.
impl Serialize for NeuralWeights {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("NeuralWeights", 2)?;
        state.serialize_field("wih", &matrix_rows(&self.wih))?;
        state.serialize_field("who", &matrix_rows(&self.who))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for NeuralWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct WeightsData {
            wih: Vec<Vec<f64>>,
            who: Vec<Vec<f64>>,
        }

        let data = WeightsData::deserialize(deserializer)?;
        let wih = matrix_from_rows("wih", data.wih).map_err(serde::de::Error::custom)?;
        let who = matrix_from_rows("who", data.who).map_err(serde::de::Error::custom)?;
        Ok(NeuralWeights::new(wih, who))
    }
}

fn matrix_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn matrix_from_rows(name: &str, rows: Vec<Vec<f64>>) -> Result<Array2<f64>, String> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, |row| row.len());
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(format!("matrix `{}` has rows of unequal length", name));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| format!("matrix `{}` is malformed: {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_partial_completes_missing_traits() {
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("speed".to_string(), 0.9);

        let genome = Genome::from_partial(&registry, &values);

        let names: Vec<&str> = genome.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["speed", "size", "color"]);
        assert_eq!(genome.get("speed"), Some(0.9));
        assert_eq!(genome.get("size"), Some(0.5));
        assert_eq!(genome.get("color"), Some(0.5));
    }

    #[test]
    fn test_from_partial_clamps_to_unit_range() {
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("speed".to_string(), 1.7);
        values.insert("size".to_string(), -0.3);

        let genome = Genome::from_partial(&registry, &values);

        assert_eq!(genome.get("speed"), Some(1.0));
        assert_eq!(genome.get("size"), Some(0.0));
    }

    #[test]
    fn test_from_partial_ignores_unknown_keys() {
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("energy".to_string(), 42.0);

        let genome = Genome::from_partial(&registry, &values);

        assert_eq!(genome.len(), 3);
        assert_eq!(genome.get("energy"), None);
    }

    #[test]
    fn test_random_values_in_range() {
        let registry = TraitRegistry::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..100 {
            let genome = Genome::random(&registry, &mut rng);
            for (_, value) in genome.iter() {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_genome_serializes_as_flat_map() {
        let registry = TraitRegistry::builtin();
        let mut values = HashMap::new();
        values.insert("speed".to_string(), 0.25);
        let genome = Genome::from_partial(&registry, &values);

        let json = serde_json::to_value(&genome).unwrap();
        assert_eq!(json["speed"], 0.25);
        assert_eq!(json["size"], 0.5);
        assert!(json.get("neural_weights").is_none());
    }

    #[test]
    fn test_genome_serializes_weights_as_nested_rows() {
        let registry = TraitRegistry::builtin();
        let genome = Genome::from_partial(&registry, &HashMap::new()).with_neural_weights(
            NeuralWeights::new(array![[0.1, 0.2], [0.3, 0.4]], array![[0.5], [0.6]]),
        );

        let json = serde_json::to_value(&genome).unwrap();
        assert_eq!(json["neural_weights"]["wih"][1][0], 0.3);
        assert_eq!(json["neural_weights"]["who"][0][0], 0.5);
    }

    #[test]
    fn test_weights_clamped_on_construction() {
        let weights = NeuralWeights::new(array![[3.0, -3.0]], array![[0.5]]);
        assert_eq!(weights.wih[[0, 0]], 1.0);
        assert_eq!(weights.wih[[0, 1]], -1.0);
    }

    #[test]
    fn test_weights_deserialize_rejects_ragged_rows() {
        let json = r#"{ "wih": [[0.1, 0.2], [0.3]], "who": [[0.0]] }"#;
        let result: Result<NeuralWeights, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_weights_roundtrip() {
        let weights = NeuralWeights::new(array![[0.1, -0.2, 0.3]], array![[0.4], [0.5], [-0.6]]);
        let json = serde_json::to_string(&weights).unwrap();
        let back: NeuralWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, back);
    }

    #[test]
    fn test_random_weights_shape_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let weights = NeuralWeights::random((4, 6), (6, 2), &mut rng);

        assert_eq!(weights.shapes(), ((4, 6), (6, 2)));
        for &w in weights.wih.iter().chain(weights.who.iter()) {
            assert!((WEIGHT_MIN..=WEIGHT_MAX).contains(&w));
        }
    }
}
