//! Name-keyed table of gene capabilities.
//!
//! The registry is populated once at startup (see [`TraitRegistry::builtin`])
//! and then frozen behind an `Arc`: it carries no interior mutability, so
//! once shared it cannot race with in-flight breeding or fitness calls. Its
//! insertion order is the canonical iteration order used for genome
//! completion, fitness summation and breeding, which keeps results
//! reproducible under a fixed random sequence.

use super::error::GeneticsError;
use super::gene::{ColorGene, Gene, SizeGene, SpeedGene};

/// Insertion-ordered mapping from trait name to gene implementation.
pub struct TraitRegistry {
    entries: Vec<(String, Box<dyn Gene>)>,
}

impl TraitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a registry populated with the built-in genes, in their
    /// canonical order: `speed`, `size`, `color`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("speed", Box::new(SpeedGene));
        registry.register("size", Box::new(SizeGene));
        registry.register("color", Box::new(ColorGene));
        registry
    }

    /// Add a gene, or replace an existing one in place (keeping its
    /// original position in the iteration order).
    ///
    /// Registration is an initialization-time operation: all calls must
    /// complete before the registry is shared with concurrent readers.
    pub fn register(&mut self, name: impl Into<String>, gene: Box<dyn Gene>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = gene,
            None => self.entries.push((name, gene)),
        }
    }

    /// Look up a gene by name.
    pub fn get(&self, name: &str) -> Result<&dyn Gene, GeneticsError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, gene)| gene.as_ref())
            .ok_or_else(|| GeneticsError::UnknownTrait(name.to_string()))
    }

    /// Registered names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// All entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Gene)> {
        self.entries
            .iter()
            .map(|(name, gene)| (name.as_str(), gene.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }
}

impl Default for TraitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationParameters;
    use crate::genetics::Genome;

    #[test]
    fn test_builtin_order() {
        let registry = TraitRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["speed", "size", "color"]);
    }

    #[test]
    fn test_unknown_trait_error() {
        let registry = TraitRegistry::builtin();
        let err = registry.get("fins").err().unwrap();
        assert!(matches!(err, GeneticsError::UnknownTrait(name) if name == "fins"));
    }

    #[test]
    fn test_register_appends_in_order() {
        struct FinGene;
        impl Gene for FinGene {
            fn fitness(&self, _: &Genome, _: &SimulationParameters) -> f64 {
                0.0
            }
        }

        let mut registry = TraitRegistry::builtin();
        registry.register("fins", Box::new(FinGene));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["speed", "size", "color", "fins"]);
        assert!(registry.contains("fins"));
    }

    #[test]
    fn test_register_replaces_in_place() {
        struct FlatSpeed;
        impl Gene for FlatSpeed {
            fn fitness(&self, _: &Genome, _: &SimulationParameters) -> f64 {
                1.0
            }
            fn default_value(&self) -> f64 {
                0.1
            }
        }

        let mut registry = TraitRegistry::builtin();
        registry.register("speed", Box::new(FlatSpeed));

        // Same key set and position, new implementation.
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["speed", "size", "color"]);
        assert_eq!(registry.get("speed").unwrap().default_value(), 0.1);
    }
}
