//! Shared application state for the web server.

use std::sync::Arc;

use crate::config::{Config, SimulationParameters};
use crate::genetics::{BreedingEngine, FitnessEvaluator, TraitRegistry};

/// Application state shared between all handlers.
///
/// The registry is built once here and then only read: after `new` returns
/// it is frozen, so concurrent requests need no locking.
pub struct AppState {
    pub registry: Arc<TraitRegistry>,
    pub engine: BreedingEngine,
    pub evaluator: FitnessEvaluator,
    pub params: SimulationParameters,
}

impl AppState {
    /// Create new application state with the built-in genes registered.
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(TraitRegistry::builtin());

        Self {
            engine: BreedingEngine::new(registry.clone()),
            evaluator: FitnessEvaluator::new(registry.clone()),
            params: config.parameters,
            registry,
        }
    }
}
