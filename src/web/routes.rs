//! REST API routes: the breeding endpoint and the default-parameters view.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationParameters;
use crate::genetics::{Genome, GeneticsError, Individual, NeuralWeights};

use super::state::AppState;

/// Create the API router
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_parameters))
        .route("/simulation", get(get_parameters))
        .route("/breed", post(breed))
}

// --- Request / response schema ---

#[derive(Deserialize)]
struct BreedRequest {
    fish_data: Vec<FishData>,
    /// Optional seed for reproducible offspring.
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct FishData {
    genome: GenomeDoc,
    #[serde(default)]
    energy: Option<f64>,
    #[serde(default, rename = "finalEnergy")]
    final_energy: Option<f64>,
}

/// Wire shape of a genome: a flat map of trait values with an optional
/// weight payload. Extra numeric keys are tolerated and dropped during
/// genome construction.
#[derive(Deserialize)]
struct GenomeDoc {
    #[serde(default)]
    neural_weights: Option<NeuralWeights>,
    #[serde(flatten)]
    traits: HashMap<String, f64>,
}

#[derive(Serialize)]
struct OffspringDoc {
    genome: Genome,
}

// --- Handlers ---

/// Serializable default parameters, used by the frontend to seed its view.
async fn get_parameters(State(state): State<Arc<AppState>>) -> Json<SimulationParameters> {
    Json(state.params.clone())
}

/// Breed the submitted pool into the next generation.
async fn breed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BreedRequest>,
) -> Result<Json<Vec<OffspringDoc>>, ApiError> {
    if request.fish_data.is_empty() {
        return Err(ApiError(GeneticsError::EmptyPool));
    }

    let mut rng = match request.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let pool: Vec<Individual> = request
        .fish_data
        .into_iter()
        .map(|fish| {
            let mut genome = Genome::from_partial(&state.registry, &fish.genome.traits);
            if let Some(weights) = fish.genome.neural_weights {
                genome = genome.with_neural_weights(weights);
            }
            // Rank by reported energy when the client supplies one,
            // otherwise score the genome ourselves.
            let score = fish
                .final_energy
                .or(fish.energy)
                .unwrap_or_else(|| state.evaluator.evaluate(&genome, &state.params));
            Individual::new(genome, score)
        })
        .collect();

    let offspring = state
        .engine
        .breed(&pool, &state.params, &mut rng)
        .map_err(ApiError)?;

    Ok(Json(
        offspring
            .into_iter()
            .map(|genome| OffspringDoc { genome })
            .collect(),
    ))
}

// --- Error mapping ---

/// Maps engine errors onto transport status codes: an empty pool is a bad
/// request, everything else is unprocessable data.
struct ApiError(GeneticsError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GeneticsError::EmptyPool => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        log::warn!("breed request rejected: {}", self.0);
        (status, self.0.to_string()).into_response()
    }
}
