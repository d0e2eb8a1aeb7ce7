//! Error types for `ff-experiment`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("grid error: {0}")]
    Grid(#[from] ff_grid::GridError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ff_scenario::ScenarioError),

    #[error("materializer error: {0}")]
    Materializer(#[from] ff_materializer::MaterializerError),

    #[error("sim error: {0}")]
    Sim(#[from] ff_sim::SimError),

    #[error("metrics error: {0}")]
    Metrics(#[from] ff_metrics::MetricsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario {id} exceeded its timeout")]
    Timeout { id: String },
}

pub type ExperimentResult<T> = Result<T, ExperimentError>;
