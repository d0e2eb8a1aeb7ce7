use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterializerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid error: {0}")]
    Grid(#[from] ff_grid::GridError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ff_scenario::ScenarioError),
}

pub type MaterializerResult<T> = Result<T, MaterializerError>;
