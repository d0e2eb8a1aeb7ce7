use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeciderError {
    #[error("decider configuration error: {0}")]
    Config(String),
}

pub type DeciderResult<T> = Result<T, DeciderError>;
