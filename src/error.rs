
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlatedError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("State error: {0}")]
    State(String),
    #[error("Argument error: {0}")]
    Argument(String),
    #[error("Format error: {0}")]
    Format(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, SlatedError>;

// Engine diagnostics are passed along verbatim, never retried or rewrapped.
impl From<rusqlite::Error> for SlatedError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Engine(e.to_string())
    }
}
