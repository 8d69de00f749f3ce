use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Scenario {scenario} scores undeclared input {input}")]
    UndeclaredInput { scenario: String, input: String },

    #[error("Scenario {0} is defined more than once")]
    DuplicateScenario(String),

    #[error("Event {0} is defined more than once")]
    DuplicateEvent(String),

    #[error("Event {event} round {round} uses unknown scenario {scenario}")]
    UnknownScenario {
        event: String,
        round: usize,
        scenario: String,
    },

    #[error("Could not read events file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse events file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        AppError::Config(error.to_string())
    }
}
