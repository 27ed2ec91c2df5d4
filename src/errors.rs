use thiserror::Error;

#[derive(Debug, Error)]
pub enum VesselError {
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
