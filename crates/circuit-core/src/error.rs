use thiserror::Error;

use circuit_parts::UnknownComponentType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("simulation not found: {0}")]
    NotFound(String),

    #[error("simulation already running: {0}")]
    DuplicateSimulation(String),

    #[error("simulation is not running: {0}")]
    NotRunning(String),

    #[error("simulation store is unavailable")]
    StoreUnavailable,
}

impl From<UnknownComponentType> for SimError {
    fn from(err: UnknownComponentType) -> Self {
        SimError::UnknownComponentType(err.0)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
