use rail_core::CoreError;
use rail_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Nothing is pending.  Signals that the run is complete, not a fault.
    #[error("event queue is empty")]
    EmptyQueue,

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
