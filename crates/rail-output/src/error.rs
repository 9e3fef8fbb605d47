//! Error types for rail-output.

use rail_network::NetworkError;
use thiserror::Error;

/// Errors that can occur when writing the event log.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A record referred to a train or vehicle the network does not know.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
