//! Network-registry error type.

use thiserror::Error;

use rail_core::{CoreError, TrainId, VehicleId};

/// Errors produced by `rail-network`.
///
/// The `*NotFound` variants are lookup failures and are always propagated to
/// the caller.  The `Duplicate*` and `Invalid*` variants are raised only while
/// building a registry and mean the input data is malformed.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("station {0:?} not found")]
    StationNotFound(String),

    #[error("train {0} not found")]
    TrainNotFound(TrainId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("no distance recorded between {from:?} and {to:?}")]
    DistanceNotFound { from: String, to: String },

    #[error("train number {0} is used by more than one line")]
    DuplicateTrain(TrainId),

    #[error("vehicle id {0} is used more than once")]
    DuplicateVehicle(VehicleId),

    #[error("invalid line {number}: {reason}")]
    InvalidLine { number: TrainId, reason: &'static str },

    #[error("invalid vehicle {id}: {reason}")]
    InvalidVehicle { id: VehicleId, reason: &'static str },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    /// `true` for lookup failures (unknown station, train, vehicle, or
    /// station pair).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetworkError::StationNotFound(_)
                | NetworkError::TrainNotFound(_)
                | NetworkError::VehicleNotFound(_)
                | NetworkError::DistanceNotFound { .. }
        )
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
