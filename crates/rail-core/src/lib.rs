//! `rail-core` — foundational types for the `rail_dt` network simulator.
//!
//! This crate is a dependency of every other `rail-*` crate.  It has no
//! `rail-*` dependencies and only `thiserror` as a required external one
//! (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`ids`]       | `StationId`, `TrainId`, `VehicleId`                    |
//! | [`time`]      | `SimTime`, `SimClock`, `SimConfig`, `Verbosity`        |
//! | [`vehicle`]   | `VehicleKind`, `VehicleSpec`, `Vehicle`                |
//! | [`error`]     | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod time;
pub mod vehicle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{StationId, TrainId, VehicleId};
pub use time::{format_delay, minutes, SimClock, SimConfig, SimTime, Verbosity};
pub use vehicle::{Vehicle, VehicleKind, VehicleSpec};
