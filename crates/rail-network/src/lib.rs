//! `rail-network` — the network registry the simulation engine runs against.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`station`]  | `Station`, `VehiclePool`                                    |
//! | [`train`]    | `TrainLine`, `Train`, `TrainStatus`                         |
//! | [`assembly`] | `assemble`, `disassemble`, `Assembly`                       |
//! | [`network`]  | `Network` (arena registry), `NetworkBuilder`, `VehicleLocation` |
//! | [`loader`]   | `load_network_dir`, `load_network_readers`                  |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Vehicle conservation
//!
//! Vehicles are owned by value and only ever move between a station pool and
//! a train's `connected` list, so for any reachable state
//!
//! ```text
//! vehicles_parked() + vehicles_connected() == vehicle_total()
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod assembly;
pub mod error;
pub mod loader;
pub mod network;
pub mod station;
pub mod train;


pub use assembly::{assemble, disassemble, Assembly};
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_dir, load_network_readers};
pub use network::{Network, NetworkBuilder, VehicleLocation};
pub use station::{Station, VehiclePool};
pub use train::{Train, TrainLine, TrainStatus};
