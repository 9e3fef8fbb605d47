//! `rail-sim` — discrete-event engine for the rail_dt network simulator.
//!
//! # Event loop
//!
//! ```text
//! build:  one NotAssembled event per train at departure − 30 min
//!
//! run_next:
//!   ① Pop      — take the earliest-due event (FIFO among equal times).
//!   ② Dispatch — run it if more work is due before the stop horizon;
//!                past the horizon only Running/Arrived steps run.
//!   ③ Apply    — the lifecycle step mutates the train, station pools and
//!                delay totals, then returns its successor event.
//!   ④ Record   — snapshot appended to the execution log and reported to
//!                the observer (if at or after the start time).
//! ```
//!
//! The driver moves time with [`Sim::advance_interval`], [`Sim::next_event`]
//! and [`Sim::finish`]; nothing here reads the host clock.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Serialize events, records, delay totals, kinematic model.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_core::SimConfig;
//! use rail_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), network).build()?;
//! while sim.advance_interval()? {}
//! println!("departure delay: {} s", sim.delays().departure_secs);
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod kinematics;
pub mod observer;
pub mod queue;
pub mod sim;
pub mod transition;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{DelayTotals, Event, EventKind, EventRecord, TrainSnapshot};
pub use kinematics::KinematicModel;
pub use observer::{NoopObserver, SimObserver};
pub use queue::EventQueue;
pub use sim::{LifeCycle, Sim};
