//! `rail-output` — event log sinks for the rail_dt simulator.
//!
//! | Writer            | Files created                  |
//! |-------------------|--------------------------------|
//! | [`TextLogWriter`] | `Trainsim.log` (any path)      |
//! | [`CsvWriter`]     | `events.csv`                   |
//!
//! Both implement [`EventWriter`] and are driven by [`EventLogObserver`],
//! which implements `rail_sim::SimObserver`.  A `(A, B)` pair of writers is
//! itself a writer, so one run can feed both.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rail_output::{EventLogObserver, TextLogWriter};
//!
//! let writer = TextLogWriter::create("Trainsim.log", Verbosity::Low)?;
//! let mut sim = SimBuilder::new(config, network)
//!     .observer(EventLogObserver::new(writer))
//!     .build()?;
//! sim.finish()?;
//! sim.observer_mut().take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::EventRow;
pub use text::{render, TextLogWriter};
pub use writer::EventWriter;
