//! Simulation observer trait: the log sink for executed events.

use rail_core::SimTime;
use rail_network::Network;

use crate::{DelayTotals, EventRecord};

/// Callbacks invoked by [`Sim`][crate::Sim] as it dispatches events.
///
/// The observer is handed to the simulation at construction and lives as
/// long as the run.  All methods have default no-op implementations so
/// implementors only need to override what they care about.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_event(&mut self, record: &EventRecord, _network: &Network) {
///         if record.kind == EventKind::Arrived {
///             println!("{} train {} arrived", record.time, record.train);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after an event has executed, with the network in its
    /// post-transition state.  Events due before the configured start time
    /// are still executed and logged but are not reported here.
    fn on_event(&mut self, _record: &EventRecord, _network: &Network) {}

    /// Called when the driver moves the current time.
    fn on_time_advanced(&mut self, _now: SimTime) {}

    /// Called once, the first time the event queue is found empty.
    fn on_sim_end(&mut self, _now: SimTime, _delays: &DelayTotals) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
