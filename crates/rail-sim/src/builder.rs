//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use rail_core::SimConfig;
use rail_network::Network;

use crate::transition::ASSEMBLY_LEAD_SECS;
use crate::{
    DelayTotals, Event, EventKind, EventQueue, KinematicModel, NoopObserver, Sim, SimObserver,
    SimResult,
};

/// Fluent builder for [`Sim<O>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — start, stop, interval, verbosity
/// - [`Network`] — from [`rail_network::NetworkBuilder`] or a loader
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                          |
/// |--------------------|----------------------------------|
/// | `.observer(o)`     | [`NoopObserver`]                 |
/// | `.kinematics(k)`   | 0.2 m/s² acceleration and braking |
///
/// # Example
///
/// ```rust,ignore
/// let network = load_network_dir(Path::new("data"))?;
/// let mut sim = SimBuilder::new(SimConfig::default(), network)
///     .observer(EventLogObserver::new(TextLogWriter::create("Trainsim.log", Verbosity::Low)?))
///     .build()?;
/// while sim.advance_interval()? {}
/// ```
pub struct SimBuilder<O: SimObserver = NoopObserver> {
    config:     SimConfig,
    network:    Network,
    kinematics: KinematicModel,
    observer:   O,
}

impl SimBuilder<NoopObserver> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: Network) -> Self {
        Self {
            config,
            network,
            kinematics: KinematicModel::default(),
            observer:   NoopObserver,
        }
    }
}

impl<O: SimObserver> SimBuilder<O> {
    /// Attach the log sink that receives every executed event.
    pub fn observer<P: SimObserver>(self, observer: P) -> SimBuilder<P> {
        SimBuilder {
            config:     self.config,
            network:    self.network,
            kinematics: self.kinematics,
            observer,
        }
    }

    /// Override the acceleration and deceleration rates.
    pub fn kinematics(mut self, kinematics: KinematicModel) -> Self {
        self.kinematics = kinematics;
        self
    }

    /// Validate the configuration, reset every train to its timetable, and
    /// seed one `NotAssembled` event per train ahead of its departure.
    pub fn build(mut self) -> SimResult<Sim<O>> {
        self.config.validate()?;

        let mut queue = EventQueue::new();
        for train in self.network.trains_mut() {
            train.prepare();
            queue.push(Event::new(
                EventKind::NotAssembled,
                train.line().departure - ASSEMBLY_LEAD_SECS,
                train.number(),
            ));
        }

        let start_distribution = self.network.vehicle_distribution();

        info!(
            trains = self.network.trains().len(),
            stations = self.network.stations().len(),
            vehicles = self.network.vehicle_total(),
            start = %self.config.start_time,
            stop = %self.config.stop_time,
            "sim.built"
        );

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            network:    self.network,
            queue,
            log:        Vec::new(),
            delays:     DelayTotals::default(),
            kinematics: self.kinematics,
            observer:   self.observer,
            ended:      false,
            start_distribution,
        })
    }
}
