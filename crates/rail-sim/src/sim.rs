//! The `Sim` struct: event dispatch, the driver operations, and life-cycle
//! queries over the execution log.

use tracing::{debug, info};

use rail_core::{SimClock, SimConfig, SimTime, StationId, TrainId, VehicleId};
use rail_network::Network;

use crate::transition::{self, Outcome};
use crate::{
    DelayTotals, Event, EventQueue, EventRecord, KinematicModel, NoopObserver, SimError,
    SimObserver, SimResult,
};

// ── LifeCycle ─────────────────────────────────────────────────────────────────

/// Execution-log entries matching one query, in the order they ran.
#[derive(Debug)]
pub struct LifeCycle<'a> {
    pub records: Vec<&'a EventRecord>,
}

impl LifeCycle<'_> {
    /// `false` when no logged event matched.
    #[inline]
    pub fn found(&self) -> bool {
        !self.records.is_empty()
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The discrete-event simulation context.
///
/// Owns the network registry, the pending-event queue, the append-only
/// execution log, the delay totals and the log sink.  Everything is mutated
/// through `&mut self`; there is exactly one thread of control.
///
/// # Dispatch
///
/// [`run_next`][Self::run_next] pops the earliest event.  If another event
/// is still pending and due before the stop horizon, the popped one runs.
/// Otherwise it runs only when it is a `Running` or `Arrived` step, moving
/// the current time to its due time; any other step is dropped.  This keeps
/// trains that are already under way completing their trip while nothing new
/// starts past the horizon.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: SimObserver = NoopObserver> {
    /// Run configuration.  Start, stop and interval are kept in step with
    /// the clock by the setters below.
    pub config: SimConfig,

    pub(crate) clock:      SimClock,
    pub(crate) network:    Network,
    pub(crate) queue:      EventQueue,
    pub(crate) log:        Vec<EventRecord>,
    pub(crate) delays:     DelayTotals,
    pub(crate) kinematics: KinematicModel,
    pub(crate) observer:   O,
    pub(crate) ended:      bool,
    /// Parked vehicles per station when the simulation was built.
    pub(crate) start_distribution: Vec<(StationId, usize)>,
}

impl<O: SimObserver> Sim<O> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn delays(&self) -> DelayTotals {
        self.delays
    }

    pub fn kinematics(&self) -> &KinematicModel {
        &self.kinematics
    }

    /// Parked vehicle count per station before the first event ran.
    pub fn start_distribution(&self) -> &[(StationId, usize)] {
        &self.start_distribution
    }

    /// Every executed event, in execution order.
    pub fn execution_log(&self) -> &[EventRecord] {
        &self.log
    }

    /// Pending events in dispatch order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> + '_ {
        self.queue.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// `true` once no events are pending.
    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Tear the simulation down, keeping only the log sink.
    pub fn into_observer(self) -> O {
        self.observer
    }

    // ── Scheduler ─────────────────────────────────────────────────────────

    /// Enqueue `event` at its due time.
    pub fn schedule(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Due time of the earliest pending event.
    pub fn peek_next_time(&self) -> SimResult<SimTime> {
        self.queue.peek_time().ok_or(SimError::EmptyQueue)
    }

    /// Pop and dispatch one event.
    ///
    /// Returns `false` when nothing was pending on entry, `true` otherwise,
    /// whether or not the popped event was executed.
    pub fn run_next(&mut self) -> SimResult<bool> {
        let Some(event) = self.queue.pop() else {
            self.end();
            return Ok(false);
        };

        let eager = self.queue.peek_time().is_some_and(|t| t < self.clock.stop);
        if eager {
            self.execute(event)?;
        } else if event.kind.runs_past_horizon() {
            self.execute(event)?;
            self.clock.current = event.time;
        } else {
            debug!(train = event.train.0, kind = %event.kind, time = %event.time, "event.discarded");
        }
        Ok(true)
    }

    /// Dispatch every event due before the current time.  Once the current
    /// time has reached the stop horizon the queue is drained.
    ///
    /// Returns `true` if events remain pending.
    pub fn run_until(&mut self) -> SimResult<bool> {
        while let Some(due) = self.queue.peek_time() {
            if due >= self.clock.current && !self.clock.past_horizon() {
                break;
            }
            self.run_next()?;
        }
        if self.queue.is_empty() {
            self.end();
        }
        Ok(!self.queue.is_empty())
    }

    // ── Driver ────────────────────────────────────────────────────────────

    /// Move the current time forward by one interval and dispatch what
    /// became due.
    pub fn advance_interval(&mut self) -> SimResult<bool> {
        self.clock.advance(self.config.interval_secs);
        self.observer.on_time_advanced(self.clock.current);
        self.run_until()
    }

    /// Jump the current time to the next pending event and dispatch it.
    ///
    /// Fails with [`SimError::EmptyQueue`] once nothing is pending; the
    /// observer has been told the run ended by then.
    pub fn next_event(&mut self) -> SimResult<bool> {
        let Some(due) = self.queue.peek_time() else {
            self.end();
            return Err(SimError::EmptyQueue);
        };
        self.clock.current = due;
        self.observer.on_time_advanced(self.clock.current);
        self.run_next()
    }

    /// Jump to the stop horizon and drain the queue.
    pub fn finish(&mut self) -> SimResult<bool> {
        self.clock.current = self.clock.stop;
        self.observer.on_time_advanced(self.clock.current);
        self.run_until()
    }

    /// Move the start time, and the current time with it.
    pub fn set_start_time(&mut self, start: SimTime) -> SimResult<()> {
        if start > self.clock.stop {
            return Err(SimError::Config(format!(
                "start time {start} is after stop time {}",
                self.clock.stop
            )));
        }
        self.clock.start = start;
        self.clock.current = start;
        self.config.start_time = start;
        Ok(())
    }

    /// Move the stop horizon.  It may not lie before the current time.
    pub fn set_stop_time(&mut self, stop: SimTime) -> SimResult<()> {
        if stop < self.clock.current {
            return Err(SimError::Config(format!(
                "stop time {stop} is before current time {}",
                self.clock.current
            )));
        }
        self.clock.stop = stop;
        self.config.stop_time = stop;
        Ok(())
    }

    pub fn set_interval(&mut self, secs: i64) -> SimResult<()> {
        if secs <= 0 {
            return Err(SimError::Config(format!("interval must be positive, got {secs} s")));
        }
        self.config.interval_secs = secs;
        Ok(())
    }

    // ── Life-cycle queries ────────────────────────────────────────────────

    /// Logged events of train `number`.
    pub fn life_cycle_by_train(&self, number: TrainId) -> LifeCycle<'_> {
        LifeCycle { records: self.log.iter().filter(|r| r.train == number).collect() }
    }

    /// Logged events whose train had vehicle `id` connected when they ran.
    pub fn life_cycle_by_vehicle(&self, id: VehicleId) -> LifeCycle<'_> {
        LifeCycle { records: self.log.iter().filter(|r| r.carries_vehicle(id)).collect() }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn execute(&mut self, event: Event) -> SimResult<()> {
        let Outcome { snapshot, next } =
            transition::apply(event, &mut self.network, &self.kinematics, &mut self.delays)?;
        if let Some(next) = next {
            self.queue.push(next);
        }
        let record = EventRecord::new(event, snapshot);
        if record.time >= self.clock.start {
            self.observer.on_event(&record, &self.network);
        }
        self.log.push(record);
        Ok(())
    }

    fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        info!(
            now = %self.clock.current,
            executed = self.log.len(),
            departure_delay_secs = self.delays.departure_secs,
            arrival_delay_secs = self.delays.arrival_secs,
            "sim.drained"
        );
        self.observer.on_sim_end(self.clock.current, &self.delays);
    }
}
