//! The per-train lifecycle state machine.
//!
//! ```text
//! NotAssembled ──ok──► (Assembled) ─+20─► Ready ─+10─► Running ─eta─► Arrived ─+20─► Finished
//!      │                   ▲
//!      └──short──► Incomplete ─ok─┘
//!                  ▲   │
//!                  └+10┘ short
//! ```
//!
//! Each step mutates the train (and, for `Running`/`Arrived`, the delay
//! totals), captures a snapshot, and hands back the single successor event.
//! The scheduler owns all events; nothing here holds on to one.

use tracing::debug;

use rail_core::{minutes, SimTime};
use rail_network::{Network, NetworkResult, TrainStatus};

use crate::{DelayTotals, Event, EventKind, KinematicModel, TrainSnapshot};

/// Assembly lead time: the first attempt happens this long before departure.
pub const ASSEMBLY_LEAD_SECS: i64 = minutes(30);

/// From a completed assembly to the train being ready.
pub const ASSEMBLED_TO_READY_SECS: i64 = minutes(20);

/// From ready to departure.
pub const READY_TO_RUNNING_SECS: i64 = minutes(10);

/// Gap between assembly retries, and the departure slip each retry costs.
pub const RETRY_SECS: i64 = minutes(10);

/// From arrival to the train being taken apart.
pub const ARRIVED_TO_FINISHED_SECS: i64 = minutes(20);

/// What running one event produced.
pub struct Outcome {
    pub snapshot: TrainSnapshot,
    pub next:     Option<Event>,
}

/// Run `event` against `network`.
///
/// Only fails when the event names a train, station or station pair that the
/// network does not know, which cannot happen for a network built by
/// `NetworkBuilder` and events seeded from it.
pub fn apply(
    event:      Event,
    network:    &mut Network,
    kinematics: &KinematicModel,
    delays:     &mut DelayTotals,
) -> NetworkResult<Outcome> {
    let number = event.train;
    let now = event.time;
    let mut average_speed_kmh = 0;

    let next = match event.kind {
        EventKind::NotAssembled => {
            let assembly = network.try_assemble(number)?;
            let train = network.train_mut(number)?;
            if assembly.is_complete() {
                train.status = TrainStatus::Assembled;
                Some(Event::new(EventKind::Ready, now + ASSEMBLED_TO_READY_SECS, number))
            } else {
                train.status = TrainStatus::Incomplete;
                train.planned_departure += RETRY_SECS;
                Some(Event::new(EventKind::Incomplete, now + RETRY_SECS, number))
            }
        }

        EventKind::Incomplete => {
            let potential = potential_arrival(network, kinematics, event)?;
            let assembly = network.try_assemble(number)?;
            let train = network.train_mut(number)?;
            let expected = potential.max(train.line().arrival);
            if assembly.is_complete() {
                train.expected_arrival = expected;
                train.status = TrainStatus::Assembled;
                Some(Event::new(EventKind::Ready, now + ASSEMBLED_TO_READY_SECS, number))
            } else {
                train.planned_departure += RETRY_SECS;
                train.expected_arrival = expected + RETRY_SECS;
                train.status = TrainStatus::Incomplete;
                Some(Event::new(EventKind::Incomplete, now + RETRY_SECS, number))
            }
        }

        EventKind::Ready => {
            network.train_mut(number)?.status = TrainStatus::Ready;
            Some(Event::new(EventKind::Running, now + READY_TO_RUNNING_SECS, number))
        }

        EventKind::Running => {
            let distance_km = network.line_distance_km(number)?;
            let train = network.train_mut(number)?;
            train.status = TrainStatus::Running;
            let slip = train.departure_slip();
            if slip > 0 {
                delays.departure_secs += slip;
            }
            average_speed_kmh = KinematicModel::average_speed_kmh(
                distance_km,
                train.expected_arrival - train.planned_departure,
            );
            Some(Event::new(EventKind::Arrived, train.expected_arrival, number))
        }

        EventKind::Arrived => {
            let train = network.train_mut(number)?;
            train.status = TrainStatus::Arrived;
            let delay = train.arrival_delay();
            if delay > 0 {
                delays.arrival_secs += delay;
            }
            Some(Event::new(EventKind::Finished, now + ARRIVED_TO_FINISHED_SECS, number))
        }

        EventKind::Finished => {
            network.disassemble(number)?;
            network.train_mut(number)?.status = TrainStatus::Finished;
            None
        }
    };

    let train = network.train(number)?;
    debug!(
        train = number.0,
        kind = %event.kind,
        time = %now,
        status = %train.status,
        next = ?next.map(|e| e.kind),
        "transition.applied"
    );
    Ok(Outcome { snapshot: TrainSnapshot::capture(train, average_speed_kmh), next })
}

/// Arrival instant if the train left at its current planned departure with
/// whatever locomotives it has connected so far.
fn potential_arrival(
    network:    &Network,
    kinematics: &KinematicModel,
    event:      Event,
) -> NetworkResult<SimTime> {
    let distance_km = network.line_distance_km(event.train)?;
    let train = network.train(event.train)?;
    let speed = KinematicModel::effective_speed_kmh(train);
    Ok(train.planned_departure + kinematics.potential_duration_secs(distance_km, speed))
}
