//! Events, their lifecycle kinds, and the snapshots recorded when they run.

use std::fmt;

use rail_core::{SimTime, TrainId, VehicleId, VehicleKind};
use rail_network::{Train, TrainStatus};

// ── EventKind ─────────────────────────────────────────────────────────────────

/// The lifecycle step an event performs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    NotAssembled,
    Incomplete,
    Ready,
    Running,
    Arrived,
    Finished,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::NotAssembled => "Not assembled",
            EventKind::Incomplete   => "Incomplete",
            EventKind::Ready        => "Ready",
            EventKind::Running      => "Running",
            EventKind::Arrived      => "Arrived",
            EventKind::Finished     => "Finished",
        }
    }

    /// Kinds that still execute when the dispatcher is throttled at the
    /// stop horizon.
    #[inline]
    pub fn runs_past_horizon(self) -> bool {
        matches!(self, EventKind::Running | EventKind::Arrived)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A pending lifecycle step for one train.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind:  EventKind,
    pub time:  SimTime,
    pub train: TrainId,
}

impl Event {
    #[inline]
    pub fn new(kind: EventKind, time: SimTime, train: TrainId) -> Self {
        Self { kind, time, train }
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

/// Train state captured at the instant an event ran.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainSnapshot {
    pub status:            TrainStatus,
    pub planned_departure: SimTime,
    pub expected_arrival:  SimTime,
    /// Zero for every step except `Running`.
    pub average_speed_kmh: u32,
    pub connected:         Vec<VehicleId>,
    pub demanded:          Vec<VehicleKind>,
}

impl TrainSnapshot {
    pub fn capture(train: &Train, average_speed_kmh: u32) -> Self {
        Self {
            status:            train.status,
            planned_departure: train.planned_departure,
            expected_arrival:  train.expected_arrival,
            average_speed_kmh,
            connected:         train.connected_ids(),
            demanded:          train.demanded.clone(),
        }
    }
}

/// One entry of the execution log: an event plus the snapshot it produced.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub kind:     EventKind,
    pub time:     SimTime,
    pub train:    TrainId,
    pub snapshot: TrainSnapshot,
}

impl EventRecord {
    pub fn new(event: Event, snapshot: TrainSnapshot) -> Self {
        Self { kind: event.kind, time: event.time, train: event.train, snapshot }
    }

    #[inline]
    pub fn carries_vehicle(&self, id: VehicleId) -> bool {
        self.snapshot.connected.contains(&id)
    }
}

// ── Delay totals ──────────────────────────────────────────────────────────────

/// Accumulated lateness across the run, in seconds.  Both counters only grow.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayTotals {
    pub departure_secs: i64,
    pub arrival_secs:   i64,
}
