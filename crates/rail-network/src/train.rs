//! Train lines (immutable timetable entries) and trains (their runtime state).

use std::fmt;

use rail_core::{SimTime, TrainId, Vehicle, VehicleId, VehicleKind};

// ── TrainStatus ───────────────────────────────────────────────────────────────

/// Where a train is in its daily lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainStatus {
    #[default]
    NotAssembled,
    Incomplete,
    Assembled,
    Ready,
    Running,
    Arrived,
    Finished,
}

impl TrainStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainStatus::NotAssembled => "Not assembled",
            TrainStatus::Incomplete   => "Incomplete",
            TrainStatus::Assembled    => "Assembled",
            TrainStatus::Ready        => "Ready",
            TrainStatus::Running      => "Running",
            TrainStatus::Arrived      => "Arrived",
            TrainStatus::Finished     => "Finished",
        }
    }

    /// `true` while the train is still standing at its origin.
    pub fn at_origin(self) -> bool {
        matches!(
            self,
            TrainStatus::NotAssembled
                | TrainStatus::Incomplete
                | TrainStatus::Assembled
                | TrainStatus::Ready
        )
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TrainLine ─────────────────────────────────────────────────────────────────

/// The immutable timetable template a train runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainLine {
    pub number:        TrainId,
    pub origin:        String,
    pub destination:   String,
    pub departure:     SimTime,
    pub arrival:       SimTime,
    /// Demanded vehicle kinds, in the order assembly should satisfy them.
    pub demand:        Vec<VehicleKind>,
    pub max_speed_kmh: u32,
}

// ── Train ─────────────────────────────────────────────────────────────────────

/// Runtime state for one line.
///
/// Between creation and disassembly, the kinds of `connected` plus
/// `demanded` always add up to `line.demand` as a multiset.
#[derive(Clone, Debug)]
pub struct Train {
    line: TrainLine,

    pub status: TrainStatus,

    /// Kinds not yet satisfied by assembly, in demand order.
    pub demanded: Vec<VehicleKind>,

    /// Vehicles currently owned by the train.
    pub connected: Vec<Vehicle>,

    /// Departure instant after any assembly slips.
    pub planned_departure: SimTime,

    /// Arrival instant as currently expected.
    pub expected_arrival: SimTime,
}

impl Train {
    /// A fresh, empty train for `line`.
    pub fn new(line: TrainLine) -> Self {
        Self {
            status:            TrainStatus::NotAssembled,
            demanded:          line.demand.clone(),
            connected:         Vec::new(),
            planned_departure: line.departure,
            expected_arrival:  line.arrival,
            line,
        }
    }

    #[inline]
    pub fn line(&self) -> &TrainLine {
        &self.line
    }

    #[inline]
    pub fn number(&self) -> TrainId {
        self.line.number
    }

    /// Reset the timetable-derived state ahead of a run.
    pub fn prepare(&mut self) {
        self.status = TrainStatus::NotAssembled;
        self.planned_departure = self.line.departure;
        self.expected_arrival = self.line.arrival;
    }

    /// Slowest rated speed among connected locomotives, if any are connected.
    pub fn locomotive_max_speed(&self) -> Option<u32> {
        self.connected.iter().filter_map(Vehicle::max_speed_kmh).min()
    }

    pub fn connected_ids(&self) -> Vec<VehicleId> {
        self.connected.iter().map(|v| v.id).collect()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.connected.iter().find(|v| v.id == id)
    }

    /// Seconds the planned departure has slipped past the timetable.
    #[inline]
    pub fn departure_slip(&self) -> i64 {
        self.planned_departure - self.line.departure
    }

    /// Seconds the expected arrival lies past the timetable.
    #[inline]
    pub fn arrival_delay(&self) -> i64 {
        self.expected_arrival - self.line.arrival
    }

    /// Check the connected/demanded partition against the line's demand.
    pub fn demand_is_partitioned(&self) -> bool {
        let mut held: Vec<VehicleKind> = self
            .connected
            .iter()
            .map(Vehicle::kind)
            .chain(self.demanded.iter().copied())
            .collect();
        let mut wanted = self.line.demand.clone();
        held.sort_unstable();
        wanted.sort_unstable();
        held == wanted
    }
}
