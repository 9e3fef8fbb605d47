//! Plain data row written by every log sink.

use rail_core::{SimTime, TrainId, Vehicle, VehicleKind};
use rail_network::{Network, TrainStatus};
use rail_sim::{EventKind, EventRecord};

use crate::OutputResult;

/// One executed event joined with the timetable and vehicle details it refers
/// to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub time:               SimTime,
    pub train:              TrainId,
    pub kind:               EventKind,
    pub status:             TrainStatus,
    pub origin:             String,
    pub destination:        String,
    pub planned_departure:  SimTime,
    pub original_departure: SimTime,
    pub expected_arrival:   SimTime,
    pub original_arrival:   SimTime,
    pub average_speed_kmh:  u32,
    /// Vehicles connected when the event ran, in connection order.
    pub connected:          Vec<Vehicle>,
    /// Kinds still missing when the event ran.
    pub demanded:           Vec<VehicleKind>,
}

impl EventRow {
    /// Join `record` with `network`.  Vehicles are looked up wherever they are
    /// now, so this works for rendering history after the run as well.
    pub fn from_record(record: &EventRecord, network: &Network) -> OutputResult<Self> {
        let line = network.train(record.train)?.line();
        let connected = record
            .snapshot
            .connected
            .iter()
            .map(|&id| network.vehicle(id).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            time:               record.time,
            train:              record.train,
            kind:               record.kind,
            status:             record.snapshot.status,
            origin:             line.origin.clone(),
            destination:        line.destination.clone(),
            planned_departure:  record.snapshot.planned_departure,
            original_departure: line.departure,
            expected_arrival:   record.snapshot.expected_arrival,
            original_arrival:   line.arrival,
            average_speed_kmh:  record.snapshot.average_speed_kmh,
            connected,
            demanded:           record.snapshot.demanded.clone(),
        })
    }
}
