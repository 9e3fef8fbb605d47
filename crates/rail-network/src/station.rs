//! Stations and their pools of idle vehicles.

use rail_core::{StationId, Vehicle, VehicleId, VehicleKind};

// ── VehiclePool ───────────────────────────────────────────────────────────────

/// Idle vehicles parked at one station, in arrival order.
///
/// Withdrawal by kind always takes the longest-parked vehicle of that kind,
/// which makes assembly results deterministic for a given history.
#[derive(Clone, Debug, Default)]
pub struct VehiclePool {
    vehicles: Vec<Vehicle>,
}

impl VehiclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `vehicle`.  Cannot fail.
    pub fn put(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// Remove and return the first vehicle of `kind`, if any.
    pub fn take_kind(&mut self, kind: VehicleKind) -> Option<Vehicle> {
        let pos = self.vehicles.iter().position(|v| v.kind() == kind)?;
        Some(self.vehicles.remove(pos))
    }

    /// Remove and return the vehicle with `id`, if parked here.
    pub fn take_id(&mut self, id: VehicleId) -> Option<Vehicle> {
        let pos = self.vehicles.iter().position(|v| v.id == id)?;
        Some(self.vehicles.remove(pos))
    }

    /// Look a parked vehicle up without removing it.
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.get(id).is_some()
    }

    /// Number of parked vehicles of `kind`.
    pub fn count_kind(&self, kind: VehicleKind) -> usize {
        self.vehicles.iter().filter(|v| v.kind() == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

// ── Station ───────────────────────────────────────────────────────────────────

/// A named station.  Owned by the [`Network`][crate::Network] for the whole
/// run and never removed.
#[derive(Clone, Debug)]
pub struct Station {
    pub id:   StationId,
    pub name: String,
    pub pool: VehiclePool,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), pool: VehiclePool::new() }
    }
}
