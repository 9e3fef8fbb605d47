//! The network registry and its builder.
//!
//! # Ownership
//!
//! `Network` is an arena: stations and trains live in `Vec`s and are
//! addressed by id.  Vehicles are owned by value, either inside a station's
//! [`VehiclePool`][crate::VehiclePool] or inside a train's `connected` list,
//! and move between the two only through [`Network::try_assemble`] and
//! [`Network::disassemble`].  Nothing holds a pointer back into the registry.
//!
//! # Validation
//!
//! [`NetworkBuilder::build`] rejects every malformed input up front
//! (duplicate ids, unknown stations, missing distances, zero speeds) so that
//! the simulation's transition logic never hits a lookup failure on a network
//! it was built from.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use rail_core::{StationId, TrainId, Vehicle, VehicleId};

use crate::assembly::{self, Assembly};
use crate::{NetworkError, NetworkResult, Station, Train, TrainLine, TrainStatus};

// ── VehicleLocation ───────────────────────────────────────────────────────────

/// Where a vehicle currently is.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VehicleLocation {
    /// Idle in a station pool.
    Parked(StationId),
    /// Connected to a train.
    Connected(TrainId),
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Stations, trains, and the station-pair distance table.
///
/// Do not construct directly; use [`NetworkBuilder`].
#[derive(Clone, Debug)]
pub struct Network {
    stations:      Vec<Station>,
    station_index: HashMap<String, StationId>,
    trains:        Vec<Train>,
    train_index:   HashMap<TrainId, usize>,
    /// Keyed by `(min, max)` so lookups are symmetric.
    distances_km:  HashMap<(StationId, StationId), u32>,
    vehicle_total: usize,
}

impl Network {
    // ── Stations ──────────────────────────────────────────────────────────

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    pub fn station_id(&self, name: &str) -> NetworkResult<StationId> {
        self.station_index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::StationNotFound(name.to_owned()))
    }

    pub fn station_by_name(&self, name: &str) -> NetworkResult<&Station> {
        let id = self.station_id(name)?;
        Ok(&self.stations[id.index()])
    }

    // ── Trains ────────────────────────────────────────────────────────────

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, number: TrainId) -> NetworkResult<&Train> {
        let slot = self.train_slot(number)?;
        Ok(&self.trains[slot])
    }

    pub fn train_mut(&mut self, number: TrainId) -> NetworkResult<&mut Train> {
        let slot = self.train_slot(number)?;
        Ok(&mut self.trains[slot])
    }

    pub fn trains_mut(&mut self) -> &mut [Train] {
        &mut self.trains
    }

    /// Trains ordered by planned departure, then by number.
    pub fn timetable(&self) -> Vec<&Train> {
        let mut rows: Vec<&Train> = self.trains.iter().collect();
        rows.sort_by_key(|t| (t.planned_departure, t.number()));
        rows
    }

    /// Trains whose line leaves from station `name`, in timetable order.
    pub fn departures_from(&self, name: &str) -> NetworkResult<Vec<&Train>> {
        let station = self.station_by_name(name)?;
        Ok(self
            .timetable()
            .into_iter()
            .filter(|t| t.line().origin == station.name)
            .collect())
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Trains that have not left their origin station.
    pub fn stuck_trains(&self) -> Vec<&Train> {
        self.trains.iter().filter(|t| t.status.at_origin()).collect()
    }

    /// Finished trains whose expected arrival never moved off the timetable.
    pub fn on_time_trains(&self) -> Vec<&Train> {
        self.trains
            .iter()
            .filter(|t| t.status == TrainStatus::Finished && t.arrival_delay() == 0)
            .collect()
    }

    /// Trains expected later than timetabled, leaving out those still
    /// waiting on an incomplete assembly.
    pub fn delayed_trains(&self) -> Vec<&Train> {
        self.trains
            .iter()
            .filter(|t| t.status != TrainStatus::Incomplete && t.arrival_delay() > 0)
            .collect()
    }

    /// Parked vehicle count per station, in station order.
    pub fn vehicle_distribution(&self) -> Vec<(StationId, usize)> {
        self.stations.iter().map(|s| (s.id, s.pool.len())).collect()
    }

    fn train_slot(&self, number: TrainId) -> NetworkResult<usize> {
        self.train_index
            .get(&number)
            .copied()
            .ok_or(NetworkError::TrainNotFound(number))
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Symmetric distance between two stations, in kilometres.
    pub fn distance_between(&self, a: StationId, b: StationId) -> NetworkResult<u32> {
        self.distances_km
            .get(&pair_key(a, b))
            .copied()
            .ok_or_else(|| NetworkError::DistanceNotFound {
                from: self.station_name(a),
                to:   self.station_name(b),
            })
    }

    /// Symmetric distance between two named stations, in kilometres.
    pub fn distance_km(&self, from: &str, to: &str) -> NetworkResult<u32> {
        let a = self.station_id(from)?;
        let b = self.station_id(to)?;
        self.distance_between(a, b)
    }

    /// Length of the route `number` runs, in kilometres.
    pub fn line_distance_km(&self, number: TrainId) -> NetworkResult<u32> {
        let line = self.train(number)?.line();
        self.distance_km(&line.origin, &line.destination)
    }

    fn station_name(&self, id: StationId) -> String {
        self.station(id).map_or_else(|| id.to_string(), |s| s.name.clone())
    }

    // ── Assembly ──────────────────────────────────────────────────────────

    /// Attach demanded vehicles to `number` from its origin station's pool.
    pub fn try_assemble(&mut self, number: TrainId) -> NetworkResult<Assembly> {
        let slot = self.train_slot(number)?;
        let origin = self.station_id(&self.trains[slot].line().origin)?;
        let outcome = assembly::assemble(
            &mut self.trains[slot],
            &mut self.stations[origin.index()].pool,
        );
        debug!(train = number.0, ?outcome, "network.assemble");
        Ok(outcome)
    }

    /// Return every vehicle of `number` to its destination station's pool.
    pub fn disassemble(&mut self, number: TrainId) -> NetworkResult<usize> {
        let slot = self.train_slot(number)?;
        let destination = self.station_id(&self.trains[slot].line().destination)?;
        let moved = assembly::disassemble(
            &mut self.trains[slot],
            &mut self.stations[destination.index()].pool,
        );
        debug!(train = number.0, moved, "network.disassemble");
        Ok(moved)
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    /// Number of vehicles loaded into the network.  Constant for its lifetime.
    pub fn vehicle_total(&self) -> usize {
        self.vehicle_total
    }

    pub fn vehicles_parked(&self) -> usize {
        self.stations.iter().map(|s| s.pool.len()).sum()
    }

    pub fn vehicles_connected(&self) -> usize {
        self.trains.iter().map(|t| t.connected.len()).sum()
    }

    pub fn locate_vehicle(&self, id: VehicleId) -> NetworkResult<VehicleLocation> {
        if let Some(station) = self.stations.iter().find(|s| s.pool.contains(id)) {
            return Ok(VehicleLocation::Parked(station.id));
        }
        self.trains
            .iter()
            .find(|t| t.vehicle(id).is_some())
            .map(|t| VehicleLocation::Connected(t.number()))
            .ok_or(NetworkError::VehicleNotFound(id))
    }

    pub fn vehicle(&self, id: VehicleId) -> NetworkResult<&Vehicle> {
        self.stations
            .iter()
            .find_map(|s| s.pool.get(id))
            .or_else(|| self.trains.iter().find_map(|t| t.vehicle(id)))
            .ok_or(NetworkError::VehicleNotFound(id))
    }
}

#[inline]
fn pair_key(a: StationId, b: StationId) -> (StationId, StationId) {
    if a <= b { (a, b) } else { (b, a) }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Incrementally collects stations, vehicles, lines, and distances, then
/// validates them into a [`Network`].
///
/// ```rust,ignore
/// let mut b = NetworkBuilder::new();
/// let a = b.station("Alpha");
/// b.station("Beta");
/// b.add_vehicle(a, Vehicle::new(VehicleId(1), VehicleSpec::Diesel { max_speed_kmh: 140, fuel_l_per_h: 250 }));
/// b.add_distance("Alpha", "Beta", 120);
/// b.add_line(line);
/// let network = b.build()?;
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    stations:      Vec<Station>,
    station_index: HashMap<String, StationId>,
    lines:         Vec<TrainLine>,
    distances:     Vec<(String, String, u32)>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of the station called `name`, registering it first if
    /// this is the first time it is seen.
    pub fn station(&mut self, name: &str) -> StationId {
        if let Some(&id) = self.station_index.get(name) {
            return id;
        }
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Station::new(id, name));
        self.station_index.insert(name.to_owned(), id);
        id
    }

    /// Park `vehicle` at `station` as part of the initial distribution.
    ///
    /// # Panics
    /// Panics if `station` was not returned by [`station`][Self::station].
    pub fn add_vehicle(&mut self, station: StationId, vehicle: Vehicle) {
        self.stations[station.index()].pool.put(vehicle);
    }

    pub fn add_line(&mut self, line: TrainLine) {
        self.lines.push(line);
    }

    /// Record a symmetric distance.  Stations are resolved at build time.
    pub fn add_distance(&mut self, from: &str, to: &str, km: u32) {
        self.distances.push((from.to_owned(), to.to_owned(), km));
    }

    /// Validate inputs and return the finished registry.
    pub fn build(self) -> NetworkResult<Network> {
        // ── Vehicles ──────────────────────────────────────────────────────
        let mut seen_vehicles = HashSet::new();
        for vehicle in self.stations.iter().flat_map(|s| s.pool.iter()) {
            if !seen_vehicles.insert(vehicle.id) {
                return Err(NetworkError::DuplicateVehicle(vehicle.id));
            }
            if vehicle.max_speed_kmh() == Some(0) {
                return Err(NetworkError::InvalidVehicle {
                    id:     vehicle.id,
                    reason: "locomotive max speed is zero",
                });
            }
        }

        // ── Distances ─────────────────────────────────────────────────────
        let lookup = |name: &str| {
            self.station_index
                .get(name)
                .copied()
                .ok_or_else(|| NetworkError::StationNotFound(name.to_owned()))
        };
        let mut distances_km = HashMap::with_capacity(self.distances.len());
        for (from, to, km) in &self.distances {
            distances_km.insert(pair_key(lookup(from)?, lookup(to)?), *km);
        }

        // ── Lines ─────────────────────────────────────────────────────────
        let mut train_index = HashMap::with_capacity(self.lines.len());
        let mut trains = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            let origin = lookup(&line.origin)?;
            let destination = lookup(&line.destination)?;
            if !distances_km.contains_key(&pair_key(origin, destination)) {
                return Err(NetworkError::DistanceNotFound {
                    from: line.origin.clone(),
                    to:   line.destination.clone(),
                });
            }
            if line.max_speed_kmh == 0 {
                return Err(NetworkError::InvalidLine { number: line.number, reason: "max speed is zero" });
            }
            if line.arrival <= line.departure {
                return Err(NetworkError::InvalidLine {
                    number: line.number,
                    reason: "arrival is not after departure",
                });
            }
            if train_index.insert(line.number, trains.len()).is_some() {
                return Err(NetworkError::DuplicateTrain(line.number));
            }
            trains.push(Train::new(line));
        }

        let vehicle_total = seen_vehicles.len();
        debug!(
            stations = self.stations.len(),
            trains = trains.len(),
            vehicles = vehicle_total,
            "network.built"
        );

        Ok(Network {
            stations: self.stations,
            station_index: self.station_index,
            trains,
            train_index,
            distances_km,
            vehicle_total,
        })
    }
}
