//! CSV network loader.
//!
//! A network is described by three files, conventionally `stations.csv`,
//! `trains.csv`, and `distances.csv` in one directory.
//!
//! # `stations.csv`
//!
//! One row per parked vehicle.  A row with empty vehicle columns registers a
//! station that starts without vehicles.
//!
//! ```csv
//! station,vehicle_id,kind,param_0,param_1
//! Alpha,1,5,140,250
//! Alpha,2,0,64,1
//! Beta,,,,
//! ```
//!
//! | `kind` | Vehicle            | `param_0`          | `param_1`        |
//! |--------|--------------------|--------------------|------------------|
//! | 0      | coach car          | seats              | internet (0/1)   |
//! | 1      | sleeping car       | beds               | —                |
//! | 2      | open freight car   | capacity (t)       | floor area (m²)  |
//! | 3      | covered freight car| volume (m³)        | —                |
//! | 4      | electric engine    | max speed (km/h)   | power (kW)       |
//! | 5      | diesel engine      | max speed (km/h)   | fuel (l/h)       |
//!
//! # `trains.csv`
//!
//! ```csv
//! train,origin,destination,departure,arrival,max_speed_kmh,vehicles
//! 101,Alpha,Beta,07:30,09:00,160,5 0 0
//! ```
//!
//! `vehicles` is a space-separated list of kind codes, in demand order.  An
//! arrival clock time earlier than the departure is read as the next day.
//!
//! # `distances.csv`
//!
//! ```csv
//! from,to,km
//! Alpha,Beta,180
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use rail_core::time::SECS_PER_DAY;
use rail_core::{SimTime, TrainId, Vehicle, VehicleId, VehicleKind, VehicleSpec};

use crate::{Network, NetworkBuilder, NetworkError, NetworkResult, TrainLine};

pub const STATIONS_FILE:  &str = "stations.csv";
pub const TRAINS_FILE:    &str = "trains.csv";
pub const DISTANCES_FILE: &str = "distances.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StationRecord {
    station:    String,
    vehicle_id: Option<u32>,
    kind:       Option<u8>,
    param_0:    Option<u32>,
    param_1:    Option<u32>,
}

#[derive(Deserialize)]
struct TrainRecord {
    train:         u32,
    origin:        String,
    destination:   String,
    departure:     String,
    arrival:       String,
    max_speed_kmh: u32,
    vehicles:      String,
}

#[derive(Deserialize)]
struct DistanceRecord {
    from: String,
    to:   String,
    km:   u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the three network files from `dir`.
pub fn load_network_dir(dir: &Path) -> NetworkResult<Network> {
    let stations = File::open(dir.join(STATIONS_FILE))?;
    let trains = File::open(dir.join(TRAINS_FILE))?;
    let distances = File::open(dir.join(DISTANCES_FILE))?;
    load_network_readers(stations, trains, distances)
}

/// Like [`load_network_dir`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or embedding data in a binary.
pub fn load_network_readers<S: Read, T: Read, D: Read>(
    stations:  S,
    trains:    T,
    distances: D,
) -> NetworkResult<Network> {
    let mut builder = NetworkBuilder::new();

    for row in records::<StationRecord, _>(stations)? {
        let station = builder.station(row.station.trim());
        if let Some(vehicle) = parse_vehicle(&row)? {
            builder.add_vehicle(station, vehicle);
        }
    }

    for row in records::<TrainRecord, _>(trains)? {
        builder.add_line(parse_line(row)?);
    }

    for row in records::<DistanceRecord, _>(distances)? {
        builder.add_distance(row.from.trim(), row.to.trim(), row.km);
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn records<Rec: DeserializeOwned, R: Read>(reader: R) -> NetworkResult<Vec<Rec>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<Rec>()
        .map(|row| row.map_err(|e| NetworkError::Parse(e.to_string())))
        .collect()
}

fn parse_vehicle(row: &StationRecord) -> NetworkResult<Option<Vehicle>> {
    let Some(id) = row.vehicle_id else {
        return Ok(None);
    };
    let (Some(code), Some(p0)) = (row.kind, row.param_0) else {
        return Err(NetworkError::Parse(format!(
            "vehicle {id} at {:?} is missing its kind or first parameter",
            row.station
        )));
    };
    let kind = VehicleKind::from_code(code)?;
    let spec = VehicleSpec::from_params(kind, p0, row.param_1.unwrap_or(0));
    Ok(Some(Vehicle::new(VehicleId(id), spec)))
}

fn parse_line(row: TrainRecord) -> NetworkResult<TrainLine> {
    let demand = row
        .vehicles
        .split_whitespace()
        .map(|code| {
            let code: u8 = code.parse().map_err(|_| {
                NetworkError::Parse(format!("train {}: invalid vehicle kind {code:?}", row.train))
            })?;
            Ok(VehicleKind::from_code(code)?)
        })
        .collect::<NetworkResult<Vec<_>>>()?;

    let departure = row.departure.parse::<SimTime>()?;
    let mut arrival = row.arrival.parse::<SimTime>()?;
    if arrival < departure {
        arrival += SECS_PER_DAY;
    }

    Ok(TrainLine {
        number:        TrainId(row.train),
        departure,
        arrival,
        origin:        row.origin,
        destination:   row.destination,
        demand,
        max_speed_kmh: row.max_speed_kmh,
    })
}
