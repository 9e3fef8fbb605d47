//! daily — runs one simulated day of a small rail network.
//!
//! Loads `stations.csv`, `trains.csv` and `distances.csv` from a data
//! directory, steps the day in 10-minute intervals, and writes the event log
//! as `Trainsim.log` and `events.csv` into the output directory.
//!
//! ```text
//! cargo run -p daily -- [DATA_DIR] [OUT_DIR] [TRAIN]
//! RUST_LOG=rail_sim=debug cargo run -p daily
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rail_core::{SimConfig, TrainId, VehicleId, Verbosity, format_delay};
use rail_network::{VehicleLocation, load_network_dir};
use rail_output::{CsvWriter, EventLogObserver, EventRow, TextLogWriter, render};
use rail_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
const LOG_FILE:         &str = "Trainsim.log";
const DEFAULT_TRAIN:    u32  = 102;
const TRACKED_VEHICLE:  u32  = 3; // a Stockholm coach that moves twice

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let data_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
    let train = match args.next() {
        Some(n) => TrainId(n.parse().with_context(|| format!("invalid train number {n:?}"))?),
        None => TrainId(DEFAULT_TRAIN),
    };

    println!("=== daily: rail_dt network simulator ===");

    // 1. Load the network.
    let network = load_network_dir(&data_dir)
        .with_context(|| format!("loading network from {}", data_dir.display()))?;
    println!(
        "Network: {} stations, {} trains, {} vehicles",
        network.stations().len(),
        network.trains().len(),
        network.vehicle_total()
    );
    println!();
    println!("{:<6} {:<12} {:<6} {:<12} {:<6}", "Train", "From", "Dep", "To", "Arr");
    println!("{}", "-".repeat(46));
    for t in network.timetable() {
        let line = t.line();
        println!(
            "{:<6} {:<12} {:<6} {:<12} {:<6}",
            line.number.0, line.origin, line.departure, line.destination, line.arrival
        );
    }
    println!();

    // 2. Sinks and simulation.
    std::fs::create_dir_all(&out_dir)?;
    let config = SimConfig { verbosity: Verbosity::Low, ..SimConfig::default() };
    let text = TextLogWriter::create(out_dir.join(LOG_FILE), config.verbosity)?;
    let csv = CsvWriter::new(&out_dir)?;
    let mut sim = SimBuilder::new(config, network)
        .observer(EventLogObserver::new((text, csv)))
        .build()?;

    // 3. Step the day.
    let t0 = Instant::now();
    let mut intervals = 0;
    while sim.advance_interval()? {
        intervals += 1;
    }
    let elapsed = t0.elapsed();
    info!(intervals, executed = sim.execution_log().len(), "daily.done");

    if let Some(e) = sim.observer_mut().take_error() {
        bail!("writing event log: {e}");
    }

    // 4. Summary.
    let delays = sim.delays();
    println!(
        "Simulated to {} in {intervals} intervals ({:.3} ms)",
        sim.clock().current,
        elapsed.as_secs_f64() * 1e3
    );
    println!("  events executed       : {}", sim.execution_log().len());
    println!("  total departure delay : {}", format_delay(delays.departure_secs));
    println!("  total arrival delay   : {}", format_delay(delays.arrival_secs));
    println!("  log written to        : {}", out_dir.join(LOG_FILE).display());
    println!();

    // 5. Statistics.
    let net = sim.network();
    println!("Vehicles per station at start:");
    for &(station, count) in sim.start_distribution() {
        let name = net.station(station).map_or("?", |s| s.name.as_str());
        println!("  {:<20}{count}", format!("{name}:"));
    }
    let list = |trains: Vec<&rail_network::Train>| {
        trains.iter().map(|t| t.number().0.to_string()).collect::<Vec<_>>().join(" ")
    };
    println!("  stuck at origin       : {}", list(net.stuck_trains()));
    println!("  arrived on time       : {}", list(net.on_time_trains()));
    println!("  delayed               : {}", list(net.delayed_trains()));
    for station in net.stations() {
        println!("  departures {:<10} : {}", station.name, list(net.departures_from(&station.name)?));
    }
    println!();

    // 6. Life cycles.
    let cycle = sim.life_cycle_by_train(train);
    if cycle.found() {
        println!("Life cycle of train {}:", train.0);
        for record in &cycle.records {
            print!("{}", render(&EventRow::from_record(record, sim.network())?, Verbosity::Low));
        }
    } else {
        println!("Train {} has no logged events", train.0);
    }
    println!();

    let vehicle = VehicleId(TRACKED_VEHICLE);
    let cycle = sim.life_cycle_by_vehicle(vehicle);
    println!("Vehicle {} appeared in {} logged events", vehicle.0, cycle.records.len());
    match sim.network().locate_vehicle(vehicle)? {
        VehicleLocation::Parked(station) => {
            let name = sim.network().station(station).map_or("?", |s| s.name.as_str());
            println!("  now parked at {name}");
        }
        VehicleLocation::Connected(number) => println!("  now connected to train {}", number.0),
    }

    Ok(())
}
