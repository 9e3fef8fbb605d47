//! Human-readable event log (`Trainsim.log`).
//!
//! Low verbosity writes one line per event:
//!
//! ```text
//! 07:50 Train: 1 from Alpha 08:00 (08:00) to Beta 10:00 (10:00) Train status: Ready
//! ```
//!
//! High verbosity writes a block per event:
//!
//! ```text
//! Event time: 07:50
//! Train: 1 from Alpha 08:00 (08:00) to Beta 10:00 (10:00) Train status: Ready
//! Demanded vehicles:
//! 1 Sleeping car
//! Connected vehicles:
//! Id: 1 Diesel engine Max speed (km/h): 140 Fuel consumption (l/h): 250
//! Average speed: 0 km/h
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rail_core::{VehicleKind, Verbosity};

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

/// Order in which demanded kinds are summarised.
const DEMAND_ORDER: [VehicleKind; 6] = [
    VehicleKind::ElectricLocomotive,
    VehicleKind::DieselLocomotive,
    VehicleKind::CoachCar,
    VehicleKind::SleepingCar,
    VehicleKind::OpenFreightCar,
    VehicleKind::CoveredFreightCar,
];

/// Appends rendered events to any `Write` sink.
pub struct TextLogWriter<W: Write> {
    out:       W,
    verbosity: Verbosity,
    finished:  bool,
}

impl TextLogWriter<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`.  Each run starts with an
    /// empty log.
    pub fn create(path: impl AsRef<Path>, verbosity: Verbosity) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), verbosity))
    }
}

impl<W: Write> TextLogWriter<W> {
    pub fn new(out: W, verbosity: Verbosity) -> Self {
        Self { out, verbosity, finished: false }
    }

    /// Unwrap the sink (e.g. to inspect an in-memory log).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventWriter for TextLogWriter<W> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.out.write_all(render(row, self.verbosity).as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// Render one event, newline-terminated.
pub fn render(row: &EventRow, verbosity: Verbosity) -> String {
    let mut s = String::new();
    match verbosity {
        Verbosity::Low => {
            let _ = writeln!(s, "{} {}", row.time, summary(row));
        }
        Verbosity::High => {
            let _ = writeln!(s, "Event time: {}", row.time);
            let _ = writeln!(s, "{}", summary(row));
            if !row.demanded.is_empty() {
                s.push_str("Demanded vehicles:\n");
                for kind in DEMAND_ORDER {
                    let n = row.demanded.iter().filter(|&&k| k == kind).count();
                    if n > 0 {
                        let _ = writeln!(s, "{n} {kind}");
                    }
                }
            }
            if !row.connected.is_empty() {
                s.push_str("Connected vehicles:\n");
                for vehicle in &row.connected {
                    let _ = writeln!(s, "{vehicle}");
                }
            }
            let _ = writeln!(s, "Average speed: {} km/h", row.average_speed_kmh);
        }
    }
    s
}

fn summary(row: &EventRow) -> String {
    format!(
        "Train: {} from {} {} ({}) to {} {} ({}) Train status: {}",
        row.train.0,
        row.origin,
        row.planned_departure,
        row.original_departure,
        row.destination,
        row.expected_arrival,
        row.original_arrival,
        row.status,
    )
}
