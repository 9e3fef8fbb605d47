//! CSV event log.
//!
//! Creates `events.csv` in the configured output directory, one row per
//! executed event.  `connected` holds space-separated vehicle ids and
//! `demanded` space-separated kind codes, matching the network input files.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

pub const EVENTS_FILE: &str = "events.csv";

const HEADER: [&str; 13] = [
    "time",
    "train",
    "event",
    "status",
    "origin",
    "destination",
    "planned_departure",
    "original_departure",
    "expected_arrival",
    "original_arrival",
    "average_speed_kmh",
    "connected",
    "demanded",
];

/// Writes the event log to `events.csv`.
pub struct CsvWriter {
    events:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) `events.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(HEADER)?;
        Ok(Self { events, finished: false })
    }
}

impl EventWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        let connected: Vec<String> = row.connected.iter().map(|v| v.id.0.to_string()).collect();
        let demanded: Vec<String> = row.demanded.iter().map(|k| k.code().to_string()).collect();
        self.events.write_record(&[
            row.time.to_string(),
            row.train.0.to_string(),
            row.kind.to_string(),
            row.status.to_string(),
            row.origin.clone(),
            row.destination.clone(),
            row.planned_departure.to_string(),
            row.original_departure.to_string(),
            row.expected_arrival.to_string(),
            row.original_arrival.to_string(),
            row.average_speed_kmh.to_string(),
            connected.join(" "),
            demanded.join(" "),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}
