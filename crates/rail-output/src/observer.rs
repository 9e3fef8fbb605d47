//! `EventLogObserver<W>` — bridges `SimObserver` to an `EventWriter`.

use tracing::warn;

use rail_core::SimTime;
use rail_network::Network;
use rail_sim::{DelayTotals, EventRecord, SimObserver};

use crate::row::EventRow;
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that renders every reported event through any
/// [`EventWriter`] (text log, CSV, or a pair of them).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct EventLogObserver<W: EventWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer now rather than waiting for the queue to drain.
    pub fn flush(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output.write_failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> SimObserver for EventLogObserver<W> {
    fn on_event(&mut self, record: &EventRecord, network: &Network) {
        let result = EventRow::from_record(record, network)
            .and_then(|row| self.writer.write_event(&row));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _now: SimTime, _delays: &DelayTotals) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
