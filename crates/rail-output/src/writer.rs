//! The `EventWriter` trait implemented by all log sinks.

use crate::{EventRow, OutputResult};

/// Trait implemented by the text and CSV writers.
///
/// Errors are stored by the observer and retrieved with
/// [`EventLogObserver::take_error`][crate::EventLogObserver::take_error].
pub trait EventWriter {
    /// Append one executed event.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Fan out to two writers.  Both are always attempted; the first error wins.
impl<A: EventWriter, B: EventWriter> EventWriter for (A, B) {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        let first = self.0.write_event(row);
        let second = self.1.write_event(row);
        first.and(second)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let first = self.0.finish();
        let second = self.1.finish();
        first.and(second)
    }
}
