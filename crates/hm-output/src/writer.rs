//! The `TraceWriter` trait implemented by all backend writers.

use crate::{FlowRow, HandoverRow, OutputResult, PositionRow, PowerRow};

/// Trait implemented by the CSV and SQLite trace writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write one position-trace row.
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()>;

    /// Write one power-measurement row.
    fn write_power(&mut self, row: &PowerRow) -> OutputResult<()>;

    /// Write one flow-statistics row.
    fn write_flow(&mut self, row: &FlowRow) -> OutputResult<()>;

    /// Append one handover event to the event log.
    fn write_handover(&mut self, row: &HandoverRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
