//! `TraceObserver<W>` — bridges `SimObserver` to a `TraceWriter`.

use hm_core::{NodeId, Position};
use hm_detect::HandoverEvent;
use hm_flow::FlowRecord;
use hm_radio::CellMeasurement;
use hm_sim::{SimObserver, SimSummary};

use crate::row::{FlowRow, HandoverRow, PositionRow, PowerRow};
use crate::writer::TraceWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes every trace callback to any [`TraceWriter`]
/// backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    /// A trace-friendly node id: the sentinel for an unresolved endpoint
    /// renders as 0 rather than `u32::MAX`.
    fn trace_id(node: NodeId) -> u32 {
        if node == NodeId::INVALID { 0 } else { node.0 }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_position(&mut self, time_s: f64, node: NodeId, pos: Position, speed_mps: f64) {
        let row = PositionRow {
            time_s,
            node_id: node.0,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            speed_mps,
        };
        let result = self.writer.write_position(&row);
        self.store_err(result);
    }

    fn on_decision(
        &mut self,
        time_s:   f64,
        node:     NodeId,
        choice:   &CellMeasurement,
        handover: bool,
    ) {
        let row = PowerRow {
            time_s,
            node_id:    node.0,
            cell_id:    choice.cell.0,
            rsrp_dbm:   choice.rsrp_dbm,
            distance_m: choice.distance_m,
            handover,
        };
        let result = self.writer.write_power(&row);
        self.store_err(result);
    }

    fn on_handover(&mut self, event: &HandoverEvent) {
        let row = HandoverRow {
            time_s:      event.time_s,
            node_id:     event.node.0,
            source_cell: event.source.0,
            target_cell: event.target.0,
            rsrp_dbm:    event.rsrp_dbm,
            distance_m:  event.distance_m,
            total:       event.total,
        };
        let result = self.writer.write_handover(&row);
        self.store_err(result);
    }

    fn on_flow(&mut self, time_s: f64, record: &FlowRecord) {
        let row = FlowRow {
            time_s,
            node_id:         Self::trace_id(record.node),
            flow_id:         record.flow.0,
            direction:       match record.direction {
                hm_flow::Direction::Uplink   => "UL",
                hm_flow::Direction::Downlink => "DL",
            },
            src:             record.src,
            dst:             record.dst,
            throughput_kbps: record.throughput_kbps,
            latency_ms:      record.latency_ms,
            jitter_ms:       record.jitter_ms,
            lost_packets:    record.lost_packets,
        };
        let result = self.writer.write_flow(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &SimSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
