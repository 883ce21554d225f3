//! CSV trace backend.
//!
//! Creates four files in the configured output directory:
//! - `ue_positions.csv`
//! - `power_measurements.csv`
//! - `flow_stats.csv`
//! - `handover_log.txt` (plain text, one line per event)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{FlowRow, HandoverRow, OutputResult, PositionRow, PowerRow};

/// Writes simulation traces to three CSV files plus the handover text log.
pub struct CsvTraceWriter {
    positions: Writer<File>,
    power:     Writer<File>,
    flows:     Writer<File>,
    handovers: BufWriter<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Open (or create) the trace files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut positions = Writer::from_path(dir.join("ue_positions.csv"))?;
        positions.write_record(["Time", "UE_ID", "X", "Y", "Z", "Speed_ms"])?;

        let mut power = Writer::from_path(dir.join("power_measurements.csv"))?;
        power.write_record([
            "Time",
            "UE_ID",
            "Best_gNB_ID",
            "RSRP_dBm",
            "Distance_m",
            "Handover_Event",
        ])?;

        let mut flows = Writer::from_path(dir.join("flow_stats.csv"))?;
        flows.write_record([
            "Time",
            "UeId",
            "FlowId",
            "Direction",
            "SrcAddr",
            "DstAddr",
            "Throughput_kbps",
            "Latency_ms",
            "Jitter_ms",
            "PacketLoss",
        ])?;

        let handovers = BufWriter::new(File::create(dir.join("handover_log.txt"))?);

        Ok(Self {
            positions,
            power,
            flows,
            handovers,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.positions.write_record(&[
            format!("{:.3}", row.time_s),
            row.node_id.to_string(),
            format!("{:.3}", row.x),
            format!("{:.3}", row.y),
            format!("{:.3}", row.z),
            format!("{:.3}", row.speed_mps),
        ])?;
        Ok(())
    }

    fn write_power(&mut self, row: &PowerRow) -> OutputResult<()> {
        self.power.write_record(&[
            format!("{:.1}", row.time_s),
            row.node_id.to_string(),
            row.cell_id.to_string(),
            format!("{:.1}", row.rsrp_dbm),
            format!("{:.1}", row.distance_m),
            if row.handover { "YES" } else { "NO" }.to_string(),
        ])?;
        Ok(())
    }

    fn write_flow(&mut self, row: &FlowRow) -> OutputResult<()> {
        self.flows.write_record(&[
            row.time_s.to_string(),
            row.node_id.to_string(),
            row.flow_id.to_string(),
            row.direction.to_string(),
            row.src.to_string(),
            row.dst.to_string(),
            row.throughput_kbps.to_string(),
            row.latency_ms.to_string(),
            row.jitter_ms.to_string(),
            row.lost_packets.to_string(),
        ])?;
        Ok(())
    }

    fn write_handover(&mut self, row: &HandoverRow) -> OutputResult<()> {
        writeln!(
            self.handovers,
            "[{:.6}s] HANDOVER: UE_{} cell_{} -> cell_{} (RSRP: {:.1} dBm) (Dist: {:.1} m) [Total_HOs: {}]",
            row.time_s,
            row.node_id,
            row.source_cell,
            row.target_cell,
            row.rsrp_dbm,
            row.distance_m,
            row.total,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.power.flush()?;
        self.flows.flush()?;
        self.handovers.flush()?;
        Ok(())
    }
}
