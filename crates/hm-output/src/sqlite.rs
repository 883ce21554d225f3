//! SQLite trace backend (feature `sqlite`).
//!
//! Creates a single `traces.db` file in the configured output directory with
//! one table per trace stream.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::TraceWriter;
use crate::{FlowRow, HandoverRow, OutputResult, PositionRow, PowerRow};

/// Writes simulation traces to an SQLite database.
pub struct SqliteTraceWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteTraceWriter {
    /// Open (or create) `traces.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("traces.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS ue_positions (
                 time_s    REAL    NOT NULL,
                 ue_id     INTEGER NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL,
                 z         REAL    NOT NULL,
                 speed_ms  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS power_measurements (
                 time_s         REAL    NOT NULL,
                 ue_id          INTEGER NOT NULL,
                 best_gnb_id    INTEGER NOT NULL,
                 rsrp_dbm       REAL    NOT NULL,
                 distance_m     REAL    NOT NULL,
                 handover_event INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flow_stats (
                 time_s          REAL    NOT NULL,
                 ue_id           INTEGER NOT NULL,
                 flow_id         INTEGER NOT NULL,
                 direction       TEXT    NOT NULL,
                 src_addr        TEXT    NOT NULL,
                 dst_addr        TEXT    NOT NULL,
                 throughput_kbps REAL    NOT NULL,
                 latency_ms      REAL    NOT NULL,
                 jitter_ms       REAL    NOT NULL,
                 packet_loss     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS handover_log (
                 time_s      REAL    NOT NULL,
                 ue_id       INTEGER NOT NULL,
                 source_cell INTEGER NOT NULL,
                 target_cell INTEGER NOT NULL,
                 rsrp_dbm    REAL    NOT NULL,
                 distance_m  REAL    NOT NULL,
                 total_hos   INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TraceWriter for SqliteTraceWriter {
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO ue_positions (time_s, ue_id, x, y, z, speed_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![row.time_s, row.node_id, row.x, row.y, row.z, row.speed_mps],
        )?;
        Ok(())
    }

    fn write_power(&mut self, row: &PowerRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO power_measurements \
             (time_s, ue_id, best_gnb_id, rsrp_dbm, distance_m, handover_event) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.time_s,
                row.node_id,
                row.cell_id,
                row.rsrp_dbm,
                row.distance_m,
                row.handover as i64,
            ],
        )?;
        Ok(())
    }

    fn write_flow(&mut self, row: &FlowRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO flow_stats \
             (time_s, ue_id, flow_id, direction, src_addr, dst_addr, \
              throughput_kbps, latency_ms, jitter_ms, packet_loss) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                row.time_s,
                row.node_id,
                row.flow_id,
                row.direction,
                row.src.to_string(),
                row.dst.to_string(),
                row.throughput_kbps,
                row.latency_ms,
                row.jitter_ms,
                row.lost_packets,
            ],
        )?;
        Ok(())
    }

    fn write_handover(&mut self, row: &HandoverRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO handover_log \
             (time_s, ue_id, source_cell, target_cell, rsrp_dbm, distance_m, total_hos) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.time_s,
                row.node_id,
                row.source_cell,
                row.target_cell,
                row.rsrp_dbm,
                row.distance_m,
                row.total,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
