//! Plain data row types written by trace backends.

use std::net::Ipv4Addr;

/// One position-trace sample for one terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub time_s:    f64,
    pub node_id:   u32,
    pub x:         f64,
    pub y:         f64,
    pub z:         f64,
    pub speed_mps: f64,
}

/// One best-cell measurement for one terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerRow {
    pub time_s:     f64,
    pub node_id:    u32,
    pub cell_id:    u32,
    pub rsrp_dbm:   f64,
    pub distance_m: f64,
    /// Whether this measurement changed the serving cell.
    pub handover:   bool,
}

/// One per-interval flow statistics record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRow {
    pub time_s:          f64,
    /// Owning terminal, or 0 when the endpoint matched no known node.
    pub node_id:         u32,
    pub flow_id:         u32,
    /// `"UL"` or `"DL"`.
    pub direction:       &'static str,
    pub src:             Ipv4Addr,
    pub dst:             Ipv4Addr,
    pub throughput_kbps: f64,
    pub latency_ms:      f64,
    pub jitter_ms:       f64,
    pub lost_packets:    u64,
}

/// One detected handover, written to the text event log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandoverRow {
    pub time_s:      f64,
    pub node_id:     u32,
    pub source_cell: u32,
    pub target_cell: u32,
    pub rsrp_dbm:    f64,
    pub distance_m:  f64,
    /// Running handover total after this event.
    pub total:       u32,
}
