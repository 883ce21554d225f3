//! The flow-statistics differencer.

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use hm_core::{FlowId, Ipv4Subnet, NodeId};

use crate::{AddressTable, FlowCounters, FlowSample};

/// Flow direction relative to the mobile-terminal subnet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Uplink,
    Downlink,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Uplink   => write!(f, "UL"),
            Direction::Downlink => write!(f, "DL"),
        }
    }
}

/// One per-interval statistics record for one flow.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowRecord {
    pub flow:            FlowId,
    /// Owning node, or `NodeId::INVALID` when the endpoint address matched
    /// no known node (the record is still emitted).
    pub node:            NodeId,
    pub direction:       Direction,
    pub src:             Ipv4Addr,
    pub dst:             Ipv4Addr,
    pub throughput_kbps: f64,
    pub latency_ms:      f64,
    pub jitter_ms:       f64,
    pub lost_packets:    u64,
    /// Whether the received-packet count increased this interval.  Drives
    /// the watchdog's activity feedback for uplink flows.
    pub rx_increased:    bool,
}

/// Converts cumulative counters into per-interval deltas.
///
/// On first observation of a flow the delta is computed against zero — that
/// is, the full cumulative value divided by the fixed sampling interval,
/// not by elapsed-time-since-start.  This over- or under-estimates a flow's
/// first throughput sample when the flow began mid-interval; the behavior is
/// preserved as a documented approximation for trace compatibility.
pub struct FlowStatsDiffer {
    last:       HashMap<FlowId, FlowCounters>,
    interval_s: f64,
    ue_subnet:  Ipv4Subnet,
}

impl FlowStatsDiffer {
    pub fn new(interval_s: f64, ue_subnet: Ipv4Subnet) -> Self {
        Self {
            last: HashMap::new(),
            interval_s,
            ue_subnet,
        }
    }

    /// Difference one flow sample against its previous snapshot, replace the
    /// snapshot wholesale, and return the interval record.
    pub fn observe(&mut self, sample: &FlowSample, addrs: &AddressTable) -> FlowRecord {
        let direction = if self.ue_subnet.contains(sample.src) {
            Direction::Uplink
        } else {
            Direction::Downlink
        };

        // The terminal endpoint: source for uplink, destination for downlink.
        let terminal_addr = match direction {
            Direction::Uplink   => sample.src,
            Direction::Downlink => sample.dst,
        };
        let node = addrs.resolve(terminal_addr).unwrap_or(NodeId::INVALID);

        let prev = self
            .last
            .insert(sample.flow, sample.counters)
            .unwrap_or_default();
        let now = &sample.counters;

        let rx_increased = now.rx_packets > prev.rx_packets;

        let mut throughput_kbps = 0.0;
        let mut latency_ms = 0.0;
        let mut jitter_ms = 0.0;
        if rx_increased {
            let d_packets = (now.rx_packets - prev.rx_packets) as f64;
            let d_bytes = now.rx_bytes.saturating_sub(prev.rx_bytes) as f64;
            throughput_kbps = d_bytes * 8.0 / (self.interval_s * 1000.0);
            latency_ms = (now.delay_sum_s - prev.delay_sum_s) * 1000.0 / d_packets;
            jitter_ms = (now.jitter_sum_s - prev.jitter_sum_s) * 1000.0 / d_packets;
        }
        let lost_packets = now.lost_packets.saturating_sub(prev.lost_packets);

        FlowRecord {
            flow: sample.flow,
            node,
            direction,
            src: sample.src,
            dst: sample.dst,
            throughput_kbps,
            latency_ms,
            jitter_ms,
            lost_packets,
            rx_increased,
        }
    }

    /// Number of flows with a recorded snapshot.
    pub fn tracked_flows(&self) -> usize {
        self.last.len()
    }

    /// The fixed sampling interval in seconds.
    #[inline]
    pub fn interval_s(&self) -> f64 {
        self.interval_s
    }
}
