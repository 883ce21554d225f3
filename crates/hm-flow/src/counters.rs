//! Cumulative flow counters as reported by the traffic monitor.

use std::net::Ipv4Addr;

use hm_core::FlowId;

/// Cumulative per-flow counters, non-decreasing over the run by contract of
/// the traffic-monitoring collaborator.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowCounters {
    pub tx_packets:   u64,
    pub rx_packets:   u64,
    pub tx_bytes:     u64,
    pub rx_bytes:     u64,
    /// Sum of per-packet one-way delays, in seconds.
    pub delay_sum_s:  f64,
    /// Sum of per-packet delay variations, in seconds.
    pub jitter_sum_s: f64,
    pub lost_packets: u64,
}

/// One flow's identity, endpoints, and current cumulative counters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowSample {
    pub flow:     FlowId,
    pub src:      Ipv4Addr,
    pub dst:      Ipv4Addr,
    pub counters: FlowCounters,
}
