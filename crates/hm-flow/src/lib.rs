//! `hm-flow` — per-interval flow statistics from cumulative counters.
//!
//! The traffic-monitoring collaborator exposes monotonically increasing
//! cumulative counters per flow.  [`FlowStatsDiffer`] turns each new sample
//! into interval throughput/latency/jitter/loss by differencing against the
//! previous snapshot, classifies the flow's direction by subnet membership,
//! and resolves the owning node through the [`AddressTable`].

pub mod addr;
pub mod counters;
pub mod diff;
pub mod probe;

#[cfg(test)]
mod tests;

pub use addr::AddressTable;
pub use counters::{FlowCounters, FlowSample};
pub use diff::{Direction, FlowRecord, FlowStatsDiffer};
pub use probe::{IdleProbe, TrafficProbe};
