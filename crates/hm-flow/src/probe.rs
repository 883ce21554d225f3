//! The traffic-probe seam.

use crate::FlowSample;

/// The external traffic-monitoring collaborator.
///
/// `poll` returns the current cumulative counters for every active flow.
/// Counters must be non-decreasing across polls; the differencer clamps
/// deltas non-negative, but a regressing counter is a contract violation on
/// the probe's side.
pub trait TrafficProbe {
    fn poll(&mut self) -> Vec<FlowSample>;
}

/// A [`TrafficProbe`] that reports no flows.  Use in tests or when the host
/// has no traffic monitor wired up.
pub struct IdleProbe;

impl TrafficProbe for IdleProbe {
    fn poll(&mut self) -> Vec<FlowSample> {
        vec![]
    }
}
