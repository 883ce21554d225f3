//! Handover events and the append-only event log.

use hm_core::{CellId, NodeId};

/// An immutable record of one detected serving-cell change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandoverEvent {
    /// Simulated time of the tick where the change was first observed.
    pub time_s:     f64,
    pub node:       NodeId,
    pub source:     CellId,
    pub target:     CellId,
    /// Signal strength of the winning cell at the decision.
    pub rsrp_dbm:   f64,
    /// Distance to the winning cell at the decision.
    pub distance_m: f64,
    /// Running event total after this event (1-based).
    pub total:      u32,
}

/// Append-only handover log plus the running counter used for reporting.
#[derive(Default)]
pub struct HandoverLog {
    events: Vec<HandoverEvent>,
    count:  u32,
}

impl HandoverLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detected handover and return the stored event (with its
    /// running total filled in).
    pub fn record(
        &mut self,
        time_s:     f64,
        node:       NodeId,
        source:     CellId,
        target:     CellId,
        rsrp_dbm:   f64,
        distance_m: f64,
    ) -> HandoverEvent {
        self.count += 1;
        let event = HandoverEvent {
            time_s,
            node,
            source,
            target,
            rsrp_dbm,
            distance_m,
            total: self.count,
        };
        self.events.push(event);
        event
    }

    /// Total handovers detected so far.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn events(&self) -> &[HandoverEvent] {
        &self.events
    }
}
