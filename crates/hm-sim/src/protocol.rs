//! Protocol-layer handover notifications.
//!
//! The detector in `hm-detect` infers handovers from measurements alone.  A
//! real attachment stack also reports them through control-plane signalling;
//! this seam lets such a stack feed confirmations into the run so the final
//! summary can report both counts side by side.

use hm_core::{CellId, NodeId};

/// A control-plane handover notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// Handover initiated from `source` towards `target`.
    HandoverStart {
        node:   NodeId,
        source: CellId,
        target: CellId,
    },
    /// Handover completed; `node` is now attached to `cell`.
    HandoverComplete { node: NodeId, cell: CellId },
}

/// Source of protocol-layer events, polled once per tick before any task
/// runs.
pub trait ProtocolEvents {
    /// Returns the events that occurred since the previous poll.
    fn poll(&mut self) -> Vec<ProtocolEvent>;
}

/// A [`ProtocolEvents`] source that never reports anything.  The default
/// when no attachment stack is wired in.
pub struct NoProtocolEvents;

impl ProtocolEvents for NoProtocolEvents {
    fn poll(&mut self) -> Vec<ProtocolEvent> {
        Vec::new()
    }
}
