//! The serving-cell record and its per-node state machine.

use std::collections::HashMap;

use hm_core::{CellId, NodeId};

/// Outcome of feeding one best-cell choice into [`ServingCellMap::observe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The node had never been sampled; it is now attached.  Not a handover.
    FirstAttach,
    /// The best cell equals the recorded serving cell.  No event.
    Unchanged,
    /// The best cell differs from the recorded serving cell.
    Handover { from: CellId },
}

/// Mapping from node → currently-believed-best serving cell.
///
/// An absent entry means "never sampled" (the Unsampled state); at most one
/// entry exists per node.  Entries are created lazily on first observation
/// and updated in place afterwards.
#[derive(Default)]
pub struct ServingCellMap {
    inner: HashMap<NodeId, CellId>,
}

impl ServingCellMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's best-cell choice for `node` and report what
    /// changed.  First observation attaches silently; only a change of an
    /// existing attachment is a handover.
    pub fn observe(&mut self, node: NodeId, best: CellId) -> Transition {
        match self.inner.insert(node, best) {
            None                         => Transition::FirstAttach,
            Some(prev) if prev == best   => Transition::Unchanged,
            Some(prev)                   => Transition::Handover { from: prev },
        }
    }

    /// The recorded serving cell, or `None` if the node was never sampled.
    pub fn serving(&self, node: NodeId) -> Option<CellId> {
        self.inner.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
