//! The `World` — all mutable per-node and per-flow state in one place.
//!
//! The original design this replaces kept serving cells, activity times,
//! orbit phases, and flow snapshots in free-standing process-wide tables.
//! Here they are fields of one context object created by the builder and
//! dropped with the simulation, so lifetime and mutation points are visible.

use hm_core::{CellId, NodeDescriptor, NodeId};
use hm_detect::{ActivityMap, HandoverLog, ServingCellMap};
use hm_flow::{AddressTable, FlowStatsDiffer};
use hm_mobility::OrbitStore;
use hm_radio::CellSite;

/// The complete simulation state operated on by the periodic tasks.
///
/// Mutated only from within single-threaded task callbacks; a multi-threaded
/// host embedding this must serialize access behind one owning thread.
pub struct World {
    /// All registered nodes, indexed by `NodeId`.
    pub nodes: Vec<NodeDescriptor>,

    /// Candidate access points, in cell-id order.
    pub cells: Vec<CellSite>,

    /// Cell ids of `cells`, cached for the watchdog's reattach calls.
    pub cell_ids: Vec<CellId>,

    /// Trajectory state for mobile nodes.
    pub orbits: OrbitStore,

    /// Node → currently-believed-best serving cell.
    pub serving: ServingCellMap,

    /// Node → last observed uplink activity.
    pub activity: ActivityMap,

    /// Append-only handover event log plus running counter.
    pub handovers: HandoverLog,

    /// Per-flow cumulative-counter snapshots and delta accounting.
    pub flows: FlowStatsDiffer,

    /// Endpoint address → node resolution table.
    pub addrs: AddressTable,

    /// Forced reattachments issued by the watchdog.
    pub reattach_count: u32,

    /// Protocol-layer handover completions observed (confirmation only).
    pub confirmed_handovers: u32,
}

impl World {
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&NodeDescriptor> {
        self.nodes.get(id.index())
    }

    /// `true` if `id` names a registered mobile node.
    pub fn is_mobile(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.role.is_mobile())
    }

    /// Ids of all mobile nodes, in registration order.
    pub fn mobile_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.role.is_mobile())
            .map(|n| n.id)
            .collect()
    }
}
