//! Endpoint-address → node resolution.

use std::net::Ipv4Addr;

use hm_core::{NodeDescriptor, NodeId};

/// The address table of all simulated nodes.
///
/// Kept as an ordered list (not a hash map) because resolution is defined as
/// "first match wins" over the node registration order — addresses are
/// expected unique per node, but a duplicate must resolve deterministically.
pub struct AddressTable {
    entries: Vec<(Ipv4Addr, NodeId)>,
}

impl AddressTable {
    /// Build the table from node descriptors, skipping nodes without a
    /// terminal address.
    pub fn from_nodes(nodes: &[NodeDescriptor]) -> Self {
        let entries = nodes
            .iter()
            .filter_map(|n| n.addr.map(|a| (a, n.id)))
            .collect();
        Self { entries }
    }

    /// First node whose address equals `addr`, or `None`.
    pub fn resolve(&self, addr: Ipv4Addr) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(a, _)| *a == addr)
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
