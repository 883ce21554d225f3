//! The `OrbitStore` — trajectory state for the whole node population.

use hm_core::NodeId;

use crate::OrbitState;

/// Holds an optional [`OrbitState`] per node, indexed by `NodeId`.
///
/// The vector is always length `node_count`; only mobile nodes have a state.
/// Fixed and infrastructure nodes keep `None` and are never advanced.
pub struct OrbitStore {
    orbits: Vec<Option<OrbitState>>,
}

impl OrbitStore {
    /// Create a store with no orbits assigned.
    pub fn new(node_count: usize) -> Self {
        Self { orbits: vec![None; node_count] }
    }

    /// Assign an orbit to `node` (initial placement).
    pub fn insert(&mut self, node: NodeId, state: OrbitState) {
        self.orbits[node.index()] = Some(state);
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&OrbitState> {
        self.orbits.get(node.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut OrbitState> {
        self.orbits.get_mut(node.index()).and_then(Option::as_mut)
    }

    /// Iterate `(NodeId, &OrbitState)` over nodes that have an orbit.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &OrbitState)> {
        self.orbits
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().map(|s| (NodeId(i as u32), s)))
    }

    /// Number of nodes with an assigned orbit.
    pub fn mobile_count(&self) -> usize {
        self.orbits.iter().filter(|o| o.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }
}
