//! Node descriptors and address matching.
//!
//! The role of every node is resolved once at construction into a tagged
//! variant, so downstream code matches on an enum instead of repeatedly
//! probing a generic handle for its concrete device type.

use std::net::Ipv4Addr;

use crate::{NodeId, Position};

/// What a node is, decided at registration time and never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRole {
    /// A mobile terminal: tracked by the trajectory generator, the handover
    /// detector, and the activity watchdog.
    Mobile,
    /// A stationary terminal (e.g. a fixed camera).  Participates in flow
    /// statistics but is excluded from all mobility logic.
    Fixed,
    /// Infrastructure (an access point or core node).  Never moves, never
    /// carries terminal traffic of its own.
    Infrastructure,
}

impl NodeRole {
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(self, NodeRole::Mobile)
    }
}

/// One simulated node: identity, role, position, and optional terminal
/// address.
///
/// The position is owned exclusively by the node it describes; for mobile
/// nodes it is mutated only by the trajectory task, and read-only everywhere
/// else.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub id:       NodeId,
    pub role:     NodeRole,
    pub position: Position,
    /// Terminal address used for flow-endpoint resolution.  `None` for
    /// infrastructure nodes without a terminal interface.
    pub addr:     Option<Ipv4Addr>,
}

impl NodeDescriptor {
    pub fn new(id: NodeId, role: NodeRole, position: Position) -> Self {
        Self { id, role, position, addr: None }
    }

    /// Attach a terminal address to the descriptor.
    pub fn with_addr(mut self, addr: Ipv4Addr) -> Self {
        self.addr = Some(addr);
        self
    }
}

// ── Subnet matching ──────────────────────────────────────────────────────────

/// An IPv4 network/mask pair, used to classify flow direction by whether a
/// flow's source address falls inside the mobile-terminal subnet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4Subnet {
    pub network: Ipv4Addr,
    pub mask:    Ipv4Addr,
}

impl Ipv4Subnet {
    pub fn new(network: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self { network, mask }
    }

    /// `true` if `addr & mask == network & mask`.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let m = u32::from(self.mask);
        (u32::from(addr) & m) == (u32::from(self.network) & m)
    }
}

impl std::fmt::Display for Ipv4Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, u32::from(self.mask).count_ones())
    }
}
