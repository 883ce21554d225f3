use hm_core::NodeId;
use thiserror::Error;

/// Errors raised while assembling a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("node descriptor at index {index} carries id {found}, expected {expected}")]
    NodeIdMismatch {
        index:    usize,
        expected: NodeId,
        found:    NodeId,
    },

    #[error("mobile node {0} has no orbit")]
    MissingOrbit(NodeId),

    #[error("orbit assigned to non-mobile node {0}")]
    OrbitForStaticNode(NodeId),
}

pub type SimResult<T> = Result<T, SimError>;
