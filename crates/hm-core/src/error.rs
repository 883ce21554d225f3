//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into `HmError`
//! via `From` impls, or keep them separate and wrap `HmError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{CellId, NodeId};

/// The top-level error type for `hm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HmError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("cell {0} not found")]
    CellNotFound(CellId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `hm-*` crates.
pub type HmResult<T> = Result<T, HmError>;
