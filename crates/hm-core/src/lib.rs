//! `hm-core` — foundational types for the `rust_hm` measurement framework.
//!
//! This crate is a dependency of every other `hm-*` crate.  It intentionally
//! has no `hm-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`ids`]     | `NodeId`, `CellId`, `FlowId`, `TaskId`          |
//! | [`pos`]     | `Position`, 3-D Euclidean distance              |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                 |
//! | [`node`]    | `NodeRole`, `NodeDescriptor`, `Ipv4Subnet`      |
//! | [`error`]   | `HmError`, `HmResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod error;
pub mod ids;
pub mod node;
pub mod pos;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{HmError, HmResult};
pub use ids::{CellId, FlowId, NodeId, TaskId};
pub use node::{Ipv4Subnet, NodeDescriptor, NodeRole};
pub use pos::Position;
pub use time::{SimClock, SimConfig, Tick};
