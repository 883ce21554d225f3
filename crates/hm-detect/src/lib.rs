//! `hm-detect` — serving-cell changes and stranded-node recovery.
//!
//! Two independent mechanisms live here:
//!
//! - the **handover detector**: a per-node {Unsampled, Attached(cell)} state
//!   machine fed by the signal model's best-cell choice each sampling tick,
//!   emitting a [`HandoverEvent`] whenever the choice changes;
//! - the **activity watchdog**: tracks the last observed uplink activity per
//!   mobile node and flags nodes silent beyond a threshold so the host can
//!   force reattachment through the [`AttachmentApi`] seam.
//!
//! The detector log is deliberately independent of the host's own protocol
//! handover signaling — protocol notifications are confirmation, never the
//! detection trigger.

pub mod event;
pub mod serving;
pub mod watchdog;


pub use event::{HandoverEvent, HandoverLog};
pub use serving::{ServingCellMap, Transition};
pub use watchdog::{ActivityMap, AttachmentApi, NoopAttachment, Watchdog};
