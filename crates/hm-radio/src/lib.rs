//! `hm-radio` — distance-based signal estimation for the rust_hm framework.
//!
//! The path-loss formula is a pluggable strategy ([`PathLossModel`]) so the
//! constants are not welded into the handover detector; [`UmiStreetCanyon`]
//! provides the simplified 3GPP UMi model used by the reference scenario.
//! [`SignalModel`] turns path loss into an RSRP-like received-power estimate
//! and picks the best-serving cell from a candidate set.

pub mod measure;
pub mod model;


pub use measure::{CellMeasurement, CellSite, SignalModel};
pub use model::{PathLossModel, UmiStreetCanyon, MIN_DISTANCE_M};
