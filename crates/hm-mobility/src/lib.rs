//! `hm-mobility` — deterministic circular trajectories for mobile nodes.
//!
//! Each mobile node carries an [`OrbitState`]: a persistent angular phase on
//! a fixed-radius ring, advanced by a constant increment per sampling tick.
//! The [`OrbitStore`] owns the state for the whole node population; the
//! trajectory task in `hm-sim` advances it and writes the resulting position
//! back into the node descriptor.

pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use state::OrbitState;
pub use store::OrbitStore;
