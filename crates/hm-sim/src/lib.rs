//! `hm-sim` — cooperative discrete-event runner for the rust_hm framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Protocol  — poll the host's handover notifications (logging only).
//!   ② Drain     — pop the tasks queued for this tick, in insertion order.
//!   ③ Run       — each task reads/mutates the World and reports through
//!                 the observer.
//!   ④ Re-queue  — the scheduler re-inserts each task at now + period,
//!                 unless the next firing would fall at or past the horizon.
//! ```
//!
//! There is no parallelism and no blocking I/O in the loop: every callback
//! runs to completion before the next one at an equal-or-later tick, so the
//! per-node maps in [`World`] need no locking.  Tasks never reschedule
//! themselves — the period/horizon bookkeeping lives entirely in the
//! scheduler (step ④).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, signal, ue_subnet)
//!     .nodes(nodes)
//!     .cells(cells)
//!     .orbit(NodeId(0), orbit)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod protocol;
pub mod queue;
pub mod sim;
pub mod task;
pub mod tasks;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::{SamplingConfig, SimBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use protocol::{NoProtocolEvents, ProtocolEvent, ProtocolEvents};
pub use queue::TaskQueue;
pub use sim::{NodeSummary, Sim, SimSummary};
pub use task::{Externals, PeriodicTask};
pub use world::World;
