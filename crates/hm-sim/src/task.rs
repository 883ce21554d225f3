//! The repeating-task abstraction.
//!
//! A task is registered once with a first tick and a period; from then on
//! the scheduler owns its continuation.  The task body is plain per-tick
//! work — it never sees the queue and cannot reschedule itself, which keeps
//! the horizon check in exactly one place ([`Sim`][crate::Sim]).

use hm_core::{SimClock, Tick};
use hm_detect::AttachmentApi;
use hm_flow::TrafficProbe;

use crate::{SimObserver, World};

/// Mutable handles to the host simulator's collaborators, rebuilt on each
/// tick from the boxed seams owned by [`Sim`][crate::Sim].
pub struct Externals<'a> {
    /// Forced-reattachment operation (fire-and-forget).
    pub attach: &'a mut dyn AttachmentApi,
    /// Cumulative traffic counters per flow.
    pub probe:  &'a mut dyn TrafficProbe,
}

/// One registered periodic activity.
///
/// Implementations read and mutate the [`World`] and report results through
/// the observer.  All invocations are single-threaded and run to completion,
/// so exclusive access to the world needs no further coordination.
pub trait PeriodicTask {
    fn run(
        &mut self,
        now:   Tick,
        clock: &SimClock,
        world: &mut World,
        ext:   &mut Externals<'_>,
        obs:   &mut dyn SimObserver,
    );
}

/// A task plus its scheduling metadata, stored in the task table.
pub(crate) struct TaskSlot {
    pub period_ticks: u64,
    pub task:         Box<dyn PeriodicTask>,
}
