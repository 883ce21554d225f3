//! `TaskQueue` — sparse per-tick task activation queue.
//!
//! # Why this exists
//!
//! Periods differ wildly (0.1 s flow sampling vs 2 s watchdog), so iterating
//! every registered task every tick to ask "is it your turn?" would cost
//! O(tasks) per tick regardless of how many actually fire.  The queue
//! inverts the problem: each task is indexed under the tick of its next
//! firing, and a tick drains only the tasks due right then.
//!
//! # Ordering
//!
//! Tasks queued for the same tick drain in insertion order.  Together with
//! the stagger policy in [`SimBuilder`][crate::SimBuilder] this is the only
//! ordering guarantee the framework makes — or needs.

use std::collections::BTreeMap;

use hm_core::{TaskId, Tick};

/// A priority-queue mapping simulation ticks → tasks that fire at that tick.
#[derive(Default)]
pub struct TaskQueue {
    inner: BTreeMap<Tick, Vec<TaskId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, task: TaskId) {
        self.inner.entry(tick).or_default().push(task);
        self.total += 1;
    }

    /// Remove and return all tasks scheduled for exactly `tick`, in
    /// insertion order.
    ///
    /// Returns `None` if nothing is queued for that tick (the common case —
    /// avoids allocation).
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<TaskId>> {
        let tasks = self.inner.remove(&tick)?;
        self.total -= tasks.len();
        Some(tasks)
    }

    /// The earliest tick with at least one queued task, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of (tick, task) entries across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks that have at least one queued task.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
