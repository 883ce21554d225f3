//! The simulation runner.

use hm_core::{CellId, NodeId, NodeRole, SimClock, SimConfig};
use hm_detect::AttachmentApi;
use hm_flow::TrafficProbe;

use crate::task::TaskSlot;
use crate::{Externals, ProtocolEvent, ProtocolEvents, SimObserver, TaskQueue, World};

/// A built, runnable simulation.
///
/// Constructed by [`SimBuilder`][crate::SimBuilder]; run to completion with
/// [`run`][Sim::run] or stepped manually with [`run_ticks`][Sim::run_ticks].
pub struct Sim {
    pub(crate) config:   SimConfig,
    pub(crate) clock:    SimClock,
    pub(crate) world:    World,
    pub(crate) tasks:    Vec<TaskSlot>,
    pub(crate) queue:    TaskQueue,
    pub(crate) attach:   Box<dyn AttachmentApi>,
    pub(crate) probe:    Box<dyn TrafficProbe>,
    pub(crate) protocol: Box<dyn ProtocolEvents>,
}

impl Sim {
    /// Run every tick up to the configured horizon, then report the final
    /// summary through the observer.
    ///
    /// Infallible: trace sinks hold their own errors (checked by the caller
    /// afterwards), and the measurement core has no failure modes once
    /// built.
    pub fn run(&mut self, observer: &mut dyn SimObserver) {
        let end = self.config.end_tick();
        while self.clock.current_tick < end {
            self.process_tick(observer);
            self.clock.advance();
        }
        observer.on_sim_end(&self.summary());
    }

    /// Run at most `n` further ticks.  Returns the number actually run,
    /// which is smaller only when the horizon intervenes.  Does not emit
    /// the final summary.
    pub fn run_ticks(&mut self, n: u64, observer: &mut dyn SimObserver) -> u64 {
        let end = self.config.end_tick();
        let mut ran = 0;
        while ran < n && self.clock.current_tick < end {
            self.process_tick(observer);
            self.clock.advance();
            ran += 1;
        }
        ran
    }

    fn process_tick(&mut self, observer: &mut dyn SimObserver) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // Protocol notifications first, so a handover completed "during"
        // this tick is counted before any task reads the totals.
        let time_s = self.clock.secs_at(now);
        for event in self.protocol.poll() {
            if let ProtocolEvent::HandoverComplete { .. } = event {
                self.world.confirmed_handovers += 1;
            }
            observer.on_protocol(time_s, &event);
        }

        let due = self.queue.drain_tick(now).unwrap_or_default();
        let end = self.config.end_tick();

        for task_id in due {
            // Explicit field borrows so the borrow checker sees disjoint
            // access to the task table, the world, and the seams.
            let Some(slot) = self.tasks.get_mut(task_id.index()) else {
                continue;
            };
            let mut ext = Externals {
                attach: self.attach.as_mut(),
                probe:  self.probe.as_mut(),
            };
            slot.task
                .run(now, &self.clock, &mut self.world, &mut ext, observer);

            // The scheduler owns the continuation: re-queue unless the next
            // firing would fall at or past the horizon.
            let next = now.offset(slot.period_ticks);
            if next < end {
                self.queue.push(next, task_id);
            }
        }

        observer.on_tick_end(now);
    }

    /// Snapshot of the run's aggregate results.
    pub fn summary(&self) -> SimSummary {
        let nodes = self
            .world
            .nodes
            .iter()
            .filter(|n| n.role != NodeRole::Infrastructure)
            .map(|n| NodeSummary {
                node:      n.id,
                role:      n.role,
                speed_mps: self.world.orbits.get(n.id).map_or(0.0, |o| o.speed_mps()),
                serving:   self.world.serving.serving(n.id),
            })
            .collect();

        SimSummary {
            duration_s:          self.clock.secs_at(self.config.end_tick()),
            handovers:           self.world.handovers.count(),
            confirmed_handovers: self.world.confirmed_handovers,
            reattaches:          self.world.reattach_count,
            cells:               self.world.cells.len(),
            nodes,
        }
    }

    /// The simulation state, for inspection between manual stepping calls.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The clock, positioned at the next tick to run.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }
}

// ── Summary types ────────────────────────────────────────────────────────────

/// Per-terminal line of the final report.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary {
    pub node:      NodeId,
    pub role:      NodeRole,
    pub speed_mps: f64,
    /// Final serving cell, or `None` if the node was never measured.
    pub serving:   Option<CellId>,
}

/// Aggregate results of one completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSummary {
    pub duration_s:          f64,
    /// Handovers detected by the measurement layer.
    pub handovers:           u32,
    /// Handovers confirmed by protocol notifications.
    pub confirmed_handovers: u32,
    /// Forced reattachments issued by the watchdog.
    pub reattaches:          u32,
    pub cells:               usize,
    pub nodes:               Vec<NodeSummary>,
}
