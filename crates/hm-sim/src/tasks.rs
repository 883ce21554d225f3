//! The built-in periodic tasks wired up by [`SimBuilder`][crate::SimBuilder].
//!
//! Each task is a small struct holding only its per-registration parameters;
//! all shared state lives in the [`World`] passed to `run`.  Tasks for
//! per-node work (movement, tracing, measurement) are registered once per
//! node, so their structs carry the node id.

use hm_core::{NodeId, SimClock, Tick};
use hm_detect::Transition;
use hm_flow::Direction;
use hm_radio::{PathLossModel, SignalModel};

use crate::{Externals, PeriodicTask, SimObserver, World};

// ── Movement ─────────────────────────────────────────────────────────────────

/// Advances one node's orbit by a fixed time step and writes the new
/// position back into its descriptor.
pub struct OrbitTask {
    pub node:    NodeId,
    /// Phase step per firing, in seconds of simulated motion.  Equal to the
    /// task period so motion is continuous in simulated time.
    pub dt_secs: f64,
}

impl PeriodicTask for OrbitTask {
    fn run(
        &mut self,
        _now:  Tick,
        _clock: &SimClock,
        world: &mut World,
        _ext:  &mut Externals<'_>,
        _obs:  &mut dyn SimObserver,
    ) {
        let Some(orbit) = world.orbits.get_mut(self.node) else {
            return;
        };
        orbit.advance(self.dt_secs);
        let pos = orbit.position();
        if let Some(desc) = world.nodes.get_mut(self.node.index()) {
            desc.position = pos;
        }
    }
}

// ── Position trace ───────────────────────────────────────────────────────────

/// Samples one terminal's current position and scalar speed.
///
/// Registered for mobile and fixed terminals alike; fixed terminals report
/// speed zero.
pub struct PositionTraceTask {
    pub node: NodeId,
}

impl PeriodicTask for PositionTraceTask {
    fn run(
        &mut self,
        now:   Tick,
        clock: &SimClock,
        world: &mut World,
        _ext:  &mut Externals<'_>,
        obs:   &mut dyn SimObserver,
    ) {
        let Some(desc) = world.node(self.node) else {
            return;
        };
        let speed = world.orbits.get(self.node).map_or(0.0, |o| o.speed_mps());
        obs.on_position(clock.secs_at(now), self.node, desc.position, speed);
    }
}

// ── Measurement and handover detection ───────────────────────────────────────

/// Scans the candidate cells for one terminal, updates its serving-cell
/// record, and reports any detected handover.
pub struct MeasureTask<P: PathLossModel> {
    pub node:   NodeId,
    pub signal: SignalModel<P>,
}

impl<P: PathLossModel> PeriodicTask for MeasureTask<P> {
    fn run(
        &mut self,
        now:   Tick,
        clock: &SimClock,
        world: &mut World,
        _ext:  &mut Externals<'_>,
        obs:   &mut dyn SimObserver,
    ) {
        let Some(desc) = world.node(self.node) else {
            return;
        };
        let Some(best) = self.signal.best_cell(desc.position, &world.cells) else {
            return;
        };

        let time_s = clock.secs_at(now);
        let transition = world.serving.observe(self.node, best.cell);
        let handover = matches!(transition, Transition::Handover { .. });

        if let Transition::Handover { from } = transition {
            let event = world.handovers.record(
                time_s,
                self.node,
                from,
                best.cell,
                best.rsrp_dbm,
                best.distance_m,
            );
            obs.on_handover(&event);
        }

        obs.on_decision(time_s, self.node, &best, handover);
    }
}

// ── Watchdog ─────────────────────────────────────────────────────────────────

/// Sweeps all mobile nodes for uplink silence and force-reattaches stalled
/// ones through the [`AttachmentApi`][hm_detect::AttachmentApi] seam.
pub struct WatchdogTask {
    pub dog: hm_detect::Watchdog,
}

impl PeriodicTask for WatchdogTask {
    fn run(
        &mut self,
        now:   Tick,
        clock: &SimClock,
        world: &mut World,
        ext:   &mut Externals<'_>,
        obs:   &mut dyn SimObserver,
    ) {
        let time_s = clock.secs_at(now);
        // Collect first: force_reattach and touch both need &mut world fields.
        for node in world.mobile_ids() {
            if !self.dog.stalled(&world.activity, node, now) {
                continue;
            }
            let elapsed_s = self
                .dog
                .elapsed(&world.activity, node, now)
                .map(|ticks| ticks as f64 * clock.tick_secs());

            ext.attach.force_reattach(node, &world.cell_ids);
            // Reset the clock so one stall produces one reattach, not one
            // per sweep until traffic resumes.
            world.activity.touch(node, now);
            world.reattach_count += 1;
            obs.on_reattach(time_s, node, elapsed_s);
        }
    }
}

// ── Flow statistics ──────────────────────────────────────────────────────────

/// Polls the traffic probe, differences every flow against its previous
/// snapshot, and feeds uplink activity back to the watchdog's record.
pub struct FlowStatsTask;

impl PeriodicTask for FlowStatsTask {
    fn run(
        &mut self,
        now:   Tick,
        clock: &SimClock,
        world: &mut World,
        ext:   &mut Externals<'_>,
        obs:   &mut dyn SimObserver,
    ) {
        let time_s = clock.secs_at(now);
        let samples = ext.probe.poll();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let World {
            flows,
            addrs,
            activity,
            nodes,
            ..
        } = world;

        for sample in &samples {
            let record = flows.observe(sample, addrs);

            let is_mobile = nodes
                .get(record.node.index())
                .is_some_and(|n| n.role.is_mobile());
            if record.direction == Direction::Uplink && record.rx_increased && is_mobile {
                activity.touch(record.node, now);
            }

            obs.on_flow(time_s, &record);
        }
    }
}
