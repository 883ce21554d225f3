//! Simulation observer trait for trace collection and progress reporting.

use hm_core::{NodeId, Position, Tick};
use hm_detect::HandoverEvent;
use hm_flow::FlowRecord;
use hm_radio::CellMeasurement;

use crate::{ProtocolEvent, SimSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as measurements are
/// produced.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observer methods return nothing: a
/// trace sink that fails must hold its error internally (see the policy in
/// `hm-output`) — nothing an observer does may abort the simulation.
pub trait SimObserver {
    /// Called at the very start of each tick, before any task runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A position trace sample for one node.
    fn on_position(&mut self, _time_s: f64, _node: NodeId, _pos: Position, _speed_mps: f64) {}

    /// A best-cell decision for one node.  `handover` is `true` when this
    /// tick's decision changed the serving cell.
    fn on_decision(
        &mut self,
        _time_s:   f64,
        _node:     NodeId,
        _choice:   &CellMeasurement,
        _handover: bool,
    ) {
    }

    /// A detected serving-cell change.
    fn on_handover(&mut self, _event: &HandoverEvent) {}

    /// One per-interval flow statistics record.
    fn on_flow(&mut self, _time_s: f64, _record: &FlowRecord) {}

    /// The watchdog forced a reattachment.  `elapsed_s` is the observed
    /// silence, or `None` for a node that had never been active.
    fn on_reattach(&mut self, _time_s: f64, _node: NodeId, _elapsed_s: Option<f64>) {}

    /// A protocol-layer handover notification (confirmation only).
    fn on_protocol(&mut self, _time_s: f64, _event: &ProtocolEvent) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
