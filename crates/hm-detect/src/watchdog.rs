//! Uplink-activity tracking and the stall watchdog.

use std::collections::HashMap;

use hm_core::{CellId, NodeId, Tick};

// ── Activity record ──────────────────────────────────────────────────────────

/// Last observed uplink activity per mobile node.
///
/// An absent entry means "never active" — a node that has not delivered a
/// single uplink packet is treated as stalled on the first watchdog pass,
/// exactly like one that went silent.
#[derive(Default)]
pub struct ActivityMap {
    inner: HashMap<NodeId, Tick>,
}

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record uplink activity for `node` at `now`.
    pub fn touch(&mut self, node: NodeId, now: Tick) {
        self.inner.insert(node, now);
    }

    /// The tick of the last observed activity, or `None` if never active.
    pub fn last(&self, node: NodeId) -> Option<Tick> {
        self.inner.get(&node).copied()
    }
}

// ── Watchdog ─────────────────────────────────────────────────────────────────

/// Pure stall predicate: a node is stalled when it has never been active or
/// has been silent strictly longer than the threshold.
///
/// The watchdog task in `hm-sim` applies this per mobile node, issues the
/// forced reattachment, and then touches the activity record to suppress an
/// immediate re-trigger on the next pass.
#[derive(Copy, Clone, Debug)]
pub struct Watchdog {
    /// Inactivity threshold in ticks (1.5 s in the reference configuration).
    pub threshold_ticks: u64,
}

impl Watchdog {
    pub fn new(threshold_ticks: u64) -> Self {
        Self { threshold_ticks }
    }

    /// `true` if `node` should be force-reattached at `now`.
    pub fn stalled(&self, activity: &ActivityMap, node: NodeId, now: Tick) -> bool {
        match activity.last(node) {
            None       => true,
            Some(last) => now.since(last) > self.threshold_ticks,
        }
    }

    /// Elapsed ticks since the node's last activity, or `None` if never
    /// active.  Used for reporting only.
    pub fn elapsed(&self, activity: &ActivityMap, node: NodeId, now: Tick) -> Option<u64> {
        activity.last(node).map(|last| now.since(last))
    }
}

// ── Attachment seam ──────────────────────────────────────────────────────────

/// The external attachment operation: fire-and-forget forced reattachment of
/// a stalled node against the full candidate access-point set.
///
/// The host simulator implements this; the watchdog never inspects a result.
pub trait AttachmentApi {
    fn force_reattach(&mut self, node: NodeId, candidates: &[CellId]);
}

/// An [`AttachmentApi`] that does nothing.  Use in tests or when the host
/// has no attachment machinery to drive.
pub struct NoopAttachment;

impl AttachmentApi for NoopAttachment {
    fn force_reattach(&mut self, _node: NodeId, _candidates: &[CellId]) {}
}
