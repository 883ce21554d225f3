//! Simulation assembly: validation, initial placement, and task staggering.

use hm_core::{
    Ipv4Subnet, NodeDescriptor, NodeId, NodeRole, SimConfig, TaskId, Tick,
};
use hm_detect::{AttachmentApi, NoopAttachment, Watchdog};
use hm_flow::{AddressTable, FlowStatsDiffer, IdleProbe, TrafficProbe};
use hm_mobility::{OrbitState, OrbitStore};
use hm_radio::{CellSite, PathLossModel, SignalModel};

use crate::task::TaskSlot;
use crate::tasks::{FlowStatsTask, MeasureTask, OrbitTask, PositionTraceTask, WatchdogTask};
use crate::{
    NoProtocolEvents, PeriodicTask, ProtocolEvents, Sim, SimError, SimResult, TaskQueue, World,
};

// ── Sampling configuration ───────────────────────────────────────────────────

/// Periods, start offsets, and stagger parameters for the built-in tasks.
///
/// Defaults reproduce the reference stadium scenario: movement updates start
/// at 0.8 s spaced 125 ms apart, tracing at 2 s and measurement at 2.5 s
/// each spread over five 100 ms slots, the watchdog every 2 s with a 1.5 s
/// silence threshold, flow sampling every 100 ms.
#[derive(Clone, Debug)]
pub struct SamplingConfig {
    /// Period of movement, position-trace, and measurement tasks.
    pub sample_period_s:        f64,
    /// Period of flow-statistics collection.
    pub flow_period_s:          f64,
    /// Period of the stall watchdog.
    pub watchdog_period_s:      f64,
    /// Uplink silence beyond this duration marks a node stalled.
    pub inactivity_threshold_s: f64,
    /// First movement update for mobile node 0.
    pub movement_start_s:       f64,
    /// Extra start delay per mobile node index.
    pub movement_stagger_s:     f64,
    /// First position-trace sample for stagger slot 0.
    pub trace_start_s:          f64,
    /// First measurement for stagger slot 0.
    pub measure_start_s:        f64,
    /// Number of stagger slots terminals are spread across.
    pub stagger_slots:          usize,
    /// Offset between consecutive stagger slots.
    pub stagger_step_s:         f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_period_s:        0.5,
            flow_period_s:          0.1,
            watchdog_period_s:      2.0,
            inactivity_threshold_s: 1.5,
            movement_start_s:       0.8,
            movement_stagger_s:     0.125,
            trace_start_s:          2.0,
            measure_start_s:        2.5,
            stagger_slots:          5,
            stagger_step_s:         0.1,
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Assembles a [`Sim`] from node descriptors, cell sites, orbits, and the
/// external seams.
///
/// The path-loss strategy `P` is fixed at build time; every per-terminal
/// measurement task gets its own clone of the signal model.
pub struct SimBuilder<P: PathLossModel + Clone + 'static> {
    config:    SimConfig,
    sampling:  SamplingConfig,
    signal:    SignalModel<P>,
    ue_subnet: Ipv4Subnet,
    nodes:     Vec<NodeDescriptor>,
    cells:     Vec<CellSite>,
    orbits:    Vec<(NodeId, OrbitState)>,
    attach:    Box<dyn AttachmentApi>,
    probe:     Box<dyn TrafficProbe>,
    protocol:  Box<dyn ProtocolEvents>,
}

impl<P: PathLossModel + Clone + 'static> SimBuilder<P> {
    pub fn new(config: SimConfig, signal: SignalModel<P>, ue_subnet: Ipv4Subnet) -> Self {
        Self {
            config,
            sampling: SamplingConfig::default(),
            signal,
            ue_subnet,
            nodes: Vec::new(),
            cells: Vec::new(),
            orbits: Vec::new(),
            attach: Box::new(NoopAttachment),
            probe: Box::new(IdleProbe),
            protocol: Box::new(NoProtocolEvents),
        }
    }

    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Register all nodes.  Descriptor at index `i` must carry id `i`.
    pub fn nodes(mut self, nodes: Vec<NodeDescriptor>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn cells(mut self, cells: Vec<CellSite>) -> Self {
        self.cells = cells;
        self
    }

    /// Assign a circular trajectory to a mobile node.
    pub fn orbit(mut self, node: NodeId, state: OrbitState) -> Self {
        self.orbits.push((node, state));
        self
    }

    pub fn attachment(mut self, attach: Box<dyn AttachmentApi>) -> Self {
        self.attach = attach;
        self
    }

    pub fn probe(mut self, probe: Box<dyn TrafficProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn protocol(mut self, protocol: Box<dyn ProtocolEvents>) -> Self {
        self.protocol = protocol;
        self
    }

    /// Validate the assembly, place mobile nodes on their orbits, and
    /// register the periodic tasks with their staggered start offsets.
    pub fn build(self) -> SimResult<Sim> {
        let Self {
            config,
            sampling,
            signal,
            ue_subnet,
            mut nodes,
            cells,
            orbits,
            attach,
            probe,
            protocol,
        } = self;

        // ── Validation ────────────────────────────────────────────────────
        for (i, desc) in nodes.iter().enumerate() {
            if desc.id.index() != i {
                return Err(SimError::NodeIdMismatch {
                    index:    i,
                    expected: NodeId(i as u32),
                    found:    desc.id,
                });
            }
        }
        if cells.is_empty() {
            return Err(SimError::Config("no cell sites registered".into()));
        }
        for (name, period) in [
            ("sample_period_s", sampling.sample_period_s),
            ("flow_period_s", sampling.flow_period_s),
            ("watchdog_period_s", sampling.watchdog_period_s),
        ] {
            if period <= 0.0 {
                return Err(SimError::Config(format!(
                    "{name} must be positive, got {period}"
                )));
            }
        }

        let mut store = OrbitStore::new(nodes.len());
        for (node, state) in orbits {
            let Some(desc) = nodes.get(node.index()) else {
                return Err(SimError::Config(format!("orbit for unknown node {node}")));
            };
            if !desc.role.is_mobile() {
                return Err(SimError::OrbitForStaticNode(node));
            }
            if state.radius_m <= 0.0 {
                return Err(SimError::Config(format!(
                    "orbit for node {node} has non-positive radius {}",
                    state.radius_m
                )));
            }
            store.insert(node, state);
        }
        for desc in &nodes {
            if desc.role.is_mobile() && store.get(desc.id).is_none() {
                return Err(SimError::MissingOrbit(desc.id));
            }
        }

        // ── Initial placement ─────────────────────────────────────────────
        for (node, state) in store.iter() {
            nodes[node.index()].position = state.position();
        }

        // ── World ─────────────────────────────────────────────────────────
        let addrs = AddressTable::from_nodes(&nodes);
        let cell_ids: Vec<_> = cells.iter().map(|c| c.id).collect();
        let world = World {
            nodes,
            cells,
            cell_ids,
            orbits: store,
            serving: Default::default(),
            activity: Default::default(),
            handovers: Default::default(),
            flows: FlowStatsDiffer::new(sampling.flow_period_s, ue_subnet),
            addrs,
            reattach_count: 0,
            confirmed_handovers: 0,
        };

        // ── Task registration ─────────────────────────────────────────────
        let clock = config.make_clock();
        let end = config.end_tick();
        let sample_ticks = clock.ticks_for_secs(sampling.sample_period_s);
        let slots = sampling.stagger_slots.max(1);

        let mut tasks: Vec<TaskSlot> = Vec::new();
        let mut queue = TaskQueue::new();
        let register = |tasks: &mut Vec<TaskSlot>,
                        queue: &mut TaskQueue,
                        first: Tick,
                        period_ticks: u64,
                        task: Box<dyn PeriodicTask>| {
            let id = TaskId(tasks.len() as u32);
            tasks.push(TaskSlot { period_ticks, task });
            if first < end {
                queue.push(first, id);
            }
        };

        // Movement: one task per mobile node, starts spaced so the phase
        // updates never all land on the same tick.
        for (i, node) in world.mobile_ids().into_iter().enumerate() {
            let start_s = sampling.movement_start_s + i as f64 * sampling.movement_stagger_s;
            register(
                &mut tasks,
                &mut queue,
                Tick(clock.ticks_for_secs(start_s)),
                sample_ticks,
                Box::new(OrbitTask {
                    node,
                    dt_secs: sampling.sample_period_s,
                }),
            );
        }

        // Tracing and measurement: one task each per terminal (mobile or
        // fixed), spread round-robin across the stagger slots.
        let terminals: Vec<NodeId> = world
            .nodes
            .iter()
            .filter(|n| matches!(n.role, NodeRole::Mobile | NodeRole::Fixed))
            .map(|n| n.id)
            .collect();
        for (t, node) in terminals.into_iter().enumerate() {
            let slot_offset = (t % slots) as u64 * clock.ticks_for_secs(sampling.stagger_step_s);
            register(
                &mut tasks,
                &mut queue,
                Tick(clock.ticks_for_secs(sampling.trace_start_s) + slot_offset),
                sample_ticks,
                Box::new(PositionTraceTask { node }),
            );
            register(
                &mut tasks,
                &mut queue,
                Tick(clock.ticks_for_secs(sampling.measure_start_s) + slot_offset),
                sample_ticks,
                Box::new(MeasureTask {
                    node,
                    signal: signal.clone(),
                }),
            );
        }

        // Watchdog: one sweep over all mobile nodes per period.
        let watchdog_ticks = clock.ticks_for_secs(sampling.watchdog_period_s);
        register(
            &mut tasks,
            &mut queue,
            Tick(watchdog_ticks),
            watchdog_ticks,
            Box::new(WatchdogTask {
                dog: Watchdog::new(clock.ticks_for_secs(sampling.inactivity_threshold_s)),
            }),
        );

        // Flow statistics: a single task polling every flow.
        let flow_ticks = clock.ticks_for_secs(sampling.flow_period_s);
        register(
            &mut tasks,
            &mut queue,
            Tick(flow_ticks),
            flow_ticks,
            Box::new(FlowStatsTask),
        );

        Ok(Sim {
            config,
            clock,
            world,
            tasks,
            queue,
            attach,
            probe,
            protocol,
        })
    }
}
