//! stadium — reference scenario for the rust_hm measurement framework.
//!
//! Six access points sit on a circular catwalk above a stadium; four mobile
//! referees orbit the field below while ten fixed 4K cameras stream from the
//! perimeter.  All terminals push uplink video, the referees cross cell
//! boundaries as they move, and the framework traces positions, signal
//! measurements, flow statistics, and detected handovers for 14.5 simulated
//! seconds.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hm_core::{
    CellId, FlowId, Ipv4Subnet, NodeDescriptor, NodeId, NodeRole, Position, SimConfig, Tick,
};
use hm_detect::AttachmentApi;
use hm_flow::{FlowCounters, FlowSample, TrafficProbe};
use hm_mobility::OrbitState;
use hm_output::{CsvTraceWriter, TraceObserver, TraceWriter};
use hm_radio::{CellSite, SignalModel, UmiStreetCanyon};
use hm_sim::{SimBuilder, SimObserver, SimSummary};

// ── Stadium parameters ───────────────────────────────────────────────────────

const CELL_COUNT:     usize = 6;
const REFEREE_COUNT:  usize = 4;
const SEED:           u64   = 42;

const CATWALK_RADIUS: f64 = 120.0; // access points
const CATWALK_HEIGHT: f64 = 25.0;
const FIELD_RADIUS:   f64 = 60.0;  // referee orbit
const REFEREE_HEIGHT: f64 = 1.7;
const REFEREE_SPEED:  f64 = 5.0;   // m/s
const CAMERA_HEIGHT:  f64 = 2.5;

const TX_POWER_DBM: f64 = 35.0;

/// Fixed 4K camera spots around the field perimeter.
const CAMERA_POSITIONS: [(f64, f64); 10] = [
    (40.0, 60.0),
    (60.0, 60.0),
    (-30.0, 60.0),
    (-70.0, 60.0),
    (-90.0, -20.0),
    (80.0, -20.0),
    (80.0, -60.0),
    (40.0, -60.0),
    (-40.0, -60.0),
    (-80.0, -60.0),
];

/// Uplink video bitrates per terminal profile.
const REFEREE_KBPS: f64 = 5_000.0;
const CAMERA_KBPS:  f64 = 25_000.0;

const REMOTE_HOST: Ipv4Addr = Ipv4Addr::new(1, 0, 0, 2);

// ── Synthetic uplink traffic ──────────────────────────────────────────────────

struct UplinkFlow {
    flow:           FlowId,
    src:            Ipv4Addr,
    bytes_per_poll: u64,
    counters:       FlowCounters,
}

/// A traffic probe that synthesises cumulative uplink counters: each poll,
/// every flow gains roughly one interval of its configured bitrate with a
/// little jitter, and the odd packet goes missing.  One flow can be muted
/// after a given poll to exercise the watchdog.
struct SyntheticUplinkProbe {
    rng:        SmallRng,
    flows:      Vec<UplinkFlow>,
    mute_after: Option<(FlowId, u64)>,
    polls:      u64,
}

impl SyntheticUplinkProbe {
    fn new(seed: u64, terminals: &[(Ipv4Addr, f64)], interval_s: f64) -> Self {
        let flows = terminals
            .iter()
            .enumerate()
            .map(|(i, &(src, kbps))| UplinkFlow {
                // Flow ids start at 1, matching common flow-monitor numbering.
                flow: FlowId(i as u32 + 1),
                src,
                bytes_per_poll: (kbps * 1000.0 * interval_s / 8.0) as u64,
                counters: FlowCounters::default(),
            })
            .collect();
        Self {
            rng: SmallRng::seed_from_u64(seed),
            flows,
            mute_after: None,
            polls: 0,
        }
    }

    /// Stop advancing `flow`'s counters after `polls` polls; the stale
    /// counters keep being reported, like a stream whose sender died.
    fn mute_after(mut self, flow: FlowId, polls: u64) -> Self {
        self.mute_after = Some((flow, polls));
        self
    }
}

impl TrafficProbe for SyntheticUplinkProbe {
    fn poll(&mut self) -> Vec<FlowSample> {
        self.polls += 1;
        let mute = self.mute_after;
        let polls = self.polls;
        self.flows
            .iter_mut()
            .map(|f| {
                let muted = mute.is_some_and(|(flow, after)| f.flow == flow && polls > after);
                if !muted {
                    let bytes = (f.bytes_per_poll as f64 * self.rng.gen_range(0.9..1.1)) as u64;
                    let packets = (bytes / 1_200).max(1);
                    let lost = if self.rng.gen_bool(0.02) { 1 } else { 0 };

                    f.counters.tx_packets += packets + lost;
                    f.counters.rx_packets += packets;
                    f.counters.tx_bytes += bytes;
                    f.counters.rx_bytes += bytes;
                    f.counters.delay_sum_s += packets as f64 * self.rng.gen_range(0.008..0.020);
                    f.counters.jitter_sum_s += packets as f64 * self.rng.gen_range(0.0005..0.0020);
                    f.counters.lost_packets += lost;
                }

                FlowSample {
                    flow: f.flow,
                    src: f.src,
                    dst: REMOTE_HOST,
                    counters: f.counters,
                }
            })
            .collect()
    }
}

// ── Console attachment ───────────────────────────────────────────────────────

/// Reports each forced reattachment the way an operator console would.
struct ConsoleAttachment;

impl AttachmentApi for ConsoleAttachment {
    fn force_reattach(&mut self, node: NodeId, candidates: &[CellId]) {
        println!(
            "[RECONNECT] UE_{} forced reattach against {} candidate cells",
            node.0,
            candidates.len()
        );
    }
}

// ── Console reporting observer ───────────────────────────────────────────────

/// Ticks between console position reports (3 s at the 100 ms tick).
const REPORT_EVERY_TICKS: u64 = 30;

/// Wraps the trace observer and mirrors the interesting events to stdout,
/// including a periodic position report for the mobile terminals.
struct ReportingObserver<W: TraceWriter> {
    inner:         TraceObserver<W>,
    tick_secs:     f64,
    latest:        BTreeMap<u32, (Position, f64)>,
    position_rows: usize,
    power_rows:    usize,
    flow_rows:     usize,
}

impl<W: TraceWriter> ReportingObserver<W> {
    fn new(inner: TraceObserver<W>, tick_secs: f64) -> Self {
        Self {
            inner,
            tick_secs,
            latest: BTreeMap::new(),
            position_rows: 0,
            power_rows: 0,
            flow_rows: 0,
        }
    }
}

impl<W: TraceWriter> SimObserver for ReportingObserver<W> {
    fn on_position(&mut self, time_s: f64, node: NodeId, pos: Position, speed_mps: f64) {
        self.position_rows += 1;
        if speed_mps > 0.0 {
            self.latest.insert(node.0, (pos, speed_mps));
        }
        self.inner.on_position(time_s, node, pos, speed_mps);
    }

    fn on_tick_end(&mut self, tick: Tick) {
        if tick.0 == 0 || tick.0 % REPORT_EVERY_TICKS != 0 || self.latest.is_empty() {
            return;
        }
        println!("[{:.1}s] Position report:", tick.0 as f64 * self.tick_secs);
        for (id, (pos, speed)) in &self.latest {
            println!(
                "  UE_{id}: ({:.1}, {:.1}) - Speed: {speed:.2} m/s",
                pos.x, pos.y
            );
        }
    }

    fn on_decision(
        &mut self,
        time_s:   f64,
        node:     NodeId,
        choice:   &hm_radio::CellMeasurement,
        handover: bool,
    ) {
        self.power_rows += 1;
        self.inner.on_decision(time_s, node, choice, handover);
    }

    fn on_handover(&mut self, event: &hm_detect::HandoverEvent) {
        println!(
            "[HANDOVER] T={:.3}s UE_{}: cell_{} -> cell_{} (RSRP={:.1} dBm)",
            event.time_s, event.node.0, event.source.0, event.target.0, event.rsrp_dbm
        );
        self.inner.on_handover(event);
    }

    fn on_flow(&mut self, time_s: f64, record: &hm_flow::FlowRecord) {
        self.flow_rows += 1;
        self.inner.on_flow(time_s, record);
    }

    fn on_reattach(&mut self, time_s: f64, node: NodeId, elapsed_s: Option<f64>) {
        match elapsed_s {
            Some(e) => println!("[WATCHDOG] T={time_s:.1}s UE_{} silent for {e:.1}s", node.0),
            None    => println!("[WATCHDOG] T={time_s:.1}s UE_{} never active", node.0),
        }
        self.inner.on_reattach(time_s, node, elapsed_s);
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── Scenario assembly ────────────────────────────────────────────────────────

fn build_cells() -> Vec<CellSite> {
    (0..CELL_COUNT)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / CELL_COUNT as f64;
            CellSite::new(
                CellId(i as u32),
                Position::new(
                    CATWALK_RADIUS * angle.cos(),
                    CATWALK_RADIUS * angle.sin(),
                    CATWALK_HEIGHT,
                ),
            )
        })
        .collect()
}

fn build_nodes() -> Vec<NodeDescriptor> {
    let mut nodes = Vec::with_capacity(REFEREE_COUNT + CAMERA_POSITIONS.len());

    // Referees first: ids 0..4, addresses 7.0.0.1..=7.0.0.4.  Their initial
    // positions come from the orbits at build time.
    for i in 0..REFEREE_COUNT {
        nodes.push(
            NodeDescriptor::new(NodeId(i as u32), NodeRole::Mobile, Position::ORIGIN)
                .with_addr(Ipv4Addr::new(7, 0, 0, i as u8 + 1)),
        );
    }

    // Fixed 4K cameras around the perimeter.
    for (j, &(x, y)) in CAMERA_POSITIONS.iter().enumerate() {
        let id = (REFEREE_COUNT + j) as u32;
        nodes.push(
            NodeDescriptor::new(
                NodeId(id),
                NodeRole::Fixed,
                Position::new(x, y, CAMERA_HEIGHT),
            )
            .with_addr(Ipv4Addr::new(7, 0, 0, id as u8 + 1)),
        );
    }

    nodes
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== stadium — rust_hm handover measurement ===");
    println!(
        "Cells: {CELL_COUNT} (catwalk r={CATWALK_RADIUS}m)  |  Referees: {REFEREE_COUNT} \
         (field r={FIELD_RADIUS}m, {REFEREE_SPEED} m/s)  |  Cameras: {}",
        CAMERA_POSITIONS.len()
    );
    println!();

    let config = SimConfig {
        tick_duration_ms: 100,
        horizon_ticks:    145, // 14.5 s
        seed:             SEED,
    };
    let tick_secs = config.tick_duration_ms as f64 / 1000.0;

    let cells = build_cells();
    for cell in &cells {
        println!("cell_{}: {}", cell.id.0, cell.position);
    }
    let nodes = build_nodes();

    // Every terminal streams one uplink flow; cameras push 5× the referee rate.
    let terminals: Vec<(Ipv4Addr, f64)> = nodes
        .iter()
        .filter_map(|n| {
            n.addr.map(|a| {
                let kbps = if n.role.is_mobile() { REFEREE_KBPS } else { CAMERA_KBPS };
                (a, kbps)
            })
        })
        .collect();
    // Referee 2's uplink dies at t=6 s so the watchdog has work to do.
    let probe = SyntheticUplinkProbe::new(config.seed, &terminals, 0.1).mute_after(FlowId(3), 60);

    let signal = SignalModel::new(UmiStreetCanyon::default(), TX_POWER_DBM);
    let ue_subnet = Ipv4Subnet::new(Ipv4Addr::new(7, 0, 0, 0), Ipv4Addr::new(255, 0, 0, 0));

    let mut builder = SimBuilder::new(config, signal, ue_subnet)
        .nodes(nodes)
        .cells(cells)
        .attachment(Box::new(ConsoleAttachment))
        .probe(Box::new(probe));
    for i in 0..REFEREE_COUNT {
        builder = builder.orbit(
            NodeId(i as u32),
            OrbitState::evenly_spaced(i, REFEREE_COUNT, FIELD_RADIUS, REFEREE_HEIGHT, REFEREE_SPEED),
        );
    }
    let mut sim = builder.build()?;

    std::fs::create_dir_all("output/stadium")?;
    let writer = CsvTraceWriter::new(Path::new("output/stadium"))?;
    let mut obs = ReportingObserver::new(TraceObserver::new(writer), tick_secs);

    println!();
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("trace error: {e}");
    }

    // ── Final statistics ─────────────────────────────────────────────────
    let summary = sim.summary();
    println!();
    println!("{}", "=".repeat(60));
    println!(" STADIUM SIMULATION FINAL STATISTICS");
    println!("{}", "=".repeat(60));
    println!("Simulation duration: {:.1}s (wall clock {:.3}s)", summary.duration_s, elapsed.as_secs_f64());
    println!("Total handovers (measurement detection): {}", summary.handovers);
    println!("Total handovers (protocol confirmed):    {}", summary.confirmed_handovers);
    println!("Forced reattachments (watchdog):         {}", summary.reattaches);
    println!();
    println!("Per-terminal summary:");
    for n in &summary.nodes {
        let role = match n.role {
            NodeRole::Mobile => "referee",
            NodeRole::Fixed  => "camera",
            NodeRole::Infrastructure => "infra",
        };
        let serving = n
            .serving
            .map(|c| format!("cell_{}", c.0))
            .unwrap_or_else(|| "unattached".into());
        println!(
            "  UE_{:<3} {:<8} {:>4.1} m/s  serving: {}",
            n.node.0, role, n.speed_mps, serving
        );
    }
    println!();
    println!("Trace rows: {} positions, {} measurements, {} flow records",
        obs.position_rows, obs.power_rows, obs.flow_rows);
    println!("Output files in output/stadium/:");
    println!("  ue_positions.csv, power_measurements.csv, flow_stats.csv, handover_log.txt");
    println!("{}", "=".repeat(60));

    Ok(())
}
