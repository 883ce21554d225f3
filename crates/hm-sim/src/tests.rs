//! Integration tests running the full tick loop on small scenarios.

use std::net::Ipv4Addr;

use hm_core::{
    CellId, FlowId, Ipv4Subnet, NodeDescriptor, NodeId, NodeRole, Position, SimConfig, Tick,
};
use hm_detect::AttachmentApi;
use hm_flow::{FlowCounters, FlowSample, TrafficProbe};
use hm_mobility::OrbitState;
use hm_radio::{CellSite, SignalModel, UmiStreetCanyon};

use crate::{
    NoopObserver, ProtocolEvent, ProtocolEvents, SamplingConfig, SimBuilder, SimError,
    SimObserver,
};

fn ue_subnet() -> Ipv4Subnet {
    Ipv4Subnet::new(Ipv4Addr::new(7, 0, 0, 0), Ipv4Addr::new(255, 0, 0, 0))
}

fn signal() -> SignalModel<UmiStreetCanyon> {
    SignalModel::new(UmiStreetCanyon::default(), 35.0)
}

fn ue_addr(host: u8) -> Ipv4Addr {
    Ipv4Addr::new(7, 0, 0, host)
}

/// One mobile terminal orbiting between two opposed cells.
fn two_cell_scenario() -> SimBuilder<UmiStreetCanyon> {
    let nodes = vec![
        NodeDescriptor::new(NodeId(0), NodeRole::Mobile, Position::ORIGIN).with_addr(ue_addr(1)),
    ];
    let cells = vec![
        CellSite::new(CellId(0), Position::new(100.0, 0.0, 10.0)),
        CellSite::new(CellId(1), Position::new(-100.0, 0.0, 10.0)),
    ];
    // Fast enough to cross to the far side of the ring within the horizon,
    // slow enough not to come back around.
    let orbit = OrbitState {
        phase_rad: 0.0,
        radius_m:  100.0,
        height_m:  1.5,
        speed_mps: 20.0,
    };
    SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
        .nodes(nodes)
        .cells(cells)
        .orbit(NodeId(0), orbit)
}

// ── Recording helpers ────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    positions:  Vec<(f64, NodeId)>,
    decisions:  Vec<(f64, NodeId, CellId)>,
    handovers:  Vec<(NodeId, CellId, CellId)>,
    flows:      Vec<(f64, FlowId)>,
    reattaches: Vec<(f64, NodeId, Option<f64>)>,
    ended:      bool,
}

impl SimObserver for Recorder {
    fn on_position(&mut self, time_s: f64, node: NodeId, _pos: Position, _speed: f64) {
        self.positions.push((time_s, node));
    }
    fn on_decision(
        &mut self,
        time_s: f64,
        node: NodeId,
        choice: &hm_radio::CellMeasurement,
        _handover: bool,
    ) {
        self.decisions.push((time_s, node, choice.cell));
    }
    fn on_handover(&mut self, event: &hm_detect::HandoverEvent) {
        self.handovers.push((event.node, event.source, event.target));
    }
    fn on_flow(&mut self, time_s: f64, record: &hm_flow::FlowRecord) {
        self.flows.push((time_s, record.flow));
    }
    fn on_reattach(&mut self, time_s: f64, node: NodeId, elapsed_s: Option<f64>) {
        self.reattaches.push((time_s, node, elapsed_s));
    }
    fn on_sim_end(&mut self, _summary: &crate::SimSummary) {
        self.ended = true;
    }
}

/// A probe reporting one steadily increasing uplink flow for node 0.
struct SteadyUplink {
    polls: u64,
}

impl TrafficProbe for SteadyUplink {
    fn poll(&mut self) -> Vec<FlowSample> {
        self.polls += 1;
        let n = self.polls;
        vec![FlowSample {
            flow: FlowId(1),
            src:  ue_addr(1),
            dst:  Ipv4Addr::new(10, 0, 0, 1),
            counters: FlowCounters {
                tx_packets:   n * 10,
                rx_packets:   n * 10,
                tx_bytes:     n * 12_000,
                rx_bytes:     n * 12_000,
                delay_sum_s:  n as f64 * 0.1,
                jitter_sum_s: n as f64 * 0.01,
                lost_packets: 0,
            },
        }]
    }
}

// ── Builder validation ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    /// `Sim` holds boxed trait objects and has no `Debug` impl, so the usual
    /// `unwrap_err()` shortcut is unavailable.
    fn build_err(builder: SimBuilder<UmiStreetCanyon>) -> SimError {
        match builder.build() {
            Ok(_)  => panic!("expected a validation error"),
            Err(e) => e,
        }
    }

    #[test]
    fn rejects_out_of_order_node_ids() {
        let nodes = vec![NodeDescriptor::new(NodeId(5), NodeRole::Fixed, Position::ORIGIN)];
        let cells = vec![CellSite::new(CellId(0), Position::ORIGIN)];
        let err = build_err(
            SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
                .nodes(nodes)
                .cells(cells),
        );
        assert!(matches!(err, SimError::NodeIdMismatch { index: 0, .. }));
    }

    #[test]
    fn rejects_empty_cell_set() {
        let err = build_err(
            SimBuilder::new(SimConfig::default(), signal(), ue_subnet()).nodes(vec![]),
        );
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_orbit_on_fixed_node() {
        let nodes = vec![NodeDescriptor::new(NodeId(0), NodeRole::Fixed, Position::ORIGIN)];
        let cells = vec![CellSite::new(CellId(0), Position::ORIGIN)];
        let orbit = OrbitState::evenly_spaced(0, 1, 50.0, 1.5, 3.0);
        let err = build_err(
            SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
                .nodes(nodes)
                .cells(cells)
                .orbit(NodeId(0), orbit),
        );
        assert!(matches!(err, SimError::OrbitForStaticNode(NodeId(0))));
    }

    #[test]
    fn rejects_mobile_node_without_orbit() {
        let nodes = vec![NodeDescriptor::new(NodeId(0), NodeRole::Mobile, Position::ORIGIN)];
        let cells = vec![CellSite::new(CellId(0), Position::ORIGIN)];
        let err = build_err(
            SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
                .nodes(nodes)
                .cells(cells),
        );
        assert!(matches!(err, SimError::MissingOrbit(NodeId(0))));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let nodes = vec![NodeDescriptor::new(NodeId(0), NodeRole::Mobile, Position::ORIGIN)];
        let cells = vec![CellSite::new(CellId(0), Position::ORIGIN)];
        let orbit = OrbitState {
            phase_rad: 0.0,
            radius_m:  0.0,
            height_m:  1.5,
            speed_mps: 3.0,
        };
        let err = build_err(
            SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
                .nodes(nodes)
                .cells(cells)
                .orbit(NodeId(0), orbit),
        );
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_non_positive_periods() {
        for sampling in [
            SamplingConfig { sample_period_s: 0.0, ..SamplingConfig::default() },
            SamplingConfig { flow_period_s: 0.0, ..SamplingConfig::default() },
            SamplingConfig { watchdog_period_s: -1.0, ..SamplingConfig::default() },
        ] {
            let err = build_err(two_cell_scenario().sampling(sampling));
            assert!(matches!(err, SimError::Config(_)));
        }
    }

    #[test]
    fn places_mobile_nodes_on_their_orbits() {
        let sim = two_cell_scenario().build().unwrap();
        let pos = sim.world().node(NodeId(0)).unwrap().position;
        // Phase 0 on a 100 m ring: (100, 0, height).
        assert!((pos.x - 100.0).abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
    }
}

// ── Tick loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;

    #[test]
    fn run_stops_exactly_at_the_horizon() {
        let mut sim = two_cell_scenario().build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert_eq!(sim.clock().current_tick, Tick(145));
        assert!(rec.ended);
        // Every queued task has either fired or been dropped at the horizon.
        for (t, _) in &rec.positions {
            assert!(*t < 14.5);
        }
    }

    #[test]
    fn run_ticks_is_bounded_by_the_horizon() {
        let mut sim = two_cell_scenario().build().unwrap();
        assert_eq!(sim.run_ticks(100, &mut NoopObserver), 100);
        assert_eq!(sim.run_ticks(100, &mut NoopObserver), 45);
        assert_eq!(sim.run_ticks(100, &mut NoopObserver), 0);
    }

    #[test]
    fn position_traces_start_staggered() {
        // Two mobile nodes: slot 0 traces at 2.0 s, slot 1 at 2.1 s.
        let nodes = vec![
            NodeDescriptor::new(NodeId(0), NodeRole::Mobile, Position::ORIGIN)
                .with_addr(ue_addr(1)),
            NodeDescriptor::new(NodeId(1), NodeRole::Mobile, Position::ORIGIN)
                .with_addr(ue_addr(2)),
        ];
        let cells = vec![CellSite::new(CellId(0), Position::new(0.0, 0.0, 10.0))];
        let mut sim = SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
            .nodes(nodes)
            .cells(cells)
            .orbit(NodeId(0), OrbitState::evenly_spaced(0, 2, 50.0, 1.5, 3.0))
            .orbit(NodeId(1), OrbitState::evenly_spaced(1, 2, 50.0, 1.5, 3.0))
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let first_for = |node: NodeId| {
            rec.positions
                .iter()
                .find(|(_, n)| *n == node)
                .map(|(t, _)| *t)
                .unwrap()
        };
        assert!((first_for(NodeId(0)) - 2.0).abs() < 1e-9);
        assert!((first_for(NodeId(1)) - 2.1).abs() < 1e-9);
    }

    #[test]
    fn fixed_terminals_are_traced_with_zero_speed() {
        let nodes = vec![
            NodeDescriptor::new(
                NodeId(0),
                NodeRole::Fixed,
                Position::new(10.0, 20.0, 5.0),
            )
            .with_addr(ue_addr(1)),
        ];
        let cells = vec![CellSite::new(CellId(0), Position::new(0.0, 0.0, 10.0))];
        let mut sim = SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
            .nodes(nodes)
            .cells(cells)
            .build()
            .unwrap();

        struct Speeds(Vec<f64>);
        impl SimObserver for Speeds {
            fn on_position(&mut self, _t: f64, _n: NodeId, _p: Position, speed: f64) {
                self.0.push(speed);
            }
        }
        let mut speeds = Speeds(Vec::new());
        sim.run(&mut speeds);

        assert!(!speeds.0.is_empty());
        assert!(speeds.0.iter().all(|&s| s == 0.0));
    }
}

// ── Handover detection through the full loop ─────────────────────────────────

#[cfg(test)]
mod handover {
    use super::*;

    #[test]
    fn crossing_the_ring_hands_over_exactly_once() {
        // At 20 m/s on a 100 m ring the node sweeps from the cell-0 side to
        // the cell-1 side around 8.3 s and does not return before the end.
        let mut sim = two_cell_scenario().build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert_eq!(rec.handovers, vec![(NodeId(0), CellId(0), CellId(1))]);

        let summary = sim.summary();
        assert_eq!(summary.handovers, 1);
        assert_eq!(summary.nodes[0].serving, Some(CellId(1)));
    }

    #[test]
    fn stationary_scenario_has_no_handovers() {
        let nodes = vec![
            NodeDescriptor::new(
                NodeId(0),
                NodeRole::Fixed,
                Position::new(90.0, 0.0, 1.5),
            )
            .with_addr(ue_addr(1)),
        ];
        let cells = vec![
            CellSite::new(CellId(0), Position::new(100.0, 0.0, 10.0)),
            CellSite::new(CellId(1), Position::new(-100.0, 0.0, 10.0)),
        ];
        let mut sim = SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
            .nodes(nodes)
            .cells(cells)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert!(rec.handovers.is_empty());
        assert!(rec.reattaches.is_empty());
        assert!(!rec.decisions.is_empty());
        assert!(rec.decisions.iter().all(|(_, _, c)| *c == CellId(0)));
    }
}

// ── Watchdog and activity feedback ───────────────────────────────────────────

#[cfg(test)]
mod watchdog {
    use super::*;

    #[test]
    fn silent_node_is_reattached_every_sweep() {
        // No probe traffic: the node is stalled at every watchdog pass
        // (2.0, 4.0, …, 14.0 s), and the touch after each reattach does not
        // survive the next 2 s gap against the 1.5 s threshold.
        let mut sim = two_cell_scenario().build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let times: Vec<f64> = rec.reattaches.iter().map(|(t, _, _)| *t).collect();
        assert_eq!(times, vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
        // First reattach reports no elapsed time (never active).
        assert_eq!(rec.reattaches[0].2, None);
        // Subsequent ones report the 2 s silence since the forced touch.
        assert_eq!(rec.reattaches[1].2, Some(2.0));
        assert_eq!(sim.summary().reattaches, 7);
    }

    #[test]
    fn fixed_terminals_are_never_swept() {
        // The sweep covers mobile nodes only: a silent fixed terminal is the
        // steady state, not a stall.
        let nodes = vec![
            NodeDescriptor::new(
                NodeId(0),
                NodeRole::Fixed,
                Position::new(90.0, 0.0, 1.5),
            )
            .with_addr(ue_addr(1)),
        ];
        let cells = vec![CellSite::new(CellId(0), Position::new(100.0, 0.0, 10.0))];
        let mut sim = SimBuilder::new(SimConfig::default(), signal(), ue_subnet())
            .nodes(nodes)
            .cells(cells)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert!(rec.reattaches.is_empty());
        assert_eq!(sim.summary().reattaches, 0);
    }

    #[test]
    fn uplink_traffic_suppresses_the_watchdog() {
        let mut sim = two_cell_scenario()
            .probe(Box::new(SteadyUplink { polls: 0 }))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert!(rec.reattaches.is_empty());
        assert_eq!(sim.summary().reattaches, 0);
        // Flow records were produced every 100 ms from 0.1 s onward.
        assert!(rec.flows.len() > 100);
    }

    #[test]
    fn reattach_offers_the_full_candidate_set() {
        struct Grab(std::rc::Rc<std::cell::RefCell<Vec<usize>>>);
        impl AttachmentApi for Grab {
            fn force_reattach(&mut self, _node: NodeId, candidates: &[CellId]) {
                self.0.borrow_mut().push(candidates.len());
            }
        }
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut sim = two_cell_scenario()
            .attachment(Box::new(Grab(seen.clone())))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);

        assert!(!seen.borrow().is_empty());
        assert!(seen.borrow().iter().all(|&n| n == 2));
    }
}

// ── Protocol confirmations ───────────────────────────────────────────────────

#[cfg(test)]
mod protocol {
    use super::*;

    struct OneCompletion {
        sent: bool,
    }

    impl ProtocolEvents for OneCompletion {
        fn poll(&mut self) -> Vec<ProtocolEvent> {
            if self.sent {
                return Vec::new();
            }
            self.sent = true;
            vec![
                ProtocolEvent::HandoverStart {
                    node:   NodeId(0),
                    source: CellId(0),
                    target: CellId(1),
                },
                ProtocolEvent::HandoverComplete {
                    node: NodeId(0),
                    cell: CellId(1),
                },
            ]
        }
    }

    #[test]
    fn completions_are_counted_starts_are_not() {
        let mut sim = two_cell_scenario()
            .protocol(Box::new(OneCompletion { sent: false }))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);
        assert_eq!(sim.summary().confirmed_handovers, 1);
    }
}
