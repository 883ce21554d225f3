//! Unit tests for the flow-statistics differencer.

use std::net::Ipv4Addr;

use hm_core::{FlowId, Ipv4Subnet, NodeDescriptor, NodeId, NodeRole, Position};

use crate::{AddressTable, Direction, FlowCounters, FlowSample, FlowStatsDiffer};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ue_subnet() -> Ipv4Subnet {
    Ipv4Subnet::new(Ipv4Addr::new(7, 0, 0, 0), Ipv4Addr::new(255, 0, 0, 0))
}

fn ue_addr(n: u8) -> Ipv4Addr {
    Ipv4Addr::new(7, 0, 0, n)
}

fn remote_addr() -> Ipv4Addr {
    Ipv4Addr::new(1, 0, 0, 2)
}

fn table() -> AddressTable {
    let nodes = vec![
        NodeDescriptor::new(NodeId(0), NodeRole::Mobile, Position::default())
            .with_addr(ue_addr(1)),
        NodeDescriptor::new(NodeId(1), NodeRole::Fixed, Position::default())
            .with_addr(ue_addr(2)),
    ];
    AddressTable::from_nodes(&nodes)
}

fn uplink_sample(flow: u32, counters: FlowCounters) -> FlowSample {
    FlowSample {
        flow: FlowId(flow),
        src: ue_addr(1),
        dst: remote_addr(),
        counters,
    }
}

fn counters(rx_packets: u64, rx_bytes: u64, delay_s: f64, jitter_s: f64, lost: u64) -> FlowCounters {
    FlowCounters {
        tx_packets:   rx_packets + lost,
        rx_packets,
        tx_bytes:     rx_bytes,
        rx_bytes,
        delay_sum_s:  delay_s,
        jitter_sum_s: jitter_s,
        lost_packets: lost,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn first_observation_diffs_against_zero() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let record = differ.observe(
        &uplink_sample(1, counters(100, 125_000, 2.0, 0.1, 3)),
        &table(),
    );

    // Full cumulative value over the fixed interval (documented approximation).
    assert!((record.throughput_kbps - 125_000.0 * 8.0 / (0.1 * 1000.0)).abs() < 1e-9);
    assert!((record.latency_ms - 2.0 * 1000.0 / 100.0).abs() < 1e-9);
    assert!((record.jitter_ms - 0.1 * 1000.0 / 100.0).abs() < 1e-9);
    assert_eq!(record.lost_packets, 3);
    assert!(record.rx_increased);
}

#[test]
fn identical_counters_twice_yield_zero_deltas() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let c = counters(100, 125_000, 2.0, 0.1, 3);

    differ.observe(&uplink_sample(1, c), &table());
    let second = differ.observe(&uplink_sample(1, c), &table());

    assert_eq!(second.throughput_kbps, 0.0);
    assert_eq!(second.latency_ms, 0.0);
    assert_eq!(second.jitter_ms, 0.0);
    assert_eq!(second.lost_packets, 0);
    assert!(!second.rx_increased);
}

#[test]
fn interval_delta_math() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    differ.observe(&uplink_sample(1, counters(100, 125_000, 2.0, 0.10, 3)), &table());
    let record = differ.observe(
        &uplink_sample(1, counters(150, 187_500, 2.8, 0.15, 5)),
        &table(),
    );

    // 62 500 bytes in 0.1 s → 5 000 kbps.
    assert!((record.throughput_kbps - 5_000.0).abs() < 1e-9);
    // 0.8 s delay over 50 packets → 16 ms.
    assert!((record.latency_ms - 16.0).abs() < 1e-9);
    // 0.05 s jitter over 50 packets → 1 ms.
    assert!((record.jitter_ms - 1.0).abs() < 1e-9);
    assert_eq!(record.lost_packets, 2);
}

#[test]
fn throughput_deltas_sum_to_total_bytes() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let tbl = table();

    let mut total_kbits = 0.0;
    let mut rx_bytes = 0u64;
    let mut rx_packets = 0u64;
    for step in 0..50u64 {
        rx_packets += 10 + step % 7;
        rx_bytes += (10 + step % 7) * 1_000;
        let record = differ.observe(
            &uplink_sample(1, counters(rx_packets, rx_bytes, 0.0, 0.0, 0)),
            &tbl,
        );
        total_kbits += record.throughput_kbps * 0.1;
    }

    assert!((total_kbits - rx_bytes as f64 * 8.0 / 1000.0).abs() < 1e-6);
}

#[test]
fn direction_classified_by_source_subnet() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let tbl = table();

    let ul = differ.observe(&uplink_sample(1, counters(1, 100, 0.0, 0.0, 0)), &tbl);
    assert_eq!(ul.direction, Direction::Uplink);
    assert_eq!(ul.node, NodeId(0)); // resolved from the source address

    let dl = differ.observe(
        &FlowSample {
            flow: FlowId(2),
            src: remote_addr(),
            dst: ue_addr(2),
            counters: counters(1, 100, 0.0, 0.0, 0),
        },
        &tbl,
    );
    assert_eq!(dl.direction, Direction::Downlink);
    assert_eq!(dl.node, NodeId(1)); // resolved from the destination address
}

#[test]
fn unresolved_endpoint_still_emits_with_sentinel() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let record = differ.observe(
        &FlowSample {
            flow: FlowId(9),
            src: ue_addr(200), // in the subnet, but no such node
            dst: remote_addr(),
            counters: counters(5, 500, 0.0, 0.0, 0),
        },
        &table(),
    );
    assert_eq!(record.node, NodeId::INVALID);
    assert!(record.rx_increased);
}

#[test]
fn zero_rx_first_sample_has_no_rates() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    let record = differ.observe(&uplink_sample(1, FlowCounters::default()), &table());
    assert!(!record.rx_increased);
    assert_eq!(record.throughput_kbps, 0.0);
    assert_eq!(record.latency_ms, 0.0);
}

#[test]
fn snapshot_replaced_wholesale() {
    let mut differ = FlowStatsDiffer::new(0.1, ue_subnet());
    differ.observe(&uplink_sample(1, counters(10, 1_000, 0.1, 0.0, 0)), &table());
    differ.observe(&uplink_sample(2, counters(5, 500, 0.0, 0.0, 0)), &table());
    assert_eq!(differ.tracked_flows(), 2);
}

#[test]
fn address_table_first_match_wins() {
    // Duplicate address: resolution must pick the first-registered node.
    let nodes = vec![
        NodeDescriptor::new(NodeId(4), NodeRole::Mobile, Position::default())
            .with_addr(ue_addr(9)),
        NodeDescriptor::new(NodeId(5), NodeRole::Mobile, Position::default())
            .with_addr(ue_addr(9)),
    ];
    let tbl = AddressTable::from_nodes(&nodes);
    assert_eq!(tbl.resolve(ue_addr(9)), Some(NodeId(4)));
    assert_eq!(tbl.resolve(ue_addr(8)), None);
    assert_eq!(tbl.len(), 2);
}
