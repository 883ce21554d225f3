//! Unit tests for trajectory generation.

use std::f64::consts::TAU;

use hm_core::NodeId;

use crate::{OrbitState, OrbitStore};

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn even_initial_spacing() {
        let n = 4;
        for i in 0..n {
            let orbit = OrbitState::evenly_spaced(i, n, 60.0, 1.7, 5.0);
            assert!((orbit.phase_rad - i as f64 * TAU / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn phase_accumulates_linearly() {
        // Reference scenario: r = 60 m, v = 5 m/s, Δt = 0.5 s
        // → increment = 5·0.5/60 ≈ 0.041667 rad/tick.
        let mut orbit = OrbitState::evenly_spaced(0, 4, 60.0, 1.7, 5.0);
        for _ in 0..10 {
            orbit.advance(0.5);
        }
        assert!((orbit.phase_rad - 10.0 * 5.0 * 0.5 / 60.0).abs() < 1e-12);
        assert!((orbit.phase_rad - 0.41667).abs() < 1e-4);
    }

    #[test]
    fn position_stays_on_ring() {
        let mut orbit = OrbitState::evenly_spaced(2, 4, 60.0, 1.7, 5.0);
        for _ in 0..100 {
            orbit.advance(0.5);
            let pos = orbit.position();
            assert!((pos.radial_distance_m() - 60.0).abs() < 1e-9);
            assert_eq!(pos.z, 1.7);
        }
    }

    #[test]
    fn ten_tick_scenario_position() {
        let mut orbit = OrbitState::evenly_spaced(0, 4, 60.0, 1.7, 5.0);
        for _ in 0..10 {
            orbit.advance(0.5);
        }
        let pos = orbit.position();
        let phase: f64 = 10.0 * 5.0 * 0.5 / 60.0;
        assert!((pos.x - 60.0 * phase.cos()).abs() < 1e-9);
        assert!((pos.y - 60.0 * phase.sin()).abs() < 1e-9);
    }

    #[test]
    fn velocity_is_tangential_at_constant_speed() {
        let orbit = OrbitState::evenly_spaced(1, 4, 60.0, 1.7, 5.0);
        let (vx, vy, vz) = orbit.velocity();
        let speed = (vx * vx + vy * vy + vz * vz).sqrt();
        assert!((speed - 5.0).abs() < 1e-12);
        // Velocity ⊥ radius vector on a circle.
        let pos = orbit.position();
        assert!((vx * pos.x + vy * pos.y).abs() < 1e-9);
    }
}

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn only_assigned_nodes_have_orbits() {
        let mut store = OrbitStore::new(6);
        store.insert(NodeId(1), OrbitState::evenly_spaced(0, 2, 60.0, 1.7, 5.0));
        store.insert(NodeId(4), OrbitState::evenly_spaced(1, 2, 60.0, 1.7, 5.0));

        assert_eq!(store.len(), 6);
        assert_eq!(store.mobile_count(), 2);
        assert!(store.get(NodeId(0)).is_none());
        assert!(store.get(NodeId(1)).is_some());

        let ids: Vec<NodeId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(4)]);
    }

    #[test]
    fn get_mut_advances_in_place() {
        let mut store = OrbitStore::new(2);
        store.insert(NodeId(0), OrbitState::evenly_spaced(0, 1, 60.0, 1.7, 5.0));
        let before = store.get(NodeId(0)).unwrap().phase_rad;
        store.get_mut(NodeId(0)).unwrap().advance(0.5);
        assert!(store.get(NodeId(0)).unwrap().phase_rad > before);
    }
}
