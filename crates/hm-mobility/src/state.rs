//! Per-node orbit state.

use std::f64::consts::TAU;

use hm_core::Position;

/// The trajectory state for a single mobile node: a point on a circle of
/// fixed radius at fixed height, moving at constant tangential speed.
///
/// The phase is monotonically increasing (not wrapped) — position math is
/// periodic anyway, and an unwrapped phase makes "k ticks elapsed" directly
/// observable in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitState {
    /// Current angular phase in radians.
    pub phase_rad: f64,
    /// Ring radius in metres.  Must be positive.
    pub radius_m:  f64,
    /// Constant height in metres.
    pub height_m:  f64,
    /// Constant tangential speed in m/s.
    pub speed_mps: f64,
}

impl OrbitState {
    /// Orbit for node `index` among `count` mobile nodes, with the initial
    /// phase `index·2π/count` so the population starts evenly spaced.
    pub fn evenly_spaced(
        index:     usize,
        count:     usize,
        radius_m:  f64,
        height_m:  f64,
        speed_mps: f64,
    ) -> Self {
        let phase_rad = index as f64 * TAU / count.max(1) as f64;
        Self { phase_rad, radius_m, height_m, speed_mps }
    }

    /// Advance the phase by `(speed · dt) / radius` radians.
    #[inline]
    pub fn advance(&mut self, dt_secs: f64) {
        self.phase_rad += self.speed_mps * dt_secs / self.radius_m;
    }

    /// Current position on the ring.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(
            self.radius_m * self.phase_rad.cos(),
            self.radius_m * self.phase_rad.sin(),
            self.height_m,
        )
    }

    /// Instantaneous velocity vector (tangent to the ring, zero vertical).
    pub fn velocity(&self) -> (f64, f64, f64) {
        (
            -self.speed_mps * self.phase_rad.sin(),
            self.speed_mps * self.phase_rad.cos(),
            0.0,
        )
    }

    /// Scalar speed — constant on a circular trajectory.
    #[inline]
    pub fn speed_mps(&self) -> f64 {
        self.speed_mps
    }
}
