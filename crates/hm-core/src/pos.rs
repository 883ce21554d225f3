//! Cartesian position type and distance math.
//!
//! `Position` uses `f64` metres in a local stadium-scale frame.  Double
//! precision matters here: positions feed `log10` path-loss terms where a
//! few centimetres of rounding near a cell would visibly move the RSRP.

/// A 3-D Cartesian coordinate in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3-D Euclidean distance in metres.
    pub fn distance_m(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance from the vertical axis through the origin — handy for
    /// checking that a node is still on its configured ring.
    #[inline]
    pub fn radial_distance_m(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
