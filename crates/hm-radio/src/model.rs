//! Path-loss strategies.

/// Floor applied to the node↔cell distance before any logarithm.
///
/// A node exactly at a cell's coordinates would otherwise feed 0 into
/// `log10` and produce `-inf` path loss.
pub const MIN_DISTANCE_M: f64 = 0.01;

/// A distance → path-loss mapping in dB.
///
/// Implementations must be monotonically non-decreasing in distance; the
/// best-cell scan in [`SignalModel`][crate::SignalModel] relies on farther
/// never meaning stronger.
pub trait PathLossModel {
    /// Path loss in dB at `distance_m` metres.  Implementations should clamp
    /// the distance to [`MIN_DISTANCE_M`] before taking logarithms.
    fn path_loss_db(&self, distance_m: f64) -> f64;
}

/// Simplified 3GPP UMi street-canyon model:
///
///   PL(d) = 32.4 + 21·log10(d) + 20·log10(f_GHz)
///
/// The frequency is a constructor parameter rather than a constant so a
/// deployment can align it with whatever carrier the surrounding system
/// actually configures.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UmiStreetCanyon {
    pub frequency_ghz: f64,
}

impl UmiStreetCanyon {
    pub fn new(frequency_ghz: f64) -> Self {
        Self { frequency_ghz }
    }
}

impl Default for UmiStreetCanyon {
    /// Reference scenario carrier: 3.7 GHz.
    fn default() -> Self {
        Self { frequency_ghz: 3.7 }
    }
}

impl PathLossModel for UmiStreetCanyon {
    fn path_loss_db(&self, distance_m: f64) -> f64 {
        let d = distance_m.max(MIN_DISTANCE_M);
        32.4 + 21.0 * d.log10() + 20.0 * self.frequency_ghz.log10()
    }
}
