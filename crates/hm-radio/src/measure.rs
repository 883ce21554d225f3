//! RSRP estimation and best-cell selection.

use hm_core::{CellId, Position};

use crate::PathLossModel;

/// A candidate access point: stable identity plus fixed position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellSite {
    pub id:       CellId,
    pub position: Position,
}

impl CellSite {
    pub fn new(id: CellId, position: Position) -> Self {
        Self { id, position }
    }
}

/// The outcome of one best-cell scan for one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellMeasurement {
    pub cell:       CellId,
    pub rsrp_dbm:   f64,
    pub distance_m: f64,
}

/// Computes an RSRP-like received-power estimate from a [`PathLossModel`]
/// and a fixed transmit power.
///
/// # Type parameter
///
/// `P` is the path-loss strategy.  Swap it at compile time for a different
/// propagation model with no runtime overhead.
#[derive(Clone, Debug)]
pub struct SignalModel<P: PathLossModel> {
    model:        P,
    tx_power_dbm: f64,
}

impl<P: PathLossModel> SignalModel<P> {
    pub fn new(model: P, tx_power_dbm: f64) -> Self {
        Self { model, tx_power_dbm }
    }

    /// Estimated received power in dBm for a node at `node_pos` from a cell
    /// at `cell_pos`.
    pub fn rsrp_dbm(&self, node_pos: Position, cell_pos: Position) -> f64 {
        let distance = node_pos.distance_m(cell_pos);
        self.tx_power_dbm - self.model.path_loss_db(distance)
    }

    /// Scan `cells` and return the one with maximum estimated RSRP.
    ///
    /// Ties break toward the first candidate encountered (lowest index in
    /// the slice): the scan only replaces the running best on a strictly
    /// greater value.  Returns `None` for an empty candidate set.
    pub fn best_cell(&self, node_pos: Position, cells: &[CellSite]) -> Option<CellMeasurement> {
        let mut best: Option<CellMeasurement> = None;

        for site in cells {
            let distance = node_pos.distance_m(site.position);
            let rsrp = self.tx_power_dbm - self.model.path_loss_db(distance);

            let better = match &best {
                None    => true,
                Some(b) => rsrp > b.rsrp_dbm,
            };
            if better {
                best = Some(CellMeasurement {
                    cell:       site.id,
                    rsrp_dbm:   rsrp,
                    distance_m: distance,
                });
            }
        }

        best
    }
}
