// ============================================================
// Layer 3 — Event Record Domain Type
// ============================================================
// One row of the upstream `delphys` tree: a jet together with
// the tracks associated to it.
//
// Every `track_*` field is a parallel array — index i in each
// of them describes the same track. The number of tracks is
// taken from `track_pt`; the feature layer checks the other
// arrays agree before building a matrix.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Jet labels at or above this value are the positive class
pub const POSITIVE_LABEL_THRESHOLD: i32 = 4;

/// A single event (jet) as read from the backing store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Transverse momentum of each track
    pub track_pt: Vec<f32>,

    /// Pseudorapidity distance from the jet axis
    pub track_deta: Vec<f32>,

    /// Azimuthal distance from the jet axis
    pub track_dphi: Vec<f32>,

    /// Longitudinal impact parameter
    pub track_dz: Vec<f32>,

    /// Uncertainty on the transverse impact parameter
    pub track_errd0: Vec<f32>,

    /// Electric charge
    pub track_charge: Vec<f32>,

    /// Categorical particle identification code (1, 2, 3 or other)
    pub track_costomp_id: Vec<i32>,

    /// Generator-level jet flavour label
    pub jet_label: i32,
}

impl EventRecord {
    /// Number of tracks in this event
    pub fn num_tracks(&self) -> usize {
        self.track_pt.len()
    }

    /// Binary class: 1 for `jet_label >= 4`, otherwise 0
    pub fn jet_class(&self) -> i64 {
        i64::from(self.jet_label >= POSITIVE_LABEL_THRESHOLD)
    }
}
