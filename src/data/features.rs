// ============================================================
// Layer 4 — Track Feature Engineering
// ============================================================
// Turns one EventRecord into the per-track feature matrix the
// classifier consumes.
//
// Row layout (FEATURE_WIDTH = 9):
//
//   [ pt | deta | dphi | dz | errd0 | charge | pid0 pid1 pid2 ]
//     └──────────── NUMERIC_WIDTH = 6 ──────┘ └─ PID_WIDTH ─┘
//
// Steps (applied in order):
//   1. Check every per-track array has as many values as track_pt
//   2. Stack the six numeric arrays column-wise
//   3. Append the one-hot PID block for each track
//   4. Stable-sort the rows by pt, highest first
//
// Padding to max_len happens later, per batch, so the caller
// can also inspect the unpadded matrix.

use crate::domain::config::PidPolicy;
use crate::domain::event::EventRecord;
use crate::error::{DatasetError, Result};

/// Numeric columns, in row order
pub const NUMERIC_FEATURES: [&str; 6] = [
    "track_pt",
    "track_deta",
    "track_dphi",
    "track_dz",
    "track_errd0",
    "track_charge",
];

pub const NUMERIC_WIDTH: usize = NUMERIC_FEATURES.len();
pub const PID_WIDTH:     usize = 3;
pub const FEATURE_WIDTH: usize = NUMERIC_WIDTH + PID_WIDTH;

/// One row of the event feature matrix
pub type TrackFeatures = [f32; FEATURE_WIDTH];

// ─── PID mapping ──────────────────────────────────────────────────────────────
/// The categorical `track_costompId` values the encoder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidClass {
    First,
    Second,
    Third,
    /// Any other code; encodes to the all-zero block
    Unrecognised(i32),
}

impl PidClass {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            other => Self::Unrecognised(other),
        }
    }

    pub fn one_hot(self) -> [f32; PID_WIDTH] {
        match self {
            Self::First           => [1.0, 0.0, 0.0],
            Self::Second          => [0.0, 1.0, 0.0],
            Self::Third           => [0.0, 0.0, 1.0],
            Self::Unrecognised(_) => [0.0; PID_WIDTH],
        }
    }
}

// ─── Matrix construction ──────────────────────────────────────────────────────
/// Build the pt-ordered feature matrix of one event.
///
/// `entry` is only used to label errors.
pub fn event_matrix(
    entry:  usize,
    record: &EventRecord,
    policy: PidPolicy,
) -> Result<Vec<TrackFeatures>> {
    let n = record.num_tracks();
    check_shapes(entry, record)?;

    let columns: [&[f32]; NUMERIC_WIDTH] = [
        &record.track_pt,
        &record.track_deta,
        &record.track_dphi,
        &record.track_dz,
        &record.track_errd0,
        &record.track_charge,
    ];

    let mut rows = Vec::with_capacity(n);
    for track in 0..n {
        let mut row = [0.0f32; FEATURE_WIDTH];
        for (col, values) in columns.iter().enumerate() {
            row[col] = values[track];
        }

        let code = record.track_costomp_id[track];
        let pid  = PidClass::from_code(code);
        if let PidClass::Unrecognised(code) = pid {
            if policy == PidPolicy::Reject {
                return Err(DatasetError::UnknownParticleId { entry, code });
            }
            tracing::trace!("entry {entry}: track {track} has PID code {code}, zero filled");
        }
        row[NUMERIC_WIDTH..].copy_from_slice(&pid.one_hot());

        rows.push(row);
    }

    // The key is the record's own pt column; rows carry pt in
    // column 0 so the key and the payload move together.
    let order = order_by_pt_descending(&record.track_pt);
    Ok(order.into_iter().map(|i| rows[i]).collect())
}

/// Indices of `pt` sorted highest first. Stable: equal values
/// keep their original order. NaN sorts above +inf.
pub fn order_by_pt_descending(pt: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..pt.len()).collect();
    order.sort_by(|&a, &b| pt[b].total_cmp(&pt[a]));
    order
}

fn check_shapes(entry: usize, record: &EventRecord) -> Result<()> {
    let expected = record.num_tracks();
    let lengths: [(&'static str, usize); 6] = [
        ("track_deta",      record.track_deta.len()),
        ("track_dphi",      record.track_dphi.len()),
        ("track_dz",        record.track_dz.len()),
        ("track_errd0",     record.track_errd0.len()),
        ("track_charge",    record.track_charge.len()),
        ("track_costompId", record.track_costomp_id.len()),
    ];

    match lengths.iter().find(|(_, len)| *len != expected) {
        Some(&(branch, actual)) => Err(DatasetError::FeatureShape {
            entry,
            branch,
            expected,
            actual,
        }),
        None => Ok(()),
    }
}

// ─── Padding ──────────────────────────────────────────────────────────────────
/// Flatten `rows` into exactly `max_len * FEATURE_WIDTH` values.
///
/// Longer matrices keep their first `max_len` rows; shorter
/// ones get zero rows appended. Equivalent to keras'
/// `pad_sequences(padding="post", truncating="post")`.
pub fn pad_or_truncate(rows: &[TrackFeatures], max_len: usize) -> Vec<f32> {
    let mut flat = Vec::with_capacity(max_len * FEATURE_WIDTH);
    for row in rows.iter().take(max_len) {
        flat.extend_from_slice(row);
    }
    flat.resize(max_len * FEATURE_WIDTH, 0.0);
    flat
}
