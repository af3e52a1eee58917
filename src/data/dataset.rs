// ============================================================
// Layer 4 — Jet Dataset (Batch Assembler)
// ============================================================
// Cuts one event source into fixed-size batches:
//
//   entries  0 1 | 2 3 | 4 5 | 6      (batch_size = 2)
//   batches  [0]   [1]   [2]   dropped
//
// len() is floor(num_entries / batch_size); the remainder never
// shows up in any batch. get_batch(i) fetches its entries one
// by one, builds each feature matrix (features.rs), pads it to
// max_len and stacks everything into an EventBatch:
//
//   features: [batch_size, max_len, 9]  f32, row-major
//   labels:   [batch_size]              i64 (0 or 1)
//
// The dataset owns its source; there is no shared handle.
// A training loop drives iteration through len()/get_batch(),
// or hands JetSamples to a burn DataLoader.
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::features::{self, FEATURE_WIDTH};
use crate::domain::config::{DatasetConfig, PidPolicy};
use crate::domain::traits::EventSource;
use crate::error::{DatasetError, Result};

// ─── JetSample ────────────────────────────────────────────────────────────────
/// One padded event: the unit a burn Batcher stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetSample {
    /// `max_len * FEATURE_WIDTH` values, row-major
    pub features: Vec<f32>,
    pub label:    i64,
}

// ─── EventBatch ───────────────────────────────────────────────────────────────
/// A stacked batch, independent of any tensor library.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBatch {
    pub features:   Vec<f32>,
    pub labels:     Vec<i64>,
    pub batch_size: usize,
    pub max_len:    usize,
}

impl EventBatch {
    /// Shape of `features`
    pub fn shape(&self) -> [usize; 3] {
        [self.batch_size, self.max_len, FEATURE_WIDTH]
    }

    /// Feature row of `track` in `event`
    ///
    /// # Panics
    ///
    /// If `event >= batch_size` or `track >= max_len`.
    pub fn track(&self, event: usize, track: usize) -> &[f32] {
        assert!(
            event < self.batch_size && track < self.max_len,
            "track ({event}, {track}) outside batch of shape {:?}",
            self.shape()
        );
        let start = (event * self.max_len + track) * FEATURE_WIDTH;
        &self.features[start..start + FEATURE_WIDTH]
    }

    /// Padded matrix of `event`, `max_len * FEATURE_WIDTH` values
    ///
    /// # Panics
    ///
    /// If `event >= batch_size`.
    pub fn event(&self, event: usize) -> &[f32] {
        assert!(
            event < self.batch_size,
            "event {event} outside batch of size {}",
            self.batch_size
        );
        let stride = self.max_len * FEATURE_WIDTH;
        &self.features[event * stride..(event + 1) * stride]
    }
}

// ─── JetDataset ───────────────────────────────────────────────────────────────
pub struct JetDataset<S: EventSource> {
    source:     S,
    batch_size: usize,
    max_len:    usize,
    pid_policy: PidPolicy,
}

impl<S: EventSource> JetDataset<S> {
    /// Wrap `source`; batch_size and max_len must be non-zero.
    pub fn new(source: S, config: &DatasetConfig) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(DatasetError::invalid_config("batch_size must be at least 1"));
        }
        if config.max_len == 0 {
            return Err(DatasetError::invalid_config("max_len must be at least 1"));
        }

        let dataset = Self {
            source,
            batch_size: config.batch_size,
            max_len:    config.max_len,
            pid_policy: config.pid_policy,
        };

        tracing::info!(
            "Dataset '{}': {} entries → {} batches of {} (max_len={})",
            dataset.source.name(),
            dataset.num_entries(),
            dataset.len(),
            dataset.batch_size,
            dataset.max_len,
        );

        Ok(dataset)
    }

    /// Number of full batches
    pub fn len(&self) -> usize {
        self.num_entries() / self.batch_size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_entries(&self) -> usize {
        self.source.num_entries()
    }

    /// Entries covered by some batch: `len() * batch_size`
    pub fn usable_entries(&self) -> usize {
        self.len() * self.batch_size
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Assemble batch `index`. Any failing entry fails the batch.
    pub fn get_batch(&self, index: usize) -> Result<EventBatch> {
        let len = self.len();
        if index >= len {
            return Err(DatasetError::OutOfRange { index, len });
        }

        let start = index * self.batch_size;
        let end   = start + self.batch_size;
        tracing::debug!("Assembling batch {} (entries {}..{})", index, start, end);

        let mut features = Vec::with_capacity(self.batch_size * self.max_len * FEATURE_WIDTH);
        let mut labels   = Vec::with_capacity(self.batch_size);

        for entry in start..end {
            let sample = self.get_sample(entry)?;
            features.extend_from_slice(&sample.features);
            labels.push(sample.label);
        }

        Ok(EventBatch {
            features,
            labels,
            batch_size: self.batch_size,
            max_len:    self.max_len,
        })
    }

    /// Padded features and label of a single entry.
    ///
    /// Unlike `get_batch` this accepts any entry the source
    /// holds, including the trailing ones no batch covers.
    pub fn get_sample(&self, entry: usize) -> Result<JetSample> {
        let record = self.source.fetch(entry)?;
        let rows   = features::event_matrix(entry, &record, self.pid_policy)?;

        Ok(JetSample {
            features: features::pad_or_truncate(&rows, self.max_len),
            label:    record.jet_class(),
        })
    }

    /// Expose the usable entries through burn's `Dataset` trait.
    ///
    /// Every usable entry is assembled once here, so a bad event
    /// fails now instead of ending a DataLoader epoch early.
    pub fn into_samples(self) -> Result<JetSamples<S>> {
        for entry in 0..self.usable_entries() {
            self.get_sample(entry)?;
        }
        tracing::debug!("Checked {} entries of '{}'", self.usable_entries(), self.name());
        Ok(JetSamples { inner: self })
    }
}

// ─── JetSamples ───────────────────────────────────────────────────────────────
/// Per-event view of a JetDataset for burn's DataLoader.
///
/// Only `usable_entries()` are visible so a loader with the same
/// batch size sees exactly the events get_batch would emit. Built
/// by `into_samples`, which has already assembled every one of
/// them, so `get` only returns None past the end.
pub struct JetSamples<S: EventSource> {
    inner: JetDataset<S>,
}

impl<S: EventSource> JetSamples<S> {
    pub fn dataset(&self) -> &JetDataset<S> {
        &self.inner
    }
}

impl<S: EventSource> Dataset<JetSample> for JetSamples<S> {
    fn get(&self, index: usize) -> Option<JetSample> {
        if index >= self.len() {
            return None;
        }
        // Sources are immutable once opened; validated in into_samples
        self.inner.get_sample(index).ok()
    }

    fn len(&self) -> usize {
        self.inner.usable_entries()
    }
}
