// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Sanity check run after the selector step:
//
//   Step 1: Discover and split the three ROOT files   (Layer 4)
//   Step 2: Report the number of batches per role
//   Step 3: Assemble one training batch               (Layer 4)
//   Step 4: Convert it to burn tensors                 (Layer 4)
//
// The use case returns data only; printing is Layer 1's job.

use std::path::PathBuf;

use anyhow::{Context, Result};
use burn::backend::NdArray;
use serde::{Deserialize, Serialize};

use crate::data::batcher::JetBatch;
use crate::data::splitter::discover_and_split;
use crate::domain::config::DatasetConfig;

type InspectBackend = NdArray;

/// Batches and entries per role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub data_dir:      PathBuf,
    pub train_batches: usize,
    pub val_batches:   usize,
    pub test_batches:  usize,
    pub train_entries: usize,
    pub val_entries:   usize,
    pub test_entries:  usize,
}

pub struct InspectReport {
    pub summary:     SplitSummary,
    /// Index of the batch that was assembled
    pub batch_index: usize,
    pub batch:       JetBatch<InspectBackend>,
}

pub struct InspectUseCase {
    data_dir:    PathBuf,
    config:      DatasetConfig,
    batch_index: Option<usize>,
}

impl InspectUseCase {
    /// `batch_index` of None selects the last training batch
    pub fn new(data_dir: PathBuf, config: DatasetConfig, batch_index: Option<usize>) -> Self {
        Self { data_dir, config, batch_index }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        // ── Step 1: Discover and split ────────────────────────────────────────
        tracing::info!("Reading datasets from '{}'", self.data_dir.display());
        let triple = discover_and_split(&self.data_dir, &self.config)
            .with_context(|| format!("Cannot build datasets from '{}'", self.data_dir.display()))?;

        // ── Step 2: Sizes ─────────────────────────────────────────────────────
        let summary = SplitSummary {
            data_dir:      self.data_dir.clone(),
            train_batches: triple.train.len(),
            val_batches:   triple.val.len(),
            test_batches:  triple.test.len(),
            train_entries: triple.train.num_entries(),
            val_entries:   triple.val.num_entries(),
            test_entries:  triple.test.num_entries(),
        };

        // ── Step 3: One training batch ────────────────────────────────────────
        let batch_index = match self.batch_index {
            Some(i) => i,
            None => triple
                .train
                .len()
                .checked_sub(1)
                .context("Training set has no full batch")?,
        };
        let batch = triple
            .train
            .get_batch(batch_index)
            .with_context(|| format!("Cannot assemble training batch {batch_index}"))?;

        // ── Step 4: Tensors ───────────────────────────────────────────────────
        let device = Default::default();
        let batch  = batch.to_tensors::<InspectBackend>(&device);

        Ok(InspectReport { summary, batch_index, batch })
    }
}
