// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from ROOT files to stacked batches:
//
//   *.root files
//       │
//       ▼
//   splitter          → finds the three files, ranks them by size
//       │
//       ▼
//   RootEventSource   → decodes the delphys tree (oxyroot)
//       │
//       ▼
//   JetDataset        → entry range per batch index
//       │
//       ▼
//   features          → 9-wide track rows, pt ordering, padding
//       │
//       ▼
//   EventBatch        → [batch, max_len, 9] + [batch]
//       │
//       ▼
//   JetBatcher        → burn tensors for a training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// EventSource implementations (ROOT file, in-memory)
pub mod source;

/// Track feature matrix, PID one-hot, pt ordering, padding
pub mod features;

/// JetDataset: len() / get_batch(index)
pub mod dataset;

/// burn Batcher and tensor conversion
pub mod batcher;

/// Discovers data files and assigns train/val/test by size
pub mod splitter;
