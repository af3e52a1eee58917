// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The batch assembler never talks to a file format directly.
// It asks an EventSource for record N and gets an EventRecord
// back. This lets the same JetDataset run over:
//   - RootEventSource   → a ROOT file read with oxyroot
//   - MemoryEventSource → events already decoded in memory
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::event::EventRecord;
use crate::error::Result;

// ─── EventSource ──────────────────────────────────────────────────────────────
/// Random access to the events of one backing store.
///
/// `Send + Sync` is required because burn's `Dataset` trait
/// demands it; sources are still owned by exactly one dataset.
pub trait EventSource: Send + Sync {
    /// Total number of events available
    fn num_entries(&self) -> usize;

    /// Fetch event `entry`; fails with `SourceRead` past the end
    fn fetch(&self, entry: usize) -> Result<EventRecord>;

    /// Human-readable identifier used in logs and errors
    fn name(&self) -> &str;
}
