// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the system
// works with: events, dataset settings and event sources.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain Rust data and traits

// One jet with its parallel per-track arrays
pub mod event;

// Batch size, padding length, tree name, PID policy
pub mod config;

// The EventSource abstraction the data layer implements
pub mod traits;
