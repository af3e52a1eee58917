// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data layer for the CLI.
//
// Rules for this layer:
//   - No feature engineering here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// Split the production and show one batch
pub mod inspect_use_case;
