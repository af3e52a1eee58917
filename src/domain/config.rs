// ============================================================
// Layer 3 — Dataset Configuration
// ============================================================
// Everything a JetDataset needs to know besides its source.
// Serialisable so the CLI can echo the effective settings and
// a training loop can store them next to its checkpoints.

use serde::{Deserialize, Serialize};

/// How to encode a `track_costompId` outside {1, 2, 3}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PidPolicy {
    /// Encode as the all-zero one-hot block
    #[default]
    ZeroFill,

    /// Fail the event with `UnknownParticleId`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Events per batch
    pub batch_size: usize,

    /// Tracks per event after padding / truncation
    pub max_len:    usize,

    /// Name of the tree inside each ROOT file
    pub tree_name:  String,

    /// File extension used when discovering data files (no dot)
    pub extension:  String,

    pub pid_policy: PidPolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            batch_size: 2,
            max_len:    10,
            tree_name:  "delphys".to_string(),
            extension:  "root".to_string(),
            pid_policy: PidPolicy::ZeroFill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let cfg = DatasetConfig::default();
        assert_eq!(cfg.batch_size, 2);
        assert_eq!(cfg.max_len, 10);
        assert_eq!(cfg.tree_name, "delphys");
        assert_eq!(cfg.pid_policy, PidPolicy::ZeroFill);
    }

    #[test]
    fn test_json_round_trip_uses_snake_case_policy() {
        let cfg  = DatasetConfig { pid_policy: PidPolicy::Reject, ..Default::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"reject\""));
        let back: DatasetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
