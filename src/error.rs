// ============================================================
// Error Types
// ============================================================
// Every failure the data layers can produce. The CLI and
// application layers wrap these in anyhow with extra context;
// everything below them returns this typed error so callers
// (a training loop, tests) can match on the variant.
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Recoverable Errors with Result)

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the data and domain layers
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors raised while discovering, reading or batching events
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The data directory did not hold the expected number of files
    #[error("expected exactly {expected} '.{extension}' files in '{}', found {found}", dir.display())]
    DatasetDiscovery {
        dir:       PathBuf,
        extension: String,
        expected:  usize,
        found:     usize,
    },

    /// Batch index outside `[0, len)`
    #[error("batch index {index} out of range (dataset has {len} batches)")]
    OutOfRange { index: usize, len: usize },

    /// The backing store could not produce a record
    #[error("failed to read from '{source_name}': {reason}")]
    SourceRead {
        source_name: String,
        reason:      String,
    },

    /// Parallel per-track arrays of one event disagree in length
    #[error(
        "entry {entry}: branch '{branch}' has {actual} values but track_pt has {expected}"
    )]
    FeatureShape {
        entry:    usize,
        branch:   &'static str,
        expected: usize,
        actual:   usize,
    },

    /// A track_costompId outside {1, 2, 3} under `PidPolicy::Reject`
    #[error("entry {entry}: unrecognised track_costompId {code}")]
    UnknownParticleId { entry: usize, code: i32 },

    /// Batch size or padding length that cannot form a batch
    #[error("invalid dataset configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Build a `SourceRead` error for the named source
    pub fn source_read(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            reason:      reason.into(),
        }
    }

    /// Build an `InvalidConfig` error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_message_names_counts() {
        let err = DatasetError::DatasetDiscovery {
            dir:       PathBuf::from("/data/run1"),
            extension: "root".to_string(),
            expected:  3,
            found:     2,
        };
        let msg = err.to_string();
        assert!(msg.contains("exactly 3"));
        assert!(msg.contains("found 2"));
        assert!(msg.contains("/data/run1"));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = DatasetError::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "batch index 7 out of range (dataset has 3 batches)");
    }
}
