// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// One positional folder name plus optional flags. Every flag
// defaults to the values of the reference run, so
// `cmeson-dataset <FOLDER>` alone reproduces it.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::Args;

use crate::domain::config::{DatasetConfig, PidPolicy};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Sub-folder of the base directory holding the three ROOT files
    pub folder: String,

    /// Directory containing one sub-folder per selector production
    #[arg(long, env = "CMESON_DATA_DIR", default_value = "3-Selector")]
    pub base_dir: PathBuf,

    /// Events per batch
    #[arg(long, default_value_t = 2)]
    pub batch_size: usize,

    /// Tracks per event after padding / truncation
    #[arg(long, default_value_t = 10)]
    pub max_len: usize,

    /// Tree to read inside every ROOT file
    #[arg(long, default_value = "delphys")]
    pub tree: String,

    /// Extension of the data files
    #[arg(long, default_value = "root")]
    pub extension: String,

    /// Training batch to print (default: the last one)
    #[arg(long)]
    pub batch_index: Option<usize>,

    /// Fail on track_costompId values other than 1, 2, 3
    /// instead of encoding them as zeros
    #[arg(long)]
    pub strict_pid: bool,

    /// Print the split summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// `<base_dir>/<folder>`
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join(&self.folder)
    }
}

/// The application layer never sees clap types
impl From<&InspectArgs> for DatasetConfig {
    fn from(a: &InspectArgs) -> Self {
        DatasetConfig {
            batch_size: a.batch_size,
            max_len:    a.max_len,
            tree_name:  a.tree.clone(),
            extension:  a.extension.clone(),
            pid_policy: if a.strict_pid { PidPolicy::Reject } else { PidPolicy::ZeroFill },
        }
    }
}
