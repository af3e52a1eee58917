// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// The selector step writes three ROOT files per production,
// one per role, without saying which is which. The roles are
// assigned by size:
//
//   largest  → train
//   middle   → val
//   smallest → test
//
// Steps:
//   1. List `*.<extension>` files in the data directory
//   2. Sort the listing by path so the result never depends on
//      directory iteration order
//   3. Require exactly three files
//   4. Open one JetDataset per file
//   5. Stable-sort by number of batches, largest first
//
// Datasets with the same number of batches keep the path order
// from step 2.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::dataset::JetDataset;
use crate::data::source::RootEventSource;
use crate::domain::config::DatasetConfig;
use crate::domain::traits::EventSource;
use crate::error::{DatasetError, Result};

/// Number of data files (and roles) per production
pub const EXPECTED_FILES: usize = 3;

/// The three role-assigned datasets
pub struct DatasetTriple<S: EventSource> {
    pub train: JetDataset<S>,
    pub val:   JetDataset<S>,
    pub test:  JetDataset<S>,
}

/// Find every file in `dir` with the given extension, sorted by path.
pub fn discover_data_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!("Found {} '.{}' files in '{}'", files.len(), extension, dir.display());
    Ok(files)
}

/// Rank three datasets by batch count: (train, val, test).
pub fn split_by_size<S: EventSource>(mut datasets: [JetDataset<S>; 3]) -> DatasetTriple<S> {
    // sort_by is stable, so ties keep their input order
    datasets.sort_by(|a, b| b.len().cmp(&a.len()));
    let [train, val, test] = datasets;

    tracing::info!(
        "Split: train='{}' ({}), val='{}' ({}), test='{}' ({})",
        train.name(), train.len(),
        val.name(),   val.len(),
        test.name(),  test.len(),
    );
    DatasetTriple { train, val, test }
}

/// Discover the data files in `dir` and open each with `open`.
pub fn discover_and_split_with<S, F>(
    dir:    &Path,
    config: &DatasetConfig,
    mut open: F,
) -> Result<DatasetTriple<S>>
where
    S: EventSource,
    F: FnMut(&Path) -> Result<S>,
{
    let files = discover_data_files(dir, &config.extension)?;
    let files: [PathBuf; EXPECTED_FILES] =
        files.try_into().map_err(|found: Vec<PathBuf>| DatasetError::DatasetDiscovery {
            dir:       dir.to_path_buf(),
            extension: config.extension.clone(),
            expected:  EXPECTED_FILES,
            found:     found.len(),
        })?;

    let [a, b, c] = files;
    let datasets = [
        JetDataset::new(open(&a)?, config)?,
        JetDataset::new(open(&b)?, config)?,
        JetDataset::new(open(&c)?, config)?,
    ];

    Ok(split_by_size(datasets))
}

/// Discover the three ROOT files in `dir` and split them by size.
pub fn discover_and_split(dir: &Path, config: &DatasetConfig) -> Result<DatasetTriple<RootEventSource>> {
    discover_and_split_with(dir, config, |path| {
        RootEventSource::open(path, &config.tree_name)
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::MemoryEventSource;
    use crate::domain::event::EventRecord;

    fn source_with(name: &str, count: usize) -> MemoryEventSource {
        let records = (0..count)
            .map(|_| EventRecord {
                track_pt:         vec![1.0],
                track_deta:       vec![0.0],
                track_dphi:       vec![0.0],
                track_dz:         vec![0.0],
                track_errd0:      vec![0.0],
                track_charge:     vec![1.0],
                track_costomp_id: vec![1],
                jet_label:        0,
            })
            .collect();
        MemoryEventSource::new(name, records)
    }

    /// Opener deriving the entry count from the file stem, e.g. "a_100.root"
    fn open_by_stem(path: &Path) -> Result<MemoryEventSource> {
        let stem  = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let count = stem.rsplit('_').next().and_then(|n| n.parse().ok()).unwrap_or(0);
        Ok(source_with(stem, count))
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_largest_is_train() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_100.root");
        touch(dir.path(), "b_50.root");
        touch(dir.path(), "c_75.root");

        let cfg    = DatasetConfig { batch_size: 10, ..Default::default() };
        let triple = discover_and_split_with(dir.path(), &cfg, open_by_stem).unwrap();

        assert_eq!(triple.train.len(), 10);
        assert_eq!(triple.val.len(),   7);
        assert_eq!(triple.test.len(),  5);
        assert_eq!(triple.train.name(), "a_100");
        assert_eq!(triple.train.num_entries(), 100);
    }

    #[test]
    fn test_other_extensions_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_4.root");
        touch(dir.path(), "b_6.root");
        touch(dir.path(), "c_2.root");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "d_9.root.bak");

        let files = discover_data_files(dir.path(), "root").unwrap();
        assert_eq!(files.len(), 3);
        // Sorted by path
        assert!(files[0].ends_with("a_4.root"));
        assert!(files[2].ends_with("c_2.root"));
    }

    #[test]
    fn test_wrong_file_count_is_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_4.root");
        touch(dir.path(), "b_6.root");

        let cfg = DatasetConfig::default();
        let err = discover_and_split_with(dir.path(), &cfg, open_by_stem).err().unwrap();
        match err {
            DatasetError::DatasetDiscovery { expected, found, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        touch(dir.path(), "c_1.root");
        touch(dir.path(), "d_1.root");
        let err = discover_and_split_with(dir.path(), &cfg, open_by_stem).err().unwrap();
        assert!(matches!(err, DatasetError::DatasetDiscovery { found: 4, .. }));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_data_files(&dir.path().join("nope"), "root").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_ties_keep_path_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "z_20.root");
        touch(dir.path(), "m_20.root");
        touch(dir.path(), "a_20.root");

        let cfg    = DatasetConfig { batch_size: 10, ..Default::default() };
        let triple = discover_and_split_with(dir.path(), &cfg, open_by_stem).unwrap();

        assert_eq!(triple.train.name(), "a_20");
        assert_eq!(triple.val.name(),   "m_20");
        assert_eq!(triple.test.name(),  "z_20");
    }

    #[test]
    fn test_opener_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_1.root");
        touch(dir.path(), "b_1.root");
        touch(dir.path(), "c_1.root");

        let cfg = DatasetConfig::default();
        let err = discover_and_split_with(dir.path(), &cfg, |p: &Path| -> Result<MemoryEventSource> {
            Err(DatasetError::source_read(p.display().to_string(), "corrupt"))
        })
        .err()
        .unwrap();
        assert!(matches!(err, DatasetError::SourceRead { .. }));
    }

    #[test]
    fn test_root_split_rejects_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_and_split(dir.path(), &DatasetConfig::default()).err().unwrap();
        assert!(matches!(err, DatasetError::DatasetDiscovery { found: 0, .. }));
    }
}
