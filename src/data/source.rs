// ============================================================
// Layer 4 — Event Sources
// ============================================================
// Implementations of the EventSource trait from Layer 3.
//
// RootEventSource reads the `delphys` tree written by the
// selector step using the oxyroot crate. The tree layout:
//
//   delphys (TTree)
//     ├── track_pt         vector<float>   one value per track
//     ├── track_deta       vector<float>
//     ├── track_dphi       vector<float>
//     ├── track_dz         vector<float>
//     ├── track_errd0      vector<float>
//     ├── track_charge     vector<float>   (int in some productions)
//     ├── track_costompId  vector<int>
//     └── jet_label        int             one value per jet
//
// oxyroot only hands out whole branches as sequential
// iterators, so each branch is decoded once when the file is
// opened and kept in columnar form. fetch(entry) then picks
// row `entry` out of every column.
//
// MemoryEventSource holds already-decoded records. Tests use
// it, and so can any caller that produces events itself.
//
// Reference: oxyroot crate documentation

use std::fs::File;
use std::io::Read;
use std::path::Path;

use oxyroot::{Branch, ReaderTree, RootFile};

use crate::domain::event::EventRecord;
use crate::domain::traits::EventSource;
use crate::error::{DatasetError, Result};

/// Per-track branches read as floating point, in feature order
const TRACK_BRANCHES: [&str; 6] = [
    "track_pt",
    "track_deta",
    "track_dphi",
    "track_dz",
    "track_errd0",
    "track_charge",
];

const PID_BRANCH:   &str = "track_costompId";
const LABEL_BRANCH: &str = "jet_label";

/// First four bytes of every ROOT file
const ROOT_MAGIC: &[u8; 4] = b"root";

// ─── RootEventSource ──────────────────────────────────────────────────────────
/// Events of one ROOT file, decoded column by column.
pub struct RootEventSource {
    name:    String,
    entries: usize,
    /// Indexed [branch][entry][track], same order as TRACK_BRANCHES
    tracks:  Vec<Vec<Vec<f32>>>,
    pids:    Vec<Vec<i32>>,
    labels:  Vec<i32>,
}

impl RootEventSource {
    /// Open `path` and decode every branch of `tree_name`.
    pub fn open(path: impl AsRef<Path>, tree_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();

        // oxyroot panics on a bad header instead of returning Err
        check_root_magic(path, &name)?;

        let mut file = RootFile::open(path)
            .map_err(|e| map_root_error(&name, "cannot open ROOT file", e))?;
        let tree = file
            .get_tree(tree_name)
            .map_err(|e| map_root_error(&name, &format!("cannot open tree '{tree_name}'"), e))?;

        let entries = usize::try_from(tree.entries()).map_err(|_| {
            DatasetError::source_read(&name, format!("tree '{tree_name}' reports a negative entry count"))
        })?;

        let mut tracks: Vec<Vec<Vec<f32>>> = Vec::with_capacity(TRACK_BRANCHES.len());
        for branch_name in TRACK_BRANCHES {
            let branch = find_branch(&tree, &name, branch_name)?;
            let column = read_vector_column(&name, branch)?;
            check_column_len(&name, branch_name, column.len(), entries)?;
            tracks.push(
                column
                    .into_iter()
                    .map(|row| row.into_iter().map(|v| v as f32).collect())
                    .collect(),
            );
        }

        let branch = find_branch(&tree, &name, PID_BRANCH)?;
        let pids: Vec<Vec<i32>> = read_vector_column(&name, branch)?
            .into_iter()
            .map(|row| row.into_iter().map(|v| v as i32).collect())
            .collect();
        check_column_len(&name, PID_BRANCH, pids.len(), entries)?;

        let branch = find_branch(&tree, &name, LABEL_BRANCH)?;
        let labels: Vec<i32> = read_scalar_column(&name, branch)?
            .into_iter()
            .map(|v| v as i32)
            .collect();
        check_column_len(&name, LABEL_BRANCH, labels.len(), entries)?;

        tracing::info!("Opened '{}': tree '{}' with {} entries", name, tree_name, entries);

        Ok(Self { name, entries, tracks, pids, labels })
    }
}

impl EventSource for RootEventSource {
    fn num_entries(&self) -> usize {
        self.entries
    }

    fn fetch(&self, entry: usize) -> Result<EventRecord> {
        if entry >= self.entries {
            return Err(past_end(&self.name, entry, self.entries));
        }

        let column = |i: usize| self.tracks[i][entry].clone();
        Ok(EventRecord {
            track_pt:         column(0),
            track_deta:       column(1),
            track_dphi:       column(2),
            track_dz:         column(3),
            track_errd0:      column(4),
            track_charge:     column(5),
            track_costomp_id: self.pids[entry].clone(),
            jet_label:        self.labels[entry],
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ─── Branch decoding ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    F32,
    F64,
    I32,
    I64,
    U32,
}

/// Map a ROOT leaf type name (already normalised) to a column kind
fn scalar_kind(type_name: &str) -> Option<ColumnKind> {
    match type_name {
        "float" | "float_t" | "float32_t"              => Some(ColumnKind::F32),
        "double" | "double_t" | "double32_t"           => Some(ColumnKind::F64),
        "int" | "int_t" | "int32_t"                    => Some(ColumnKind::I32),
        "long" | "long64_t" | "int64_t" | "long long"  => Some(ColumnKind::I64),
        "unsigned int" | "uint_t" | "uint32_t"         => Some(ColumnKind::U32),
        _ => None,
    }
}

/// Same as `scalar_kind` for `vector<T>` branches
fn vector_kind(type_name: &str) -> Option<ColumnKind> {
    let inner = type_name.strip_prefix("vector<")?.strip_suffix('>')?;
    scalar_kind(inner.trim())
}

/// Lower-case and drop the `std::` prefix so "std::vector<Float_t>"
/// and "vector<float_t>" compare equal
fn normalise_type_name(raw: &str) -> String {
    raw.to_ascii_lowercase().replace("std::", "").trim().to_string()
}

fn check_root_magic(path: &Path, source: &str) -> Result<()> {
    let mut file = File::open(path)
        .map_err(|e| DatasetError::source_read(source, format!("cannot open ROOT file: {e}")))?;

    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) if &magic == ROOT_MAGIC => Ok(()),
        Ok(()) => Err(DatasetError::source_read(source, "not a ROOT file")),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(DatasetError::source_read(source, "not a ROOT file"))
        }
        Err(e) => Err(DatasetError::source_read(source, format!("cannot read header: {e}"))),
    }
}

fn find_branch<'a>(tree: &'a ReaderTree, source: &str, branch_name: &str) -> Result<&'a Branch> {
    tree.branch(branch_name).ok_or_else(|| {
        DatasetError::source_read(source, format!("missing branch '{branch_name}'"))
    })
}

fn read_vector_column(source: &str, branch: &Branch) -> Result<Vec<Vec<f64>>> {
    let type_name = normalise_type_name(&branch.item_type_name());
    let kind = vector_kind(&type_name).ok_or_else(|| {
        DatasetError::source_read(
            source,
            format!("branch '{}' has unsupported type '{type_name}'", branch.name()),
        )
    })?;
    let context = format!("cannot read branch '{}'", branch.name());

    let column = match kind {
        ColumnKind::F32 => branch
            .as_iter::<Vec<f32>>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(|row| row.into_iter().map(f64::from).collect())
            .collect(),
        ColumnKind::F64 => branch
            .as_iter::<Vec<f64>>()
            .map_err(|e| map_root_error(source, &context, e))?
            .collect(),
        ColumnKind::I32 => branch
            .as_iter::<Vec<i32>>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(|row| row.into_iter().map(f64::from).collect())
            .collect(),
        ColumnKind::I64 => branch
            .as_iter::<Vec<i64>>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(|row| row.into_iter().map(|v| v as f64).collect())
            .collect(),
        ColumnKind::U32 => branch
            .as_iter::<Vec<u32>>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(|row| row.into_iter().map(f64::from).collect())
            .collect(),
    };
    Ok(column)
}

fn read_scalar_column(source: &str, branch: &Branch) -> Result<Vec<f64>> {
    let type_name = normalise_type_name(&branch.item_type_name());
    let kind = scalar_kind(&type_name).ok_or_else(|| {
        DatasetError::source_read(
            source,
            format!("branch '{}' has unsupported type '{type_name}'", branch.name()),
        )
    })?;
    let context = format!("cannot read branch '{}'", branch.name());

    let column = match kind {
        ColumnKind::F32 => branch
            .as_iter::<f32>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(f64::from)
            .collect(),
        ColumnKind::F64 => branch
            .as_iter::<f64>()
            .map_err(|e| map_root_error(source, &context, e))?
            .collect(),
        ColumnKind::I32 => branch
            .as_iter::<i32>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(f64::from)
            .collect(),
        ColumnKind::I64 => branch
            .as_iter::<i64>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(|v| v as f64)
            .collect(),
        ColumnKind::U32 => branch
            .as_iter::<u32>()
            .map_err(|e| map_root_error(source, &context, e))?
            .map(f64::from)
            .collect(),
    };
    Ok(column)
}

fn check_column_len(source: &str, branch_name: &str, actual: usize, entries: usize) -> Result<()> {
    if actual != entries {
        return Err(DatasetError::source_read(
            source,
            format!("branch '{branch_name}' holds {actual} entries, tree has {entries}"),
        ));
    }
    Ok(())
}

// oxyroot does not export its error type, only Display
fn map_root_error<E: std::fmt::Display>(source: &str, context: &str, err: E) -> DatasetError {
    DatasetError::source_read(source, format!("{context}: {err}"))
}

fn past_end(source: &str, entry: usize, entries: usize) -> DatasetError {
    DatasetError::source_read(source, format!("entry {entry} past end ({entries} entries)"))
}

// ─── MemoryEventSource ────────────────────────────────────────────────────────
/// Events held in memory, fetched by position.
#[derive(Debug, Clone)]
pub struct MemoryEventSource {
    name:    String,
    records: Vec<EventRecord>,
}

impl MemoryEventSource {
    pub fn new(name: impl Into<String>, records: Vec<EventRecord>) -> Self {
        Self { name: name.into(), records }
    }
}

impl EventSource for MemoryEventSource {
    fn num_entries(&self) -> usize {
        self.records.len()
    }

    fn fetch(&self, entry: usize) -> Result<EventRecord> {
        self.records
            .get(entry)
            .cloned()
            .ok_or_else(|| past_end(&self.name, entry, self.records.len()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
