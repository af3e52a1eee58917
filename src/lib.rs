//! Batch assembler for charm-jet tagging.
//!
//! Reads jet/track events from the selector's ROOT trees, turns each
//! event into a pt-ordered, padded `[max_len, 9]` track matrix with a
//! binary label, and splits a production's three files into
//! train/val/test by size.
//!
//! ```no_run
//! use std::path::Path;
//! use cmeson_dataset::{data::splitter::discover_and_split, domain::config::DatasetConfig};
//!
//! let triple = discover_and_split(Path::new("3-Selector/run1"), &DatasetConfig::default())?;
//! for i in 0..triple.train.len() {
//!     let batch = triple.train.get_batch(i)?;
//!     assert_eq!(batch.shape(), [2, 10, 9]);
//! }
//! # Ok::<(), cmeson_dataset::error::DatasetError>(())
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
