//! # Feature table sources
//!
//! A feature table is addressed by the **frame index** embedded in its identifier and
//! provides its content as text. The [`TableSource`] trait abstracts where that text comes
//! from, so the loader applies one parsing policy to files on disk and to in-memory tables
//! alike.
//!
//! On disk, tables are named `<frame>_hypo_features_table.csv` (see
//! [`FEATURE_TABLE_PATTERN`]) and [`discover_feature_tables`] lists them in **file name
//! order**.
use camino::{Utf8Path, Utf8PathBuf};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::{FrameId, FEATURE_TABLE_PATTERN},
    dynophore_errors::DynophoreError,
};

static FEATURE_TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(FEATURE_TABLE_PATTERN).expect("valid feature table pattern"));

/// A per-frame feature table, identified by an integer frame index.
pub trait TableSource {
    /// Human-readable identifier used in diagnostics (file path, test name, ...).
    fn identifier(&self) -> String;

    /// Frame index the table belongs to.
    fn frame_index(&self) -> FrameId;

    /// Read the full text of the table.
    fn read_table(&self) -> Result<String, DynophoreError>;
}

/// Feature table stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTableFile {
    pub path: Utf8PathBuf,
    pub frame: FrameId,
}

impl FeatureTableFile {
    /// Build a source from a path whose file name follows the feature table convention.
    ///
    /// Errors
    /// ----------
    /// * [`DynophoreError::InvalidFeatureTableName`] – the file name does not match
    ///   [`FEATURE_TABLE_PATTERN`] or its frame index does not fit a [`FrameId`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, DynophoreError> {
        let frame = path
            .file_name()
            .and_then(frame_index_from_name)
            .ok_or_else(|| DynophoreError::InvalidFeatureTableName(path.to_string()))?;

        Ok(FeatureTableFile {
            path: path.to_path_buf(),
            frame,
        })
    }
}

impl TableSource for FeatureTableFile {
    fn identifier(&self) -> String {
        self.path.to_string()
    }

    fn frame_index(&self) -> FrameId {
        self.frame
    }

    fn read_table(&self) -> Result<String, DynophoreError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Feature table already held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryTable {
    pub name: String,
    pub frame: FrameId,
    pub content: String,
}

impl InMemoryTable {
    pub fn new(frame: FrameId, content: impl Into<String>) -> Self {
        InMemoryTable {
            name: format!("{frame}_hypo_features_table.csv"),
            frame,
            content: content.into(),
        }
    }
}

impl TableSource for InMemoryTable {
    fn identifier(&self) -> String {
        self.name.clone()
    }

    fn frame_index(&self) -> FrameId {
        self.frame
    }

    fn read_table(&self) -> Result<String, DynophoreError> {
        Ok(self.content.clone())
    }
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn identifier(&self) -> String {
        (**self).identifier()
    }

    fn frame_index(&self) -> FrameId {
        (**self).frame_index()
    }

    fn read_table(&self) -> Result<String, DynophoreError> {
        (**self).read_table()
    }
}

/// Extract the frame index of a feature table file name, if it follows the convention.
pub fn frame_index_from_name(file_name: &str) -> Option<FrameId> {
    FEATURE_TABLE_NAME
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<FrameId>().ok())
}

/// List the feature tables of a directory.
///
/// Entries whose name does not follow the feature table convention are ignored; a name that
/// follows it with a frame index out of [`FrameId`] range is skipped with a warning. The
/// result is sorted by file name. A missing or unreadable directory is reported with a warning and
/// yields no source, which leaves every frame unmatched downstream.
///
/// Arguments
/// -----------------
/// * `dir` – Directory holding the `<frame>_hypo_features_table.csv` files.
///
/// Return
/// ----------
/// * The discovered sources, in file name order.
pub fn discover_feature_tables(dir: &Utf8Path) -> Vec<FeatureTableFile> {
    let entries = match dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list feature tables in {dir}: {e}");
            return Vec::new();
        }
    };

    let mut tables: Vec<FeatureTableFile> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let path = entry.path();
                match FeatureTableFile::from_path(path) {
                    Ok(table) => Some(table),
                    Err(e) => {
                        if path
                            .file_name()
                            .is_some_and(|name| FEATURE_TABLE_NAME.is_match(name))
                        {
                            warn!("Skipping {path}: {e}");
                        }
                        None
                    }
                }
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {dir}: {e}");
                None
            }
        })
        .collect();

    tables.sort_by(|a, b| a.path.cmp(&b.path));
    tables
}
