//! # Feature tables: ingestion and signature mapping
//!
//! Turn a collection of per-frame feature tables into a **frame → [`Signature`]** mapping.
//!
//! Modules
//! -----------------
//! * [`table_reader`](crate::feature_tables::table_reader) – Delimiter sniffing, label column
//!   resolution and label extraction for one table.
//! * [`sources`](crate::feature_tables::sources) – The [`TableSource`] trait, on-disk and
//!   in-memory sources, and directory discovery.
//!
//! Error policy
//! -----------------
//! Loading is **fail-soft per source**: a table that cannot be read or parsed is skipped with
//! a warning naming the source and the reason, and the remaining sources are still processed.
//! A single bad table never aborts the run; frames without an entry are simply *unmatched*
//! when merged with the RMSD series.
//!
//! Example
//! -----------------
//! ```rust
//! use dynophore::feature_tables::{sources::InMemoryTable, FeatureTableLoader};
//!
//! let loader = FeatureTableLoader::default();
//! let signatures = loader.load([
//!     InMemoryTable::new(1, "Index,Feature_label\n0,HB1\n1,HB2\n"),
//!     InMemoryTable::new(2, "Index;Feature_label\n0;AR1\n"),
//!     InMemoryTable::new(3, ""),
//! ]);
//!
//! assert_eq!(signatures.len(), 2);
//! assert_eq!(signatures[&1], "HBHB");
//! assert_eq!(signatures[&2], "AR");
//! ```
use std::collections::HashMap;

use ahash::RandomState;
use camino::Utf8Path;
use log::{debug, info, warn};

use crate::{constants::FrameId, dynophore_errors::DynophoreError, signature::Signature};

pub mod sources;
pub mod table_reader;

use sources::{discover_feature_tables, TableSource};
use table_reader::{read_feature_labels, LabelColumnRules};

/// Signature of every successfully parsed frame, keyed by frame index.
pub type FrameSignatureMap = HashMap<FrameId, Signature, RandomState>;

/// Loader applying the same label column rules to every source.
#[derive(Debug, Clone, Default)]
pub struct FeatureTableLoader {
    rules: LabelColumnRules,
}

impl FeatureTableLoader {
    pub fn new(rules: LabelColumnRules) -> Self {
        FeatureTableLoader { rules }
    }

    /// Parse one source into its signature.
    ///
    /// Errors
    /// ----------
    /// * Any read or parse failure of that single source.
    pub fn signature_of<S: TableSource>(&self, source: &S) -> Result<Signature, DynophoreError> {
        let content = source.read_table()?;
        let labels = read_feature_labels(&content, &self.rules)?;
        Ok(Signature::from_labels(&labels))
    }

    /// Load every source into a frame → signature mapping.
    ///
    /// Sources are processed in iteration order. Failing sources are skipped and logged.
    /// When two sources carry the same frame index, the later one wins.
    ///
    /// Arguments
    /// -----------------
    /// * `sources` – The per-frame tables.
    ///
    /// Return
    /// ----------
    /// * One entry per successfully parsed source.
    pub fn load<I, S>(&self, sources: I) -> FrameSignatureMap
    where
        I: IntoIterator<Item = S>,
        S: TableSource,
    {
        let mut signatures = FrameSignatureMap::default();
        let mut skipped = 0usize;

        for source in sources {
            match self.signature_of(&source) {
                Ok(signature) => {
                    let frame = source.frame_index();
                    debug!("{} -> frame {frame}: {signature:?}", source.identifier());
                    if let Some(previous) = signatures.insert(frame, signature) {
                        warn!(
                            "Frame {frame} has several feature tables, {} replaces {previous:?}",
                            source.identifier()
                        );
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!("Error reading {}: {e}", source.identifier());
                }
            }
        }

        info!(
            "Loaded {} feature tables ({skipped} skipped)",
            signatures.len()
        );
        signatures
    }

    /// Discover and load every feature table of a directory.
    ///
    /// See also
    /// ------------
    /// * [`discover_feature_tables`] – Directory listing policy.
    pub fn load_dir(&self, dir: &Utf8Path) -> FrameSignatureMap {
        self.load(discover_feature_tables(dir))
    }
}
