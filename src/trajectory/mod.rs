//! # Trajectory: deviation series and per-frame records
//!
//! The trajectory side of the analysis: the RMSD series read from disk and the consolidated
//! per-frame records obtained by joining it with the feature signatures.
//!
//! Modules
//! -----------------
//! * [`rmsd_reader`](crate::trajectory::rmsd_reader) – Reader of the `frame rmsd` series.
//! * [`merger`](crate::trajectory::merger) – Join of the series with the frame → signature
//!   mapping into a [`FrameTable`].
//!
//! Data Model
//! -----------------
//! * [`FrameRecord`] – `(frame_id, rmsd, signature)`, where `signature` is `None` for frames
//!   without a feature table (rendered as [`UNMATCHED_SIGNATURE`]).
//! * [`FrameTable`] – All records of a run, in trajectory order. Built once by the merger and
//!   read-only afterwards.
use std::fmt;

use serde::Serialize;

use crate::{
    constants::{FrameId, Rmsd, UNMATCHED_SIGNATURE},
    signature::Signature,
};

pub mod merger;
pub mod rmsd_reader;

/// One consolidated trajectory frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    frame_id: FrameId,
    rmsd: Rmsd,
    signature: Option<Signature>,
}

impl FrameRecord {
    pub(crate) fn new(frame_id: FrameId, rmsd: Rmsd, signature: Option<Signature>) -> Self {
        FrameRecord {
            frame_id,
            rmsd,
            signature,
        }
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    pub fn rmsd(&self) -> Rmsd {
        self.rmsd
    }

    /// Signature of the frame, `None` when no feature table matched it.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_matched(&self) -> bool {
        self.signature.is_some()
    }

    /// Signature as printed in reports, [`UNMATCHED_SIGNATURE`] for unmatched frames.
    pub fn signature_label(&self) -> &str {
        self.signature
            .as_ref()
            .map_or(UNMATCHED_SIGNATURE, Signature::as_str)
    }
}

/// Row of the frame-wise mapping handed to report renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingRow {
    #[serde(rename = "Frame_ID")]
    pub frame_id: FrameId,
    #[serde(rename = "RMSD")]
    pub rmsd: Rmsd,
    #[serde(rename = "Features")]
    pub features: String,
}

impl From<&FrameRecord> for MappingRow {
    fn from(record: &FrameRecord) -> Self {
        MappingRow {
            frame_id: record.frame_id,
            rmsd: record.rmsd,
            features: record.signature_label().to_string(),
        }
    }
}

/// All frame records of a run, in trajectory order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTable {
    records: Vec<FrameRecord>,
}

impl FrameTable {
    pub(crate) fn from_records(records: Vec<FrameRecord>) -> Self {
        FrameTable { records }
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> {
        self.records.iter()
    }

    /// Number of frames, unmatched included.
    pub fn total_frames(&self) -> usize {
        self.records.len()
    }

    pub fn matched_frames(&self) -> usize {
        self.records.iter().filter(|r| r.is_matched()).count()
    }

    pub fn unmatched_frames(&self) -> usize {
        self.total_frames() - self.matched_frames()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full, unfiltered frame-wise mapping.
    pub fn mapping_rows(&self) -> Vec<MappingRow> {
        self.records.iter().map(MappingRow::from).collect()
    }
}

impl<'a> IntoIterator for &'a FrameTable {
    type Item = &'a FrameRecord;
    type IntoIter = std::slice::Iter<'a, FrameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} rmsd={:.3} {}",
            self.frame_id,
            self.rmsd,
            self.signature_label()
        )
    }
}
