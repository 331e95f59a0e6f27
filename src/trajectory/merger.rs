//! # Trajectory merger
//!
//! Join the RMSD series with the frame → signature mapping into a [`FrameTable`].
//!
//! For every sample, in series order:
//!
//! 1. `frame_id = frame + frame_offset` (trajectory counters are zero-based, feature tables
//!    are numbered from one);
//! 2. samples whose `frame_id` equals `excluded_frame_id` are dropped (a known out-of-range
//!    artifact frame);
//! 3. the signature registered for `frame_id` is attached, or none when the frame has no
//!    feature table.
//!
//! The resulting table keeps one record per remaining sample, in series order.
use log::{debug, info};

use crate::{
    config::AnalysisParams,
    feature_tables::FrameSignatureMap,
    trajectory::{rmsd_reader::RmsdSample, FrameRecord, FrameTable},
};

/// Merge the deviation series with the feature signatures.
///
/// Arguments
/// -----------------
/// * `series` – RMSD samples in trajectory order.
/// * `signatures` – Frame index → signature, from the feature table loader.
/// * `params` – Supplies `frame_offset` and `excluded_frame_id`.
///
/// Return
/// ----------
/// * The consolidated [`FrameTable`].
pub fn merge_trajectory(
    series: &[RmsdSample],
    signatures: &FrameSignatureMap,
    params: &AnalysisParams,
) -> FrameTable {
    let records: Vec<FrameRecord> = series
        .iter()
        .map(|sample| (sample.frame.saturating_add(params.frame_offset), sample.rmsd))
        .filter(|(frame_id, _)| *frame_id != params.excluded_frame_id)
        .map(|(frame_id, rmsd)| FrameRecord::new(frame_id, rmsd, signatures.get(&frame_id).cloned()))
        .collect();

    let table = FrameTable::from_records(records);
    debug!(
        "Dropped {} sample(s) with frame id {}",
        series.len() - table.total_frames(),
        params.excluded_frame_id
    );
    info!(
        "Merged {} frames ({} matched, {} unmatched)",
        table.total_frames(),
        table.matched_frames(),
        table.unmatched_frames()
    );
    table
}
