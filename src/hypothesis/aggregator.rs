//! # Hypothesis aggregator
//!
//! Group the records of a [`FrameTable`] by signature into a [`HypothesisCatalog`].
//!
//! The scan is a single stable pass over the frames in trajectory order:
//! * unmatched frames are skipped but stay in `total_frames`;
//! * a group is created at the first frame showing its signature, so catalog order is the
//!   order of first appearance;
//! * the running minimum is only replaced by a **strictly** lower RMSD, so the first frame
//!   reaching the minimum is the representative one.
//!
//! An empty catalog is a terminal condition reported as
//! [`DynophoreError::NoHypothesisMatched`].
use std::collections::HashMap;

use ahash::RandomState;
use log::info;

use crate::{
    dynophore_errors::DynophoreError,
    hypothesis::{HypothesisCatalog, HypothesisGroup},
    signature::Signature,
    trajectory::FrameTable,
};

/// Aggregate the frame records into hypotheses.
///
/// Arguments
/// -----------------
/// * `frames` – The consolidated frame table.
///
/// Return
/// ----------
/// * The catalog of hypotheses, in order of first appearance.
///
/// Errors
/// ----------
/// * [`DynophoreError::NoHypothesisMatched`] – no frame carries a signature (empty trajectory,
///   no feature table, or no frame in common).
pub fn aggregate(frames: &FrameTable) -> Result<HypothesisCatalog, DynophoreError> {
    let mut index: HashMap<&Signature, usize, RandomState> = HashMap::default();
    let mut groups: Vec<HypothesisGroup> = Vec::new();

    for record in frames {
        let Some(signature) = record.signature() else {
            continue;
        };

        match index.get(signature) {
            Some(&i) => {
                let group = &mut groups[i];
                group.count += 1;
                if record.rmsd() < group.lowest_rmsd {
                    group.lowest_rmsd = record.rmsd();
                    group.representative_frame = record.frame_id();
                }
            }
            None => {
                index.insert(signature, groups.len());
                groups.push(HypothesisGroup {
                    signature: signature.clone(),
                    count: 1,
                    percent: 0.0,
                    lowest_rmsd: record.rmsd(),
                    representative_frame: record.frame_id(),
                });
            }
        }
    }

    if groups.is_empty() {
        return Err(DynophoreError::NoHypothesisMatched);
    }

    let total_frames = frames.total_frames();
    for group in &mut groups {
        group.percent = 100.0 * group.count as f64 / total_frames as f64;
    }

    info!(
        "Found {} distinct hypotheses over {total_frames} frames",
        groups.len()
    );

    Ok(HypothesisCatalog {
        groups,
        total_frames,
    })
}

#[cfg(test)]
mod aggregator_tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        config::AnalysisParams,
        feature_tables::FrameSignatureMap,
        trajectory::{merger::merge_trajectory, rmsd_reader::RmsdSample},
    };

    fn frame_table(rows: &[(f64, Option<&[&str]>)]) -> FrameTable {
        let series: Vec<RmsdSample> = rows
            .iter()
            .enumerate()
            .map(|(k, (rmsd, _))| RmsdSample {
                frame: k as i64,
                rmsd: *rmsd,
            })
            .collect();
        let signatures: FrameSignatureMap = rows
            .iter()
            .enumerate()
            .filter_map(|(k, (_, labels))| {
                labels.map(|l| (k as i64 + 1, Signature::from_labels(l.iter())))
            })
            .collect();
        merge_trajectory(&series, &signatures, &AnalysisParams::default())
    }

    #[test]
    fn test_three_distinct_hypotheses() {
        let frames = frame_table(&[
            (0.5, Some(&["HB1", "HB2"][..])),
            (0.3, Some(&["HB3"][..])),
            (0.9, Some(&["AR1", "HB4"][..])),
        ]);
        let catalog = aggregate(&frames).unwrap();

        assert_eq!(catalog.len(), 3);
        let expected = [("HBHB", 0.5, 1), ("HB", 0.3, 2), ("ARHB", 0.9, 3)];
        for (group, (sig, rmsd, frame)) in catalog.groups().iter().zip(expected) {
            assert_eq!(group.signature(), &sig);
            assert_eq!(group.count(), 1);
            assert_relative_eq!(group.percent(), 100.0 / 3.0);
            assert_eq!(group.lowest_rmsd(), rmsd);
            assert_eq!(group.representative_frame(), frame);
        }
        assert_eq!(catalog.get("HBHB").unwrap().length(), 4);
    }

    #[test]
    fn test_lowest_rmsd_regardless_of_order() {
        for rows in [
            [(1.2, Some(&["AR1", "HB2", "HY3"][..])), (0.4, Some(&["AR2", "HB1", "HY1"][..]))],
            [(0.4, Some(&["AR1", "HB2", "HY3"][..])), (1.2, Some(&["AR2", "HB1", "HY1"][..]))],
        ] {
            let frames = frame_table(&rows);
            let catalog = aggregate(&frames).unwrap();
            let group = catalog.get("ARHBHY").unwrap();
            assert_eq!(group.count(), 2);
            assert_eq!(group.lowest_rmsd(), 0.4);
            let expected_frame = frames
                .iter()
                .find(|r| r.rmsd() == 0.4)
                .map(|r| r.frame_id())
                .unwrap();
            assert_eq!(group.representative_frame(), expected_frame);
        }
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let frames = frame_table(&[
            (0.7, Some(&["HY1"][..])),
            (0.2, Some(&["HY2"][..])),
            (0.2, Some(&["HY3"][..])),
        ]);
        let catalog = aggregate(&frames).unwrap();
        assert_eq!(catalog.get("HY").unwrap().representative_frame(), 2);
    }

    #[test]
    fn test_unmatched_frames_count_in_total_only() {
        let frames = frame_table(&[
            (0.1, Some(&["HB1"][..])),
            (0.2, None),
            (0.3, Some(&["HB2"][..])),
            (0.4, None),
        ]);
        let catalog = aggregate(&frames).unwrap();

        assert_eq!(catalog.total_frames(), 4);
        assert_eq!(catalog.matched_frames(), 2);
        assert_eq!(catalog.unmatched_frames(), 2);
        let group = catalog.get("HB").unwrap();
        assert_eq!(group.count(), 2);
        assert_relative_eq!(group.percent(), 50.0);
        assert!(catalog.get("-").is_none());
    }

    #[test]
    fn test_empty_signature_is_a_hypothesis() {
        let frames = frame_table(&[(0.1, Some(&[][..])), (0.2, None)]);
        let catalog = aggregate(&frames).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.groups()[0].length(), 0);
    }

    #[test]
    fn test_no_match_is_terminal() {
        let frames = frame_table(&[(0.1, None), (0.2, None)]);
        assert_eq!(aggregate(&frames), Err(DynophoreError::NoHypothesisMatched));
        assert_eq!(
            aggregate(&FrameTable::default()),
            Err(DynophoreError::NoHypothesisMatched)
        );
    }
}
