//! # Hypotheses: aggregation, ranking and display
//!
//! A **hypothesis** is a distinct feature combination ([`Signature`]) observed in one or
//! more frames of the trajectory. This module groups the consolidated
//! [`FrameTable`](crate::trajectory::FrameTable) by signature and exposes the ranked views
//! used by reports, charts and the best-hypothesis export.
//!
//! Modules
//! -----------------
//! * [`aggregator`](crate::hypothesis::aggregator) – Grouping of frame records into a
//!   [`HypothesisCatalog`].
//! * [`ranking`](crate::hypothesis::ranking) – Full summary, length sections, chart set and
//!   best-hypothesis selection.
//! * [`display`](crate::hypothesis::display) – Terminal tables.
//!
//! Invariants
//! -----------------
//! For a catalog built from a frame table:
//! * every matched frame belongs to exactly one group;
//! * `Σ count + unmatched_frames == total_frames`;
//! * `Σ percent == 100 · matched_frames / total_frames` (unmatched frames stay in the
//!   denominator);
//! * `lowest_rmsd` is the exact minimum over the group's frames and `representative_frame`
//!   the first frame, in trajectory order, reaching it.
use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::{FrameId, Rmsd},
    signature::Signature,
};

pub mod aggregator;
pub mod display;
pub mod ranking;

/// Statistics of one feature combination.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisGroup {
    signature: Signature,
    count: usize,
    percent: f64,
    lowest_rmsd: Rmsd,
    representative_frame: FrameId,
}

impl HypothesisGroup {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of frames showing this combination.
    pub fn count(&self) -> usize {
        self.count
    }

    /// `100 · count / total_frames`, unmatched frames included in the total.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn lowest_rmsd(&self) -> Rmsd {
        self.lowest_rmsd
    }

    /// Frame reaching [`lowest_rmsd`](Self::lowest_rmsd), first one in trajectory order.
    pub fn representative_frame(&self) -> FrameId {
        self.representative_frame
    }

    /// Signature character length.
    pub fn length(&self) -> usize {
        self.signature.complexity()
    }
}

/// All hypotheses of a run, in order of first appearance in the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisCatalog {
    groups: Vec<HypothesisGroup>,
    total_frames: usize,
}

impl HypothesisCatalog {
    pub fn groups(&self) -> &[HypothesisGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn matched_frames(&self) -> usize {
        self.groups.iter().map(HypothesisGroup::count).sum()
    }

    pub fn unmatched_frames(&self) -> usize {
        self.total_frames - self.matched_frames()
    }

    pub fn get(&self, signature: &str) -> Option<&HypothesisGroup> {
        self.groups.iter().find(|g| g.signature == signature)
    }

    /// Groups by decreasing count; equal counts keep their order of first appearance.
    pub fn by_count(&self) -> Vec<&HypothesisGroup> {
        self.groups
            .iter()
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .collect()
    }
}

/// Row of the hypothesis summary handed to report renderers.
///
/// Values are rounded for presentation: `lowest_rmsd` to 3 decimals, `percent` to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Features")]
    pub features: String,
    #[serde(rename = "Lowest_RMSD")]
    pub lowest_rmsd: Rmsd,
    #[serde(rename = "Frame")]
    pub frame: FrameId,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Length")]
    pub length: usize,
    #[serde(rename = "Percent")]
    pub percent: f64,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl From<&HypothesisGroup> for SummaryRow {
    fn from(group: &HypothesisGroup) -> Self {
        SummaryRow {
            features: group.signature.to_string(),
            lowest_rmsd: round_to(group.lowest_rmsd, 3),
            frame: group.representative_frame,
            count: group.count,
            length: group.length(),
            percent: round_to(group.percent, 1),
        }
    }
}

#[cfg(test)]
mod summary_row_tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 1), 33.3);
        assert_eq!(round_to(66.666_666, 1), 66.7);
        assert_eq!(round_to(0.123_56, 3), 0.124);
        assert_eq!(round_to(2.0, 3), 2.0);
    }

    fn group(labels: &[&str], count: usize) -> HypothesisGroup {
        HypothesisGroup {
            signature: Signature::from_labels(labels.iter().copied()),
            count,
            percent: 10.0 * count as f64,
            lowest_rmsd: 0.5,
            representative_frame: 1,
        }
    }

    #[test]
    fn test_by_count_is_stable() {
        let catalog = HypothesisCatalog {
            groups: vec![
                group(&["HB1"], 1),
                group(&["AR1"], 3),
                group(&["HY1"], 1),
                group(&["PI1"], 3),
            ],
            total_frames: 10,
        };
        let order: Vec<String> = catalog
            .by_count()
            .iter()
            .map(|g| g.signature().to_string())
            .collect();
        assert_eq!(order, vec!["AR", "PI", "HB", "HY"]);
    }

    #[test]
    fn test_summary_row_from_group() {
        let group = HypothesisGroup {
            signature: Signature::from_labels(["AR1", "HB2", "HY3"]),
            count: 2,
            percent: 200.0 / 3.0,
            lowest_rmsd: 0.400_04,
            representative_frame: 12,
        };
        let row = SummaryRow::from(&group);
        assert_eq!(
            row,
            SummaryRow {
                features: "ARHBHY".into(),
                lowest_rmsd: 0.4,
                frame: 12,
                count: 2,
                length: 6,
                percent: 66.7,
            }
        );
    }
}
