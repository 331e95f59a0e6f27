//! # Ranking and selection of hypotheses
//!
//! Ordered views over a [`HypothesisCatalog`], parameterized by [`AnalysisParams`]:
//!
//! 1. **Full summary** – every group, stable-sorted by `count` descending (ties keep the
//!    order of first appearance). The length sections of the narrative report are carved
//!    out of it, ascending by length, with excluded lengths left out.
//! 2. **Visualization set** – groups whose length is not excluded, stable-sorted by exact
//!    `percent` descending and truncated to `top_n`. The pie, bar and stacked bar views all
//!    read this one set.
//! 3. **Best hypotheses** – the first `best_export_count` groups of the full summary whose
//!    length reaches `best_min_length`.
//!
//! The per-frame mapping is never filtered by any of these views.
use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    config::AnalysisParams,
    constants::FrameId,
    hypothesis::{HypothesisCatalog, HypothesisGroup, SummaryRow},
};

/// Hypotheses sharing one signature length, in full-summary order.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthSection<'a> {
    pub length: usize,
    pub groups: Vec<&'a HypothesisGroup>,
}

/// Entry of the chart views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    #[serde(rename = "Features")]
    pub signature: String,
    #[serde(rename = "Percent")]
    pub percent: f64,
    #[serde(rename = "Length")]
    pub length: usize,
}

impl From<&HypothesisGroup> for ChartEntry {
    fn from(group: &HypothesisGroup) -> Self {
        ChartEntry {
            signature: group.signature().to_string(),
            percent: group.percent(),
            length: group.length(),
        }
    }
}

/// Ranked views of a catalog.
///
/// The full summary is computed once at construction; the other views are derived from it
/// on demand.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    params: &'a AnalysisParams,
    summary: Vec<&'a HypothesisGroup>,
}

impl<'a> Ranking<'a> {
    pub fn new(catalog: &'a HypothesisCatalog, params: &'a AnalysisParams) -> Self {
        Ranking {
            params,
            summary: catalog.by_count(),
        }
    }

    /// All groups by decreasing frequency.
    pub fn summary(&self) -> &[&'a HypothesisGroup] {
        &self.summary
    }

    /// The full summary as rounded report rows.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.summary.iter().map(|g| SummaryRow::from(*g)).collect()
    }

    /// Narrative sections, one per non-excluded length, ascending.
    pub fn length_sections(&self) -> Vec<LengthSection<'a>> {
        let by_length = self
            .summary
            .iter()
            .copied()
            .filter(|g| !self.params.is_excluded_length(g.length()))
            .sorted_by_key(|g| g.length());

        let mut sections = Vec::new();
        for (length, groups) in &by_length.chunk_by(|g| g.length()) {
            sections.push(LengthSection {
                length,
                groups: groups.collect(),
            });
        }
        sections
    }

    /// Groups feeding the chart views.
    pub fn visualization_set(&self) -> Vec<&'a HypothesisGroup> {
        self.summary
            .iter()
            .copied()
            .filter(|g| !self.params.is_excluded_length(g.length()))
            .sorted_by(|a, b| {
                b.percent()
                    .partial_cmp(&a.percent())
                    .unwrap_or(Ordering::Equal)
            })
            .take(self.params.top_n)
            .collect()
    }

    pub fn chart_entries(&self) -> Vec<ChartEntry> {
        self.visualization_set()
            .into_iter()
            .map(ChartEntry::from)
            .collect()
    }

    /// Groups whose representative frame is exported.
    pub fn best_hypotheses(&self) -> Vec<&'a HypothesisGroup> {
        self.summary
            .iter()
            .copied()
            .filter(|g| g.length() >= self.params.best_min_length)
            .take(self.params.best_export_count)
            .collect()
    }

    pub fn best_frames(&self) -> Vec<FrameId> {
        self.best_hypotheses()
            .into_iter()
            .map(HypothesisGroup::representative_frame)
            .collect()
    }
}

#[cfg(test)]
mod ranking_tests {
    use super::*;
    use crate::signature::Signature;

    fn group(sig: &str, count: usize, frame: FrameId) -> HypothesisGroup {
        HypothesisGroup {
            signature: Signature::from_labels([sig]),
            count,
            percent: 0.0,
            lowest_rmsd: 0.1 * frame as f64,
            representative_frame: frame,
        }
    }

    fn catalog(groups: Vec<HypothesisGroup>) -> HypothesisCatalog {
        let total_frames: usize = groups.iter().map(|g| g.count).sum::<usize>() + 4;
        let groups = groups
            .into_iter()
            .map(|mut g| {
                g.percent = 100.0 * g.count as f64 / total_frames as f64;
                g
            })
            .collect();
        HypothesisCatalog {
            groups,
            total_frames,
        }
    }

    fn signatures(groups: &[&HypothesisGroup]) -> Vec<String> {
        groups.iter().map(|g| g.signature().to_string()).collect()
    }

    fn sample_catalog() -> HypothesisCatalog {
        catalog(vec![
            group("HB", 2, 1),
            group("ARHB", 5, 2),
            group("HBHYPI", 1, 3),
            group("ARHBHY", 5, 4),
            group("HYHB", 3, 5),
            group("NIPIHB", 3, 6),
            group("ARARHBHY", 1, 7),
        ])
    }

    #[test]
    fn test_summary_is_stable_by_count_desc() {
        let catalog = sample_catalog();
        let params = AnalysisParams::default();
        let ranking = Ranking::new(&catalog, &params);

        assert_eq!(
            signatures(ranking.summary()),
            vec!["ARHB", "ARHBHY", "HYHB", "NIPIHB", "HB", "HBHYPI", "ARARHBHY"]
        );
        let counts: Vec<usize> = ranking.summary().iter().map(|g| g.count()).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ranking.summary_rows()[0].features, "ARHB");
    }

    #[test]
    fn test_length_sections() {
        let catalog = sample_catalog();
        let params = AnalysisParams::default();
        let ranking = Ranking::new(&catalog, &params);
        let sections = ranking.length_sections();

        let lengths: Vec<usize> = sections.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![4, 6, 8]);
        assert_eq!(signatures(&sections[0].groups), vec!["ARHB", "HYHB"]);
        assert_eq!(
            signatures(&sections[1].groups),
            vec!["ARHBHY", "NIPIHB", "HBHYPI"]
        );

        let params = AnalysisParams::builder().exclude_lengths([]).build().unwrap();
        let ranking = Ranking::new(&catalog, &params);
        assert_eq!(ranking.length_sections()[0].length, 2);
    }

    #[test]
    fn test_visualization_set() {
        let catalog = sample_catalog();
        let params = AnalysisParams::builder()
            .top_n(3)
            .exclude_lengths([4])
            .build()
            .unwrap();
        let ranking = Ranking::new(&catalog, &params);
        let set = ranking.visualization_set();

        assert_eq!(signatures(&set), vec!["ARHBHY", "NIPIHB", "HB"]);
        assert!(set.iter().all(|g| g.length() != 4));
        assert!(set
            .windows(2)
            .all(|w| w[0].percent() >= w[1].percent()));

        let entries = ranking.chart_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].length, 6);
        assert_eq!(entries[0].percent, set[0].percent());
    }

    #[test]
    fn test_visualization_set_is_bounded_by_top_n() {
        let catalog = sample_catalog();
        let params = AnalysisParams::builder().top_n(100).build().unwrap();
        let ranking = Ranking::new(&catalog, &params);
        assert_eq!(ranking.visualization_set().len(), 6);

        let params = AnalysisParams::builder().top_n(1).build().unwrap();
        let ranking = Ranking::new(&catalog, &params);
        assert_eq!(signatures(&ranking.visualization_set()), vec!["ARHB"]);
    }

    #[test]
    fn test_best_hypotheses() {
        let catalog = sample_catalog();
        let params = AnalysisParams::default();
        let ranking = Ranking::new(&catalog, &params);

        assert_eq!(
            signatures(&ranking.best_hypotheses()),
            vec!["ARHB", "ARHBHY", "HYHB"]
        );
        assert_eq!(ranking.best_frames(), vec![2, 4, 5]);

        let params = AnalysisParams::builder()
            .best_min_length(8)
            .best_export_count(5)
            .build()
            .unwrap();
        let ranking = Ranking::new(&catalog, &params);
        assert_eq!(ranking.best_frames(), vec![7]);
    }
}
