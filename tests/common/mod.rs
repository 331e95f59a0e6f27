#![allow(dead_code)]

use std::fs;

use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use dynophore::{hypothesis::HypothesisGroup, AnalysisLayout};

/// Scratch analysis directory laid out like a real dynophore run.
pub struct Fixture {
    _tmp: TempDir,
    pub layout: AnalysisLayout,
}

impl Fixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let layout = AnalysisLayout::from_base_dir(base);
        fs::create_dir_all(&layout.feature_table_dir).unwrap();
        fs::create_dir_all(&layout.saved_hypothesis_dir).unwrap();

        Fixture { _tmp: tmp, layout }
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.layout.base_dir
    }

    /// Write `<frame>_hypo_features_table.csv` with the given labels.
    pub fn write_table(&self, frame: i64, labels: &[&str], delimiter: char) {
        let mut content = format!("Index{delimiter}Feature_label{delimiter}Type\n");
        for (i, label) in labels.iter().enumerate() {
            content.push_str(&format!("{i}{delimiter}{label}{delimiter}x\n"));
        }
        self.write_raw_table(&format!("{frame}_hypo_features_table.csv"), &content);
    }

    pub fn write_raw_table(&self, file_name: &str, content: &str) {
        fs::write(self.layout.feature_table_dir.join(file_name), content).unwrap();
    }

    /// Write the RMSD series, zero-based frame counters, behind a comment and a header row.
    pub fn write_rmsd(&self, rmsd: &[f64]) {
        let mut content = String::from("# ligand RMSD\nframe rmsd\n");
        for (k, value) in rmsd.iter().enumerate() {
            content.push_str(&format!("{k} {value}\n"));
        }
        self.write_raw_rmsd(&content);
    }

    pub fn write_raw_rmsd(&self, content: &str) {
        fs::write(&self.layout.rmsd_file, content).unwrap();
    }

    pub fn write_artifact(&self, frame: i64) {
        fs::write(
            self.layout
                .saved_hypothesis_dir
                .join(format!("{frame}_hypo.phypo")),
            format!("hypothesis of frame {frame}\n"),
        )
        .unwrap();
    }

    /// True when the run left no output at all.
    pub fn no_outputs(&self) -> bool {
        !self.layout.results_dir.exists() && !self.layout.best_hypotheses_dir.exists()
    }
}

pub fn assert_group(
    group: &HypothesisGroup,
    count: usize,
    percent: f64,
    lowest_rmsd: f64,
    representative_frame: i64,
) {
    assert_eq!(group.count(), count, "count of {}", group.signature());
    assert_relative_eq!(group.percent(), percent, epsilon = 1e-9);
    assert_relative_eq!(group.lowest_rmsd(), lowest_rmsd);
    assert_eq!(
        group.representative_frame(),
        representative_frame,
        "representative frame of {}",
        group.signature()
    );
}
