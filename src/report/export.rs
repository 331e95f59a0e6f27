//! Export of the archived hypothesis files of the best frames.
//!
//! Each frame `F` maps to `<source_dir>/F_hypo.phypo`, copied to `<target_dir>/F_hypo.phypo`.
//! A file missing from the archive is logged and recorded in
//! [`ExportReport::missing`](crate::report::ExportReport), the remaining frames are still
//! exported.
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};

use crate::{
    constants::{FrameId, HYPOTHESIS_ARTIFACT_SUFFIX},
    dynophore_errors::DynophoreError,
    report::{ArtifactExporter, ExportReport},
};

/// File name of the archived hypothesis of a frame.
pub fn artifact_file_name(frame: FrameId) -> String {
    format!("{frame}{HYPOTHESIS_ARTIFACT_SUFFIX}")
}

/// Copies archived hypotheses between two directories.
#[derive(Debug, Clone)]
pub struct FsArtifactExporter {
    source_dir: Utf8PathBuf,
    target_dir: Utf8PathBuf,
}

impl FsArtifactExporter {
    pub fn new(source_dir: impl Into<Utf8PathBuf>, target_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Utf8Path {
        &self.source_dir
    }

    pub fn target_dir(&self) -> &Utf8Path {
        &self.target_dir
    }
}

impl ArtifactExporter for FsArtifactExporter {
    fn export(&self, frames: &[FrameId]) -> Result<ExportReport, DynophoreError> {
        fs::create_dir_all(&self.target_dir)?;

        let mut report = ExportReport::default();
        for &frame in frames {
            let file_name = artifact_file_name(frame);
            let source = self.source_dir.join(&file_name);

            if !source.is_file() {
                warn!("{file_name} not found in {}", self.source_dir);
                report.missing.push(frame);
                continue;
            }

            let target = self.target_dir.join(&file_name);
            fs::copy(&source, &target)?;
            report.copied.push(target);
        }

        info!(
            "Exported {} best hypotheses to {} ({} missing)",
            report.copied.len(),
            self.target_dir,
            report.missing.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod artifact_export_tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(artifact_file_name(42), "42_hypo.phypo");
    }

    #[test]
    fn test_copies_present_and_reports_missing() {
        let tmp = tempdir().unwrap();
        let base = Utf8Path::from_path(tmp.path()).unwrap();
        let source = base.join("saved_HYPOTHESIS");
        let target = base.join("BEST_HYPOTHESES");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("4_hypo.phypo"), "hypo 4").unwrap();
        fs::write(source.join("9_hypo.phypo"), "hypo 9").unwrap();

        let exporter = FsArtifactExporter::new(&source, &target);
        let report = exporter.export(&[4, 7, 9]).unwrap();

        assert_eq!(
            report,
            ExportReport {
                copied: vec![target.join("4_hypo.phypo"), target.join("9_hypo.phypo")],
                missing: vec![7],
            }
        );
        assert_eq!(
            fs::read_to_string(target.join("9_hypo.phypo")).unwrap(),
            "hypo 9"
        );
        assert!(!target.join("7_hypo.phypo").exists());
    }

    #[test]
    fn test_missing_archive_directory() {
        let tmp = tempdir().unwrap();
        let base = Utf8Path::from_path(tmp.path()).unwrap();
        let exporter = FsArtifactExporter::new(base.join("absent"), base.join("out"));

        let report = exporter.export(&[1, 2]).unwrap();
        assert!(report.copied.is_empty());
        assert_eq!(report.missing, vec![1, 2]);
        assert!(base.join("out").is_dir());
    }
}
