//! # Report collaborators
//!
//! Everything the analysis hands its results to once the hypothesis catalog is built. Each
//! concern sits behind a trait so the pipeline can be driven with other backends (or test
//! doubles):
//!
//! * [`ReportRenderer`] – narrative summary and frame-wise mapping,
//!   [`HtmlReport`](crate::report::html::HtmlReport) by default.
//! * [`ChartRenderer`] – the pie, ranked bar and length-stratified stacked bar views,
//!   written as data files by [`CsvChartWriter`](crate::report::charts::CsvChartWriter).
//! * [`ArtifactExporter`] – copy of the archived hypothesis file of each best frame,
//!   [`FsArtifactExporter`](crate::report::export::FsArtifactExporter).
//!
//! Renderers receive the ranked views and return the paths they wrote. A missing artifact
//! is not an error: exporters report it in [`ExportReport::missing`].
use camino::Utf8PathBuf;

use crate::{
    config::Palette,
    constants::FrameId,
    dynophore_errors::DynophoreError,
    hypothesis::ranking::{ChartEntry, Ranking},
    trajectory::FrameTable,
};

pub mod charts;
pub mod export;
pub mod html;

pub trait ReportRenderer {
    /// Render the hypothesis summary and the frame-wise mapping.
    fn render_report(
        &self,
        ranking: &Ranking<'_>,
        frames: &FrameTable,
    ) -> Result<Utf8PathBuf, DynophoreError>;
}

pub trait ChartRenderer {
    /// Render the chart views of the visualization set.
    ///
    /// `entries` is ordered by decreasing percent and holds at most `top_n` items.
    fn render_charts(
        &self,
        entries: &[ChartEntry],
        palette: Palette,
    ) -> Result<Vec<Utf8PathBuf>, DynophoreError>;
}

pub trait ArtifactExporter {
    /// Export the archived artifact of each frame, in order.
    fn export(&self, frames: &[FrameId]) -> Result<ExportReport, DynophoreError>;
}

/// Outcome of an artifact export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Destination paths of the copied artifacts.
    pub copied: Vec<Utf8PathBuf>,
    /// Frames whose artifact was not found.
    pub missing: Vec<FrameId>,
}
