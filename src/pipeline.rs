//! # Analysis pipeline
//!
//! End-to-end run of a dynophore feature analysis:
//!
//! ```text
//! feature tables ─► FeatureTableLoader ─┐
//!                                        ├─► merge_trajectory ─► aggregate ─► Ranking ─► collaborators
//! trajrmsd.dat ───► read_rmsd_file ─────┘
//! ```
//!
//! ## Failure model
//!
//! * A feature table that cannot be read or parsed is skipped and logged.
//! * An unparsable RMSD series, or a run without any matched hypothesis, aborts the analysis
//!   **before** anything is written: the report, the chart data and the exported artifacts
//!   are produced together or not at all.
//! * A missing archived artifact is only a warning, listed in the [`ExportReport`].
//!
//! ## Layout
//!
//! [`AnalysisLayout`] resolves every location from a base directory:
//!
//! | Role                     | Default location                          |
//! |--------------------------|-------------------------------------------|
//! | RMSD series              | `trajrmsd.dat`                            |
//! | Feature tables           | `DYNOPHORE_ANALYSIS/PROCESSED_FILES`      |
//! | Archived hypotheses      | `DYNOPHORE_ANALYSIS/saved_HYPOTHESIS`     |
//! | Report and chart data    | `DYNOPHORE_RESULTS`                       |
//! | Exported best hypotheses | `BEST_HYPOTHESES`                         |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dynophore::{config::AnalysisParams, pipeline::{run, AnalysisLayout}};
//!
//! let layout = AnalysisLayout::from_base_dir("/data/md_run");
//! let outcome = run(&layout, &AnalysisParams::default()).unwrap();
//! println!("{} hypotheses", outcome.catalog.len());
//! ```
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;

use crate::{
    config::AnalysisParams,
    constants::{
        ANALYSIS_DIR_NAME, BEST_HYPOTHESES_DIR_NAME, FEATURE_TABLE_DIR_NAME, RESULTS_DIR_NAME,
        RMSD_FILE_NAME, SAVED_HYPOTHESIS_DIR_NAME,
    },
    dynophore_errors::DynophoreError,
    feature_tables::{sources::TableSource, FeatureTableLoader},
    hypothesis::{aggregator::aggregate, ranking::Ranking, HypothesisCatalog, SummaryRow},
    report::{
        charts::CsvChartWriter, export::FsArtifactExporter, html::HtmlReport, ArtifactExporter,
        ChartRenderer, ExportReport, ReportRenderer,
    },
    trajectory::{
        merger::merge_trajectory,
        rmsd_reader::{read_rmsd_file, RmsdSample},
        FrameTable,
    },
};

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisLayout {
    pub base_dir: Utf8PathBuf,
    pub rmsd_file: Utf8PathBuf,
    pub feature_table_dir: Utf8PathBuf,
    pub saved_hypothesis_dir: Utf8PathBuf,
    pub results_dir: Utf8PathBuf,
    pub best_hypotheses_dir: Utf8PathBuf,
}

impl AnalysisLayout {
    /// Default layout below `base_dir`.
    pub fn from_base_dir(base_dir: impl Into<Utf8PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let analysis_dir = base_dir.join(ANALYSIS_DIR_NAME);
        AnalysisLayout {
            rmsd_file: base_dir.join(RMSD_FILE_NAME),
            feature_table_dir: analysis_dir.join(FEATURE_TABLE_DIR_NAME),
            saved_hypothesis_dir: analysis_dir.join(SAVED_HYPOTHESIS_DIR_NAME),
            results_dir: base_dir.join(RESULTS_DIR_NAME),
            best_hypotheses_dir: base_dir.join(BEST_HYPOTHESES_DIR_NAME),
            base_dir,
        }
    }

    /// Same as [`from_base_dir`](Self::from_base_dir) for a `std` path.
    ///
    /// Errors
    /// ----------
    /// * [`DynophoreError::Utf8PathError`] – the path is not valid UTF-8.
    pub fn from_std_path(base_dir: &Path) -> Result<Self, DynophoreError> {
        let base_dir = Utf8Path::from_path(base_dir).ok_or_else(|| {
            DynophoreError::Utf8PathError(format!("{} is not valid UTF-8", base_dir.display()))
        })?;
        Ok(Self::from_base_dir(base_dir))
    }

    pub fn with_rmsd_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.rmsd_file = path.into();
        self
    }
    pub fn with_feature_table_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.feature_table_dir = path.into();
        self
    }
    pub fn with_saved_hypothesis_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.saved_hypothesis_dir = path.into();
        self
    }
    pub fn with_results_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.results_dir = path.into();
        self
    }
    pub fn with_best_hypotheses_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.best_hypotheses_dir = path.into();
        self
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub frames: FrameTable,
    pub catalog: HypothesisCatalog,
    /// Full summary, by decreasing count.
    pub summary: Vec<SummaryRow>,
    pub report_path: Utf8PathBuf,
    pub chart_paths: Vec<Utf8PathBuf>,
    pub export: ExportReport,
}

/// Analysis driver, generic over its output collaborators.
pub struct Analysis<R, C, E> {
    params: AnalysisParams,
    loader: FeatureTableLoader,
    reporter: R,
    charts: C,
    exporter: E,
}

impl Analysis<HtmlReport, CsvChartWriter, FsArtifactExporter> {
    /// Driver writing the HTML report, the chart CSVs and the exported hypotheses to the
    /// locations of `layout`.
    pub fn for_layout(layout: &AnalysisLayout, params: AnalysisParams) -> Self {
        Analysis::new(
            params,
            HtmlReport::new(&layout.results_dir),
            CsvChartWriter::new(&layout.results_dir),
            FsArtifactExporter::new(&layout.saved_hypothesis_dir, &layout.best_hypotheses_dir),
        )
    }
}

impl<R, C, E> Analysis<R, C, E>
where
    R: ReportRenderer,
    C: ChartRenderer,
    E: ArtifactExporter,
{
    pub fn new(params: AnalysisParams, reporter: R, charts: C, exporter: E) -> Self {
        Analysis {
            params,
            loader: FeatureTableLoader::default(),
            reporter,
            charts,
            exporter,
        }
    }

    pub fn with_loader(mut self, loader: FeatureTableLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Compute the frame table and the hypothesis catalog, without writing anything.
    ///
    /// Arguments
    /// -----------------
    /// * `sources` – Per-frame feature tables.
    /// * `series` – The RMSD samples of the trajectory.
    ///
    /// Errors
    /// ----------
    /// * [`DynophoreError::NoHypothesisMatched`] – no frame matched a feature table.
    pub fn analyze<I, S>(
        &self,
        sources: I,
        series: &[RmsdSample],
    ) -> Result<(FrameTable, HypothesisCatalog), DynophoreError>
    where
        I: IntoIterator<Item = S>,
        S: TableSource,
    {
        let signatures = self.loader.load(sources);
        let frames = merge_trajectory(series, &signatures, &self.params);
        let catalog = aggregate(&frames)?;
        Ok((frames, catalog))
    }

    /// Hand the results to the collaborators.
    pub fn publish(
        &self,
        frames: FrameTable,
        catalog: HypothesisCatalog,
    ) -> Result<AnalysisOutcome, DynophoreError> {
        let ranking = Ranking::new(&catalog, &self.params);

        let report_path = self.reporter.render_report(&ranking, &frames)?;
        let chart_paths = self
            .charts
            .render_charts(&ranking.chart_entries(), self.params.palette)?;
        let export = self.exporter.export(&ranking.best_frames())?;
        let summary = ranking.summary_rows();

        Ok(AnalysisOutcome {
            frames,
            catalog,
            summary,
            report_path,
            chart_paths,
            export,
        })
    }

    /// Run the full analysis on the inputs of `layout`.
    pub fn run(&self, layout: &AnalysisLayout) -> Result<AnalysisOutcome, DynophoreError> {
        info!("Starting dynophore analysis in {}", layout.base_dir);

        let signatures = self.loader.load_dir(&layout.feature_table_dir);
        let series = read_rmsd_file(&layout.rmsd_file)?;
        let frames = merge_trajectory(&series, &signatures, &self.params);
        let catalog = aggregate(&frames)?;

        let outcome = self.publish(frames, catalog)?;
        info!("Results saved in {}", layout.results_dir);
        info!("Best hypotheses saved in {}", layout.best_hypotheses_dir);
        Ok(outcome)
    }
}

/// Run an analysis with the default collaborators.
///
/// Arguments
/// -----------------
/// * `layout` – Input and output locations.
/// * `params` – Validated analysis parameters.
///
/// Return
/// ----------
/// * The [`AnalysisOutcome`], or the fatal error that stopped the run before any output was
///   written.
pub fn run(
    layout: &AnalysisLayout,
    params: &AnalysisParams,
) -> Result<AnalysisOutcome, DynophoreError> {
    Analysis::for_layout(layout, params.clone()).run(layout)
}
