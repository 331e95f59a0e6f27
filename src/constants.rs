//! # Constants and type definitions for Dynophore
//!
//! This module centralizes the **default analysis parameters**, the **on-disk naming
//! conventions** of a dynophore run, and the **common type aliases** used throughout the
//! crate.
//!
//! ## Overview
//!
//! - Frame and deviation type aliases
//! - Feature-table column conventions
//! - Default ranking / selection parameters
//! - File and directory names of the analysis layout
//!
//! These definitions are shared by the loaders, the merger, the aggregator and the
//! report collaborators.

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Frame identifier.
///
/// Trajectory frame counters are zero-based, merged [`FrameRecord`](crate::hypothesis::FrameRecord)
/// identifiers are shifted by [`DEFAULT_FRAME_OFFSET`]. Both live in the same signed space so that
/// a custom (possibly negative) offset never overflows.
pub type FrameId = i64;

/// Structural deviation of a frame (Å).
pub type Rmsd = f64;

/// A raw feature label read from a per-frame table (e.g. `"HBA12"`).
pub type FeatureLabel = String;

// -------------------------------------------------------------------------------------------------
// Feature tables
// -------------------------------------------------------------------------------------------------

/// Marker printed for frames without a feature table.
pub const UNMATCHED_SIGNATURE: &str = "-";

/// Canonical name of the feature-label column.
pub const FEATURE_LABEL_COLUMN: &str = "Feature_label";

/// Column index used when [`FEATURE_LABEL_COLUMN`] is absent from the header.
pub const FALLBACK_LABEL_COLUMN: usize = 1;

/// Label given to an empty or missing feature cell.
pub const MISSING_LABEL: &str = "nan";

/// Candidate delimiters compared on the header line of every feature table.
pub const PRIMARY_DELIMITER: u8 = b',';
pub const ALTERNATE_DELIMITER: u8 = b';';

/// Comment marker of the RMSD series.
pub const RMSD_COMMENT_CHAR: char = '#';

// -------------------------------------------------------------------------------------------------
// Default analysis parameters
// -------------------------------------------------------------------------------------------------

/// Number of hypotheses kept for the chart views.
pub const DEFAULT_TOP_N: usize = 10;

/// Signature lengths left out of the narrative sections and the chart views.
pub const DEFAULT_EXCLUDE_LENGTHS: [usize; 3] = [1, 2, 3];

/// Minimum signature length for a hypothesis to be exported.
pub const DEFAULT_BEST_MIN_LENGTH: usize = 4;

/// Number of best hypotheses exported.
pub const DEFAULT_BEST_EXPORT_COUNT: usize = 3;

/// Out-of-range artifact frame dropped from the trajectory (post-offset identifier).
pub const DEFAULT_EXCLUDED_FRAME_ID: FrameId = 5002;

/// Shift applied to zero-based trajectory frames to obtain frame identifiers.
pub const DEFAULT_FRAME_OFFSET: FrameId = 1;

// -------------------------------------------------------------------------------------------------
// Analysis layout
// -------------------------------------------------------------------------------------------------

pub const RMSD_FILE_NAME: &str = "trajrmsd.dat";
pub const ANALYSIS_DIR_NAME: &str = "DYNOPHORE_ANALYSIS";
pub const FEATURE_TABLE_DIR_NAME: &str = "PROCESSED_FILES";
pub const SAVED_HYPOTHESIS_DIR_NAME: &str = "saved_HYPOTHESIS";
pub const RESULTS_DIR_NAME: &str = "DYNOPHORE_RESULTS";
pub const BEST_HYPOTHESES_DIR_NAME: &str = "BEST_HYPOTHESES";

/// File name pattern of a per-frame feature table; group 1 is the frame index.
pub const FEATURE_TABLE_PATTERN: &str = r"^(\d+)_hypo_features_table\.csv$";

/// Suffix of an archived hypothesis artifact (`<frame>_hypo.phypo`).
pub const HYPOTHESIS_ARTIFACT_SUFFIX: &str = "_hypo.phypo";

pub const SUMMARY_REPORT_FILE_NAME: &str = "Feature_Summary_Report.html";
pub const PIE_CHART_FILE_NAME: &str = "Feature_PieChart.csv";
pub const BAR_CHART_FILE_NAME: &str = "Feature_BarChart.csv";
pub const STACKED_BAR_CHART_FILE_NAME: &str = "Feature_StackedBarChart.csv";
