use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::{Args, Parser};

use dynophore::{
    constants::{
        DEFAULT_BEST_EXPORT_COUNT, DEFAULT_BEST_MIN_LENGTH, DEFAULT_EXCLUDED_FRAME_ID,
        DEFAULT_FRAME_OFFSET, DEFAULT_TOP_N,
    },
    AnalysisLayout, AnalysisParams, DynophoreError, Palette,
};

#[derive(Parser)]
#[command(
    name = "dynophore",
    about = "Rank pharmacophore hypotheses from dynophore feature tables and RMSD",
    version
)]
pub struct Cli {
    /// Directory holding trajrmsd.dat and DYNOPHORE_ANALYSIS (current directory if omitted)
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    #[command(flatten)]
    pub paths: PathOverrides,

    #[command(flatten)]
    pub analysis: AnalysisOptions,

    /// Do not print the summary table
    #[arg(short, long)]
    pub quiet: bool,
}

/// Locations overriding the default layout.
#[derive(Args)]
#[command(next_help_heading = "Paths")]
pub struct PathOverrides {
    /// RMSD series file
    #[arg(long, value_name = "FILE")]
    pub rmsd_file: Option<Utf8PathBuf>,

    /// Directory of the per-frame feature tables
    #[arg(long, value_name = "DIR")]
    pub feature_dir: Option<Utf8PathBuf>,

    /// Directory of the archived hypothesis files
    #[arg(long, value_name = "DIR")]
    pub hypothesis_dir: Option<Utf8PathBuf>,

    /// Output directory of the report and chart data
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<Utf8PathBuf>,

    /// Output directory of the exported best hypotheses
    #[arg(long, value_name = "DIR")]
    pub best_dir: Option<Utf8PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Analysis")]
pub struct AnalysisOptions {
    /// Number of hypotheses in the chart views
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Signature lengths left out of the report sections and charts
    #[arg(long, value_name = "LEN", value_delimiter = ',', default_value = "1,2,3")]
    pub exclude_lengths: Vec<usize>,

    /// Minimum signature length of an exported hypothesis
    #[arg(long, value_name = "LEN", default_value_t = DEFAULT_BEST_MIN_LENGTH)]
    pub best_min_length: usize,

    /// Number of exported hypotheses
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BEST_EXPORT_COUNT)]
    pub best_count: usize,

    /// Frame identifier dropped before merging
    #[arg(
        long,
        value_name = "ID",
        default_value_t = DEFAULT_EXCLUDED_FRAME_ID,
        allow_hyphen_values = true
    )]
    pub excluded_frame: i64,

    /// Shift from the zero-based RMSD frame counter to the feature table index
    #[arg(
        long,
        value_name = "K",
        default_value_t = DEFAULT_FRAME_OFFSET,
        allow_hyphen_values = true
    )]
    pub frame_offset: i64,

    /// Chart colour palette, by name or menu index (1-13)
    #[arg(long, value_name = "PALETTE", default_value = "Set2")]
    pub palette: Palette,
}

impl AnalysisOptions {
    pub fn to_params(&self) -> Result<AnalysisParams, DynophoreError> {
        AnalysisParams::builder()
            .top_n(self.top_n)
            .exclude_lengths(self.exclude_lengths.iter().copied())
            .best_min_length(self.best_min_length)
            .best_export_count(self.best_count)
            .excluded_frame_id(self.excluded_frame)
            .frame_offset(self.frame_offset)
            .palette(self.palette)
            .build()
    }
}

impl Cli {
    pub fn layout(&self) -> Result<AnalysisLayout, DynophoreError> {
        let base_dir = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let mut layout = AnalysisLayout::from_std_path(&base_dir)?;

        let p = &self.paths;
        if let Some(path) = &p.rmsd_file {
            layout = layout.with_rmsd_file(path);
        }
        if let Some(dir) = &p.feature_dir {
            layout = layout.with_feature_table_dir(dir);
        }
        if let Some(dir) = &p.hypothesis_dir {
            layout = layout.with_saved_hypothesis_dir(dir);
        }
        if let Some(dir) = &p.results_dir {
            layout = layout.with_results_dir(dir);
        }
        if let Some(dir) = &p.best_dir {
            layout = layout.with_best_hypotheses_dir(dir);
        }
        Ok(layout)
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_analysis_params() {
        let cli = Cli::try_parse_from(["dynophore"]).unwrap();
        assert_eq!(cli.analysis.to_params().unwrap(), AnalysisParams::default());
    }

    #[test]
    fn parses_lists_and_negative_values() {
        let cli = Cli::try_parse_from([
            "dynophore",
            "--base-dir",
            "/md",
            "--exclude-lengths",
            "2,4",
            "--frame-offset",
            "-1",
            "--palette",
            "9",
            "--results-dir",
            "/out",
        ])
        .unwrap();

        let params = cli.analysis.to_params().unwrap();
        assert!(params.is_excluded_length(4));
        assert!(!params.is_excluded_length(3));
        assert_eq!(params.frame_offset, -1);
        assert_eq!(params.palette, Palette::Dark2);

        let layout = cli.layout().unwrap();
        assert_eq!(layout.results_dir, "/out");
        assert_eq!(layout.rmsd_file, "/md/trajrmsd.dat");
    }

    #[test]
    fn rejects_zero_top_n() {
        let cli = Cli::try_parse_from(["dynophore", "--top-n", "0"]).unwrap();
        assert!(cli.analysis.to_params().is_err());
        assert!(Cli::try_parse_from(["dynophore", "--palette", "viridis"]).is_err());
    }
}
