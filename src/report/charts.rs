//! # Chart data files
//!
//! The three chart views of the visualization set, written as CSV data ready to be plotted:
//!
//! | File                          | Rows                                      |
//! |-------------------------------|-------------------------------------------|
//! | `Feature_PieChart.csv`        | one slice per hypothesis, with its label  |
//! | `Feature_BarChart.csv`        | hypotheses ranked by decreasing percent   |
//! | `Feature_StackedBarChart.csv` | `(length, hypothesis)` pairs, by length   |
//!
//! All three files read the same entries and carry the selected palette in a `Palette`
//! column. Percentages are rounded to one decimal like the summary.
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{
    config::Palette,
    constants::{BAR_CHART_FILE_NAME, PIE_CHART_FILE_NAME, STACKED_BAR_CHART_FILE_NAME},
    dynophore_errors::DynophoreError,
    hypothesis::{ranking::ChartEntry, round_to},
    report::ChartRenderer,
};

#[derive(Debug, Serialize)]
struct PieSlice<'a> {
    #[serde(rename = "Features")]
    features: &'a str,
    #[serde(rename = "Percent")]
    percent: f64,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Palette")]
    palette: &'static str,
}

#[derive(Debug, Serialize)]
struct BarRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Features")]
    features: &'a str,
    #[serde(rename = "Percent")]
    percent: f64,
    #[serde(rename = "Palette")]
    palette: &'static str,
}

#[derive(Debug, Serialize)]
struct StackedRow<'a> {
    #[serde(rename = "Length")]
    length: usize,
    #[serde(rename = "Features")]
    features: &'a str,
    #[serde(rename = "Percent")]
    percent: f64,
    #[serde(rename = "Palette")]
    palette: &'static str,
}

/// Writes the chart views as CSV files into an output directory.
#[derive(Debug, Clone)]
pub struct CsvChartWriter {
    output_dir: Utf8PathBuf,
}

impl CsvChartWriter {
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    fn write_rows<T: Serialize>(
        &self,
        file_name: &str,
        rows: impl IntoIterator<Item = T>,
    ) -> Result<Utf8PathBuf, DynophoreError> {
        let path = self.output_dir.join(file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(path)
    }
}

impl ChartRenderer for CsvChartWriter {
    fn render_charts(
        &self,
        entries: &[ChartEntry],
        palette: Palette,
    ) -> Result<Vec<Utf8PathBuf>, DynophoreError> {
        fs::create_dir_all(&self.output_dir)?;
        let palette = palette.name();

        let pie = entries.iter().map(|e| {
            let percent = round_to(e.percent, 1);
            PieSlice {
                features: &e.signature,
                percent,
                label: format!("{} ({percent:.1}%)", e.signature),
                palette,
            }
        });

        let bar = entries.iter().enumerate().map(|(k, e)| BarRow {
            rank: k + 1,
            features: &e.signature,
            percent: round_to(e.percent, 1),
            palette,
        });

        let stacked = entries
            .iter()
            .sorted_by(|a, b| a.length.cmp(&b.length).then_with(|| a.signature.cmp(&b.signature)))
            .map(|e| StackedRow {
                length: e.length,
                features: &e.signature,
                percent: round_to(e.percent, 1),
                palette,
            });

        let written = vec![
            self.write_rows(PIE_CHART_FILE_NAME, pie)?,
            self.write_rows(BAR_CHART_FILE_NAME, bar)?,
            self.write_rows(STACKED_BAR_CHART_FILE_NAME, stacked)?,
        ];

        info!(
            "Chart data for {} hypotheses written to {} (palette {palette})",
            entries.len(),
            self.output_dir
        );
        Ok(written)
    }
}
