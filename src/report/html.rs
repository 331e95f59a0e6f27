//! HTML summary report.
//!
//! Layout of `Feature_Summary_Report.html`:
//!
//! * `Generated Pharmacophore Hypotheses`, then one `<h3>{length}-Feature Combinations</h3>`
//!   list per non-excluded signature length (ascending). Each item reads
//!   `<b>SIG</b>: C frames (P%), Lowest RMSD = R at frame F.` with the rounded values of
//!   the summary.
//! * `Frame-wise Hypothesis Mapping`, a `Frame_ID | RMSD | Features` table over every frame,
//!   unmatched ones included.
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;

use crate::{
    constants::SUMMARY_REPORT_FILE_NAME,
    dynophore_errors::DynophoreError,
    hypothesis::{ranking::Ranking, SummaryRow},
    report::ReportRenderer,
    trajectory::FrameTable,
};

/// Escape the characters with a meaning in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decimal rendering that always keeps a fractional part (`20.0`, `0.5`).
fn fmt_decimal(value: f64) -> String {
    format!("{value:?}")
}

/// Writes the HTML report into an output directory.
#[derive(Debug, Clone)]
pub struct HtmlReport {
    output_dir: Utf8PathBuf,
    title: String,
}

impl HtmlReport {
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: "Dynophore Feature Analysis".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    /// Write the full document.
    pub fn generate<W: Write>(
        &self,
        writer: &mut W,
        ranking: &Ranking<'_>,
        frames: &FrameTable,
    ) -> std::io::Result<()> {
        self.write_header(writer)?;
        Self::write_hypotheses(writer, ranking)?;
        Self::write_mapping(writer, frames)?;
        Self::write_footer(writer)
    }

    fn write_header<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(
            writer,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{}</title>
</head>
<body>
"#,
            escape_html(&self.title)
        )
    }

    fn write_hypotheses<W: Write>(writer: &mut W, ranking: &Ranking<'_>) -> std::io::Result<()> {
        writeln!(writer, "<h2>Generated Pharmacophore Hypotheses</h2>")?;

        for section in ranking.length_sections() {
            writeln!(writer, "<h3>{}-Feature Combinations</h3><ul>", section.length)?;
            for group in section.groups {
                let row = SummaryRow::from(group);
                writeln!(
                    writer,
                    "<li><b>{}</b>: {} frames ({}%), Lowest RMSD = {} at frame {}.</li>",
                    escape_html(&row.features),
                    row.count,
                    fmt_decimal(row.percent),
                    fmt_decimal(row.lowest_rmsd),
                    row.frame
                )?;
            }
            writeln!(writer, "</ul>")?;
        }
        Ok(())
    }

    fn write_mapping<W: Write>(writer: &mut W, frames: &FrameTable) -> std::io::Result<()> {
        write!(
            writer,
            r#"<h2>Frame-wise Hypothesis Mapping</h2>
<table border="1" class="dataframe">
  <thead>
    <tr style="text-align: right;">
      <th>Frame_ID</th>
      <th>RMSD</th>
      <th>Features</th>
    </tr>
  </thead>
  <tbody>
"#
        )?;

        for row in frames.mapping_rows() {
            write!(
                writer,
                "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
                row.frame_id,
                fmt_decimal(row.rmsd),
                escape_html(&row.features)
            )?;
        }

        writeln!(writer, "  </tbody>\n</table>")
    }

    fn write_footer<W: Write>(writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "</body>\n</html>")
    }
}

impl ReportRenderer for HtmlReport {
    fn render_report(
        &self,
        ranking: &Ranking<'_>,
        frames: &FrameTable,
    ) -> Result<Utf8PathBuf, DynophoreError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(SUMMARY_REPORT_FILE_NAME);

        let mut writer = BufWriter::new(File::create(&path)?);
        self.generate(&mut writer, ranking, frames)?;
        writer.flush()?;

        info!("HTML report written to {path}");
        Ok(path)
    }
}

#[cfg(test)]
mod html_report_tests {
    use super::*;
    use crate::{
        config::AnalysisParams,
        feature_tables::FrameSignatureMap,
        hypothesis::aggregator::aggregate,
        signature::Signature,
        trajectory::{merger::merge_trajectory, rmsd_reader::RmsdSample},
    };

    fn frames() -> FrameTable {
        let series: Vec<RmsdSample> = [0.5, 0.3, 0.9, 1.25, 0.75]
            .into_iter()
            .enumerate()
            .map(|(k, rmsd)| RmsdSample {
                frame: k as i64,
                rmsd,
            })
            .collect();
        let signatures: FrameSignatureMap = [
            (1, Signature::from_labels(["HB1", "HB2"])),
            (2, Signature::from_labels(["HB3"])),
            (3, Signature::from_labels(["AR1", "HB4"])),
            (4, Signature::from_labels(["AR1", "HB2", "HY3"])),
        ]
        .into_iter()
        .collect();
        merge_trajectory(&series, &signatures, &AnalysisParams::default())
    }

    fn render(params: &AnalysisParams) -> String {
        let frames = frames();
        let catalog = aggregate(&frames).unwrap();
        let ranking = Ranking::new(&catalog, params);

        let mut output = Vec::new();
        HtmlReport::new("unused")
            .generate(&mut output, &ranking, &frames)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("HBHB"), "HBHB");
    }

    #[test]
    fn test_sections_skip_excluded_lengths() {
        let html = render(&AnalysisParams::default());

        assert!(html.contains("<h2>Generated Pharmacophore Hypotheses</h2>"));
        assert!(html.contains("<h3>4-Feature Combinations</h3>"));
        assert!(html.contains("<h3>6-Feature Combinations</h3>"));
        assert!(!html.contains("<h3>2-Feature Combinations</h3>"));
        assert!(html.contains(
            "<li><b>HBHB</b>: 1 frames (20.0%), Lowest RMSD = 0.5 at frame 1.</li>"
        ));
        assert!(html.contains(
            "<li><b>ARHBHY</b>: 1 frames (20.0%), Lowest RMSD = 1.25 at frame 4.</li>"
        ));
        assert!(
            html.find("4-Feature Combinations").unwrap()
                < html.find("6-Feature Combinations").unwrap()
        );
    }

    #[test]
    fn test_mapping_is_never_filtered() {
        let html = render(&AnalysisParams::default());
        let mapping = &html[html.find("Frame-wise Hypothesis Mapping").unwrap()..];

        assert_eq!(mapping.matches("<tr>").count(), 5);
        assert!(mapping.contains("<td>HB</td>"));
        assert!(mapping.contains("<td>-</td>"));
        assert!(mapping.contains("<td>0.75</td>"));
    }

    #[test]
    fn test_no_exclusion_shows_every_length() {
        let params = AnalysisParams::builder().exclude_lengths([]).build().unwrap();
        let html = render(&params);
        assert!(html.contains("<h3>2-Feature Combinations</h3>"));
        assert!(html.contains("<li><b>HB</b>: 1 frames (20.0%), Lowest RMSD = 0.3 at frame 2.</li>"));
    }
}
