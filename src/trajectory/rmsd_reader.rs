//! # RMSD series reader
//!
//! Parse the per-frame structural deviation series of a trajectory (`trajrmsd.dat`), a
//! whitespace-separated two-column text file:
//!
//! ```text
//! # RMSD of the ligand heavy atoms
//! frame  rmsd
//! 0      0.000
//! 1      0.412
//! 2      0.530   # comments may follow data
//! ```
//!
//! ## Rules
//! -----------------
//! * Everything after [`RMSD_COMMENT_CHAR`] on a line is ignored; blank lines are skipped.
//! * The **first remaining row is discarded** without being parsed (column header or
//!   reference frame).
//! * Every other row must hold exactly two tokens: an integer frame counter and a
//!   finite, non-negative deviation.
//!
//! Any malformed row is fatal for the run: aggregation has no meaning without the full
//! deviation series. Errors carry the 1-based line number and a [`ParseRmsdError`].
use camino::Utf8Path;
use log::info;
use nom::{
    bytes::complete::take_till1,
    character::complete::{multispace0, multispace1},
    combinator::all_consuming,
    sequence::{preceded, separated_pair, terminated},
    IResult, Parser,
};
use thiserror::Error;

use crate::{
    constants::{FrameId, Rmsd, RMSD_COMMENT_CHAR},
    dynophore_errors::DynophoreError,
};

/// Line-level parsing errors of the RMSD series.
///
/// Variants
/// -----------------
/// * `ColumnCount` – The row does not hold exactly two whitespace-separated tokens.
/// * `InvalidFrame` – The first token is not an integer; payload carries the token.
/// * `InvalidRmsd` – The second token is not a finite, non-negative number; payload carries the token.
#[derive(Error, Debug, PartialEq)]
pub enum ParseRmsdError {
    #[error("Expected two columns (frame, rmsd): {0}")]
    ColumnCount(String),
    #[error("Invalid frame counter: {0}")]
    InvalidFrame(String),
    #[error("Invalid RMSD value: {0}")]
    InvalidRmsd(String),
}

/// One row of the deviation series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsdSample {
    /// Zero-based trajectory frame counter.
    pub frame: FrameId,
    /// Structural deviation of that frame.
    pub rmsd: Rmsd,
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace).parse(input)
}

fn parse_two_tokens(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(preceded(
        multispace0,
        terminated(separated_pair(token, multispace1, token), multispace0),
    ))
    .parse(input)
}

/// Strip the trailing comment of a line.
fn strip_comment(line: &str) -> &str {
    line.split_once(RMSD_COMMENT_CHAR)
        .map_or(line, |(data, _)| data)
}

/// Parse a single data row.
fn parse_rmsd_line(line: &str) -> Result<RmsdSample, ParseRmsdError> {
    let (_, (frame, rmsd)) =
        parse_two_tokens(line).map_err(|_| ParseRmsdError::ColumnCount(line.trim().to_string()))?;

    let frame = frame
        .parse::<FrameId>()
        .map_err(|_| ParseRmsdError::InvalidFrame(frame.to_string()))?;

    let rmsd = rmsd
        .parse::<Rmsd>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ParseRmsdError::InvalidRmsd(rmsd.to_string()))?;

    Ok(RmsdSample { frame, rmsd })
}

/// Parse a full deviation series from text.
///
/// Arguments
/// -----------------
/// * `content` – The text of the series.
///
/// Return
/// ----------
/// * The samples in file order, first data row excluded.
///
/// Errors
/// ----------
/// * [`DynophoreError::EmptyRmsdSeries`] – the text holds no row at all.
/// * [`DynophoreError::RmsdParseError`] – a row after the first one is malformed.
pub fn parse_rmsd_series(content: &str) -> Result<Vec<RmsdSample>, DynophoreError> {
    let mut rows = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line)))
        .filter(|(_, line)| !line.trim().is_empty());

    if rows.next().is_none() {
        return Err(DynophoreError::EmptyRmsdSeries(
            "no data row after comments".into(),
        ));
    }

    rows.map(|(line_number, line)| {
        parse_rmsd_line(line).map_err(|source| DynophoreError::RmsdParseError {
            line: line_number,
            source,
        })
    })
    .collect()
}

/// Read and parse the deviation series stored at `path`.
///
/// See also
/// ------------
/// * [`parse_rmsd_series`] – Parsing rules.
pub fn read_rmsd_file(path: &Utf8Path) -> Result<Vec<RmsdSample>, DynophoreError> {
    let content = std::fs::read_to_string(path)?;
    let samples = parse_rmsd_series(&content).map_err(|e| match e {
        DynophoreError::EmptyRmsdSeries(_) => DynophoreError::EmptyRmsdSeries(path.to_string()),
        other => other,
    })?;
    info!("Read {} RMSD samples from {path}", samples.len());
    Ok(samples)
}
