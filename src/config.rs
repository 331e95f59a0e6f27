//! # Analysis parameters
//!
//! This module defines the [`AnalysisParams`] configuration struct and its builder, which
//! control how frames are merged with the RMSD series and how hypotheses are selected for
//! the report, the chart views and the best-hypothesis export.
//!
//! ## Parameters
//!
//! | Field               | Default     | Role                                                        |
//! |---------------------|-------------|-------------------------------------------------------------|
//! | `top_n`             | `10`        | Hypotheses kept for the chart views                         |
//! | `exclude_lengths`   | `{1, 2, 3}` | Signature lengths left out of narrative sections and charts |
//! | `best_min_length`   | `4`         | Minimum signature length of an exported hypothesis          |
//! | `best_export_count` | `3`         | Number of exported hypotheses                               |
//! | `excluded_frame_id` | `5002`      | Artifact frame identifier dropped before merging            |
//! | `frame_offset`      | `+1`        | Shift from zero-based frame counter to frame identifier     |
//! | `palette`           | `Set2`      | Colour palette forwarded to the chart renderer              |
//!
//! ## Example
//!
//! ```rust
//! use dynophore::config::{AnalysisParams, Palette};
//!
//! let params = AnalysisParams::builder()
//!     .top_n(5)
//!     .exclude_lengths([1, 2])
//!     .palette(Palette::Dark2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.top_n, 5);
//! assert!(AnalysisParams::builder().top_n(0).build().is_err());
//! ```
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    constants::{
        FrameId, DEFAULT_BEST_EXPORT_COUNT, DEFAULT_BEST_MIN_LENGTH, DEFAULT_EXCLUDED_FRAME_ID,
        DEFAULT_EXCLUDE_LENGTHS, DEFAULT_FRAME_OFFSET, DEFAULT_TOP_N,
    },
    dynophore_errors::DynophoreError,
};

/// Colour palettes understood by the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    Set1,
    #[default]
    Set2,
    Set3,
    Pastel1,
    Pastel2,
    Tab10,
    Tab20,
    Paired,
    Dark2,
    Accent,
    Coolwarm,
    Spectral,
    YlGnBu,
}

impl Palette {
    /// All palettes, in menu order (1-based indices accepted by [`FromStr`]).
    pub const ALL: [Palette; 13] = [
        Palette::Set1,
        Palette::Set2,
        Palette::Set3,
        Palette::Pastel1,
        Palette::Pastel2,
        Palette::Tab10,
        Palette::Tab20,
        Palette::Paired,
        Palette::Dark2,
        Palette::Accent,
        Palette::Coolwarm,
        Palette::Spectral,
        Palette::YlGnBu,
    ];

    /// Conventional colormap name.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Set1 => "Set1",
            Palette::Set2 => "Set2",
            Palette::Set3 => "Set3",
            Palette::Pastel1 => "Pastel1",
            Palette::Pastel2 => "Pastel2",
            Palette::Tab10 => "tab10",
            Palette::Tab20 => "tab20",
            Palette::Paired => "Paired",
            Palette::Dark2 => "Dark2",
            Palette::Accent => "Accent",
            Palette::Coolwarm => "coolwarm",
            Palette::Spectral => "Spectral",
            Palette::YlGnBu => "YlGnBu",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = DynophoreError;

    /// Parse a palette from its name (case-insensitive) or its 1-based menu index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Palette::ALL.get(i).copied())
                .ok_or_else(|| {
                    DynophoreError::InvalidAnalysisParameter(format!(
                        "palette index must be within 1..={}, got {index}",
                        Palette::ALL.len()
                    ))
                });
        }

        Palette::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DynophoreError::InvalidAnalysisParameter(format!("unknown palette {s}")))
    }
}

/// Configuration of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub top_n: usize,
    pub exclude_lengths: BTreeSet<usize>,
    pub best_min_length: usize,
    pub best_export_count: usize,
    pub excluded_frame_id: FrameId,
    pub frame_offset: FrameId,
    pub palette: Palette,
}

impl AnalysisParams {
    /// Equivalent to [`AnalysisParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AnalysisParamsBuilder {
        AnalysisParamsBuilder::new()
    }

    /// True when hypotheses of this signature length are left out of the narrative
    /// sections and the chart views.
    pub fn is_excluded_length(&self, length: usize) -> bool {
        self.exclude_lengths.contains(&length)
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams {
            top_n: DEFAULT_TOP_N,
            exclude_lengths: DEFAULT_EXCLUDE_LENGTHS.into_iter().collect(),
            best_min_length: DEFAULT_BEST_MIN_LENGTH,
            best_export_count: DEFAULT_BEST_EXPORT_COUNT,
            excluded_frame_id: DEFAULT_EXCLUDED_FRAME_ID,
            frame_offset: DEFAULT_FRAME_OFFSET,
            palette: Palette::default(),
        }
    }
}

/// Builder for [`AnalysisParams`], with validation.
#[derive(Debug, Clone)]
pub struct AnalysisParamsBuilder {
    params: AnalysisParams,
}

impl Default for AnalysisParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: AnalysisParams::default(),
        }
    }

    pub fn top_n(mut self, v: usize) -> Self {
        self.params.top_n = v;
        self
    }
    pub fn exclude_lengths(mut self, v: impl IntoIterator<Item = usize>) -> Self {
        self.params.exclude_lengths = v.into_iter().collect();
        self
    }
    pub fn best_min_length(mut self, v: usize) -> Self {
        self.params.best_min_length = v;
        self
    }
    pub fn best_export_count(mut self, v: usize) -> Self {
        self.params.best_export_count = v;
        self
    }
    pub fn excluded_frame_id(mut self, v: FrameId) -> Self {
        self.params.excluded_frame_id = v;
        self
    }
    pub fn frame_offset(mut self, v: FrameId) -> Self {
        self.params.frame_offset = v;
        self
    }
    pub fn palette(mut self, v: Palette) -> Self {
        self.params.palette = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `top_n >= 1`
    /// * `best_export_count >= 1`
    /// * `best_min_length >= 1`
    ///
    /// Returns
    /// -----------------
    /// * `Err(DynophoreError::InvalidAnalysisParameter)` naming the first rule that fails.
    pub fn build(self) -> Result<AnalysisParams, DynophoreError> {
        let p = &self.params;

        if p.top_n == 0 {
            return Err(DynophoreError::InvalidAnalysisParameter(
                "top_n must be >= 1".into(),
            ));
        }
        if p.best_export_count == 0 {
            return Err(DynophoreError::InvalidAnalysisParameter(
                "best_export_count must be >= 1".into(),
            ));
        }
        if p.best_min_length == 0 {
            return Err(DynophoreError::InvalidAnalysisParameter(
                "best_min_length must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}
