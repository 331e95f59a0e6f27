//! # Labeled delimited table reader
//!
//! One parsing policy, applied identically to every per-frame feature table:
//!
//! 1. **Delimiter sniffing** – the header line is inspected and the delimiter occurring
//!    most often between `;` and `,` wins (`,` on ties). The decision is taken **per table**;
//!    a directory may mix both dialects.
//! 2. **Column resolution** – the column named [`FEATURE_LABEL_COLUMN`] is used when present,
//!    otherwise the column at index [`FALLBACK_LABEL_COLUMN`].
//! 3. **Label extraction** – every data row yields the cell of the resolved column, in row
//!    order. An empty cell, or a row too short to reach the column, yields [`MISSING_LABEL`].
//!    A row with more fields than the header makes the whole table malformed.
//!
//! Quoting follows RFC 4180 through the [`csv`] crate.
use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::{
    constants::{
        FeatureLabel, ALTERNATE_DELIMITER, FALLBACK_LABEL_COLUMN, FEATURE_LABEL_COLUMN,
        MISSING_LABEL, PRIMARY_DELIMITER,
    },
    dynophore_errors::DynophoreError,
};

/// Column resolution rules of a feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelColumnRules {
    /// Header name looked up first.
    pub column_name: String,
    /// Positional column used when the name is absent.
    pub fallback_index: usize,
}

impl Default for LabelColumnRules {
    fn default() -> Self {
        LabelColumnRules {
            column_name: FEATURE_LABEL_COLUMN.to_string(),
            fallback_index: FALLBACK_LABEL_COLUMN,
        }
    }
}

impl LabelColumnRules {
    /// Resolve the label column index from a parsed header.
    ///
    /// Return
    /// ----------
    /// * The index of `column_name` if present, else `fallback_index` if the header is wide
    ///   enough, else `None`.
    pub fn resolve(&self, header: &StringRecord) -> Option<usize> {
        header
            .iter()
            .position(|name| name == self.column_name)
            .or_else(|| (self.fallback_index < header.len()).then_some(self.fallback_index))
    }
}

/// Pick the field delimiter of a table from its header line.
///
/// `;` is chosen only when it occurs strictly more often than `,`.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let count = |d: u8| header_line.bytes().filter(|&b| b == d).count();
    if count(ALTERNATE_DELIMITER) > count(PRIMARY_DELIMITER) {
        ALTERNATE_DELIMITER
    } else {
        PRIMARY_DELIMITER
    }
}

/// Extract the feature labels of one table.
///
/// Arguments
/// -----------------
/// * `content` – Full text of the table, header line included.
/// * `rules` – Label column resolution rules.
///
/// Return
/// ----------
/// * The labels of the resolved column in row order (possibly empty when the table has a
///   header but no data row).
///
/// Errors
/// ----------
/// * [`DynophoreError::EmptyFeatureTable`] – no header line.
/// * [`DynophoreError::MissingFeatureColumn`] – neither the named nor the fallback column exists.
/// * [`DynophoreError::MalformedFeatureTable`] – a data row is wider than the header.
/// * [`DynophoreError::CsvError`] – malformed CSV content.
pub fn read_feature_labels(
    content: &str,
    rules: &LabelColumnRules,
) -> Result<Vec<FeatureLabel>, DynophoreError> {
    let header_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| DynophoreError::EmptyFeatureTable(content.chars().take(40).collect()))?;

    let delimiter = sniff_delimiter(header_line);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header = reader.headers()?.clone();
    let column = rules
        .resolve(&header)
        .ok_or_else(|| DynophoreError::MissingFeatureColumn(header_line.to_string()))?;

    debug!(
        "feature table: delimiter '{}', label column #{column} ({:?})",
        delimiter as char,
        header.get(column).unwrap_or_default()
    );

    let width = header.len();
    reader
        .records()
        .map(|record| {
            let record = record?;
            if record.len() > width {
                return Err(DynophoreError::MalformedFeatureTable(format!(
                    "line {} has {} fields, header has {width}",
                    record.position().map_or(0, |p| p.line()),
                    record.len()
                )));
            }
            Ok(match record.get(column) {
                Some(cell) if !cell.is_empty() => cell.to_string(),
                _ => MISSING_LABEL.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod table_reader_tests {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Index,Feature_label,X,Y,Z"), b',');
        assert_eq!(sniff_delimiter("Index;Feature_label;X;Y;Z"), b';');
        assert_eq!(sniff_delimiter("a;b,c"), b',');
        assert_eq!(sniff_delimiter("Feature_label"), b',');
        assert_eq!(sniff_delimiter("x;y;\"a,b\""), b';');
    }

    #[test]
    fn test_named_column_comma() {
        let table = "Index,Feature_label,Score\n0,HBA1,0.5\n1,HBD2,0.7\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["HBA1", "HBD2"]);
    }

    #[test]
    fn test_named_column_anywhere_semicolon() {
        let table = "Feature_label;Index;Score\nAR1;0;0.5\nHY2;1;0.7\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["AR1", "HY2"]);
    }

    #[test]
    fn test_fallback_to_second_column() {
        let table = "id;feature;weight\n0;NI1;1.0\n1;PI2;1.0\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["NI1", "PI2"]);
    }

    #[test]
    fn test_single_column_without_name_is_missing() {
        let table = "feature\nHB1\n";
        let err = read_feature_labels(table, &LabelColumnRules::default()).unwrap_err();
        assert_eq!(err, DynophoreError::MissingFeatureColumn("feature".into()));
    }

    #[test]
    fn test_empty_table() {
        let err = read_feature_labels("", &LabelColumnRules::default()).unwrap_err();
        assert!(matches!(err, DynophoreError::EmptyFeatureTable(_)));
    }

    #[test]
    fn test_header_only_gives_no_label() {
        let labels =
            read_feature_labels("Index,Feature_label\n", &LabelColumnRules::default()).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_quoted_and_short_rows() {
        let table = "Index,Feature_label,Note\n0,\"HB1\",\"a, b\"\n1\n2,AR3,x\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["HB1", "nan", "AR3"]);
    }

    #[test]
    fn test_empty_cell_is_nan() {
        let table = "Index,Feature_label\n0,HB1\n1,\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["HB1", "nan"]);
    }

    #[test]
    fn test_missing_cell_is_nan() {
        let table = "Index,Feature_label\n0,HB1\n1\n";
        let labels = read_feature_labels(table, &LabelColumnRules::default()).unwrap();
        assert_eq!(labels, vec!["HB1", "nan"]);
    }

    #[test]
    fn test_wide_row_is_malformed() {
        let table = "Index,Feature_label\n0,HB1,extra\n1,HB2\n";
        let err = read_feature_labels(table, &LabelColumnRules::default()).unwrap_err();
        assert_eq!(
            err,
            DynophoreError::MalformedFeatureTable("line 2 has 3 fields, header has 2".into())
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = LabelColumnRules {
            column_name: "Type".into(),
            fallback_index: 0,
        };
        let table = "Type,Index\nHY1,0\n";
        assert_eq!(read_feature_labels(table, &rules).unwrap(), vec!["HY1"]);
        let table = "Kind,Index\nPI1,0\n";
        assert_eq!(read_feature_labels(table, &rules).unwrap(), vec!["PI1"]);
    }
}
