use thiserror::Error;

use crate::trajectory::rmsd_reader::ParseRmsdError;

#[derive(Error, Debug)]
pub enum DynophoreError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Feature table name does not carry a frame index: {0}")]
    InvalidFeatureTableName(String),

    #[error("Feature table has no header line: {0}")]
    EmptyFeatureTable(String),

    #[error("Feature table has no label column (header: {0})")]
    MissingFeatureColumn(String),

    #[error("Malformed feature table: {0}")]
    MalformedFeatureTable(String),

    #[error("Error during the RMSD file parsing at line {line}: {source}")]
    RmsdParseError {
        line: usize,
        #[source]
        source: ParseRmsdError,
    },

    #[error("RMSD series contains no row: {0}")]
    EmptyRmsdSeries(String),

    #[error("No matched pharmacophore hypotheses found in frames")]
    NoHypothesisMatched,

    #[error("Invalid analysis parameter: {0}")]
    InvalidAnalysisParameter(String),
}

impl PartialEq for DynophoreError {
    fn eq(&self, other: &Self) -> bool {
        use DynophoreError::*;
        match (self, other) {
            // wrapped library errors are only compared by variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (InvalidFeatureTableName(a), InvalidFeatureTableName(b)) => a == b,
            (EmptyFeatureTable(a), EmptyFeatureTable(b)) => a == b,
            (MissingFeatureColumn(a), MissingFeatureColumn(b)) => a == b,
            (MalformedFeatureTable(a), MalformedFeatureTable(b)) => a == b,
            (
                RmsdParseError {
                    line: la,
                    source: sa,
                },
                RmsdParseError {
                    line: lb,
                    source: sb,
                },
            ) => la == lb && sa == sb,
            (EmptyRmsdSeries(a), EmptyRmsdSeries(b)) => a == b,
            (InvalidAnalysisParameter(a), InvalidAnalysisParameter(b)) => a == b,

            (NoHypothesisMatched, NoHypothesisMatched) => true,

            _ => false,
        }
    }
}
