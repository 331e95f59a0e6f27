pub mod config;
pub mod constants;
pub mod dynophore_errors;
pub mod feature_tables;
pub mod hypothesis;
pub mod pipeline;
pub mod report;
pub mod signature;
pub mod trajectory;

pub use config::{AnalysisParams, Palette};
pub use dynophore_errors::DynophoreError;
pub use pipeline::{run, Analysis, AnalysisLayout, AnalysisOutcome};
pub use signature::Signature;
