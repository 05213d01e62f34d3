//! Error types for scenario configuration and metric evaluation

use thiserror::Error;

/// Invalid scenario input, rejected before any series is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("investment must be positive, got {0}")]
    NonPositiveInvestment(f64),

    #[error("discount rate must be greater than -100%, got {0}")]
    InvalidDiscountRate(f64),

    #[error("loan rate must be greater than -100%, got {0}")]
    InvalidLoanRate(f64),

    #[error("project life must be at least one year")]
    ZeroProjectLife,

    #[error("project life of {0} years exceeds the {max}-year limit", max = crate::schedule::MAX_PROJECT_LIFE)]
    ProjectLifeTooLong(u32),

    #[error("loan term must be at least one year when part of the investment is financed")]
    ZeroLoanTerm,

    #[error("loan term of {loan_term} years exceeds project life of {project_life} years")]
    LoanTermExceedsProjectLife { loan_term: u32, project_life: u32 },

    #[error("{field} must lie between 0 and 1, got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("invalid depreciation table: {0}")]
    InvalidDepreciationTable(String),

    #[error("unknown preset '{0}' (expected Thermofusion or Aalberts)")]
    UnknownPreset(String),
}

/// Failure to load a scenario document from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why a return metric could not be produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("cash flow series is empty")]
    EmptySeries,

    #[error("{flows} cash flows but {dates} dates")]
    DateMismatch { flows: usize, dates: usize },

    #[error("cash flows never change sign, so no rate can zero the NPV")]
    NoSignChange,

    #[error("NPV has the same sign at {low:.4} ({npv_low:.2e}) and {high:.4} ({npv_high:.2e})")]
    InvalidBracket {
        low: f64,
        high: f64,
        npv_low: f64,
        npv_high: f64,
    },

    #[error("root finder did not converge after {iterations} iterations (residual {residual:.2e})")]
    ConvergenceFailed { iterations: u32, residual: f64 },

    #[error("calendar date for year {0} is out of range")]
    DateOutOfRange(u32),
}

impl MetricError {
    /// True for failures of the numerics rather than of the cash flow shape
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            MetricError::InvalidBracket { .. } | MetricError::ConvergenceFailed { .. }
        )
    }
}
