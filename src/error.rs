//! Error types for the voltage divider solver.
//!
//! This module provides a unified error type [`DividerError`] that covers
//! every failure the crate can report: the terminal solver outcomes, invalid
//! constraint construction, catalog failures, and value parsing.

use thiserror::Error;

use crate::solver::PrecisionScreen;
use crate::toleranced::Toleranced;

/// Result type alias using [`DividerError`].
pub type Result<T> = std::result::Result<T, DividerError>;

/// Unified error type for all voltage divider operations.
#[derive(Error, Debug)]
pub enum DividerError {
    // ============ Solver Errors ============
    /// The initial guess produced a non-positive resistance.
    #[error("Incompatible V-in and V-out for this divider: v-in={v_in} v-out={v_out} (guess r-hi={r_hi:.4e}, r-lo={r_lo:.4e})")]
    IncompatibleInputOutput {
        v_in: Toleranced,
        v_out: Toleranced,
        r_hi: f64,
        r_lo: f64,
    },

    /// Even ideal resistors at the initial guess miss the objective.
    #[error("V-in Range is too large for the requested V-out: guess r-hi={r_hi:.4e} r-lo={r_lo:.4e} yields {screen}")]
    InputRangeTooLarge {
        r_hi: f64,
        r_lo: f64,
        screen: Toleranced,
    },

    /// No tier of the precision series is compliant at the initial guess.
    #[error("No Precision Series can meet the constraints: guess r-hi={r_hi:.4e} r-lo={r_lo:.4e}\n{screen}")]
    NoPrecisionSatisfiesConstraints {
        r_hi: f64,
        r_lo: f64,
        screen: PrecisionScreen,
    },

    /// Every viable tier was searched without a sourceable pair.
    #[error("Failed to source resistors to satisfy the divider constraints: v-in={v_in} v-out={v_out}, tried precisions {tiers:?}")]
    NoSolutionFound {
        v_in: Toleranced,
        v_out: Toleranced,
        tiers: Vec<f64>,
    },

    /// A selected part lacks data the catalog filter should have guaranteed.
    #[error("Data integrity error for part '{mpn}': {message}")]
    DataIntegrity { mpn: String, message: String },

    // ============ Construction Errors ============
    /// Constraints failed validation at construction.
    #[error("Invalid constraints: {message}")]
    InvalidConstraints { message: String },

    /// A toleranced value with inconsistent bounds.
    #[error("Invalid tolerance: {message}")]
    InvalidTolerance { message: String },

    /// A value literal that could not be parsed.
    #[error("Cannot parse value '{input}': {message}")]
    ValueParse { input: String, message: String },

    // ============ Catalog Errors ============
    /// The parts catalog failed to answer a query.
    #[error("Catalog query failed: {message}")]
    Catalog { message: String },

    /// A catalog file did not contain valid part records.
    #[error("Invalid catalog data: {source}")]
    CatalogFormat {
        #[from]
        source: serde_json::Error,
    },

    /// A result could not be serialized for output.
    #[error("Failed to serialize output: {source}")]
    OutputFormat {
        #[source]
        source: serde_json::Error,
    },

    // ============ I/O Errors ============
    /// Error reading a catalog file
    #[error("Failed to read catalog file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DividerError {
    /// Create an invalid constraints error
    pub fn invalid_constraints(message: impl Into<String>) -> Self {
        Self::InvalidConstraints {
            message: message.into(),
        }
    }

    /// Create an invalid tolerance error
    pub fn invalid_tolerance(message: impl Into<String>) -> Self {
        Self::InvalidTolerance {
            message: message.into(),
        }
    }

    /// Create a value parse error
    pub fn value_parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValueParse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a data integrity error
    pub fn data_integrity(mpn: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            mpn: mpn.into(),
            message: message.into(),
        }
    }

    /// Create an output serialization error
    pub fn output_format(source: serde_json::Error) -> Self {
        Self::OutputFormat { source }
    }

    /// Whether this is one of the terminal solver outcomes, as opposed to a
    /// construction, catalog or I/O failure.
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleInputOutput { .. }
                | Self::InputRangeTooLarge { .. }
                | Self::NoPrecisionSatisfiesConstraints { .. }
                | Self::NoSolutionFound { .. }
                | Self::DataIntegrity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_output_and_catalog_json_errors_differ() {
        let output = DividerError::output_format(json_error());
        assert!(output.to_string().starts_with("Failed to serialize output"));
        assert!(!output.to_string().contains("catalog"));

        let catalog: DividerError = json_error().into();
        assert!(catalog.to_string().starts_with("Invalid catalog data"));
        assert!(!catalog.is_solver_failure() && !output.is_solver_failure());
    }
}
