//! Error types for hs-hist

use thiserror::Error;

/// Series construction and arithmetic errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistError {
    /// Bin edges are missing, unordered, or non-finite.
    #[error("invalid bin edges: {0}")]
    InvalidEdges(String),

    /// Operation mixes 1D and 2D series, or needs a specific dimensionality.
    #[error("dimension mismatch: expected {expected}D, got {got}D")]
    DimensionMismatch {
        /// Dimensionality the operation needs.
        expected: u8,
        /// Dimensionality it got.
        got: u8,
    },

    /// Two series do not share the same binning.
    #[error("binning mismatch between '{left}' and '{right}'")]
    BinningMismatch {
        /// Left operand name.
        left: String,
        /// Right operand name.
        right: String,
    },

    /// Supplied values do not match the number of bins.
    #[error("value count mismatch: expected {expected}, got {got}")]
    ValueCount {
        /// Number of bins.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HistError>;
