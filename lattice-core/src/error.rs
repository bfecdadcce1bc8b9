//! # Error Module
//!
//! Every failure the placement engine can report. None of them is fatal:
//! the lattice is left untouched and the caller decides whether to surface
//! the diagnostic.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Input did not match `digits/digits`.
    #[error("malformed ratio {input:?}: expected digits/digits")]
    MalformedRatio { input: String },

    #[error("ratio {input:?} has a zero denominator")]
    ZeroDenominator { input: String },

    #[error("ratio {input:?} has a zero numerator")]
    ZeroNumerator { input: String },

    /// The resolver produced a non-finite coordinate.
    #[error("ratio {ratio} resolved to a degenerate position")]
    DegeneratePosition { ratio: String },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("undo is not supported by the {scheme} scheme")]
    UndoUnsupported { scheme: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    /// True for the errors caused by a rejected submission string.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            LatticeError::MalformedRatio { .. }
                | LatticeError::ZeroDenominator { .. }
                | LatticeError::ZeroNumerator { .. }
        )
    }
}

impl From<std::io::Error> for LatticeError {
    fn from(err: std::io::Error) -> Self {
        LatticeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LatticeError {
    fn from(err: serde_json::Error) -> Self {
        LatticeError::Json(err.to_string())
    }
}
