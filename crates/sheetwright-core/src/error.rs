//! Error types for sheetwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or resolving the document tree
#[derive(Debug, Error)]
pub enum Error {
    /// Style token name not in the token vocabulary
    #[error("Unknown style token: {0}")]
    UnknownToken(String),

    /// Style token recognized but its argument is malformed
    #[error("Invalid style token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    /// Dimension value (height/width/size/indent) out of range
    #[error("Invalid {what} value: {value} (must be finite and positive)")]
    InvalidDimension { what: &'static str, value: f64 },

    /// Duplicate sheet name within one workbook
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Cell position past the grid's row/column limits
    #[error("Cell position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: u32, col: u32 },
}

impl Error {
    /// Create an invalid-token error with a message
    pub fn invalid_token<T: Into<String>, R: Into<String>>(token: T, reason: R) -> Self {
        Error::InvalidToken {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
