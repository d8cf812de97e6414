//! Error types for the rendering backends

use thiserror::Error;

/// Result type alias using [`EngineError`]
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while rendering a workbook through a backend
#[derive(Debug, Error)]
pub enum EngineError {
    /// A named sheet does not exist in a source document
    #[error("sheet '{sheet}' not found in {document}")]
    SheetNotFound { sheet: String, document: String },

    /// A sheet name is already taken in the output document
    #[error("sheet name already in use: {0}")]
    NameConflict(String),

    /// The backend cannot perform the requested operation
    #[error("backend does not support {0}")]
    Unsupported(&'static str),

    /// A cell or sizing operation arrived before any sheet was created
    #[error("no sheet created yet")]
    NoActiveSheet,

    /// Append-only backend failure
    #[error(transparent)]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Full-fidelity backend failure
    #[error("document error: {0}")]
    Document(String),

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Document tree or style error
    #[error(transparent)]
    Core(#[from] sheetwright_core::Error),
}
