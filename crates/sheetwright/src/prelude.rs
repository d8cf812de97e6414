//! Prelude module - common imports for sheetwright users
//!
//! ```rust
//! use sheetwright::prelude::*;
//! ```

pub use crate::{
    // Backend selection
    BackendKind,
    BorderLineStyle,
    // Cell types
    CellNode,
    CellValue,
    Color,
    // Error types
    EngineError,
    Error,
    HorizontalAlign,
    // Import types
    ImportedSheetNode,
    // Tree types
    Node,
    Orientation,
    RenderOptions,
    Result,
    Sheet,
    SheetSource,
    // Style types
    StyleToken,
    TableNode,
    VerticalAlign,
    // Main types
    Workbook,
};
