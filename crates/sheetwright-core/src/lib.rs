//! # sheetwright-core
//!
//! Core data structures for the sheetwright declarative spreadsheet renderer.
//!
//! This crate provides the fundamental types used throughout sheetwright:
//! - [`Node`], [`SheetNode`], [`WorkbookNode`] - the declarative document tree
//! - [`StyleToken`] - atomic style effects attached to nodes
//! - [`EffectiveStyle`] - the fully resolved style for one cell
//! - [`resolve_style`] - the cascade resolver that folds token chains
//!
//! The tree is a pure value-owning description: callers build it once, hand it
//! to the layout engine, and never mutate it afterwards.
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_core::{Node, SheetNode, StyleToken, WorkbookNode};
//!
//! let sheet = SheetNode::new("Report")
//!     .with_child(
//!         Node::row(vec![Node::text("Quarterly Report")])
//!             .with_tokens(vec![StyleToken::Bold]),
//!     )
//!     .with_child(Node::space());
//!
//! let workbook = WorkbookNode::new().with_sheet(sheet);
//! assert!(workbook.validate().is_ok());
//! ```

pub mod error;
pub mod node;
pub mod source;
pub mod style;
pub mod value;

// Re-exports for convenience
pub use error::{Error, Result};
pub use node::{
    CellNode, ColumnNode, ImportedSheetNode, Node, Orientation, RowNode, SheetEntry, SheetNode,
    StackNode, TableData, TableNode, WorkbookNode,
};
pub use source::SheetSource;
pub use value::CellValue;

// Re-export all style types for convenience
pub use style::{
    resolve_style, BorderEdges, BorderLineStyle, Color, EffectiveStyle, HorizontalAlign,
    StyleToken, VerticalAlign,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
