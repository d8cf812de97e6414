//! # sheetwright
//!
//! Declarative spreadsheet rendering. Describe a workbook as a tree of
//! sheets, rows, columns, tables, and cells with style tokens attached;
//! sheetwright resolves the style cascade, lays the tree out on the grid,
//! and renders it to an XLSX document.
//!
//! ## Example
//!
//! ```rust
//! use sheetwright::prelude::*;
//!
//! let sheet = Sheet::new("Report")
//!     .with_child(
//!         Node::row(vec![Node::text("Quarterly Report")])
//!             .with_tokens([StyleToken::Bold, StyleToken::FontSize(14.0)]),
//!     )
//!     .with_child(Node::space())
//!     .with_child(Node::row(vec![Node::text("Region"), Node::text("Total")]));
//!
//! let workbook = Workbook::new().with_sheet(sheet);
//! let bytes = workbook.save_to_bytes().unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```
//!
//! Sheets can also be imported wholesale from existing documents; see
//! [`Workbook::import_sheet`]. A workbook mixing fresh and imported sheets
//! renders through the hybrid pipeline transparently.

pub mod prelude;

use std::path::Path;

pub use sheetwright_core::{
    BorderEdges, BorderLineStyle, CellNode, CellValue, Color, ColumnNode, EffectiveStyle, Error,
    HorizontalAlign, ImportedSheetNode, Node, Orientation, RowNode, SheetSource, StackNode,
    StyleToken, TableData, TableNode, VerticalAlign, WorkbookNode,
};
pub use sheetwright_engine::{
    BackendKind, EngineError, FidelityDocument, RenderOptions, Result,
};
pub use sheetwright_layout::{layout_sheet, CellWrite, LayoutContext, MergeRange, SheetLayout};

/// A fresh sheet description. Alias for the tree node type, re-exported under
/// the name callers actually build with.
pub use sheetwright_core::SheetNode as Sheet;

/// A workbook ready to render: the document tree plus rendering knobs.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    node: WorkbookNode,
    backend: BackendKind,
    options: RenderOptions,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Workbook::default()
    }

    /// Append a fresh sheet.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.node = self.node.with_sheet(sheet);
        self
    }

    /// Append a sheet imported from an existing document. `name` is the tab
    /// name in the output; pass `None` to keep the source name.
    pub fn import_sheet(
        mut self,
        source: impl Into<SheetSource>,
        source_sheet: impl Into<String>,
        name: Option<&str>,
    ) -> Self {
        let mut import = ImportedSheetNode::new(source, source_sheet);
        if let Some(name) = name {
            import = import.with_name(name);
        }
        self.node = self.node.with_import(import);
        self
    }

    /// Append workbook-level style tokens, the outermost cascade level for
    /// every fresh sheet.
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.node = self.node.with_tokens(tokens);
        self
    }

    /// Select the rendering backend. Defaults to [`BackendKind::Fast`].
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Override rendering options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying document tree.
    pub fn node(&self) -> &WorkbookNode {
        &self.node
    }

    /// Render to serialized document bytes.
    pub fn save_to_bytes(&self) -> Result<Vec<u8>> {
        sheetwright_engine::render_workbook(&self.node, self.backend, &self.options)
    }

    /// Render and write to `path`. The document is fully rendered in memory
    /// first, so a failed render leaves no partial file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        sheetwright_engine::save_workbook(&self.node, self.backend, &self.options, path)
    }

    /// Render through the full-fidelity pipeline and hand back the document
    /// object, for edits past what the declarative tree expresses.
    pub fn to_fidelity(&self) -> Result<FidelityDocument> {
        sheetwright_engine::render_document(&self.node, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_round_trip() {
        let wb = Workbook::new()
            .with_sheet(Sheet::new("a"))
            .import_sheet("base.xlsx", "Old", Some("Old (base)"))
            .with_tokens([StyleToken::FontSize(10.0)]);
        assert_eq!(wb.node().entries.len(), 2);
        assert!(wb.node().has_imports());
        assert_eq!(wb.node().entries[1].name(), "Old (base)");
    }
}
