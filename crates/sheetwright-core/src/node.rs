//! The declarative document tree
//!
//! Callers describe a workbook as a tree of value-owning nodes and hand the
//! whole thing to the layout engine. Nothing here touches a backend; the tree
//! is pure description and can be rendered any number of times.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::source::SheetSource;
use crate::style::StyleToken;
use crate::value::CellValue;
use crate::MAX_SHEET_NAME_LEN;

/// A single cell: one value, its tokens, and an optional merge span.
#[derive(Debug, Clone, Default)]
pub struct CellNode {
    /// The cell's value
    pub value: CellValue,
    /// Style tokens applied at this innermost level
    pub tokens: Vec<StyleToken>,
    /// Rows this cell spans (1 = no vertical merge)
    pub rowspan: u32,
    /// Columns this cell spans (1 = no horizontal merge)
    pub colspan: u32,
}

impl CellNode {
    /// Create a cell from any value convertible to [`CellValue`]
    pub fn new(value: impl Into<CellValue>) -> Self {
        CellNode {
            value: value.into(),
            tokens: Vec::new(),
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        CellNode::new(CellValue::Empty)
    }

    /// Append style tokens
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append one style token
    pub fn with_token(mut self, token: StyleToken) -> Self {
        self.tokens.push(token);
        self
    }

    /// Set the merge span in rows and columns
    pub fn with_span(mut self, rows: u32, cols: u32) -> Self {
        self.rowspan = rows.max(1);
        self.colspan = cols.max(1);
        self
    }

    /// True when the cell merges more than one grid cell
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }
}

/// Children laid out left to right on the same rows.
#[derive(Debug, Clone, Default)]
pub struct RowNode {
    pub children: Vec<Node>,
    pub tokens: Vec<StyleToken>,
}

/// Children laid out top to bottom in the same columns.
#[derive(Debug, Clone, Default)]
pub struct ColumnNode {
    pub children: Vec<Node>,
    pub tokens: Vec<StyleToken>,
}

/// Stacking direction for [`StackNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Children stack top to bottom
    #[default]
    Vertical,
    /// Children stack left to right
    Horizontal,
}

/// Children stacked with a fixed blank gap between consecutive children.
#[derive(Debug, Clone, Default)]
pub struct StackNode {
    pub orientation: Orientation,
    /// Blank rows (vertical) or columns (horizontal) between children
    pub gap: u32,
    pub children: Vec<Node>,
    pub tokens: Vec<StyleToken>,
}

/// Tabular data for a [`TableNode`].
#[derive(Debug, Clone)]
pub enum TableData {
    /// Records keyed by column name. The header is the union of keys in
    /// first-seen order across all records; missing keys render empty.
    Records(Vec<IndexMap<String, CellNode>>),
    /// An explicit header row plus positional body rows.
    Rows {
        header: Vec<String>,
        rows: Vec<Vec<CellNode>>,
    },
}

/// A header row plus one body row per record.
#[derive(Debug, Clone)]
pub struct TableNode {
    pub data: TableData,
    /// Tokens cascading over every cell of the table
    pub tokens: Vec<StyleToken>,
    /// Extra tokens cascading over the header row only
    pub header_tokens: Vec<StyleToken>,
}

impl TableNode {
    /// Build a table from records; the header is derived from the keys
    pub fn from_records(records: Vec<IndexMap<String, CellNode>>) -> Self {
        TableNode {
            data: TableData::Records(records),
            tokens: Vec::new(),
            header_tokens: Vec::new(),
        }
    }

    /// Build a table from an explicit header and positional rows
    pub fn from_rows(
        header: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Vec<CellNode>>,
    ) -> Self {
        TableNode {
            data: TableData::Rows {
                header: header.into_iter().map(Into::into).collect(),
                rows,
            },
            tokens: Vec::new(),
            header_tokens: Vec::new(),
        }
    }

    /// Append tokens cascading over the whole table
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append tokens cascading over the header row only
    pub fn with_header_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.header_tokens.extend(tokens);
        self
    }
}

/// One node in a sheet's layout tree.
#[derive(Debug, Clone)]
pub enum Node {
    Cell(CellNode),
    Row(RowNode),
    Column(ColumnNode),
    Stack(StackNode),
    Table(TableNode),
    /// One blank spacer row, zero columns wide
    Space,
}

impl Node {
    /// A text cell
    pub fn text(text: impl Into<String>) -> Node {
        Node::Cell(CellNode::new(text.into()))
    }

    /// A cell node, typically built with [`CellNode::new`]
    pub fn cell(cell: CellNode) -> Node {
        Node::Cell(cell)
    }

    /// A row of children
    pub fn row(children: Vec<Node>) -> Node {
        Node::Row(RowNode {
            children,
            tokens: Vec::new(),
        })
    }

    /// A column of children
    pub fn column(children: Vec<Node>) -> Node {
        Node::Column(ColumnNode {
            children,
            tokens: Vec::new(),
        })
    }

    /// A vertical stack with `gap` blank rows between children
    pub fn vstack(gap: u32, children: Vec<Node>) -> Node {
        Node::Stack(StackNode {
            orientation: Orientation::Vertical,
            gap,
            children,
            tokens: Vec::new(),
        })
    }

    /// A horizontal stack with `gap` blank columns between children
    pub fn hstack(gap: u32, children: Vec<Node>) -> Node {
        Node::Stack(StackNode {
            orientation: Orientation::Horizontal,
            gap,
            children,
            tokens: Vec::new(),
        })
    }

    /// A blank spacer row
    pub fn space() -> Node {
        Node::Space
    }

    /// The tokens declared on this node (spacers carry none)
    pub fn tokens(&self) -> &[StyleToken] {
        match self {
            Node::Cell(n) => &n.tokens,
            Node::Row(n) => &n.tokens,
            Node::Column(n) => &n.tokens,
            Node::Stack(n) => &n.tokens,
            Node::Table(n) => &n.tokens,
            Node::Space => &[],
        }
    }

    /// Append style tokens to this node. Spacers carry no style, so tokens
    /// applied to [`Node::Space`] are dropped.
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        match &mut self {
            Node::Cell(n) => n.tokens.extend(tokens),
            Node::Row(n) => n.tokens.extend(tokens),
            Node::Column(n) => n.tokens.extend(tokens),
            Node::Stack(n) => n.tokens.extend(tokens),
            Node::Table(n) => n.tokens.extend(tokens),
            Node::Space => {}
        }
        self
    }

    /// Append one style token
    pub fn with_token(self, token: StyleToken) -> Self {
        self.with_tokens([token])
    }
}

impl From<TableNode> for Node {
    fn from(table: TableNode) -> Node {
        Node::Table(table)
    }
}

/// A sheet rendered from scratch by the layout engine.
#[derive(Debug, Clone)]
pub struct SheetNode {
    /// Tab name, validated by [`WorkbookNode::validate`]
    pub name: String,
    /// Sheet-level tokens cascading over every cell
    pub tokens: Vec<StyleToken>,
    /// Top-level children, laid out as an implicit vertical column
    pub children: Vec<Node>,
}

impl SheetNode {
    /// Create an empty sheet with the given tab name
    pub fn new(name: impl Into<String>) -> Self {
        SheetNode {
            name: name.into(),
            tokens: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append one child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append sheet-level style tokens
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.tokens.extend(tokens);
        self
    }
}

/// A sheet copied from an existing document instead of rendered from scratch.
#[derive(Debug, Clone)]
pub struct ImportedSheetNode {
    /// Where the source document lives
    pub source: SheetSource,
    /// Sheet name to copy out of the source document
    pub source_sheet: String,
    /// Tab name in the output; defaults to the source name
    pub rename: Option<String>,
}

impl ImportedSheetNode {
    /// Import `source_sheet` from `source`, keeping its name
    pub fn new(source: impl Into<SheetSource>, source_sheet: impl Into<String>) -> Self {
        ImportedSheetNode {
            source: source.into(),
            source_sheet: source_sheet.into(),
            rename: None,
        }
    }

    /// Give the imported sheet a different tab name in the output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// The tab name the sheet will have in the output
    pub fn output_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.source_sheet)
    }
}

/// One entry in a workbook's ordered sheet list.
#[derive(Debug, Clone)]
pub enum SheetEntry {
    /// Rendered from a layout tree
    Fresh(SheetNode),
    /// Copied from an existing document
    Imported(ImportedSheetNode),
}

impl SheetEntry {
    /// The tab name this entry will occupy in the output
    pub fn name(&self) -> &str {
        match self {
            SheetEntry::Fresh(sheet) => &sheet.name,
            SheetEntry::Imported(import) => import.output_name(),
        }
    }
}

/// The root of a document description: an ordered list of sheets plus
/// workbook-level tokens cascading over every fresh sheet.
#[derive(Debug, Clone, Default)]
pub struct WorkbookNode {
    pub entries: Vec<SheetEntry>,
    pub tokens: Vec<StyleToken>,
}

impl WorkbookNode {
    /// Create an empty workbook
    pub fn new() -> Self {
        WorkbookNode::default()
    }

    /// Append a fresh sheet
    pub fn with_sheet(mut self, sheet: SheetNode) -> Self {
        self.entries.push(SheetEntry::Fresh(sheet));
        self
    }

    /// Append an imported sheet
    pub fn with_import(mut self, import: ImportedSheetNode) -> Self {
        self.entries.push(SheetEntry::Imported(import));
        self
    }

    /// Append workbook-level style tokens
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        self.tokens.extend(tokens);
        self
    }

    /// True when any entry is an import
    pub fn has_imports(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, SheetEntry::Imported(_)))
    }

    /// The fresh sheets in declared order
    pub fn fresh_sheets(&self) -> impl Iterator<Item = &SheetNode> {
        self.entries.iter().filter_map(|e| match e {
            SheetEntry::Fresh(sheet) => Some(sheet),
            SheetEntry::Imported(_) => None,
        })
    }

    /// The imported sheets in declared order
    pub fn imported_sheets(&self) -> impl Iterator<Item = &ImportedSheetNode> {
        self.entries.iter().filter_map(|e| match e {
            SheetEntry::Imported(import) => Some(import),
            SheetEntry::Fresh(_) => None,
        })
    }

    /// Check every output tab name: each must be a valid sheet name and no
    /// two entries may resolve to the same name.
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let name = entry.name();
            validate_sheet_name(name)?;
            if seen.contains(&name) {
                return Err(Error::DuplicateSheetName(name.to_string()));
            }
            seen.push(name);
        }
        Ok(())
    }
}

/// Check a tab name against the format's rules: non-empty, at most 31
/// characters, none of `: \ / ? * [ ]`.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName(
            "sheet name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "'{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(bad) = name.chars().find(|c| matches!(c, ':' | '\\' | '/' | '?' | '*' | '[' | ']'))
    {
        return Err(Error::InvalidSheetName(format!(
            "'{}' contains forbidden character '{}'",
            name, bad
        )));
    }
    Ok(())
}
