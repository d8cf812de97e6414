//! The tree walker
//!
//! Each node is laid out at a cursor position and reports the rectangular
//! extent it consumed; containers derive their own extent from their
//! children's. Style token lists accumulate on an ancestor chain as the walk
//! descends, so every cell resolves its style from the full chain.

use sheetwright_core::{
    resolve_style, CellNode, CellValue, EffectiveStyle, Error, Node, Orientation, Result,
    StyleToken, MAX_COLS, MAX_ROWS,
};

use crate::{CellWrite, MergeRange, SheetLayout};

/// The rectangle a node consumed, in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extent {
    pub rows: u32,
    pub cols: u32,
}

pub(crate) struct Walker<'a> {
    layout: SheetLayout,
    /// Ancestor token lists, outermost first
    chain: Vec<&'a [StyleToken]>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        name: &str,
        workbook_tokens: &'a [StyleToken],
        sheet_tokens: &'a [StyleToken],
    ) -> Self {
        Walker {
            layout: SheetLayout {
                name: name.to_string(),
                ..SheetLayout::default()
            },
            chain: vec![workbook_tokens, sheet_tokens],
        }
    }

    /// A sheet-level fill token doubles as the sheet background directive.
    pub(crate) fn sheet_background(&mut self) -> Result<()> {
        self.layout.background = self.resolve(&[])?.fill_color;
        Ok(())
    }

    pub(crate) fn finish(self) -> SheetLayout {
        self.layout
    }

    fn resolve(&self, inner: &[&[StyleToken]]) -> Result<EffectiveStyle> {
        resolve_style(self.chain.iter().copied().chain(inner.iter().copied()))
    }

    /// Lay out `node` with its top-left corner at (`row`, `col`).
    pub(crate) fn walk(&mut self, node: &'a Node, row: u32, col: u32) -> Result<Extent> {
        match node {
            Node::Cell(cell) => self.place_cell(cell, row, col),

            Node::Row(r) => {
                self.chain.push(&r.tokens);
                let mut cursor = col;
                let mut rows = 0u32;
                for child in &r.children {
                    let extent = self.walk(child, row, cursor)?;
                    cursor += extent.cols;
                    rows = rows.max(extent.rows);
                }
                self.chain.pop();
                Ok(Extent {
                    rows,
                    cols: cursor - col,
                })
            }

            Node::Column(c) => {
                self.chain.push(&c.tokens);
                let mut cursor = row;
                let mut cols = 0u32;
                for child in &c.children {
                    let extent = self.walk(child, cursor, col)?;
                    cursor += extent.rows;
                    cols = cols.max(extent.cols);
                }
                self.chain.pop();
                Ok(Extent {
                    rows: cursor - row,
                    cols,
                })
            }

            Node::Stack(s) => {
                self.chain.push(&s.tokens);
                let last = s.children.len().saturating_sub(1);
                let mut cursor = match s.orientation {
                    Orientation::Vertical => row,
                    Orientation::Horizontal => col,
                };
                let mut cross = 0u32;
                for (i, child) in s.children.iter().enumerate() {
                    let extent = match s.orientation {
                        Orientation::Vertical => self.walk(child, cursor, col)?,
                        Orientation::Horizontal => self.walk(child, row, cursor)?,
                    };
                    let (main, off) = match s.orientation {
                        Orientation::Vertical => (extent.rows, extent.cols),
                        Orientation::Horizontal => (extent.cols, extent.rows),
                    };
                    cursor += main;
                    if i < last {
                        cursor += s.gap;
                    }
                    cross = cross.max(off);
                }
                self.chain.pop();
                match s.orientation {
                    Orientation::Vertical => Ok(Extent {
                        rows: cursor - row,
                        cols: cross,
                    }),
                    Orientation::Horizontal => Ok(Extent {
                        rows: cross,
                        cols: cursor - col,
                    }),
                }
            }

            Node::Table(table) => {
                self.chain.push(&table.tokens);
                let grid = crate::table::expand(table);
                let mut r = row;
                if !grid.header.is_empty() {
                    for (i, name) in grid.header.iter().enumerate() {
                        let style = self.resolve(&[&table.header_tokens])?;
                        self.record(r, col + i as u32, CellValue::Text(name.clone()), style)?;
                    }
                    r += 1;
                }
                for body_row in &grid.rows {
                    for (i, cell) in body_row.iter().enumerate() {
                        let style = self.resolve(&[&cell.tokens])?;
                        self.record(r, col + i as u32, cell.value.clone(), style)?;
                    }
                    r += 1;
                }
                self.chain.pop();
                Ok(Extent {
                    rows: r - row,
                    cols: grid.width as u32,
                })
            }

            // One blank spacer row; consumes no columns so it never widens
            // its parent.
            Node::Space => Ok(Extent { rows: 1, cols: 0 }),
        }
    }

    fn place_cell(&mut self, cell: &CellNode, row: u32, col: u32) -> Result<Extent> {
        let style = self.resolve(&[&cell.tokens])?;
        if cell.is_merged() {
            let merge = MergeRange {
                first_row: row,
                first_col: col,
                last_row: row + cell.rowspan - 1,
                last_col: col + cell.colspan - 1,
            };
            if merge.last_row > MAX_ROWS || merge.last_col > MAX_COLS {
                return Err(Error::OutOfBounds {
                    row: merge.last_row,
                    col: merge.last_col,
                });
            }
            self.layout.max_row = self.layout.max_row.max(merge.last_row);
            self.layout.max_col = self.layout.max_col.max(merge.last_col);
            self.layout.merges.push(merge);
        }
        self.record(row, col, cell.value.clone(), style)?;
        Ok(Extent {
            rows: cell.rowspan,
            cols: cell.colspan,
        })
    }

    /// Record one write plus any sizing directives its style carries.
    /// Directive maps use insert semantics, so a later declaration for the
    /// same physical row or column wins.
    fn record(&mut self, row: u32, col: u32, value: CellValue, style: EffectiveStyle) -> Result<()> {
        if row > MAX_ROWS || col > MAX_COLS {
            return Err(Error::OutOfBounds { row, col });
        }
        if let Some(h) = style.row_height {
            self.layout.row_heights.insert(row, h);
        }
        if let Some(w) = style.col_width {
            self.layout.col_widths.insert(col, w);
        }
        self.layout.max_row = self.layout.max_row.max(row);
        self.layout.max_col = self.layout.max_col.max(col);
        self.layout.writes.push(CellWrite {
            row,
            col,
            value,
            style,
        });
        Ok(())
    }
}
