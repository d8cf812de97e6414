//! # sheetwright-layout
//!
//! The layout engine. Walks a [`SheetNode`] tree depth-first and flattens it
//! into a [`SheetLayout`]: a backend-agnostic stream of positioned cell
//! writes, merge ranges, and sizing directives that any engine can replay.
//!
//! Traversal order is a hard guarantee: depth-first, top-to-bottom,
//! left-to-right in declaration order. Two renders of the same tree produce
//! the same instruction stream.

mod table;
mod walk;

use std::collections::BTreeMap;

use sheetwright_core::{CellValue, Color, EffectiveStyle, Result, SheetNode, StyleToken};

use crate::walk::Walker;

/// One positioned cell write. Coordinates are 1-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct CellWrite {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
    pub style: EffectiveStyle,
}

/// An inclusive rectangular merge range. Coordinates are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

/// Context shared by every sheet of one workbook render.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutContext<'a> {
    /// Workbook-level tokens, the outermost cascade level
    pub workbook_tokens: &'a [StyleToken],
}

/// The flattened form of one sheet: everything an engine needs to replay it.
#[derive(Debug, Clone, Default)]
pub struct SheetLayout {
    /// Tab name
    pub name: String,
    /// Sheet background fill, replayed over the used extent
    pub background: Option<Color>,
    /// Cell writes in traversal order
    pub writes: Vec<CellWrite>,
    /// Merge ranges in traversal order
    pub merges: Vec<MergeRange>,
    /// Explicit row heights keyed by physical row; later declarations win
    pub row_heights: BTreeMap<u32, f64>,
    /// Explicit column widths keyed by physical column; later declarations win
    pub col_widths: BTreeMap<u32, f64>,
    /// Highest row touched by a write or merge
    pub max_row: u32,
    /// Highest column touched by a write or merge
    pub max_col: u32,
}

/// Flatten one sheet tree into its replayable layout.
///
/// The tree is read-only; rendering the same sheet twice yields identical
/// layouts. Style errors (bad dimensions) surface here, before any backend
/// is involved.
pub fn layout_sheet(sheet: &SheetNode, ctx: &LayoutContext<'_>) -> Result<SheetLayout> {
    log::debug!("laying out sheet '{}'", sheet.name);

    let mut walker = Walker::new(&sheet.name, ctx.workbook_tokens, &sheet.tokens);
    walker.sheet_background()?;

    // Top-level children flow downward as an implicit column.
    let mut row = 1u32;
    for child in &sheet.children {
        let extent = walker.walk(child, row, 1)?;
        row += extent.rows;
    }

    let layout = walker.finish();
    log::debug!(
        "sheet '{}': {} writes, {} merges, extent {}x{}",
        layout.name,
        layout.writes.len(),
        layout.merges.len(),
        layout.max_row,
        layout.max_col
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetwright_core::{CellNode, HorizontalAlign, Node, TableNode};

    fn layout(sheet: &SheetNode) -> SheetLayout {
        layout_sheet(sheet, &LayoutContext::default()).unwrap()
    }

    fn positions(layout: &SheetLayout) -> Vec<(u32, u32, String)> {
        layout
            .writes
            .iter()
            .map(|w| (w.row, w.col, w.value.to_string()))
            .collect()
    }

    #[test]
    fn test_row_lays_children_across() {
        let sheet = SheetNode::new("s").with_child(Node::row(vec![
            Node::text("a"),
            Node::text("b"),
            Node::text("c"),
        ]));
        let l = layout(&sheet);
        assert_eq!(
            positions(&l),
            vec![
                (1, 1, "a".to_string()),
                (1, 2, "b".to_string()),
                (1, 3, "c".to_string()),
            ]
        );
        assert_eq!((l.max_row, l.max_col), (1, 3));
    }

    #[test]
    fn test_column_lays_children_down() {
        let sheet = SheetNode::new("s")
            .with_child(Node::column(vec![Node::text("a"), Node::text("b")]))
            .with_child(Node::text("after"));
        let l = layout(&sheet);
        assert_eq!(
            positions(&l),
            vec![
                (1, 1, "a".to_string()),
                (2, 1, "b".to_string()),
                (3, 1, "after".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_height_is_max_of_children() {
        let sheet = SheetNode::new("s")
            .with_child(Node::row(vec![
                Node::column(vec![Node::text("a1"), Node::text("a2")]),
                Node::text("b"),
            ]))
            .with_child(Node::text("after"));
        let l = layout(&sheet);
        // the row is two rows tall, so "after" starts on row 3
        assert!(positions(&l).contains(&(3, 1, "after".to_string())));
    }

    #[test]
    fn test_vstack_gap_arithmetic() {
        let sheet = SheetNode::new("s").with_child(Node::vstack(
            2,
            vec![
                Node::column(vec![Node::text("a1"), Node::text("a2")]),
                Node::text("b"),
            ],
        ));
        let l = layout(&sheet);
        // second child starts at origin + first height (2) + gap (2)
        assert_eq!(
            positions(&l),
            vec![
                (1, 1, "a1".to_string()),
                (2, 1, "a2".to_string()),
                (5, 1, "b".to_string()),
            ]
        );
        assert_eq!(l.max_row, 5);
    }

    #[test]
    fn test_hstack_gap_arithmetic() {
        let sheet = SheetNode::new("s").with_child(Node::hstack(
            1,
            vec![
                Node::row(vec![Node::text("a"), Node::text("b")]),
                Node::text("c"),
            ],
        ));
        let l = layout(&sheet);
        assert_eq!(
            positions(&l),
            vec![
                (1, 1, "a".to_string()),
                (1, 2, "b".to_string()),
                (1, 4, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_space_consumes_one_row_and_no_columns() {
        let sheet = SheetNode::new("s")
            .with_child(Node::text("a"))
            .with_child(Node::space())
            .with_child(Node::text("b"));
        let l = layout(&sheet);
        assert_eq!(
            positions(&l),
            vec![(1, 1, "a".to_string()), (3, 1, "b".to_string())]
        );
    }

    #[test]
    fn test_table_from_records_expands_in_first_seen_order() {
        use indexmap::IndexMap;
        let mut r1: IndexMap<String, CellNode> = IndexMap::new();
        r1.insert("name".into(), CellNode::new("alice"));
        r1.insert("age".into(), CellNode::new(30.0));
        let mut r2: IndexMap<String, CellNode> = IndexMap::new();
        r2.insert("age".into(), CellNode::new(41.0));
        r2.insert("city".into(), CellNode::new("Oslo"));

        let sheet =
            SheetNode::new("s").with_child(Node::from(TableNode::from_records(vec![r1, r2])));
        let l = layout(&sheet);

        // header = union of keys in first-seen order: name, age, city
        assert_eq!(
            positions(&l),
            vec![
                (1, 1, "name".to_string()),
                (1, 2, "age".to_string()),
                (1, 3, "city".to_string()),
                (2, 1, "alice".to_string()),
                (2, 2, "30".to_string()),
                (2, 3, "".to_string()),
                (3, 1, "".to_string()),
                (3, 2, "41".to_string()),
                (3, 3, "Oslo".to_string()),
            ]
        );
        // N records expand to N+1 rows by |headers| columns
        assert_eq!((l.max_row, l.max_col), (3, 3));
    }

    #[test]
    fn test_table_header_tokens_cascade_to_header_only() {
        let table = TableNode::from_rows(
            ["a"],
            vec![vec![CellNode::new("body")]],
        )
        .with_header_tokens([StyleToken::Bold]);
        let sheet = SheetNode::new("s").with_child(Node::from(table));
        let l = layout(&sheet);
        assert!(l.writes[0].style.bold);
        assert!(!l.writes[1].style.bold);
    }

    #[test]
    fn test_cell_span_produces_anchor_write_and_merge() {
        let sheet = SheetNode::new("s")
            .with_child(Node::cell(CellNode::new("title").with_span(1, 3)))
            .with_child(Node::text("under"));
        let l = layout(&sheet);
        assert_eq!(
            l.merges,
            vec![MergeRange {
                first_row: 1,
                first_col: 1,
                last_row: 1,
                last_col: 3,
            }]
        );
        assert_eq!(
            positions(&l),
            vec![(1, 1, "title".to_string()), (2, 1, "under".to_string())]
        );
        assert_eq!(l.max_col, 3);
    }

    #[test]
    fn test_later_sizing_declaration_wins() {
        let sheet = SheetNode::new("s").with_child(
            Node::row(vec![
                Node::cell(CellNode::new("a").with_token(StyleToken::RowHeight(20.0))),
                Node::cell(CellNode::new("b").with_token(StyleToken::RowHeight(44.0))),
            ]),
        );
        let l = layout(&sheet);
        assert_eq!(l.row_heights.get(&1), Some(&44.0));
    }

    #[test]
    fn test_row_level_height_token_covers_the_row() {
        let sheet = SheetNode::new("s").with_child(
            Node::row(vec![Node::text("a"), Node::text("b")])
                .with_token(StyleToken::RowHeight(40.0)),
        );
        let l = layout(&sheet);
        assert_eq!(l.row_heights.get(&1), Some(&40.0));
    }

    #[test]
    fn test_cell_height_override_on_last_cell_wins_over_row_token() {
        let sheet = SheetNode::new("s").with_child(
            Node::row(vec![
                Node::text("a"),
                Node::cell(CellNode::new("b").with_token(StyleToken::RowHeight(50.0))),
            ])
            .with_token(StyleToken::RowHeight(40.0)),
        );
        let l = layout(&sheet);
        assert_eq!(l.row_heights.get(&1), Some(&50.0));
    }

    #[test]
    fn test_col_width_tokens_accumulate_per_column() {
        let sheet = SheetNode::new("s").with_child(Node::row(vec![
            Node::cell(CellNode::new("a").with_token(StyleToken::ColWidth(30.0))),
            Node::cell(CellNode::new("b").with_token(StyleToken::ColWidth(12.0))),
        ]));
        let l = layout(&sheet);
        assert_eq!(l.col_widths.get(&1), Some(&30.0));
        assert_eq!(l.col_widths.get(&2), Some(&12.0));
    }

    #[test]
    fn test_span_past_grid_limit_is_rejected() {
        use sheetwright_core::{Error, MAX_COLS};
        let sheet = SheetNode::new("s")
            .with_child(Node::cell(CellNode::new("wide").with_span(1, MAX_COLS + 1)));
        let err = layout_sheet(&sheet, &LayoutContext::default()).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn test_sheet_tokens_cascade_and_fill_sets_background() {
        let sheet = SheetNode::new("s")
            .with_tokens([
                StyleToken::FillColor(Color::LIGHT_GRAY),
                StyleToken::Align(HorizontalAlign::Center),
            ])
            .with_child(Node::text("x"));
        let l = layout(&sheet);
        assert_eq!(l.background, Some(Color::LIGHT_GRAY));
        assert_eq!(l.writes[0].style.fill_color, Some(Color::LIGHT_GRAY));
        assert_eq!(l.writes[0].style.horizontal, Some(HorizontalAlign::Center));
    }

    #[test]
    fn test_workbook_tokens_are_the_outermost_level() {
        let sheet = SheetNode::new("s")
            .with_tokens([StyleToken::FontSize(12.0)])
            .with_child(Node::text("x"));
        let ctx = LayoutContext {
            workbook_tokens: &[StyleToken::FontSize(9.0), StyleToken::Bold],
        };
        let l = layout_sheet(&sheet, &ctx).unwrap();
        assert_eq!(l.writes[0].style.font_size, Some(12.0));
        assert!(l.writes[0].style.bold);
    }

    #[test]
    fn test_invalid_dimension_surfaces_at_layout_time() {
        let sheet = SheetNode::new("s")
            .with_child(Node::cell(CellNode::new("x").with_token(StyleToken::ColWidth(-1.0))));
        assert!(layout_sheet(&sheet, &LayoutContext::default()).is_err());
    }
}
