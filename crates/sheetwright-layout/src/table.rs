//! Table expansion
//!
//! Tables flatten to a rectangular grid before the walker positions them:
//! an optional header row of the column names plus one body row per record.

use indexmap::IndexSet;
use sheetwright_core::{CellNode, TableData, TableNode};

/// A table flattened to a rectangular grid.
pub(crate) struct TableGrid {
    /// Header names in output order; empty means no header row
    pub header: Vec<String>,
    /// Body rows, each padded to the full grid width
    pub rows: Vec<Vec<CellNode>>,
    /// Grid width in columns
    pub width: usize,
}

pub(crate) fn expand(table: &TableNode) -> TableGrid {
    match &table.data {
        TableData::Records(records) => {
            // Header is the union of record keys in first-seen order.
            let mut header: IndexSet<String> = IndexSet::new();
            for record in records {
                for key in record.keys() {
                    header.insert(key.clone());
                }
            }
            let header: Vec<String> = header.into_iter().collect();
            let rows = records
                .iter()
                .map(|record| {
                    header
                        .iter()
                        .map(|key| record.get(key).cloned().unwrap_or_default())
                        .collect()
                })
                .collect();
            TableGrid {
                width: header.len(),
                header,
                rows,
            }
        }
        TableData::Rows { header, rows } => {
            let width = rows
                .iter()
                .map(Vec::len)
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0);
            let rows = rows
                .iter()
                .map(|row| {
                    let mut padded = row.clone();
                    padded.resize_with(width, CellNode::empty);
                    padded
                })
                .collect();
            TableGrid {
                header: header.clone(),
                rows,
                width,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use sheetwright_core::CellValue;

    #[test]
    fn test_record_header_is_union_in_first_seen_order() {
        let mut r1: IndexMap<String, CellNode> = IndexMap::new();
        r1.insert("b".into(), CellNode::new(1.0));
        r1.insert("a".into(), CellNode::new(2.0));
        let mut r2: IndexMap<String, CellNode> = IndexMap::new();
        r2.insert("c".into(), CellNode::new(3.0));
        r2.insert("a".into(), CellNode::new(4.0));

        let grid = expand(&TableNode::from_records(vec![r1, r2]));
        assert_eq!(grid.header, vec!["b", "a", "c"]);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.rows[0][2].value, CellValue::Empty);
        assert_eq!(grid.rows[1][0].value, CellValue::Empty);
        assert_eq!(grid.rows[1][1].value, CellValue::Number(4.0));
    }

    #[test]
    fn test_positional_rows_are_padded_to_grid_width() {
        let grid = expand(&TableNode::from_rows(
            ["x", "y", "z"],
            vec![vec![CellNode::new(1.0)], vec![CellNode::new(2.0), CellNode::new(3.0)]],
        ));
        assert_eq!(grid.width, 3);
        assert!(grid.rows.iter().all(|r| r.len() == 3));
    }
}
