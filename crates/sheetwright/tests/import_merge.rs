//! End-to-end tests for the hybrid import-merge pipeline: workbooks mixing
//! fresh sheets with sheets cloned from existing documents.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use sheetwright::prelude::*;
use umya_spreadsheet::Spreadsheet;

fn read_back(bytes: &[u8]) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes.to_vec()), true).unwrap()
}

fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection_no_check()
        .iter()
        .map(|s| s.get_name().to_string())
        .collect()
}

/// A two-sheet source document for imports.
fn base_document() -> Vec<u8> {
    Workbook::new()
        .with_sheet(
            Sheet::new("History").with_child(Node::row(vec![
                Node::text("2024"),
                Node::cell(CellNode::new(99.0)),
            ])),
        )
        .with_sheet(Sheet::new("Notes").with_child(Node::text("keep me")))
        .save_to_bytes()
        .unwrap()
}

#[test]
fn test_hybrid_preserves_declared_sheet_order() {
    let base = base_document();
    let bytes = Workbook::new()
        .import_sheet(base.clone(), "History", None)
        .with_sheet(Sheet::new("Current").with_child(Node::text("new")))
        .import_sheet(base, "Notes", None)
        .save_to_bytes()
        .unwrap();

    let book = read_back(&bytes);
    assert_eq!(sheet_names(&book), vec!["History", "Current", "Notes"]);
    // imported content survived the clone
    let history = book.get_sheet_by_name("History").unwrap();
    assert_eq!(history.get_value((1, 1)), "2024");
    assert_eq!(history.get_value((2, 1)), "99");
}

#[test]
fn test_import_only_workbook_has_no_stray_sheet() {
    let base = base_document();
    let bytes = Workbook::new()
        .import_sheet(base, "Notes", None)
        .save_to_bytes()
        .unwrap();
    let book = read_back(&bytes);
    assert_eq!(sheet_names(&book), vec!["Notes"]);
}

#[test]
fn test_import_rename_lands_in_output() {
    let base = base_document();
    let bytes = Workbook::new()
        .with_sheet(Sheet::new("Summary"))
        .import_sheet(base, "History", Some("History (2024)"))
        .save_to_bytes()
        .unwrap();
    let book = read_back(&bytes);
    assert_eq!(sheet_names(&book), vec!["Summary", "History (2024)"]);
}

#[test]
fn test_missing_source_sheet_is_not_found() {
    let base = base_document();
    let err = Workbook::new()
        .with_sheet(Sheet::new("Fresh"))
        .import_sheet(base, "Ghost", None)
        .save_to_bytes()
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::SheetNotFound { sheet, .. } if sheet == "Ghost"
    ));
}

#[test]
fn test_name_conflict_between_fresh_and_import_fails() {
    let base = base_document();
    let err = Workbook::new()
        .with_sheet(Sheet::new("History"))
        .import_sheet(base, "History", None)
        .save_to_bytes()
        .unwrap_err();
    assert!(matches!(err, EngineError::Core(Error::DuplicateSheetName(_))));
}

#[test]
fn test_fidelity_backend_handles_imports_in_one_pass() {
    let base = base_document();
    let bytes = Workbook::new()
        .import_sheet(base, "History", None)
        .with_sheet(Sheet::new("Current").with_child(Node::text("x")))
        .with_backend(BackendKind::Fidelity)
        .save_to_bytes()
        .unwrap();
    let book = read_back(&bytes);
    assert_eq!(sheet_names(&book), vec!["History", "Current"]);
}

#[test]
fn test_save_to_disk_and_reimport_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = dir.path().join("base.xlsx");

    Workbook::new()
        .with_sheet(Sheet::new("Ledger").with_child(Node::text("balance")))
        .save(&base_path)
        .unwrap();

    // import from the file path; the source key is the canonical path
    let bytes = Workbook::new()
        .with_sheet(Sheet::new("Cover"))
        .import_sheet(base_path.as_path(), "Ledger", None)
        .save_to_bytes()
        .unwrap();
    let book = read_back(&bytes);
    assert_eq!(sheet_names(&book), vec!["Cover", "Ledger"]);
    let ledger = book.get_sheet_by_name("Ledger").unwrap();
    assert_eq!(ledger.get_value((1, 1)), "balance");
}
