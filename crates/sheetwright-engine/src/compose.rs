//! Workbook composition
//!
//! Chooses and drives the rendering pipeline for a whole workbook:
//!
//! - fidelity backend, or fast backend without imports: one engine pass in
//!   declared sheet order;
//! - fast backend with imports: the hybrid path. Fresh sheets render through
//!   the fast engine, the resulting bytes reopen under the fidelity engine,
//!   imports are cloned in, and the sheet collection is reordered to the
//!   declared order.
//!
//! Documents are always finalized to an in-memory buffer before any file is
//! touched, so a failed render never leaves a partial file behind.

use std::path::Path;

use sheetwright_core::{Color, SheetEntry, WorkbookNode};
use sheetwright_layout::{layout_sheet, LayoutContext, SheetLayout};

use crate::error::Result;
use crate::fast::FastEngine;
use crate::fidelity::FidelityEngine;
use crate::replay::replay_sheet;
use crate::{Engine, FidelityDocument};

/// Which rendering backend to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Append-only writer; fastest for workbooks built from scratch. With
    /// imported sheets present the hybrid path kicks in transparently.
    #[default]
    Fast,
    /// Full document model end to end.
    Fidelity,
}

/// Knobs shared by both backends.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Border color used when a border token carries no explicit color.
    pub border_fallback: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            border_fallback: Color::BLACK,
        }
    }
}

fn layouts_for(workbook: &WorkbookNode) -> Result<Vec<SheetLayout>> {
    let ctx = LayoutContext {
        workbook_tokens: &workbook.tokens,
    };
    workbook
        .fresh_sheets()
        .map(|sheet| Ok(layout_sheet(sheet, &ctx)?))
        .collect()
}

/// Run the whole fidelity pipeline, producing the document object. Fresh
/// sheets and imports are created in declared order, so no reorder is needed.
fn compose_fidelity(workbook: &WorkbookNode, options: &RenderOptions) -> Result<FidelityEngine> {
    let ctx = LayoutContext {
        workbook_tokens: &workbook.tokens,
    };
    let mut engine = FidelityEngine::empty(options);
    for entry in &workbook.entries {
        match entry {
            SheetEntry::Fresh(sheet) => {
                let layout = layout_sheet(sheet, &ctx)?;
                replay_sheet(&mut engine, &layout)?;
            }
            SheetEntry::Imported(import) => {
                engine.copy_sheet(&import.source, &import.source_sheet, import.output_name())?;
            }
        }
    }
    Ok(engine)
}

/// The hybrid path: fast-render the fresh sheets, reopen under the fidelity
/// engine, merge imports, restore declared order.
fn compose_hybrid(workbook: &WorkbookNode, options: &RenderOptions) -> Result<FidelityEngine> {
    let layouts = layouts_for(workbook)?;
    let mut engine = if layouts.is_empty() {
        FidelityEngine::empty(options)
    } else {
        log::debug!("hybrid: fast-rendering {} fresh sheets", layouts.len());
        let mut fast = FastEngine::new(options);
        for layout in &layouts {
            replay_sheet(&mut fast, layout)?;
        }
        let bytes = fast.finish()?;
        FidelityEngine::from_bytes(&bytes, options)?
    };
    for import in workbook.imported_sheets() {
        engine.copy_sheet(&import.source, &import.source_sheet, import.output_name())?;
    }
    let order: Vec<&str> = workbook.entries.iter().map(|e| e.name()).collect();
    engine.reorder_sheets(&order)?;
    Ok(engine)
}

/// Render a workbook to serialized document bytes.
pub fn render_workbook(
    workbook: &WorkbookNode,
    backend: BackendKind,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    workbook.validate()?;
    match backend {
        BackendKind::Fidelity => compose_fidelity(workbook, options)?.finish(),
        BackendKind::Fast if !workbook.has_imports() => {
            let mut engine = FastEngine::new(options);
            for layout in &layouts_for(workbook)? {
                replay_sheet(&mut engine, layout)?;
            }
            engine.finish()
        }
        BackendKind::Fast => compose_hybrid(workbook, options)?.finish(),
    }
}

/// Render a workbook and keep the document object instead of serializing,
/// for callers that want to keep editing past what the tree expresses.
pub fn render_document(
    workbook: &WorkbookNode,
    options: &RenderOptions,
) -> Result<FidelityDocument> {
    workbook.validate()?;
    Ok(compose_fidelity(workbook, options)?.into_document())
}

/// Render a workbook and write it to `path`. The document is fully rendered
/// in memory first; the file write is the last step.
pub fn save_workbook(
    workbook: &WorkbookNode,
    backend: BackendKind,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    let bytes = render_workbook(workbook, backend, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use sheetwright_core::{ImportedSheetNode, Node, SheetNode};

    fn sheet(name: &str, label: &str) -> SheetNode {
        SheetNode::new(name).with_child(Node::text(label))
    }

    fn render_bytes(workbook: &WorkbookNode, backend: BackendKind) -> Vec<u8> {
        render_workbook(workbook, backend, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_duplicate_names_fail_before_any_backend_runs() {
        let wb = WorkbookNode::new()
            .with_sheet(sheet("A", "x"))
            .with_sheet(sheet("A", "y"));
        let err = render_workbook(&wb, BackendKind::Fast, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, EngineError::Core(_)));
    }

    #[test]
    fn test_both_backends_render_fresh_only_workbooks() {
        let wb = WorkbookNode::new().with_sheet(sheet("Data", "x"));
        for backend in [BackendKind::Fast, BackendKind::Fidelity] {
            let bytes = render_bytes(&wb, backend);
            assert_eq!(&bytes[..2], b"PK");
        }
    }

    #[test]
    fn test_hybrid_preserves_declared_order() {
        // source document with one sheet to import
        let base = render_bytes(
            &WorkbookNode::new().with_sheet(sheet("History", "old")),
            BackendKind::Fidelity,
        );

        // import declared first, fresh sheet second
        let wb = WorkbookNode::new()
            .with_import(ImportedSheetNode::new(base, "History"))
            .with_sheet(sheet("Current", "new"));
        let engine = compose_hybrid(&wb, &RenderOptions::default()).unwrap();
        assert_eq!(engine.sheet_names(), vec!["History", "Current"]);
    }

    #[test]
    fn test_hybrid_with_no_fresh_sheets_starts_empty() {
        let base = render_bytes(
            &WorkbookNode::new().with_sheet(sheet("Only", "x")),
            BackendKind::Fidelity,
        );
        let wb = WorkbookNode::new().with_import(ImportedSheetNode::new(base, "Only"));
        let engine = compose_hybrid(&wb, &RenderOptions::default()).unwrap();
        // no stray default sheet alongside the import
        assert_eq!(engine.sheet_names(), vec!["Only"]);
    }

    #[test]
    fn test_import_of_missing_sheet_is_not_found() {
        let base = render_bytes(
            &WorkbookNode::new().with_sheet(sheet("Only", "x")),
            BackendKind::Fidelity,
        );
        let wb = WorkbookNode::new()
            .with_sheet(sheet("Fresh", "y"))
            .with_import(ImportedSheetNode::new(base, "Ghost"));
        let err = render_workbook(&wb, BackendKind::Fast, &RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SheetNotFound { sheet, .. } if sheet == "Ghost"
        ));
    }

    #[test]
    fn test_save_writes_the_rendered_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let wb = WorkbookNode::new().with_sheet(sheet("Data", "x"));
        save_workbook(&wb, BackendKind::Fast, &RenderOptions::default(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
