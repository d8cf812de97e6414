//! # sheetwright-engine
//!
//! Rendering backends and workbook composition.
//!
//! A backend implements [`Engine`]: a small append-style contract that a
//! [`SheetLayout`](sheetwright_layout::SheetLayout) instruction stream is
//! replayed against. Two engines ship here:
//!
//! - [`FastEngine`] — append-only writer, fastest path for workbooks built
//!   entirely from scratch. Cannot copy sheets out of existing documents.
//! - [`FidelityEngine`] — full document object model. Slower, but can clone
//!   whole sheets (values, styles, merges, dimensions, everything the
//!   document carries) from external files without reconstructing them.
//!
//! [`render_workbook`] picks the pipeline: a single engine when it suffices,
//! or the hybrid path (fast render, reopen under the fidelity engine, merge
//! imports, reorder) when a fast render declares imported sheets.

mod compose;
mod error;
mod fast;
mod fidelity;
mod replay;

pub use compose::{render_document, render_workbook, save_workbook, BackendKind, RenderOptions};
pub use error::{EngineError, Result};
pub use fast::FastEngine;
pub use fidelity::FidelityEngine;
pub use replay::replay_sheet;

/// The full-fidelity document object, exposed for callers that need to keep
/// editing past what the declarative tree expresses.
pub use umya_spreadsheet::Spreadsheet as FidelityDocument;

use sheetwright_core::{CellValue, Color, EffectiveStyle, SheetSource};
use sheetwright_layout::MergeRange;

/// Column widths below this render unreadably narrow; both backends clamp
/// up to it.
pub const MIN_COL_WIDTH: f64 = 8.0;

/// The backend contract a sheet layout is replayed against.
///
/// Coordinates are 1-indexed, matching [`SheetLayout`](sheetwright_layout::SheetLayout).
/// Cell and sizing operations target the most recently created sheet.
pub trait Engine {
    /// Start a new sheet and make it the target of subsequent operations.
    fn create_sheet(&mut self, name: &str) -> Result<()>;

    /// Write one value with its resolved style.
    fn write_cell(&mut self, row: u32, col: u32, value: &CellValue, style: &EffectiveStyle)
        -> Result<()>;

    /// Merge a rectangular range.
    fn merge_cells(&mut self, range: &MergeRange) -> Result<()>;

    /// Set an explicit column width (clamped to [`MIN_COL_WIDTH`]).
    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()>;

    /// Set an explicit row height.
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()>;

    /// Paint the sheet background over the used extent.
    fn fill_background(&mut self, color: Color, max_row: u32, max_col: u32) -> Result<()>;

    /// Clone a whole sheet out of an existing document. Only engines that
    /// hold a full document model can do this.
    fn copy_sheet(
        &mut self,
        _source: &SheetSource,
        _source_sheet: &str,
        _dest_name: &str,
    ) -> Result<()> {
        Err(EngineError::Unsupported("copying sheets from existing documents"))
    }

    /// Capability flag for [`copy_sheet`](Engine::copy_sheet). The
    /// composition layer consults this instead of probing at runtime.
    fn supports_sheet_copy(&self) -> bool {
        false
    }

    /// Finalize the document to bytes.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
