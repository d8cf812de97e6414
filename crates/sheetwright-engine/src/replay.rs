//! Replaying a sheet layout against an engine
//!
//! The replay order is fixed: sheet creation, background, merges, cell
//! writes, then sizing. Merges go in before the writes so the anchor cell's
//! value and style land last and win.

use sheetwright_layout::SheetLayout;

use crate::{Engine, Result};

/// Replay one flattened sheet against `engine`.
pub fn replay_sheet<E: Engine>(engine: &mut E, layout: &SheetLayout) -> Result<()> {
    engine.create_sheet(&layout.name)?;
    if let Some(color) = layout.background {
        engine.fill_background(color, layout.max_row, layout.max_col)?;
    }
    for merge in &layout.merges {
        engine.merge_cells(merge)?;
    }
    for write in &layout.writes {
        engine.write_cell(write.row, write.col, &write.value, &write.style)?;
    }
    for (&row, &height) in &layout.row_heights {
        engine.set_row_height(row, height)?;
    }
    for (&col, &width) in &layout.col_widths {
        engine.set_column_width(col, width)?;
    }
    Ok(())
}
