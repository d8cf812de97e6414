//! The full-fidelity backend

use std::hash::Hasher;
use std::io::Cursor;
use std::path::PathBuf;

use ahash::{AHasher, AHashMap};
use sheetwright_core::{
    BorderLineStyle, CellValue, Color, EffectiveStyle, HorizontalAlign, SheetSource, VerticalAlign,
};
use sheetwright_layout::MergeRange;
use umya_spreadsheet::helper::coordinate::coordinate_from_index;
use umya_spreadsheet::{
    reader, writer, Border, HorizontalAlignmentValues, Spreadsheet, Style,
    VerticalAlignmentValues,
};

use crate::error::{EngineError, Result};
use crate::{Engine, RenderOptions, MIN_COL_WIDTH};

/// Cache key for loaded source documents: canonical path for files, content
/// hash for byte buffers. One external file feeding several imports is read
/// and parsed once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SourceKey {
    Path(PathBuf),
    Bytes(u64),
}

fn source_key(source: &SheetSource) -> SourceKey {
    match source {
        SheetSource::Path(path) => {
            SourceKey::Path(std::fs::canonicalize(path).unwrap_or_else(|_| path.clone()))
        }
        SheetSource::Bytes(bytes) => {
            let mut hasher = AHasher::default();
            hasher.write(bytes);
            SourceKey::Bytes(hasher.finish())
        }
    }
}

fn source_label(source: &SheetSource) -> String {
    match source {
        SheetSource::Path(path) => path.display().to_string(),
        SheetSource::Bytes(_) => "in-memory document".to_string(),
    }
}

/// Full document-model engine.
///
/// Holds the whole output document in memory and mutates it, so it can do
/// what the append-only engine cannot: reopen bytes, clone sheets out of
/// other documents wholesale, and reorder the sheet collection in place.
pub struct FidelityEngine {
    book: Spreadsheet,
    current: Option<String>,
    styles: AHashMap<EffectiveStyle, Style>,
    sources: AHashMap<SourceKey, Spreadsheet>,
    border_fallback: Color,
}

impl FidelityEngine {
    /// An engine over an empty document with no sheets at all.
    pub fn empty(options: &RenderOptions) -> Self {
        FidelityEngine {
            book: umya_spreadsheet::new_file_empty_worksheet(),
            current: None,
            styles: AHashMap::new(),
            sources: AHashMap::new(),
            border_fallback: options.border_fallback,
        }
    }

    /// Reopen a serialized document, typically one the fast engine produced.
    pub fn from_bytes(bytes: &[u8], options: &RenderOptions) -> Result<Self> {
        let book = reader::xlsx::read_reader(Cursor::new(bytes.to_vec()), true)
            .map_err(|e| EngineError::Document(e.to_string()))?;
        Ok(FidelityEngine {
            book,
            current: None,
            styles: AHashMap::new(),
            sources: AHashMap::new(),
            border_fallback: options.border_fallback,
        })
    }

    fn current_sheet(&mut self) -> Result<&mut umya_spreadsheet::Worksheet> {
        let name = self.current.as_ref().ok_or(EngineError::NoActiveSheet)?;
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or(EngineError::NoActiveSheet)
    }

    fn style_for(&mut self, style: &EffectiveStyle) -> Style {
        if let Some(cached) = self.styles.get(style) {
            return cached.clone();
        }
        let built = build_style(style, self.border_fallback);
        self.styles.insert(style.clone(), built.clone());
        built
    }

    fn load_source(&mut self, source: &SheetSource) -> Result<&Spreadsheet> {
        let key = source_key(source);
        if !self.sources.contains_key(&key) {
            log::debug!("fidelity: loading source {}", source_label(source));
            let book = match source {
                SheetSource::Path(path) => reader::xlsx::read(path)
                    .map_err(|e| EngineError::Document(e.to_string()))?,
                SheetSource::Bytes(bytes) => {
                    reader::xlsx::read_reader(Cursor::new(bytes.clone()), true)
                        .map_err(|e| EngineError::Document(e.to_string()))?
                }
            };
            self.sources.insert(key.clone(), book);
        }
        self.sources
            .get(&key)
            .ok_or_else(|| EngineError::Document("source cache miss".to_string()))
    }

    /// Reorder the sheet collection in place to match `order`. Sheets are
    /// moved within the collection, never detached from the document, so
    /// cross-sheet state survives.
    pub fn reorder_sheets(&mut self, order: &[&str]) -> Result<()> {
        let sheets = self.book.get_sheet_collection_mut();
        for (target, name) in order.iter().enumerate() {
            let pos = sheets
                .iter()
                .position(|s| s.get_name() == *name)
                .ok_or_else(|| EngineError::SheetNotFound {
                    sheet: name.to_string(),
                    document: "output document".to_string(),
                })?;
            if pos != target {
                let ws = sheets.remove(pos);
                sheets.insert(target, ws);
            }
        }
        Ok(())
    }

    /// The declared names of the sheets, in collection order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .map(|s| s.get_name().to_string())
            .collect()
    }

    /// Hand the underlying document object to the caller.
    pub fn into_document(mut self) -> Spreadsheet {
        if !self.book.get_sheet_collection_no_check().is_empty() {
            self.book.set_active_sheet(0);
        }
        self.book
    }
}

fn h_align(align: HorizontalAlign) -> HorizontalAlignmentValues {
    match align {
        HorizontalAlign::Left => HorizontalAlignmentValues::Left,
        HorizontalAlign::Center => HorizontalAlignmentValues::Center,
        HorizontalAlign::Right => HorizontalAlignmentValues::Right,
        HorizontalAlign::Justify => HorizontalAlignmentValues::Justify,
    }
}

fn v_align(align: VerticalAlign) -> VerticalAlignmentValues {
    match align {
        VerticalAlign::Top => VerticalAlignmentValues::Top,
        VerticalAlign::Center => VerticalAlignmentValues::Center,
        VerticalAlign::Bottom => VerticalAlignmentValues::Bottom,
    }
}

fn border_style(style: BorderLineStyle) -> &'static str {
    match style {
        BorderLineStyle::Thin => Border::BORDER_THIN,
        BorderLineStyle::Medium => Border::BORDER_MEDIUM,
        BorderLineStyle::Thick => Border::BORDER_THICK,
        BorderLineStyle::Dashed => Border::BORDER_DASHED,
        BorderLineStyle::Dotted => Border::BORDER_DOTTED,
        BorderLineStyle::Double => Border::BORDER_DOUBLE,
        BorderLineStyle::Hair => Border::BORDER_HAIR,
    }
}

fn build_style(style: &EffectiveStyle, border_fallback: Color) -> Style {
    let mut s = Style::default();
    if let Some(fill) = style.fill_color {
        s.set_background_color(fill.to_argb_hex());
    }
    if style.bold
        || style.italic
        || style.font_name.is_some()
        || style.font_size.is_some()
        || style.text_color.is_some()
    {
        let font = s.get_font_mut();
        if let Some(name) = &style.font_name {
            font.set_name(name.clone());
        }
        if let Some(size) = style.font_size {
            font.set_size(size);
        }
        font.set_bold(style.bold);
        font.set_italic(style.italic);
        if let Some(color) = style.text_color {
            font.get_color_mut().set_argb(color.to_argb_hex());
        }
    }
    // The document model's alignment carries no indent or shrink-to-fit
    // fields; those two attributes only render through the fast engine.
    if style.horizontal.is_some() || style.vertical.is_some() || style.wrap_text.is_some() {
        let alignment = s.get_alignment_mut();
        if let Some(align) = style.horizontal {
            alignment.set_horizontal(h_align(align));
        }
        if let Some(align) = style.vertical {
            alignment.set_vertical(v_align(align));
        }
        if let Some(wrap) = style.wrap_text {
            alignment.set_wrap_text(wrap);
        }
    }
    if let Some(code) = &style.number_format {
        s.get_number_format_mut().set_format_code(code.clone());
    }
    if style.has_border() {
        let line = border_style(style.border_line_style());
        let color = style.border_color.unwrap_or(border_fallback).to_argb_hex();
        let borders = s.get_borders_mut();
        let edges = style.border_edges;
        if edges.top {
            let top = borders.get_top_mut();
            top.set_border_style(line);
            top.get_color_mut().set_argb(color.clone());
        }
        if edges.bottom {
            let bottom = borders.get_bottom_mut();
            bottom.set_border_style(line);
            bottom.get_color_mut().set_argb(color.clone());
        }
        if edges.left {
            let left = borders.get_left_mut();
            left.set_border_style(line);
            left.get_color_mut().set_argb(color.clone());
        }
        if edges.right {
            let right = borders.get_right_mut();
            right.set_border_style(line);
            right.get_color_mut().set_argb(color);
        }
    }
    s
}

impl Engine for FidelityEngine {
    fn create_sheet(&mut self, name: &str) -> Result<()> {
        if self.book.get_sheet_by_name(name).is_some() {
            return Err(EngineError::NameConflict(name.to_string()));
        }
        log::debug!("fidelity: creating sheet '{}'", name);
        self.book
            .new_sheet(name)
            .map_err(|e| EngineError::Document(e.to_string()))?;
        self.current = Some(name.to_string());
        Ok(())
    }

    fn write_cell(
        &mut self,
        row: u32,
        col: u32,
        value: &CellValue,
        style: &EffectiveStyle,
    ) -> Result<()> {
        let cell_style = if style.is_default() {
            None
        } else {
            Some(self.style_for(style))
        };
        let sheet = self.current_sheet()?;
        let cell = sheet.get_cell_mut((col, row));
        match value {
            CellValue::Text(s) => {
                cell.set_value(s.clone());
            }
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
            CellValue::Bool(b) => {
                cell.set_value_bool(*b);
            }
            CellValue::Empty => {}
        }
        if let Some(s) = cell_style {
            cell.set_style(s);
        }
        Ok(())
    }

    fn merge_cells(&mut self, range: &MergeRange) -> Result<()> {
        let sheet = self.current_sheet()?;
        let start = coordinate_from_index(&range.first_col, &range.first_row);
        let end = coordinate_from_index(&range.last_col, &range.last_row);
        sheet.add_merge_cells(format!("{}:{}", start, end));
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        let sheet = self.current_sheet()?;
        sheet
            .get_column_dimension_by_number_mut(&col)
            .set_width(width.max(MIN_COL_WIDTH));
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        let sheet = self.current_sheet()?;
        sheet.get_row_dimension_mut(&row).set_height(height);
        Ok(())
    }

    fn fill_background(&mut self, color: Color, max_row: u32, max_col: u32) -> Result<()> {
        let argb = color.to_argb_hex();
        let sheet = self.current_sheet()?;
        for row in 1..=max_row {
            for col in 1..=max_col {
                sheet.get_style_mut((col, row)).set_background_color(argb.clone());
            }
        }
        Ok(())
    }

    fn copy_sheet(
        &mut self,
        source: &SheetSource,
        source_sheet: &str,
        dest_name: &str,
    ) -> Result<()> {
        if self.book.get_sheet_by_name(dest_name).is_some() {
            return Err(EngineError::NameConflict(dest_name.to_string()));
        }
        let label = source_label(source);
        let source_book = self.load_source(source)?;
        let sheet = source_book
            .get_sheet_by_name(source_sheet)
            .ok_or_else(|| EngineError::SheetNotFound {
                sheet: source_sheet.to_string(),
                document: label,
            })?;
        log::debug!("fidelity: importing sheet '{}' as '{}'", source_sheet, dest_name);
        // Cloning the worksheet object carries everything it holds: values,
        // styles, merges, dimensions, validations, conditional formats.
        let mut copy = sheet.clone();
        copy.set_name(dest_name);
        self.book
            .add_sheet(copy)
            .map_err(|e| EngineError::Document(e.to_string()))?;
        Ok(())
    }

    fn supports_sheet_copy(&self) -> bool {
        true
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        if !self.book.get_sheet_collection_no_check().is_empty() {
            self.book.set_active_sheet(0);
        }
        let mut cursor = Cursor::new(Vec::new());
        writer::xlsx::write_writer(&self.book, &mut cursor)
            .map_err(|e| EngineError::Document(e.to_string()))?;
        let bytes = cursor.into_inner();
        log::debug!("fidelity: serialized workbook, {} bytes", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_empty_engine_has_no_sheets() {
        let engine = FidelityEngine::empty(&options());
        assert!(engine.sheet_names().is_empty());
    }

    #[test]
    fn test_write_before_create_sheet_is_rejected() {
        let mut engine = FidelityEngine::empty(&options());
        let err = engine
            .write_cell(1, 1, &CellValue::Number(1.0), &EffectiveStyle::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::NoActiveSheet));
    }

    #[test]
    fn test_duplicate_sheet_name_is_a_conflict() {
        let mut engine = FidelityEngine::empty(&options());
        engine.create_sheet("Data").unwrap();
        assert!(matches!(
            engine.create_sheet("Data").unwrap_err(),
            EngineError::NameConflict(name) if name == "Data"
        ));
    }

    #[test]
    fn test_reorder_moves_sheets_in_place() {
        let mut engine = FidelityEngine::empty(&options());
        for name in ["a", "b", "c"] {
            engine.create_sheet(name).unwrap();
        }
        engine.reorder_sheets(&["c", "a", "b"]).unwrap();
        assert_eq!(engine.sheet_names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_of_unknown_sheet_fails() {
        let mut engine = FidelityEngine::empty(&options());
        engine.create_sheet("a").unwrap();
        assert!(matches!(
            engine.reorder_sheets(&["ghost"]).unwrap_err(),
            EngineError::SheetNotFound { .. }
        ));
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let mut engine = FidelityEngine::empty(&options());
        engine.create_sheet("s").unwrap();
        engine
            .write_cell(2, 3, &CellValue::Text("hello".into()), &EffectiveStyle::default())
            .unwrap();
        let bytes = engine.finish().unwrap();

        let reopened = FidelityEngine::from_bytes(&bytes, &options()).unwrap();
        assert_eq!(reopened.sheet_names(), vec!["s"]);
        let doc = reopened.into_document();
        let sheet = doc.get_sheet_by_name("s").unwrap();
        assert_eq!(sheet.get_value((3, 2)), "hello");
    }

    #[test]
    fn test_copy_sheet_from_bytes_source() {
        // build a source document
        let mut src = FidelityEngine::empty(&options());
        src.create_sheet("Base").unwrap();
        src.write_cell(1, 1, &CellValue::Number(7.0), &EffectiveStyle::default())
            .unwrap();
        let source: SheetSource = src.finish().unwrap().into();

        let mut engine = FidelityEngine::empty(&options());
        engine.create_sheet("Fresh").unwrap();
        engine.copy_sheet(&source, "Base", "Imported").unwrap();
        assert_eq!(engine.sheet_names(), vec!["Fresh", "Imported"]);

        // a second import from the same source hits the cache
        engine.copy_sheet(&source, "Base", "Imported 2").unwrap();
        assert_eq!(engine.sources.len(), 1);

        assert!(matches!(
            engine.copy_sheet(&source, "Missing", "x").unwrap_err(),
            EngineError::SheetNotFound { sheet, .. } if sheet == "Missing"
        ));
        assert!(matches!(
            engine.copy_sheet(&source, "Base", "Fresh").unwrap_err(),
            EngineError::NameConflict(name) if name == "Fresh"
        ));
    }
}
