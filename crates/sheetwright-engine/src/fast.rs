//! The append-only fast backend

use ahash::AHashMap;
use rust_xlsxwriter::{Color as XlsxColor, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use sheetwright_core::{
    BorderLineStyle, CellValue, Color, EffectiveStyle, HorizontalAlign, VerticalAlign,
};
use sheetwright_layout::MergeRange;

use crate::error::{EngineError, Result};
use crate::{Engine, RenderOptions, MIN_COL_WIDTH};

/// Append-only engine. Builds worksheets in memory and serializes the whole
/// workbook in one shot at [`finish`](Engine::finish).
///
/// Repeated styles are converted to a [`Format`] once and reused; the cache
/// is keyed on the full resolved style.
pub struct FastEngine {
    sheets: Vec<Worksheet>,
    names: Vec<String>,
    formats: AHashMap<EffectiveStyle, Format>,
    border_fallback: Color,
}

impl FastEngine {
    pub fn new(options: &RenderOptions) -> Self {
        FastEngine {
            sheets: Vec::new(),
            names: Vec::new(),
            formats: AHashMap::new(),
            border_fallback: options.border_fallback,
        }
    }

    fn current(&mut self) -> Result<&mut Worksheet> {
        self.sheets.last_mut().ok_or(EngineError::NoActiveSheet)
    }

    fn format_for(&mut self, style: &EffectiveStyle) -> Format {
        if let Some(format) = self.formats.get(style) {
            return format.clone();
        }
        let format = build_format(style, self.border_fallback);
        self.formats.insert(style.clone(), format.clone());
        format
    }
}

fn xlsx_color(color: Color) -> XlsxColor {
    XlsxColor::RGB(color.to_rgb_u32())
}

fn h_align(align: HorizontalAlign) -> FormatAlign {
    match align {
        HorizontalAlign::Left => FormatAlign::Left,
        HorizontalAlign::Center => FormatAlign::Center,
        HorizontalAlign::Right => FormatAlign::Right,
        HorizontalAlign::Justify => FormatAlign::Justify,
    }
}

fn v_align(align: VerticalAlign) -> FormatAlign {
    match align {
        VerticalAlign::Top => FormatAlign::Top,
        VerticalAlign::Center => FormatAlign::VerticalCenter,
        VerticalAlign::Bottom => FormatAlign::Bottom,
    }
}

fn border_style(style: BorderLineStyle) -> FormatBorder {
    match style {
        BorderLineStyle::Thin => FormatBorder::Thin,
        BorderLineStyle::Medium => FormatBorder::Medium,
        BorderLineStyle::Thick => FormatBorder::Thick,
        BorderLineStyle::Dashed => FormatBorder::Dashed,
        BorderLineStyle::Dotted => FormatBorder::Dotted,
        BorderLineStyle::Double => FormatBorder::Double,
        BorderLineStyle::Hair => FormatBorder::Hair,
    }
}

fn build_format(style: &EffectiveStyle, border_fallback: Color) -> Format {
    let mut f = Format::new();
    if style.bold {
        f = f.set_bold();
    }
    if style.italic {
        f = f.set_italic();
    }
    if let Some(name) = &style.font_name {
        f = f.set_font_name(name);
    }
    if let Some(size) = style.font_size {
        f = f.set_font_size(size);
    }
    if let Some(color) = style.text_color {
        f = f.set_font_color(xlsx_color(color));
    }
    if let Some(fill) = style.fill_color {
        f = f.set_background_color(xlsx_color(fill));
    }
    if let Some(align) = style.horizontal {
        f = f.set_align(h_align(align));
    }
    if let Some(align) = style.vertical {
        f = f.set_align(v_align(align));
    }
    if let Some(indent) = style.indent {
        f = f.set_indent(indent);
    }
    if style.wrap_text == Some(true) {
        f = f.set_text_wrap();
    }
    if style.shrink_to_fit {
        f = f.set_shrink();
    }
    if let Some(code) = &style.number_format {
        f = f.set_num_format(code);
    }
    if style.has_border() {
        let line = border_style(style.border_line_style());
        let color = xlsx_color(style.border_color.unwrap_or(border_fallback));
        let edges = style.border_edges;
        if edges.top {
            f = f.set_border_top(line).set_border_top_color(color);
        }
        if edges.bottom {
            f = f.set_border_bottom(line).set_border_bottom_color(color);
        }
        if edges.left {
            f = f.set_border_left(line).set_border_left_color(color);
        }
        if edges.right {
            f = f.set_border_right(line).set_border_right_color(color);
        }
    }
    f
}

impl Engine for FastEngine {
    fn create_sheet(&mut self, name: &str) -> Result<()> {
        if self.names.iter().any(|n| n == name) {
            return Err(EngineError::NameConflict(name.to_string()));
        }
        log::debug!("fast: creating sheet '{}'", name);
        let mut ws = Worksheet::new();
        ws.set_name(name)?;
        self.sheets.push(ws);
        self.names.push(name.to_string());
        Ok(())
    }

    fn write_cell(
        &mut self,
        row: u32,
        col: u32,
        value: &CellValue,
        style: &EffectiveStyle,
    ) -> Result<()> {
        let format = self.format_for(style);
        let ws = self.current()?;
        let (r, c) = (row - 1, (col - 1) as u16);
        match value {
            CellValue::Text(s) => {
                ws.write_string_with_format(r, c, s, &format)?;
            }
            CellValue::Number(n) => {
                ws.write_number_with_format(r, c, *n, &format)?;
            }
            CellValue::Bool(b) => {
                ws.write_boolean_with_format(r, c, *b, &format)?;
            }
            CellValue::Empty => {
                // A blank with no formatting writes nothing visible; skip it.
                if !style.is_default() {
                    ws.write_blank(r, c, &format)?;
                }
            }
        }
        Ok(())
    }

    fn merge_cells(&mut self, range: &MergeRange) -> Result<()> {
        let format = Format::new();
        let ws = self.current()?;
        // The anchor's value and style land in a later write, which takes
        // precedence over the placeholder written here.
        ws.merge_range(
            range.first_row - 1,
            (range.first_col - 1) as u16,
            range.last_row - 1,
            (range.last_col - 1) as u16,
            "",
            &format,
        )?;
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        let ws = self.current()?;
        ws.set_column_width((col - 1) as u16, width.max(MIN_COL_WIDTH))?;
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        let ws = self.current()?;
        ws.set_row_height(row - 1, height)?;
        Ok(())
    }

    fn fill_background(&mut self, color: Color, max_row: u32, max_col: u32) -> Result<()> {
        let fill = EffectiveStyle {
            fill_color: Some(color),
            ..EffectiveStyle::default()
        };
        let format = self.format_for(&fill);
        let ws = self.current()?;
        for row in 0..max_row {
            for col in 0..max_col as u16 {
                ws.write_blank(row, col, &format)?;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut wb = Workbook::new();
        for ws in self.sheets {
            wb.push_worksheet(ws);
        }
        let bytes = wb.save_to_buffer()?;
        log::debug!("fast: serialized workbook, {} bytes", bytes.len());
        Ok(bytes)
    }
}
