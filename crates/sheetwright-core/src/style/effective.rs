//! The resolved style for one cell

use super::{BorderEdges, BorderLineStyle, Color, HorizontalAlign, VerticalAlign};

/// The complete, resolved style for one cell.
///
/// Produced by the cascade resolver at layout time and never mutated after a
/// cell is written. `Eq`/`Hash` cover the full attribute tuple so backends can
/// deduplicate repeated styles in a cache keyed by the style itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectiveStyle {
    /// Font family name (backend default when `None`)
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
    /// Text color
    pub text_color: Option<Color>,
    /// Solid background fill
    pub fill_color: Option<Color>,
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlign>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlign>,
    /// Indent level
    pub indent: Option<u8>,
    /// Wrap text; `Some(false)` is an explicit nowrap that beats an inherited wrap
    pub wrap_text: Option<bool>,
    /// Shrink font to fit
    pub shrink_to_fit: bool,
    /// Number format code
    pub number_format: Option<String>,
    /// Which edges carry a border
    pub border_edges: BorderEdges,
    /// Border line style (edges default to thin when unset)
    pub border_style: Option<BorderLineStyle>,
    /// Border color; the caller-supplied fallback applies when `None`
    pub border_color: Option<Color>,
    /// Explicit height request for the physical row this cell lands on
    pub row_height: Option<f64>,
    /// Explicit width request for the physical column this cell lands on
    pub col_width: Option<f64>,
}

impl EffectiveStyle {
    /// Check whether any border edge is set
    pub fn has_border(&self) -> bool {
        !self.border_edges.is_empty()
    }

    /// The border line style to draw, thin unless overridden
    pub fn border_line_style(&self) -> BorderLineStyle {
        self.border_style.unwrap_or_default()
    }

    /// True when the style is entirely default (no formatting to emit)
    pub fn is_default(&self) -> bool {
        *self == EffectiveStyle::default()
    }
}

impl std::hash::Hash for EffectiveStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.font_name.hash(state);
        self.font_size.map(f64::to_bits).hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.text_color.hash(state);
        self.fill_color.hash(state);
        self.horizontal.hash(state);
        self.vertical.hash(state);
        self.indent.hash(state);
        self.wrap_text.hash(state);
        self.shrink_to_fit.hash(state);
        self.number_format.hash(state);
        self.border_edges.hash(state);
        self.border_style.hash(state);
        self.border_color.hash(state);
        self.row_height.map(f64::to_bits).hash(state);
        self.col_width.map(f64::to_bits).hash(state);
    }
}

impl Eq for EffectiveStyle {}
