//! Style cascade resolution
//!
//! A cell's style is the fold of every token list on its ancestor chain,
//! outermost level first, each list in declaration order. Tokens touching
//! disjoint attributes compose; tokens touching the same attribute resolve to
//! whichever was applied last, so inner levels override outer ones and later
//! tokens override earlier ones at the same level.

use super::{BorderEdges, EffectiveStyle, StyleToken};
use crate::error::{Error, Result};

/// Tracks whether the current border edge set came from the "all sides"
/// shorthand. The first per-edge token after a shorthand replaces the edge set
/// instead of adding to it; per-edge tokens after that accumulate.
#[derive(Debug, Default)]
struct CascadeState {
    style: EffectiveStyle,
    border_from_shorthand: bool,
}

impl CascadeState {
    fn add_edges(&mut self, edges: BorderEdges) {
        if self.border_from_shorthand {
            self.style.border_edges = edges;
            self.border_from_shorthand = false;
        } else {
            self.style.border_edges.top |= edges.top;
            self.style.border_edges.bottom |= edges.bottom;
            self.style.border_edges.left |= edges.left;
            self.style.border_edges.right |= edges.right;
        }
    }

    fn apply(&mut self, token: &StyleToken) -> Result<()> {
        match token {
            StyleToken::Bold => self.style.bold = true,
            StyleToken::Italic => self.style.italic = true,
            StyleToken::FontName(name) => self.style.font_name = Some(name.clone()),
            StyleToken::FontSize(pts) => {
                check_dimension("font size", *pts)?;
                self.style.font_size = Some(*pts);
            }
            StyleToken::TextColor(c) => self.style.text_color = Some(*c),
            StyleToken::FillColor(c) => self.style.fill_color = Some(*c),
            StyleToken::Align(h) => self.style.horizontal = Some(*h),
            StyleToken::AlignV(v) => self.style.vertical = Some(*v),
            StyleToken::Indent(n) => self.style.indent = Some(*n),
            StyleToken::Wrap => self.style.wrap_text = Some(true),
            StyleToken::NoWrap => self.style.wrap_text = Some(false),
            StyleToken::Shrink => self.style.shrink_to_fit = true,
            StyleToken::NumberFormat(code) => self.style.number_format = Some(code.clone()),
            StyleToken::BorderAll => {
                self.style.border_edges = BorderEdges::ALL;
                self.border_from_shorthand = true;
            }
            StyleToken::BorderTop => self.add_edges(BorderEdges {
                top: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderBottom => self.add_edges(BorderEdges {
                bottom: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderLeft => self.add_edges(BorderEdges {
                left: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderRight => self.add_edges(BorderEdges {
                right: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderX => self.add_edges(BorderEdges {
                left: true,
                right: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderY => self.add_edges(BorderEdges {
                top: true,
                bottom: true,
                ..BorderEdges::NONE
            }),
            StyleToken::BorderStyle(s) => self.style.border_style = Some(*s),
            StyleToken::BorderColor(c) => self.style.border_color = Some(*c),
            StyleToken::RowHeight(h) => {
                check_dimension("row height", *h)?;
                self.style.row_height = Some(*h);
            }
            StyleToken::ColWidth(w) => {
                check_dimension("column width", *w)?;
                self.style.col_width = Some(*w);
            }
        }
        Ok(())
    }
}

fn check_dimension(what: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidDimension { what, value });
    }
    Ok(())
}

/// Resolve the effective style for one cell.
///
/// `levels` is the cell's ancestor chain from the outermost node inward; each
/// level is that node's token list in declaration order. The result depends
/// only on the token sequence, so resolving the same chain twice yields the
/// same style.
pub fn resolve_style<'a, I, L>(levels: I) -> Result<EffectiveStyle>
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = &'a StyleToken>,
{
    let mut state = CascadeState::default();
    for level in levels {
        for token in level {
            state.apply(token)?;
        }
    }
    Ok(state.style)
}
