//! Style tokens
//!
//! A token is one atomic style effect. Nodes carry an ordered list of them;
//! the cascade resolver folds the lists of a cell's ancestor chain into one
//! [`EffectiveStyle`](super::EffectiveStyle).

use std::str::FromStr;

use super::{BorderLineStyle, Color, HorizontalAlign, VerticalAlign};
use crate::error::Error;

/// An atomic style effect attached to a node.
///
/// Tokens are a closed set so the cascade can match exhaustively and merge by
/// attribute. Tokens touching disjoint attributes compose; tokens touching the
/// same attribute resolve to the later one in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleToken {
    /// Bold font weight
    Bold,
    /// Italic slant
    Italic,
    /// Font family name
    FontName(String),
    /// Font size in points
    FontSize(f64),
    /// Text color
    TextColor(Color),
    /// Solid background fill
    FillColor(Color),
    /// Horizontal alignment
    Align(HorizontalAlign),
    /// Vertical alignment
    AlignV(VerticalAlign),
    /// Indent level
    Indent(u8),
    /// Wrap text onto multiple lines
    Wrap,
    /// Force single-line text even if an ancestor set wrapping
    NoWrap,
    /// Shrink the font to fit the cell
    Shrink,
    /// Number format code (e.g. "#,##0.00")
    NumberFormat(String),
    /// Border on all four edges (shorthand)
    BorderAll,
    /// Border on the top edge
    BorderTop,
    /// Border on the bottom edge
    BorderBottom,
    /// Border on the left edge
    BorderLeft,
    /// Border on the right edge
    BorderRight,
    /// Borders on the left and right edges
    BorderX,
    /// Borders on the top and bottom edges
    BorderY,
    /// Border line style
    BorderStyle(BorderLineStyle),
    /// Border color
    BorderColor(Color),
    /// Explicit height for the physical row a cell lands on
    RowHeight(f64),
    /// Explicit width for the physical column a cell lands on
    ColWidth(f64),
}

fn parse_color(token: &str, value: &str) -> Result<Color, Error> {
    Color::from_hex(value)
        .ok_or_else(|| Error::invalid_token(token, format!("'{}' is not a hex color", value)))
}

fn parse_number(token: &str, value: &str) -> Result<f64, Error> {
    value
        .parse::<f64>()
        .map_err(|_| Error::invalid_token(token, format!("'{}' is not a number", value)))
}

impl FromStr for StyleToken {
    type Err = Error;

    /// Parse a token from its textual name.
    ///
    /// Parameterless tokens are bare names ("bold", "wrap", "border-top");
    /// parameterized tokens use `name=value` ("height=40", "color=#FF0000").
    /// Unrecognized names are a configuration error, never ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((name, value)) = s.split_once('=') {
            return match name.trim() {
                "font" => Ok(StyleToken::FontName(value.trim().to_string())),
                "size" => Ok(StyleToken::FontSize(parse_number(s, value.trim())?)),
                "color" => Ok(StyleToken::TextColor(parse_color(s, value.trim())?)),
                "fill" => Ok(StyleToken::FillColor(parse_color(s, value.trim())?)),
                "border-color" => Ok(StyleToken::BorderColor(parse_color(s, value.trim())?)),
                "format" => Ok(StyleToken::NumberFormat(value.to_string())),
                "height" => Ok(StyleToken::RowHeight(parse_number(s, value.trim())?)),
                "width" => Ok(StyleToken::ColWidth(parse_number(s, value.trim())?)),
                "indent" => {
                    let n = value.trim().parse::<u8>().map_err(|_| {
                        Error::invalid_token(s, format!("'{}' is not a small integer", value))
                    })?;
                    Ok(StyleToken::Indent(n))
                }
                _ => Err(Error::UnknownToken(s.to_string())),
            };
        }

        match s.trim() {
            "bold" => Ok(StyleToken::Bold),
            "italic" => Ok(StyleToken::Italic),
            "wrap" => Ok(StyleToken::Wrap),
            "nowrap" => Ok(StyleToken::NoWrap),
            "shrink" => Ok(StyleToken::Shrink),
            "left" => Ok(StyleToken::Align(HorizontalAlign::Left)),
            "center" => Ok(StyleToken::Align(HorizontalAlign::Center)),
            "right" => Ok(StyleToken::Align(HorizontalAlign::Right)),
            "justify" => Ok(StyleToken::Align(HorizontalAlign::Justify)),
            "top" => Ok(StyleToken::AlignV(VerticalAlign::Top)),
            "middle" => Ok(StyleToken::AlignV(VerticalAlign::Center)),
            "bottom" => Ok(StyleToken::AlignV(VerticalAlign::Bottom)),
            "border" | "border-all" => Ok(StyleToken::BorderAll),
            "border-top" => Ok(StyleToken::BorderTop),
            "border-bottom" => Ok(StyleToken::BorderBottom),
            "border-left" => Ok(StyleToken::BorderLeft),
            "border-right" => Ok(StyleToken::BorderRight),
            "border-x" => Ok(StyleToken::BorderX),
            "border-y" => Ok(StyleToken::BorderY),
            "border-thin" => Ok(StyleToken::BorderStyle(BorderLineStyle::Thin)),
            "border-medium" => Ok(StyleToken::BorderStyle(BorderLineStyle::Medium)),
            "border-thick" => Ok(StyleToken::BorderStyle(BorderLineStyle::Thick)),
            "border-dashed" => Ok(StyleToken::BorderStyle(BorderLineStyle::Dashed)),
            "border-dotted" => Ok(StyleToken::BorderStyle(BorderLineStyle::Dotted)),
            "border-double" => Ok(StyleToken::BorderStyle(BorderLineStyle::Double)),
            "border-hair" => Ok(StyleToken::BorderStyle(BorderLineStyle::Hair)),
            other => Err(Error::UnknownToken(other.to_string())),
        }
    }
}
