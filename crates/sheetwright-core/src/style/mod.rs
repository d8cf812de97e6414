//! Style tokens and the cascade resolver
//!
//! This module contains the style side of the document model:
//! - [`StyleToken`] - atomic style effects attached to nodes
//! - [`EffectiveStyle`] - the complete resolved style for one cell
//! - [`resolve_style`] - folds ordered token chains into an [`EffectiveStyle`]
//! - [`Color`] - color representation

mod align;
mod border;
mod cascade;
mod color;
mod effective;
mod token;

pub use align::{HorizontalAlign, VerticalAlign};
pub use border::{BorderEdges, BorderLineStyle};
pub use cascade::resolve_style;
pub use color::Color;
pub use effective::EffectiveStyle;
pub use token::StyleToken;
