//! Border types

/// Which edges of a cell carry a border.
///
/// Edges are independently toggleable; the cascade's "all sides" shorthand
/// sets all four at once and a later per-edge token narrows it back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl BorderEdges {
    /// No edges
    pub const NONE: BorderEdges = BorderEdges {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    /// All four edges
    pub const ALL: BorderEdges = BorderEdges {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// Check if no edge is set
    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// Thin line
    #[default]
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Double line
    Double,
    /// Hair line (very thin)
    Hair,
}
