//! Host element-tree seam.
//!
//! The host owns the UI tree; the scanner only sees opaque element handles and
//! asks the host for text, flags, paths and rectangles through [`ElementTree`].

use serde::{Deserialize, Serialize};

/// Opaque handle to a host UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two choices on an altar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Top, Side::Bottom];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}

/// Screen rectangle of a clickable element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Read access to the host UI.
///
/// Implementations return `None`/`false`/empty for anything missing or stale
/// and never panic; the scanner treats those as "skip this item".
pub trait ElementTree: Send + Sync {
    /// Altar containers currently attached to the UI.
    fn altar_elements(&self) -> Vec<ElementId>;

    /// Element holding the option text for one side of an altar.
    fn side_element(&self, container: ElementId, side: Side) -> Option<ElementId>;

    /// Clickable element for one side of an altar.
    fn click_element(&self, container: ElementId, side: Side) -> Option<ElementId>;

    fn is_valid(&self, element: ElementId) -> bool;

    fn is_visible(&self, element: ElementId) -> bool;

    /// Element text, truncated by the host to at most `max_chars` characters.
    fn text(&self, element: ElementId, max_chars: usize) -> Option<String>;

    /// Origin path of the element (entity metadata path for altars).
    fn path(&self, element: ElementId) -> Option<String>;

    fn rect(&self, element: ElementId) -> Option<Rect>;
}
