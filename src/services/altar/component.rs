//! Two-sided altar component and its identity key.

use crate::services::altar::classifier::AltarType;
use crate::services::altar::side::SideComponent;
use crate::services::scan::element::{ElementId, ElementTree, Side};

/// Separator between the 32 identity slots. Canonical ids contain `|`, so the
/// ASCII unit separator keeps keys unambiguous.
pub const IDENTITY_SEPARATOR: char = '\u{1f}';

/// One observed altar: a top and a bottom choice.
#[derive(Debug)]
pub struct AltarComponent {
    altar_type: AltarType,
    container: ElementId,
    top: SideComponent,
    bottom: SideComponent,
    top_button: Option<ElementId>,
    bottom_button: Option<ElementId>,
    identity_key: String,
}

impl AltarComponent {
    pub fn new(
        altar_type: AltarType,
        container: ElementId,
        top: SideComponent,
        bottom: SideComponent,
        top_button: Option<ElementId>,
        bottom_button: Option<ElementId>,
    ) -> Self {
        let identity_key = identity_key(&top, &bottom);
        Self {
            altar_type,
            container,
            top,
            bottom,
            top_button,
            bottom_button,
            identity_key,
        }
    }

    pub fn altar_type(&self) -> AltarType {
        self.altar_type
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn top(&self) -> &SideComponent {
        &self.top
    }

    pub fn bottom(&self) -> &SideComponent {
        &self.bottom
    }

    pub fn side(&self, side: Side) -> &SideComponent {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    /// Clickable element for `side`, when the host exposed one.
    pub fn button(&self, side: Side) -> Option<ElementId> {
        match side {
            Side::Top => self.top_button,
            Side::Bottom => self.bottom_button,
        }
    }

    /// All 32 slots joined in order: top upsides, top downsides, bottom
    /// upsides, bottom downsides.
    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    /// Short blake3 digest of the identity key, for logs.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(self.identity_key.as_bytes()).to_hex().to_string();
        hash[..16].to_string()
    }

    pub fn has_unmatched_effects(&self) -> bool {
        self.top.has_unmatched_effects() || self.bottom.has_unmatched_effects()
    }

    /// Valid while both side elements are still valid in the host tree.
    pub fn is_valid(&self, tree: &dyn ElementTree) -> bool {
        tree.is_valid(self.top.element()) && tree.is_valid(self.bottom.element())
    }

    /// Release cached weights and rectangles on both sides.
    pub fn invalidate(&self) {
        self.top.invalidate();
        self.bottom.invalidate();
    }
}

/// Identity key for a pair of sides. Empty slots serialize as empty strings.
pub fn identity_key(top: &SideComponent, bottom: &SideComponent) -> String {
    let slots = top
        .upside_slots()
        .into_iter()
        .chain(top.downside_slots())
        .chain(bottom.upside_slots())
        .chain(bottom.downside_slots());

    let mut key = String::new();
    for (index, value) in slots.enumerate() {
        if index > 0 {
            key.push(IDENTITY_SEPARATOR);
        }
        key.push_str(value);
    }
    key
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;
