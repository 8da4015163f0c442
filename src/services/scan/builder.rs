//! Builds one altar component from the host element tree.

use log::debug;

use crate::services::altar::{AltarComponent, AltarPathFragments, SideComponent};
use crate::services::matcher::EffectMatcher;
use crate::services::scan::element::{ElementId, ElementTree, Side};
use crate::services::text::TextCleaner;
use crate::types::errors::{AltarError, AltarResult};

pub struct ComponentBuilder<'a> {
    pub tree: &'a dyn ElementTree,
    pub cleaner: &'a TextCleaner,
    pub matcher: &'a EffectMatcher,
    pub paths: &'a AltarPathFragments,
    pub max_text_chars: usize,
}

impl ComponentBuilder<'_> {
    /// Locate both sides of `container`, clean and match their text.
    ///
    /// Fails when either side element cannot be located; nothing is retried.
    pub fn build(&self, container: ElementId) -> AltarResult<AltarComponent> {
        let top = self.build_side(container, Side::Top)?;
        let bottom = self.build_side(container, Side::Bottom)?;

        let path = self.tree.path(container).unwrap_or_default();
        let altar_type = self.paths.classify(&path);

        Ok(AltarComponent::new(
            altar_type,
            container,
            top,
            bottom,
            self.tree.click_element(container, Side::Top),
            self.tree.click_element(container, Side::Bottom),
        ))
    }

    fn build_side(&self, container: ElementId, side: Side) -> AltarResult<SideComponent> {
        let element = self
            .tree
            .side_element(container, side)
            .filter(|el| self.tree.is_valid(*el))
            .ok_or(AltarError::MissingSideElement { container, side })?;

        let raw = self.tree.text(element, self.max_text_chars);
        let cleaned = self.cleaner.clean(raw.as_deref());
        if cleaned.is_empty() {
            debug!("[Scan] {} side of {} has no text", side, container);
        }

        Ok(SideComponent::build(element, &cleaned, self.matcher))
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
