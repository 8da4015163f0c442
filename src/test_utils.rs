use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Once, OnceLock};

use crate::services::catalog::EffectDatabase;
use crate::services::scan::element::{ElementId, ElementTree, Rect, Side};

static INIT: Once = Once::new();
static BUILTIN_DB: OnceLock<Arc<EffectDatabase>> = OnceLock::new();

pub fn init_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Shared copy of the embedded catalog.
pub fn builtin_db() -> Arc<EffectDatabase> {
    BUILTIN_DB
        .get_or_init(|| Arc::new(EffectDatabase::builtin().expect("builtin catalog")))
        .clone()
}

pub const EXARCH_PATH: &str = "Metadata/MiscellaneousObjects/PrimordialBosses/CleansingFireAltar";
pub const EATER_PATH: &str = "Metadata/MiscellaneousObjects/PrimordialBosses/TangleAltar";

#[derive(Debug, Clone, Default)]
struct FakeElement {
    text: Option<String>,
    path: Option<String>,
    rect: Option<Rect>,
    valid: bool,
    visible: bool,
}

#[derive(Debug, Clone, Default)]
struct FakeAltar {
    sides: HashMap<Side, ElementId>,
    buttons: HashMap<Side, ElementId>,
}

/// In-memory element tree for scanner tests.
#[derive(Debug, Default)]
pub struct FakeTree {
    next_id: AtomicU64,
    elements: Mutex<HashMap<ElementId, FakeElement>>,
    altars: Mutex<Vec<(ElementId, FakeAltar)>>,
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_element(&self, element: FakeElement) -> ElementId {
        let id = ElementId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.elements.lock().unwrap().insert(id, element);
        id
    }

    /// Add a visible altar with both sides and buttons. Returns the container.
    pub fn add_altar(&self, path: &str, top_text: &str, bottom_text: &str) -> ElementId {
        let container = self.add_element(FakeElement {
            path: Some(path.to_string()),
            valid: true,
            visible: true,
            ..Default::default()
        });
        let mut altar = FakeAltar::default();
        for (index, (side, text)) in [(Side::Top, top_text), (Side::Bottom, bottom_text)]
            .into_iter()
            .enumerate()
        {
            let text_el = self.add_element(FakeElement {
                text: Some(text.to_string()),
                valid: true,
                visible: true,
                ..Default::default()
            });
            let button = self.add_element(FakeElement {
                rect: Some(Rect::new(100.0, 100.0 + 50.0 * index as f32, 200.0, 40.0)),
                valid: true,
                visible: true,
                ..Default::default()
            });
            altar.sides.insert(side, text_el);
            altar.buttons.insert(side, button);
        }
        self.altars.lock().unwrap().push((container, altar));
        container
    }

    pub fn side_of(&self, container: ElementId, side: Side) -> Option<ElementId> {
        self.altars
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == container)
            .and_then(|(_, altar)| altar.sides.get(&side).copied())
    }

    /// Detach one side so the host can no longer locate it.
    pub fn detach_side(&self, container: ElementId, side: Side) {
        if let Some((_, altar)) = self
            .altars
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(id, _)| *id == container)
        {
            altar.sides.remove(&side);
        }
    }

    pub fn set_valid(&self, element: ElementId, valid: bool) {
        if let Some(el) = self.elements.lock().unwrap().get_mut(&element) {
            el.valid = valid;
        }
    }

    pub fn set_visible(&self, element: ElementId, visible: bool) {
        if let Some(el) = self.elements.lock().unwrap().get_mut(&element) {
            el.visible = visible;
        }
    }

    /// Remove an altar container from the tree and invalidate its elements.
    pub fn remove_altar(&self, container: ElementId) {
        let mut altars = self.altars.lock().unwrap();
        if let Some(pos) = altars.iter().position(|(id, _)| *id == container) {
            let (_, altar) = altars.remove(pos);
            let mut elements = self.elements.lock().unwrap();
            for id in altar.sides.values().chain(altar.buttons.values()) {
                if let Some(el) = elements.get_mut(id) {
                    el.valid = false;
                }
            }
            if let Some(el) = elements.get_mut(&container) {
                el.valid = false;
            }
        }
    }
}

impl ElementTree for FakeTree {
    fn altar_elements(&self) -> Vec<ElementId> {
        self.altars.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }

    fn side_element(&self, container: ElementId, side: Side) -> Option<ElementId> {
        self.side_of(container, side)
    }

    fn click_element(&self, container: ElementId, side: Side) -> Option<ElementId> {
        self.altars
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == container)
            .and_then(|(_, altar)| altar.buttons.get(&side).copied())
    }

    fn is_valid(&self, element: ElementId) -> bool {
        self.elements
            .lock()
            .unwrap()
            .get(&element)
            .map(|el| el.valid)
            .unwrap_or(false)
    }

    fn is_visible(&self, element: ElementId) -> bool {
        self.elements
            .lock()
            .unwrap()
            .get(&element)
            .map(|el| el.visible)
            .unwrap_or(false)
    }

    fn text(&self, element: ElementId, max_chars: usize) -> Option<String> {
        self.elements
            .lock()
            .unwrap()
            .get(&element)
            .and_then(|el| el.text.as_ref())
            .map(|text| text.chars().take(max_chars).collect())
    }

    fn path(&self, element: ElementId) -> Option<String> {
        self.elements
            .lock()
            .unwrap()
            .get(&element)
            .and_then(|el| el.path.clone())
    }

    fn rect(&self, element: ElementId) -> Option<Rect> {
        self.elements
            .lock()
            .unwrap()
            .get(&element)
            .and_then(|el| el.rect)
    }
}

/// Option text the way the host renders it.
pub fn option_text(descriptor: &str, effects: &[&str]) -> String {
    let mut lines = vec![format!("<valuedefault>{{{descriptor}}}")];
    lines.extend(effects.iter().map(|e| format!("<enchanted>{{{e}}}")));
    lines.join("\n")
}
