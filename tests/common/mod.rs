#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, Once};

use altarscan_lib::{ElementId, ElementTree, Rect, Side};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub const EXARCH_PATH: &str = "Metadata/MiscellaneousObjects/PrimordialBosses/CleansingFireAltar";
pub const EATER_PATH: &str = "Metadata/MiscellaneousObjects/PrimordialBosses/TangleAltar";

struct Node {
    text: String,
    path: String,
    valid: bool,
}

/// Host tree where every altar is a container with ids `n`, `n+1` (top text),
/// `n+2` (bottom text), `n+3`/`n+4` (buttons).
#[derive(Default)]
pub struct HostTree {
    nodes: Mutex<HashMap<u64, Node>>,
    altars: Mutex<Vec<u64>>,
}

impl HostTree {
    pub fn add_altar(&self, path: &str, top: &str, bottom: &str) -> ElementId {
        let mut nodes = self.nodes.lock().unwrap();
        let base = nodes.len() as u64 + 1;
        let texts = ["", top, bottom, "", ""];
        for (offset, text) in texts.iter().enumerate() {
            nodes.insert(
                base + offset as u64,
                Node {
                    text: text.to_string(),
                    path: if offset == 0 { path.to_string() } else { String::new() },
                    valid: true,
                },
            );
        }
        self.altars.lock().unwrap().push(base);
        ElementId(base)
    }

    pub fn close_altar(&self, container: ElementId) {
        self.altars.lock().unwrap().retain(|id| *id != container.0);
        let mut nodes = self.nodes.lock().unwrap();
        for offset in 0..5 {
            if let Some(node) = nodes.get_mut(&(container.0 + offset)) {
                node.valid = false;
            }
        }
    }
}

impl ElementTree for HostTree {
    fn altar_elements(&self) -> Vec<ElementId> {
        self.altars.lock().unwrap().iter().map(|id| ElementId(*id)).collect()
    }

    fn side_element(&self, container: ElementId, side: Side) -> Option<ElementId> {
        match side {
            Side::Top => Some(ElementId(container.0 + 1)),
            Side::Bottom => Some(ElementId(container.0 + 2)),
        }
    }

    fn click_element(&self, container: ElementId, side: Side) -> Option<ElementId> {
        match side {
            Side::Top => Some(ElementId(container.0 + 3)),
            Side::Bottom => Some(ElementId(container.0 + 4)),
        }
    }

    fn is_valid(&self, element: ElementId) -> bool {
        self.nodes
            .lock()
            .unwrap()
            .get(&element.0)
            .map(|n| n.valid)
            .unwrap_or(false)
    }

    fn is_visible(&self, element: ElementId) -> bool {
        self.is_valid(element)
    }

    fn text(&self, element: ElementId, max_chars: usize) -> Option<String> {
        self.nodes
            .lock()
            .unwrap()
            .get(&element.0)
            .map(|n| n.text.chars().take(max_chars).collect())
    }

    fn path(&self, element: ElementId) -> Option<String> {
        self.nodes.lock().unwrap().get(&element.0).map(|n| n.path.clone())
    }

    fn rect(&self, element: ElementId) -> Option<Rect> {
        Some(Rect::new(element.0 as f32 * 10.0, 0.0, 10.0, 10.0))
    }
}

/// Option text in the host's markup.
pub fn option_text(descriptor: &str, effects: &[&str]) -> String {
    let mut lines = vec![format!("<valuedefault>{{{descriptor}}}")];
    lines.extend(
        effects
            .iter()
            .map(|e| format!("<enchanted>{{<rgb(255,128,0)>{e}</rgb>}}")),
    );
    lines.join("\r\n")
}
