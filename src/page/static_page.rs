use std::collections::HashMap;

use crate::foundation::core::Rect;
use crate::page::host::{ElementId, LookupLog, PageHost, Role};

/// One element of a [`StaticPage`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticElement {
    /// Layout box in document coordinates.
    pub layout: Rect,
    /// Parent layout box, if the element has a parent.
    pub parent: Option<Rect>,
    /// Serialized markup for `<svg>` elements.
    pub svg: Option<String>,
}

/// In-memory [`PageHost`] with a fixed element table.
///
/// Records every video play and fade so callers can inspect what the effect did.
#[derive(Debug, Default)]
pub struct StaticPage {
    selectors: HashMap<String, ElementId>,
    elements: Vec<StaticElement>,
    properties: HashMap<String, String>,
    viewport_height: f64,
    played: Vec<ElementId>,
    fades: Vec<(ElementId, f64)>,
}

impl StaticPage {
    /// Empty page with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Add an element reachable through `role`'s selector.
    pub fn insert(&mut self, role: Role, element: StaticElement) -> ElementId {
        self.insert_selector(role.selector(), element)
    }

    /// Add an element reachable through an arbitrary selector.
    pub fn insert_selector(&mut self, selector: &str, element: StaticElement) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(element);
        self.selectors.insert(selector.to_owned(), id);
        id
    }

    /// Builder form of [`StaticPage::insert`].
    pub fn with(mut self, role: Role, element: StaticElement) -> Self {
        self.insert(role, element);
        self
    }

    /// Set a custom property value.
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_owned(), value.to_owned());
    }

    /// Builder form of [`StaticPage::set_property`].
    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.set_property(name, value);
        self
    }

    /// Mutable access to an element, e.g. to simulate a layout change.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut StaticElement> {
        self.elements.get_mut(id.0 as usize)
    }

    /// Videos played so far, in order.
    pub fn played(&self) -> &[ElementId] {
        &self.played
    }

    /// Fades requested so far, in order.
    pub fn fades(&self) -> &[(ElementId, f64)] {
        &self.fades
    }

    fn get(&self, id: ElementId) -> Option<&StaticElement> {
        self.elements.get(id.0 as usize)
    }
}

impl PageHost for StaticPage {
    fn lookup(&self, selector: &str, log: LookupLog) -> Option<ElementId> {
        let found = self.selectors.get(selector).copied();
        if found.is_none() {
            match log {
                LookupLog::Silent => {}
                LookupLog::Warn => tracing::warn!(selector, "element not found"),
                LookupLog::Error => tracing::error!(selector, "element not found"),
            }
        }
        found
    }

    fn layout_box(&self, element: ElementId) -> Option<Rect> {
        self.get(element).map(|e| e.layout)
    }

    fn parent_box(&self, element: ElementId) -> Option<Rect> {
        self.get(element).and_then(|e| e.parent)
    }

    fn serialize_svg(&self, element: ElementId) -> Option<String> {
        self.get(element).and_then(|e| e.svg.clone())
    }

    fn custom_property(&self, name: &str) -> Option<String> {
        self.properties
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn play_video(&mut self, element: ElementId) {
        self.played.push(element);
    }

    fn fade_out(&mut self, element: ElementId, duration_secs: f64) {
        self.fades.push((element, duration_secs));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/static_page.rs"]
mod tests;
