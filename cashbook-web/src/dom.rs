//! [`Dom`] over the live browser document.
//!
//! Elements are interned on first sight: a [`NodeId`] is the element's
//! index in an append-only table, stamped on the element as
//! `data-cashbook-node` so looking it up again is a single attribute read.

use std::cell::RefCell;
use std::collections::HashMap;

use cashbook_core::dom::{Animation, Dom, NodeId};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, Window,
};

/// Attribute carrying an element's interned index.
const NODE_ATTR: &str = "data-cashbook-node";

fn parse_stamp(raw: Option<String>) -> Option<usize> {
    raw?.parse().ok()
}

pub struct WebDom {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<Element>>,
    /// Pending end-of-animation callbacks; replacing one cancels it
    animations: RefCell<HashMap<NodeId, Timeout>>,
}

impl WebDom {
    /// Wraps the current window's document. `None` outside a browser.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let body: Element = document.body()?.into();
        let dom = Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
            animations: RefCell::new(HashMap::new()),
        };
        // body is always index 0
        dom.intern(&body);
        Some(dom)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Id of `element`, allocating one on first sight.
    pub fn intern(&self, element: &Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        // clones carry their original's stamp, so the table entry must match
        if let Some(index) = parse_stamp(element.get_attribute(NODE_ATTR)) {
            if nodes.get(index) == Some(element) {
                return NodeId::from_raw(index);
            }
        }
        let index = nodes.len();
        drop(element.set_attribute(NODE_ATTR, &index.to_string()));
        nodes.push(element.clone());
        NodeId::from_raw(index)
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.index()).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: NodeList) -> Vec<NodeId> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(|e| self.intern(&e))
            .collect()
    }

    fn intern_opt(&self, element: Option<Element>) -> Option<NodeId> {
        element.map(|e| self.intern(&e))
    }
}

impl Dom for WebDom {
    fn body(&self) -> NodeId {
        NodeId::from_raw(0)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        match self.document.query_selector_all(selector) {
            Ok(list) => self.collect(list),
            Err(e) => {
                log::debug!("Invalid selector {selector:?}: {e:?}");
                Vec::new()
            },
        }
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(root) = self.element(root) else {
            return Vec::new();
        };
        match root.query_selector_all(selector) {
            Ok(list) => self.collect(list),
            Err(e) => {
                log::debug!("Invalid selector {selector:?}: {e:?}");
                Vec::new()
            },
        }
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        self.element(node).is_some_and(|e| e.matches(selector).unwrap_or(false))
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let found = self.element(node)?.closest(selector).ok().flatten();
        self.intern_opt(found)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element();
        self.intern_opt(parent)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let sibling = self.element(node)?.next_element_sibling();
        self.intern_opt(sibling)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(a), Some(n)) => a.contains(Some(&n)),
            _ => false,
        }
    }

    fn tag(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.tag_name().to_ascii_lowercase()).unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element(node) {
            if let Err(err) = e.set_attribute(name, value) {
                log::warn!("Could not set {name}: {err:?}");
            }
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element(node) {
            drop(e.remove_attribute(name));
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, classes: &str) {
        if let Some(e) = self.element(node) {
            let list = e.class_list();
            for class in classes.split_whitespace() {
                drop(list.add_1(class));
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, classes: &str) {
        if let Some(e) = self.element(node) {
            let list = e.class_list();
            for class in classes.split_whitespace() {
                drop(list.remove_1(class));
            }
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.element(node)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .is_some_and(|input| input.checked())
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(input) = self.element(node).and_then(|e| e.dyn_into::<HtmlInputElement>().ok()) {
            input.set_checked(checked);
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(e) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = e.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = e.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = e.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            e.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        let Some(e) = self.element(node) else {
            return;
        };
        if let Some(input) = e.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = e.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = e.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).and_then(|e| e.text_content()).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.element(node) {
            e.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        if let Some(e) = self.element(node) {
            e.set_inner_html(html);
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.html(node).is_some_and(|e| e.offset_width() > 0 || e.offset_height() > 0)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        let Some(e) = self.html(node) else {
            return;
        };
        let style = e.style();
        if visible {
            drop(e.remove_attribute("hidden"));
            drop(style.remove_property("display"));
        } else {
            drop(style.set_property("display", "none"));
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self.html(node)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(e) = self.html(node) {
            drop(e.style().set_property(property, value));
        }
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(e) = self.html(node) {
            drop(e.focus());
        }
    }

    fn focused(&self) -> Option<NodeId> {
        let active = self.document.active_element();
        self.intern_opt(active)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(e) => self.intern(&e),
            Err(err) => {
                // only reachable with an invalid tag name
                log::error!("Could not create <{tag}>: {err:?}");
                self.body()
            },
        }
    }

    fn clone_node(&mut self, node: NodeId) -> NodeId {
        let copy = self
            .element(node)
            .and_then(|e| e.clone_node_with_deep(true).ok())
            .and_then(|n| n.dyn_into::<Element>().ok());
        match copy {
            Some(copy) => self.intern(&copy),
            None => node,
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(p), Some(c)) = (self.element(parent), self.element(child)) {
            drop(p.append_child(&c));
        }
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(p), Some(c)) = (self.element(parent), self.element(child)) {
            drop(p.prepend_with_node_1(&c));
        }
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        if let (Some(r), Some(n)) = (self.element(reference), self.element(node)) {
            drop(r.after_with_node_1(&n));
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(e) = self.element(node) {
            e.remove();
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        let scroll = self.window.scroll_y().unwrap_or(0.0);
        self.element(node).map_or(0.0, |e| e.get_bounding_client_rect().top() + scroll)
    }

    fn height(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |e| e.get_bounding_client_rect().height())
    }

    fn width(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |e| e.get_bounding_client_rect().width())
    }

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.window.scroll_to_with_x_and_y(0.0, top);
    }

    fn viewport_width(&self) -> f64 {
        self.window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0)
    }

    fn animate(&mut self, node: NodeId, animation: Animation) {
        let Some(e) = self.html(node) else {
            return;
        };
        // dropping the previous timeout cancels it
        self.animations.borrow_mut().remove(&node);

        let style = e.style();
        let transition =
            format!("top {}ms {}", animation.duration_ms, animation.easing.css());
        drop(style.set_property("transition", &transition));
        drop(style.set_property("top", &format!("{}px", animation.top)));

        if animation.hide_on_finish {
            let timeout = Timeout::new(animation.duration_ms, move || {
                drop(e.style().set_property("display", "none"));
            });
            self.animations.borrow_mut().insert(node, timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stamp() {
        assert_eq!(parse_stamp(Some("12".to_string())), Some(12));
        assert_eq!(parse_stamp(Some("x".to_string())), None);
        assert_eq!(parse_stamp(Some(String::new())), None);
        assert_eq!(parse_stamp(None), None);
    }
}
