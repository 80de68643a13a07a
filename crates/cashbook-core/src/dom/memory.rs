//! In-memory document used by unit tests and the acceptance harness.

use std::collections::BTreeMap;

use super::selector::{SelectorHost, SelectorList};
use super::{Animation, Dom, NodeId};

const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;

/// Declarative description of an element tree, used to build fixtures.
///
/// ```
/// use cashbook_core::dom::{ElementSpec, MemoryDom};
///
/// let dom = MemoryDom::from_children([ElementSpec::new("p").id("intro").text("Hello")]);
/// assert!(dom.by_id("intro").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    checked: bool,
    value: Option<String>,
    hidden: bool,
    layout: Option<(f64, f64, f64)>,
    children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), ..Self::default() }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds whitespace-separated classes.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes.extend(classes.split_whitespace().map(str::to_string));
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    #[must_use]
    pub fn data(self, key: &str, value: &str) -> Self {
        self.attr(&format!("data-{key}"), value)
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Document offset, height and width in pixels.
    #[must_use]
    pub fn layout(mut self, top: f64, height: f64, width: f64) -> Self {
        self.layout = Some((top, height, width));
        self
    }

    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    checked: bool,
    value: String,
    hidden: bool,
    style: BTreeMap<String, String>,
    top: f64,
    height: f64,
    width: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document held entirely in memory.
///
/// Layout is whatever the fixture says it is; animations finish
/// immediately and are recorded so tests can inspect them.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    elements: Vec<Element>,
    body: NodeId,
    focused: Option<NodeId>,
    scroll_top: f64,
    viewport_width: f64,
    animations: Vec<(NodeId, Animation)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document containing only `<body>`.
    pub fn new() -> Self {
        let body = Element { tag: "body".to_string(), ..Element::default() };
        Self {
            elements: vec![body],
            body: NodeId::from_raw(0),
            focused: None,
            scroll_top: 0.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            animations: Vec::new(),
        }
    }

    pub fn from_children(children: impl IntoIterator<Item = ElementSpec>) -> Self {
        let mut dom = Self::new();
        let body = dom.body;
        for spec in children {
            dom.append_spec(body, spec);
        }
        dom
    }

    /// Builds `spec` and appends it to `parent`.
    pub fn append_spec(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let node = self.build(spec);
        self.append_child(parent, node);
        node
    }

    fn build(&mut self, spec: ElementSpec) -> NodeId {
        let ElementSpec { tag, attrs, classes, text, checked, value, hidden, layout, children } =
            spec;
        let attrs: BTreeMap<String, String> = attrs.into_iter().collect();
        let initial_value = value.or_else(|| attrs.get("value").cloned()).unwrap_or_default();
        let (top, height, width) = layout.unwrap_or_default();
        let node = self.push(Element {
            tag,
            attrs,
            classes,
            text: escape_html(&text),
            checked,
            value: initial_value,
            hidden,
            top,
            height,
            width,
            ..Element::default()
        });

        for child in children {
            let child = self.build(child);
            self.append_child(node, child);
        }

        if self.element(node).is_some_and(|e| e.tag == "select" && e.value.is_empty()) {
            let selected = self.selected_option_value(node);
            if let Some(e) = self.element_mut(node) {
                e.value = selected;
            }
        }
        node
    }

    fn selected_option_value(&self, select: NodeId) -> String {
        let options = self.query_within(select, "option");
        options
            .iter()
            .find(|&&o| self.attr(o, "selected").is_some())
            .or_else(|| options.first())
            .and_then(|&o| self.attr(o, "value"))
            .unwrap_or_default()
    }

    fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        NodeId::from_raw(self.elements.len() - 1)
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.index())
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.index())
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.element(node).and_then(|e| e.parent) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(e) = self.element_mut(node) {
            e.parent = None;
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self.element_mut(node).map(|e| std::mem::take(&mut e.children));
        for child in children.unwrap_or_default() {
            if let Some(c) = self.element_mut(child) {
                c.parent = None;
            }
        }
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        if let Some(e) = self.element(root) {
            for &child in &e.children {
                out.push(child);
                self.descendants(child, out);
            }
        }
    }

    fn select(&self, root: NodeId, include_root: bool, selector: &str) -> Vec<NodeId> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!(selector, error = %e, "Ignoring unsupported selector");
                return Vec::new();
            },
        };
        let mut candidates = Vec::new();
        if include_root {
            candidates.push(root);
        }
        self.descendants(root, &mut candidates);
        candidates.retain(|&n| list.matches(self, n));
        candidates
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        let mut all = vec![self.body];
        self.descendants(self.body, &mut all);
        all.into_iter().find(|&n| self.attr(n, "id").as_deref() == Some(id))
    }

    /// Raw markup/text last written to `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.text.clone()).unwrap_or_default()
    }

    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64, width: f64) {
        if let Some(e) = self.element_mut(node) {
            e.top = top;
            e.height = height;
            e.width = width;
        }
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Animations started on `node`, oldest first.
    pub fn animations(&self, node: NodeId) -> Vec<Animation> {
        self.animations.iter().filter(|(n, _)| *n == node).map(|(_, a)| *a).collect()
    }

    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    /// Elements ever created, attached or not.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }
}

impl SelectorHost for MemoryDom {
    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map_or("", |e| e.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    fn class_list_contains(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn checked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.checked)
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {},
        }
    }
    unescape_html(&out)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    // `&amp;` last so an escaped entity stays literal
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&quot;", "\"").replace("&amp;", "&")
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        self.body
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.body, true, selector)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(root, false, selector)
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        SelectorList::parse(selector).is_ok_and(|list| list.matches(self, node))
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let list = SelectorList::parse(selector).ok()?;
        let mut current = Some(node);
        while let Some(n) = current {
            if list.matches(self, n) {
                return Some(n);
            }
            current = self.parent_node(n);
        }
        None
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_node(node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_node(node)?;
        let siblings = &self.element(parent)?.children;
        let position = siblings.iter().position(|&c| c == node)?;
        siblings.get(position + 1).copied()
    }

    fn tag(&self, node: NodeId) -> String {
        self.tag_name(node).to_string()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        if name == "class" {
            return self.element(node).map(|e| e.classes.join(" "));
        }
        self.attribute(node, name).map(str::to_string)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(e) = self.element_mut(node) else {
            return;
        };
        if name == "class" {
            e.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            e.attrs.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element_mut(node) {
            if name == "class" {
                e.classes.clear();
            } else {
                e.attrs.remove(name);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list_contains(node, class)
    }

    fn add_class(&mut self, node: NodeId, classes: &str) {
        if let Some(e) = self.element_mut(node) {
            for class in classes.split_whitespace() {
                if !e.classes.iter().any(|c| c == class) {
                    e.classes.push(class.to_string());
                }
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, classes: &str) {
        if let Some(e) = self.element_mut(node) {
            let remove: Vec<&str> = classes.split_whitespace().collect();
            e.classes.retain(|c| !remove.contains(&c.as_str()));
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.checked(node)
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(e) = self.element_mut(node) {
            e.checked = checked;
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.value = value.to_string();
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(e) = self.element(node) else {
            return String::new();
        };
        let mut text = strip_tags(&e.text);
        for &child in &e.children {
            text.push_str(&self.text(child));
        }
        text
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.set_html(node, &escape_html(text));
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        self.clear_children(node);
        if let Some(e) = self.element_mut(node) {
            e.text = html.to_string();
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut top = node;
        while let Some(n) = current {
            if self.element(n).map_or(true, |e| e.hidden) {
                return false;
            }
            top = n;
            current = self.parent_node(n);
        }
        top == self.body
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(e) = self.element_mut(node) {
            e.hidden = !visible;
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.element(node)?.style.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.style.insert(property.to_string(), value.to_string());
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.element(node).is_some() {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&n| self.is_attached(n))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Element { tag: tag.to_ascii_lowercase(), ..Element::default() })
    }

    fn clone_node(&mut self, node: NodeId) -> NodeId {
        let Some(original) = self.element(node).cloned() else {
            return node;
        };
        let children = original.children.clone();
        let copy = self.push(Element { parent: None, children: Vec::new(), ..original });
        for child in children {
            let child_copy = self.clone_node(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.element_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.element_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.element_mut(parent) {
            p.children.insert(0, child);
        }
        if let Some(c) = self.element_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent_node(reference) else {
            return;
        };
        if reference == node {
            return;
        }
        self.detach(node);
        if let Some(p) = self.element_mut(parent) {
            let position = p.children.iter().position(|&c| c == reference).map_or(0, |i| i + 1);
            p.children.insert(position, node);
        }
        if let Some(n) = self.element_mut(node) {
            n.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |e| e.top)
    }

    fn height(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |e| e.height)
    }

    fn width(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |e| e.width)
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top.max(0.0);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn animate(&mut self, node: NodeId, animation: Animation) {
        self.animations.push((node, animation));
        if let Some(e) = self.element_mut(node) {
            e.style.insert("top".to_string(), format!("{}px", animation.top));
            if animation.hide_on_finish {
                e.hidden = true;
            }
        }
    }
}
