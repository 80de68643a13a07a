//! Document abstraction the widgets are written against.
//!
//! Widgets never touch a browser API directly. They hold [`NodeId`] handles
//! obtained at mount time and go through [`Dom`] for every read and write,
//! so the same widget code runs over the real document in `cashbook-web`
//! and over [`MemoryDom`] in tests.

mod memory;
mod selector;


pub use memory::{ElementSpec, MemoryDom};
pub use selector::{SelectorError, SelectorList};

/// Opaque handle to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn from_raw(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Timing curve of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Swing,
    Linear,
}

impl Easing {
    /// CSS `transition-timing-function` equivalent.
    pub const fn css(self) -> &'static str {
        match self {
            Self::Swing => "ease-in-out",
            Self::Linear => "linear",
        }
    }
}

/// Animation of an element's `top` offset.
///
/// Starting an animation on an element stops the one already running on it,
/// leaving the element wherever it had got to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Final `top`, in pixels
    pub top: f64,
    pub duration_ms: u32,
    pub easing: Easing,
    /// Hide the element once the animation completes
    pub hide_on_finish: bool,
}

impl Animation {
    pub const fn slide_to(top: f64, duration_ms: u32) -> Self {
        Self { top, duration_ms, easing: Easing::Swing, hide_on_finish: false }
    }

    #[must_use]
    pub const fn linear(mut self) -> Self {
        self.easing = Easing::Linear;
        self
    }

    #[must_use]
    pub const fn then_hide(mut self) -> Self {
        self.hide_on_finish = true;
        self
    }
}

/// Read/write access to the page's elements.
///
/// Selectors are CSS selector strings. Query results are in document order.
/// Operations on a handle whose element has gone are no-ops.
pub trait Dom {
    fn body(&self) -> NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    /// Descendants of `root` matching `selector`.
    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Next element sibling.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Lower-case tag name.
    fn tag(&self, node: NodeId) -> String;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attr(&mut self, node: NodeId, name: &str);

    /// `data-*` attribute.
    fn data(&self, node: NodeId, key: &str) -> Option<String> {
        self.attr(node, &format!("data-{key}"))
    }

    /// Boolean `data-*` flag: present and not `"false"`.
    fn data_flag(&self, node: NodeId, key: &str) -> bool {
        self.data(node, key).is_some_and(|v| v != "false")
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Adds every whitespace-separated class in `classes`.
    fn add_class(&mut self, node: NodeId, classes: &str);

    /// Removes every whitespace-separated class in `classes`.
    fn remove_class(&mut self, node: NodeId, classes: &str);

    fn toggle_class(&mut self, node: NodeId, classes: &str, on: bool) {
        if on {
            self.add_class(node, classes);
        } else {
            self.remove_class(node, classes);
        }
    }

    fn is_checked(&self, node: NodeId) -> bool;
    fn set_checked(&mut self, node: NodeId, checked: bool);

    /// Current form control value (empty for non-controls).
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    /// Text content including descendants.
    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);
    fn set_html(&mut self, node: NodeId, html: &str);

    /// Displayed: not hidden itself, no hidden ancestor, attached to the page.
    fn is_visible(&self, node: NodeId) -> bool;
    fn set_visible(&mut self, node: NodeId, visible: bool);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn focus(&mut self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;

    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Deep copy, detached from the page.
    fn clone_node(&mut self, node: NodeId) -> NodeId;

    /// Moves `child` (detaching it first) to the end of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Moves `child` (detaching it first) to the start of `parent`.
    fn prepend_child(&mut self, parent: NodeId, child: NodeId);

    /// Moves `node` (detaching it first) directly after `reference`.
    fn insert_after(&mut self, reference: NodeId, node: NodeId);

    /// Detaches `node` from the page.
    fn remove(&mut self, node: NodeId);

    /// Distance from the top of the document, in pixels.
    fn offset_top(&self, node: NodeId) -> f64;
    fn height(&self, node: NodeId) -> f64;
    fn width(&self, node: NodeId) -> f64;

    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, top: f64);
    fn viewport_width(&self) -> f64;

    /// Stops any running animation on `node` and starts `animation`.
    fn animate(&mut self, node: NodeId, animation: Animation);
}
