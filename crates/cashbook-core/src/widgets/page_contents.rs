//! Floating table of contents for long guidance pages.
//!
//! The page must have exactly one `.mtp-page-contents` box. Its
//! `.mtp-page-contents__list a` links point at headings by fragment; all
//! headings share one parent element whose extent bounds the floating.
//!
//! On every scroll and resize:
//!
//! - at viewport widths of 768px or less the box stays docked in the flow;
//! - once the reader scrolls past the top of the heading parent the box
//!   floats at the parent's width, pulled up by a negative `top` as the end
//!   of the parent approaches;
//! - the link of the first heading not yet scrolled past gets `active`.

use std::rc::Rc;

use crate::component::{handler, Component, Context, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};

const CONTAINER_SELECTOR: &str = ".mtp-page-contents";
const ANCHOR_SELECTOR: &str = ".mtp-page-contents__list a";
const FLOATED_CLASS: &str = "mtp-page-contents--floated";
const ACTIVE_CLASS: &str = "active";
const NAMESPACE: &str = "page-contents";

/// Widest viewport at which the box never floats.
pub const DOCK_WIDTH: f64 = 768.0;
/// Gap kept between the floating box and the end of the content.
const END_MARGIN: f64 = 10.0;

#[derive(Debug, Default)]
pub struct PageContents;

struct State {
    container: NodeId,
    anchors: Vec<NodeId>,
    headings: Vec<Option<NodeId>>,
    heading_parent: NodeId,
}

impl State {
    fn on_viewport_change(&self, _event: &mut DomEvent, ctx: &mut Context<'_>) {
        self.update(ctx.dom());
    }

    fn update(&self, dom: &mut dyn Dom) {
        for &anchor in &self.anchors {
            dom.remove_class(anchor, ACTIVE_CLASS);
        }
        if dom.viewport_width() <= DOCK_WIDTH {
            self.dock(dom);
            return;
        }

        let container_top = dom.offset_top(self.heading_parent);
        let scroll_offset = dom.scroll_top() - container_top;
        if scroll_offset > 0.0 {
            let past_end = dom.height(self.heading_parent)
                - dom.height(self.container)
                - scroll_offset
                - END_MARGIN;
            let top = if past_end < 0.0 { format!("{past_end}px") } else { "0".to_string() };
            dom.set_style(self.container, "top", &top);
            self.float(dom);
        } else {
            self.dock(dom);
        }

        let current = self.headings.iter().position(|heading| {
            heading.is_some_and(|h| dom.offset_top(h) + dom.height(h) - container_top > scroll_offset)
        });
        // Past the last heading the last link stays highlighted.
        let anchor = match current {
            Some(index) => self.anchors.get(index),
            None => self.anchors.last(),
        };
        if let Some(&anchor) = anchor {
            dom.add_class(anchor, ACTIVE_CLASS);
        }
    }

    fn float(&self, dom: &mut dyn Dom) {
        let width = dom.parent(self.container).map_or(0.0, |p| dom.width(p));
        dom.set_style(self.container, "width", &format!("{width}px"));
        dom.add_class(self.container, FLOATED_CLASS);
    }

    fn dock(&self, dom: &mut dyn Dom) {
        dom.set_style(self.container, "width", "auto");
        dom.remove_class(self.container, FLOATED_CLASS);
    }
}

impl Component for PageContents {
    fn name(&self) -> &'static str {
        "page-contents"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let containers = dom.query_all(CONTAINER_SELECTOR);
        let &[container] = containers.as_slice() else {
            return;
        };
        let anchors = dom.query_all(ANCHOR_SELECTOR);
        let headings: Vec<Option<NodeId>> = anchors
            .iter()
            .map(|&a| dom.attr(a, "href").filter(|h| h.starts_with('#')).and_then(|h| dom.query(&h)))
            .collect();
        let Some(heading_parent) = headings.first().copied().flatten().and_then(|h| dom.parent(h))
        else {
            tracing::debug!("Page contents links do not point at headings");
            return;
        };

        let state = Rc::new(State { container, anchors, headings, heading_parent });
        state.update(dom);
        for kind in [EventType::Scroll, EventType::Resize] {
            ctx.on(NAMESPACE, kind, Target::Document, handler(&state, State::on_viewport_change));
        }
    }
}
