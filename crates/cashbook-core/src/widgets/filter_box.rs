//! Disclosure box around the list filters.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};

const CONTROL_SELECTOR: &str = ".mtp-filter-box__control";
const EXPANDED_CLASS: &str = "mtp-filter-box__control--expanded";
const NAMESPACE: &str = "filter-box";

/// The first link inside each `.mtp-filter-box__control` shows and hides
/// the element named by its `aria-controls`. Boxes start collapsed unless
/// the link says `aria-expanded="true"`.
#[derive(Debug, Default)]
pub struct FilterBox;

fn set_expanded(dom: &mut dyn Dom, button: NodeId, expanded: bool) {
    let contents = dom.attr(button, "aria-controls").and_then(|id| dom.query(&format!("#{id}")));
    if let Some(contents) = contents {
        dom.set_visible(contents, expanded);
    }
    dom.set_attr(button, "aria-expanded", if expanded { "true" } else { "false" });
    if let Some(control) = dom.closest(button, CONTROL_SELECTOR) {
        dom.toggle_class(control, EXPANDED_CLASS, expanded);
    }
}

fn on_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    event.prevent_default();
    let Some(button) = event.current() else {
        return;
    };
    let dom = ctx.dom();
    let expanded = dom.attr(button, "aria-expanded").as_deref() == Some("true");
    set_expanded(dom, button, !expanded);
}

impl Component for FilterBox {
    fn name(&self) -> &'static str {
        "filter-box"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let mut buttons = Vec::new();
        for control in dom.query_all(CONTROL_SELECTOR) {
            let Some(button) = dom.query_within(control, "a").into_iter().next() else {
                continue;
            };
            let expanded = dom.attr(button, "aria-expanded").as_deref() == Some("true");
            set_expanded(dom, button, expanded);
            buttons.push(button);
        }
        if buttons.is_empty() {
            return;
        }
        let click: Handler = Rc::new(on_click);
        ctx.on(NAMESPACE, EventType::Click, Target::Nodes(buttons), click);
    }
}
