//! Radio buttons that reveal a related section.
//!
//! Each `.mtp-radio-reveal` names its section in `data-reveal`. Choosing a
//! radio shows its section and hides those of the other radios in the
//! same `name` group.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};

const SELECTOR: &str = ".mtp-radio-reveal";
const HIDDEN_CLASS: &str = "mtp-!-display-none-js-enabled-only";
const REVEAL_CLASSES: &str = "mtp-!-display-none-js-enabled-only govuk-!-display-none";
const NAMESPACE: &str = "radio-reveal";

#[derive(Debug, Default)]
pub struct RadioReveal;

fn group(dom: &dyn Dom, radio: NodeId) -> Vec<NodeId> {
    match dom.attr(radio, "name") {
        Some(name) => dom.query_all(&format!("{SELECTOR}[name=\"{name}\"]")),
        None => vec![radio],
    }
}

fn apply_group(dom: &mut dyn Dom, radio: NodeId) {
    for member in group(dom, radio) {
        let Some(section) = dom.data(member, "reveal").and_then(|s| dom.query(&s)) else {
            continue;
        };
        if dom.is_checked(member) {
            dom.remove_class(section, REVEAL_CLASSES);
        } else {
            dom.add_class(section, HIDDEN_CLASS);
        }
    }
}

fn on_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    if let Some(radio) = event.current() {
        apply_group(ctx.dom(), radio);
    }
}

impl Component for RadioReveal {
    fn name(&self) -> &'static str {
        "radio-reveal"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let radios = ctx.dom_ref().query_all(SELECTOR);
        if radios.is_empty() {
            return;
        }
        let dom = ctx.dom();
        for &radio in &radios {
            if dom.is_checked(radio) {
                apply_group(dom, radio);
            }
        }
        let click: Handler = Rc::new(on_click);
        ctx.on(NAMESPACE, EventType::Click, Target::Nodes(radios), click);
    }
}
