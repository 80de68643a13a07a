//! Running count of credits ticked for processing.

use std::rc::Rc;

use crate::component::{handler, Component, Context, Target};
use crate::dom::NodeId;
use crate::event::{DomEvent, EventType};
use crate::i18n::interpolate;

const SELECTOR: &str = ".mtp-input--selection-count";
const ITEM_SELECTOR: &str = ".mtp-input--counted";
const NAMESPACE: &str = "selection-count";

#[derive(Debug, Default)]
pub struct SelectionCount;

struct State {
    containers: Vec<NodeId>,
}

impl State {
    fn on_change(&self, _event: &mut DomEvent, ctx: &mut Context<'_>) {
        let count = ctx.dom_ref().query_all(&format!("{ITEM_SELECTOR}:checked")).len();
        let count = count as u64;

        if !ctx.has_catalog() {
            // catalogue not loaded yet
            let text = format!("Credits selected for processing in NOMIS: {count}");
            for &container in &self.containers {
                ctx.dom().set_text(container, &text);
            }
            return;
        }

        if count > 0 {
            let message = ctx.ngettext(
                "%(count)s credit selected for processing in NOMIS.",
                "%(count)s credits selected for processing in NOMIS.",
                count,
            );
            let html = interpolate(&message, &[("count", &format!("<strong>{count}</strong>"))]);
            for &container in &self.containers {
                ctx.dom().set_html(container, &html);
            }
        } else {
            let text = ctx.gettext("You haven’t selected any to process yet.");
            for &container in &self.containers {
                ctx.dom().set_text(container, &text);
            }
        }
    }
}

impl Component for SelectionCount {
    fn name(&self) -> &'static str {
        "selection-count"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let containers = ctx.dom_ref().query_all(SELECTOR);
        if containers.is_empty() {
            return;
        }
        let items = ctx.dom_ref().query_all(ITEM_SELECTOR);
        let state = Rc::new(State { containers });
        ctx.on(NAMESPACE, EventType::Change, Target::Nodes(items), handler(&state, State::on_change));
    }
}
