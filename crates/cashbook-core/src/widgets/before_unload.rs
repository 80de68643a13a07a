//! Warns before leaving a form with unsaved changes.

use std::cell::Cell;
use std::rc::Rc;

use crate::component::{handler, Component, Context, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};
use crate::widgets::SUBMIT_SELECTOR;

const SELECTOR: &str = ".js-BeforeUnload";
const FIELD_SELECTOR: &str = "input, select, textarea";
const NAMESPACE: &str = "before-unload";

/// Submit button values that mean the form is being saved.
const SAVING_VALUES: [&str; 2] = ["submit", "override"];

/// The first `.js-BeforeUnload` form has its field values captured at
/// mount. Leaving the page prompts with its `data-unload-msg` if any value
/// has changed since, unless the form is being submitted with a saving
/// button.
#[derive(Debug, Default)]
pub struct BeforeUnload;

struct State {
    form: NodeId,
    initial: Vec<(String, String)>,
    message: String,
    submitting: Cell<bool>,
}

/// Successful controls of `form` as name/value pairs, in document order.
fn serialize(dom: &dyn Dom, form: NodeId) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for field in dom.query_within(form, FIELD_SELECTOR) {
        let Some(name) = dom.attr(field, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        if dom.attr(field, "disabled").is_some() {
            continue;
        }
        let kind = dom.attr(field, "type").unwrap_or_default().to_ascii_lowercase();
        match kind.as_str() {
            "submit" | "button" | "reset" | "file" | "image" => continue,
            "checkbox" | "radio" if !dom.is_checked(field) => continue,
            "checkbox" | "radio" => {
                let value = dom.attr(field, "value").unwrap_or_else(|| "on".to_string());
                pairs.push((name, value));
            },
            _ => pairs.push((name, dom.value(field))),
        }
    }
    pairs
}

impl State {
    fn on_submit_click(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(button) = event.current() else {
            return;
        };
        let value = ctx.dom_ref().value(button);
        self.submitting.set(SAVING_VALUES.contains(&value.as_str()));
    }

    fn on_before_unload(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        if self.submitting.get() {
            return;
        }
        if serialize(ctx.dom_ref(), self.form) != self.initial {
            event.set_return_value(self.message.clone());
        }
    }
}

impl Component for BeforeUnload {
    fn name(&self) -> &'static str {
        "before-unload"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom_ref();
        let Some(form) = dom.query(SELECTOR) else {
            return;
        };
        let state = Rc::new(State {
            form,
            initial: serialize(dom, form),
            message: dom.data(form, "unload-msg").unwrap_or_default(),
            submitting: Cell::new(false),
        });
        ctx.on(
            NAMESPACE,
            EventType::Click,
            Target::within(vec![form], SUBMIT_SELECTOR),
            handler(&state, State::on_submit_click),
        );
        ctx.on(
            NAMESPACE,
            EventType::BeforeUnload,
            Target::Document,
            handler(&state, State::on_before_unload),
        );
    }
}
