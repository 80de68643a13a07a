//! "Select all" checkboxes controlling a named group of checkboxes.

use std::rc::Rc;

use crate::component::{handler, subscriber, Component, Context, Target};
use crate::dom::NodeId;
use crate::event::{AppEvent, DomEvent, EventKind, EventType, Key, UiEvent};

const SELECTOR: &str = ".mtp-checkboxes--select-all";
const HIGHLIGHT_CLASS: &str = "mtp-table__highlighted-row";
const NAMESPACE: &str = "select-all";

/// Keeps the tracked checkboxes (`[name=<data-name>]`) in step with the
/// select-all controls and highlights the rows of checked items.
#[derive(Debug, Default)]
pub struct SelectAll;

struct State {
    controls: Vec<NodeId>,
    checks: Vec<NodeId>,
}

impl State {
    fn on_control_change(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(control) = event.current() else {
            return;
        };
        let checked = ctx.dom_ref().is_checked(control);
        for &check in &self.checks {
            ctx.dom().set_checked(check, checked);
            ctx.trigger(UiEvent::on(EventType::Change, check));
        }
        // other controls follow silently, a change here would loop
        for &other in &self.controls {
            ctx.dom().set_checked(other, checked);
        }
    }

    fn on_check_change(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(check) = event.current() else {
            return;
        };
        let dom = ctx.dom();
        let checked = dom.is_checked(check);
        if let Some(row) = dom.closest(check, "tr") {
            dom.toggle_class(row, HIGHLIGHT_CLASS, checked);
        }
    }

    fn on_keypress(&self, event: &mut DomEvent, _ctx: &mut Context<'_>) {
        if event.is_key(Key::ENTER) {
            event.prevent_default();
        }
    }

    fn on_render(&self, _event: &AppEvent, ctx: &mut Context<'_>) {
        self.render(ctx);
    }

    fn render(&self, ctx: &mut Context<'_>) {
        for &check in &self.checks {
            ctx.trigger(UiEvent::on(EventType::Change, check));
        }
    }
}

impl Component for SelectAll {
    fn name(&self) -> &'static str {
        "select-all"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let controls = ctx.dom_ref().query_all(SELECTOR);
        let Some(&first) = controls.first() else {
            return;
        };
        let name = ctx.dom_ref().data(first, "name").unwrap_or_default();
        let checks_selector = format!("[name=\"{name}\"]");
        let checks = ctx.dom_ref().query_all(&checks_selector);
        tracing::debug!(name, checks = checks.len(), "Select-all controls found");

        let state = Rc::new(State { controls, checks });
        ctx.subscribe(EventKind::SelectAllRender, subscriber(&state, State::on_render));
        ctx.on(
            NAMESPACE,
            EventType::Change,
            Target::body(SELECTOR),
            handler(&state, State::on_control_change),
        );
        ctx.on(
            NAMESPACE,
            EventType::Change,
            Target::body(checks_selector.clone()),
            handler(&state, State::on_check_change),
        );
        ctx.on(
            NAMESPACE,
            EventType::KeyPress,
            Target::body(format!("{checks_selector}, {SELECTOR}")),
            handler(&state, State::on_keypress),
        );
        state.render(ctx);
    }
}
