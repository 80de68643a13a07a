//! Modal dialogs.
//!
//! A dialog opens from a `.js-Dialog` link (its `href` names the dialog) or
//! from an [`AppEvent::DialogOpen`]. While open it carries `open`,
//! `tabindex="-1"` and `role="dialog"`, has focus, sits above a
//! `.Dialog-backdrop` and, unless `data-hide-close` is set, contains a
//! generated `.Dialog-close` control. It closes on that control, on the
//! backdrop (unless `data-disable-backdrop-close`), on `.js-Dialog-close`,
//! on Escape, or on [`AppEvent::DialogClose`]; focus then returns to
//! whatever opened it. At most one dialog is open at a time.

use std::cell::Cell;
use std::rc::Rc;

use crate::component::{handler, subscriber, Component, Context, Handler, Target};
use crate::dom::NodeId;
use crate::event::{AppEvent, DomEvent, EventKind, EventType, Key};

const TRIGGER_SELECTOR: &str = ".js-Dialog";
const CLOSE_TRIGGER_SELECTOR: &str = ".js-Dialog-close";
const CLOSE_CLASS: &str = "Dialog-close";
const BACKDROP_CLASS: &str = "Dialog-backdrop";
const NAMESPACE: &str = "dialog";
/// Handlers bound only while a dialog is open
const OPEN_NAMESPACE: &str = "dialog-open";

#[derive(Debug, Default)]
pub struct Dialog;

fn close_on_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    event.prevent_default();
    ctx.publish(AppEvent::DialogClose);
}

fn close_on_escape(event: &mut DomEvent, ctx: &mut Context<'_>) {
    if event.is_key(Key::ESCAPE) {
        ctx.publish(AppEvent::DialogClose);
    }
}

struct State {
    backdrop: NodeId,
    /// Close control moved into whichever dialog is open
    close: NodeId,
    open: Cell<Option<NodeId>>,
    trigger: Cell<Option<NodeId>>,
}

impl State {
    fn on_trigger_click(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        event.prevent_default();
        let Some(trigger) = event.current() else {
            return;
        };
        let target = ctx.dom_ref().attr(trigger, "href").unwrap_or_default();
        self.open(&target, Some(trigger), ctx);
    }

    fn on_close_click(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        event.prevent_default();
        self.close(ctx);
    }

    fn on_app_event(&self, event: &AppEvent, ctx: &mut Context<'_>) {
        match event {
            AppEvent::DialogOpen { target_selector, trigger } => {
                self.open(target_selector, *trigger, ctx);
            },
            AppEvent::DialogClose => self.close(ctx),
            _ => {},
        }
    }

    fn open(&self, target: &str, trigger: Option<NodeId>, ctx: &mut Context<'_>) {
        let dialog = if target.trim().is_empty() { None } else { ctx.dom_ref().query(target) };
        let Some(dialog) = dialog else {
            tracing::warn!(target, "Dialog target does not exist");
            return;
        };
        if self.open.get().is_some() {
            self.close(ctx);
        }
        self.trigger.set(trigger);
        self.open.set(Some(dialog));

        let dom = ctx.dom();
        let hide_close = dom.data_flag(dialog, "hide-close");
        let backdrop_closes = !dom.data_flag(dialog, "disable-backdrop-close");

        if !hide_close {
            let label = dom.data(dialog, "close-label").filter(|l| !l.is_empty());
            dom.set_text(self.close, label.as_deref().unwrap_or("close"));
            dom.append_child(dialog, self.close);
        }

        dom.set_attr(dialog, "open", "true");
        dom.set_attr(dialog, "tabindex", "-1");
        dom.set_attr(dialog, "role", "dialog");
        dom.set_visible(dialog, true);
        dom.focus(dialog);
        let body = dom.body();
        dom.prepend_child(body, self.backdrop);
        dom.set_scroll_top(0.0);

        let mut close_selector = format!(".{CLOSE_CLASS}");
        if backdrop_closes {
            close_selector.push_str(&format!(", .{BACKDROP_CLASS}"));
        }
        let on_click: Handler = Rc::new(close_on_click);
        let on_escape: Handler = Rc::new(close_on_escape);
        ctx.on(OPEN_NAMESPACE, EventType::Click, Target::body(close_selector), on_click);
        ctx.on(OPEN_NAMESPACE, EventType::KeyUp, Target::Document, on_escape);
        tracing::debug!(target, "Dialog opened");
    }

    fn close(&self, ctx: &mut Context<'_>) {
        let Some(dialog) = self.open.take() else {
            return;
        };
        let dom = ctx.dom();
        dom.remove(self.close);
        for name in ["open", "tabindex", "role"] {
            dom.remove_attr(dialog, name);
        }
        dom.set_visible(dialog, false);
        dom.remove(self.backdrop);
        if let Some(trigger) = self.trigger.take() {
            dom.focus(trigger);
        }
        ctx.off(OPEN_NAMESPACE);
        tracing::debug!("Dialog closed");
    }
}

impl Component for Dialog {
    fn name(&self) -> &'static str {
        "dialog"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let backdrop = dom.create_element("div");
        dom.add_class(backdrop, BACKDROP_CLASS);
        let close = dom.create_element("a");
        dom.set_attr(close, "href", "#");
        dom.set_attr(close, "role", "button");
        dom.add_class(close, CLOSE_CLASS);

        let state = Rc::new(State {
            backdrop,
            close,
            open: Cell::new(None),
            trigger: Cell::new(None),
        });
        ctx.subscribe(EventKind::DialogOpen, subscriber(&state, State::on_app_event));
        ctx.subscribe(EventKind::DialogClose, subscriber(&state, State::on_app_event));
        ctx.on(
            NAMESPACE,
            EventType::Click,
            Target::body(TRIGGER_SELECTOR),
            handler(&state, State::on_trigger_click),
        );
        ctx.on(
            NAMESPACE,
            EventType::Click,
            Target::body(CLOSE_TRIGGER_SELECTOR),
            handler(&state, State::on_close_click),
        );
    }
}
