//! Confirmation before submitting a partially selected batch of credits.

use std::rc::Rc;

use crate::component::{handler, Component, Context, Target};
use crate::dom::NodeId;
use crate::effect::Effect;
use crate::event::{AppEvent, DomEvent, EventType};
use crate::widgets::SUBMIT_SELECTOR;

const SELECTOR: &str = ".mtp-form--batch-validation";
const DIALOG_SELECTOR: &str = "#incomplete-batch-dialogue";
const DIALOG_PAGE_VIEW: &str = "/batch/-dialog_open/";
const NAMESPACE: &str = "batch-validation";

/// Intercepts the batch form's "submit" button: with some but not all
/// credits ticked it opens the incomplete batch dialog instead.
#[derive(Debug, Default)]
pub struct BatchValidation;

struct State {
    credits: Vec<NodeId>,
}

impl State {
    fn on_submit_click(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(button) = event.current() else {
            return;
        };
        let dom = ctx.dom_ref();
        // any other value is the dialog's own confirmation
        if dom.value(button) != "submit" {
            return;
        }

        let checked = self.credits.iter().filter(|&&c| dom.is_checked(c)).count();
        if checked == 0 || checked == self.credits.len() {
            return;
        }

        tracing::debug!(checked, total = self.credits.len(), "Partial batch submitted");
        event.prevent_default();
        ctx.publish(AppEvent::dialog_open(DIALOG_SELECTOR, Some(button)));
        ctx.effect(Effect::PageView { location: DIALOG_PAGE_VIEW.to_string() });
    }
}

impl Component for BatchValidation {
    fn name(&self) -> &'static str {
        "batch-validation"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom_ref();
        let Some(form) = dom.query(SELECTOR) else {
            return;
        };
        let name = dom.data(form, "credits-name").unwrap_or_default();
        let credits = dom.query_all(&format!("[name=\"{name}\"]"));

        let state = Rc::new(State { credits });
        ctx.on(
            NAMESPACE,
            EventType::Click,
            Target::within(vec![form], SUBMIT_SELECTOR),
            handler(&state, State::on_submit_click),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{ElementSpec, MemoryDom};
    use crate::event::EventKind;
    use crate::simulate::Browser;
    use std::cell::RefCell;

    struct DialogSpy(Rc<RefCell<Vec<AppEvent>>>);

    impl DialogSpy {
        fn record(log: &RefCell<Vec<AppEvent>>, event: &AppEvent, _ctx: &mut Context<'_>) {
            log.borrow_mut().push(event.clone());
        }
    }

    impl Component for DialogSpy {
        fn name(&self) -> &'static str {
            "dialog-spy"
        }

        fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
            ctx.subscribe(EventKind::DialogOpen, crate::component::subscriber(&self.0, Self::record));
        }
    }

    fn browser(checked: &[bool]) -> (Browser, Rc<RefCell<Vec<AppEvent>>>) {
        let credits = checked.iter().enumerate().map(|(i, &on)| {
            ElementSpec::new("input")
                .attr("type", "checkbox")
                .attr("name", "credits")
                .attr("value", &i.to_string())
                .checked(on)
        });
        let dom = MemoryDom::from_children([ElementSpec::new("form")
            .class("mtp-form--batch-validation")
            .data("credits-name", "credits")
            .children(credits)
            .child(
                ElementSpec::new("button")
                    .id("submit")
                    .attr("type", "submit")
                    .attr("value", "submit"),
            )
            .child(
                ElementSpec::new("button")
                    .id("override")
                    .attr("type", "submit")
                    .attr("value", "override"),
            )]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(BatchValidation).with(DialogSpy(Rc::clone(&log))));
        (browser, log)
    }

    #[test]
    fn test_partial_selection_opens_dialog() {
        let (mut browser, log) = browser(&[true, false, false]);
        let outcome = browser.click_on("#submit");

        assert!(outcome.default_prevented);
        assert!(browser.submissions().is_empty());
        let button = browser.find("#submit");
        assert_eq!(*log.borrow(), vec![AppEvent::dialog_open(DIALOG_SELECTOR, button)]);
        assert_eq!(
            browser.effects(),
            &[Effect::PageView { location: DIALOG_PAGE_VIEW.to_string() }]
        );
    }

    #[test]
    fn test_none_or_all_selected_submits() {
        for checked in [[false, false], [true, true]] {
            let (mut browser, log) = browser(&checked);
            let outcome = browser.click_on("#submit");
            assert!(!outcome.default_prevented);
            assert_eq!(browser.submissions().len(), 1);
            assert!(log.borrow().is_empty());
        }
    }

    #[test]
    fn test_confirmation_button_always_submits() {
        let (mut browser, log) = browser(&[true, false]);
        browser.click_on("#override");
        assert_eq!(browser.submissions()[0].value, "override");
        assert!(log.borrow().is_empty());
    }
}
