//! Confirmation before crediting a payment manually.

use crate::component::{Component, Context, Handler, Target};
use crate::event::{AppEvent, DomEvent, EventType};
use crate::widgets::SUBMIT_SELECTOR;

const SELECTOR: &str = ".mtp-form--confirm-manual";
const NAMESPACE: &str = "confirm-manual";

/// The "submit" button of a manual credit form opens
/// `#manual-confirm-dialogue-<data-credit-id>` instead of submitting.
#[derive(Debug, Default)]
pub struct ConfirmManual;

fn on_submit_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    let Some(button) = event.current() else {
        return;
    };
    let dom = ctx.dom_ref();
    if dom.value(button) != "submit" {
        return;
    }
    let credit_id = dom.data(button, "credit-id").unwrap_or_default();

    event.prevent_default();
    ctx.publish(AppEvent::dialog_open(format!("#manual-confirm-dialogue-{credit_id}"), Some(button)));
}

impl Component for ConfirmManual {
    fn name(&self) -> &'static str {
        "confirm-manual"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let forms = ctx.dom_ref().query_all(SELECTOR);
        if forms.is_empty() {
            return;
        }
        let handler: Handler = std::rc::Rc::new(on_submit_click);
        ctx.on(NAMESPACE, EventType::Click, Target::within(forms, SUBMIT_SELECTOR), handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{Dom, ElementSpec, MemoryDom};
    use crate::simulate::Browser;
    use crate::widgets::Dialog;

    fn browser() -> Browser {
        let dom = MemoryDom::from_children([
            ElementSpec::new("form").class("mtp-form--confirm-manual").child(
                ElementSpec::new("button")
                    .id("credit")
                    .attr("type", "submit")
                    .attr("value", "submit")
                    .data("credit-id", "42"),
            ),
            ElementSpec::new("dialog").id("manual-confirm-dialogue-42").hidden().child(
                ElementSpec::new("form").class("mtp-form--confirm-manual").child(
                    ElementSpec::new("button")
                        .id("yes")
                        .attr("type", "submit")
                        .attr("value", "confirm"),
                ),
            ),
        ]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(Dialog::default()).with(ConfirmManual));
        browser
    }

    #[test]
    fn test_submit_opens_credit_dialog() {
        let mut browser = browser();
        let outcome = browser.click_on("#credit");

        assert!(outcome.default_prevented);
        assert!(browser.submissions().is_empty());
        assert!(browser.is_visible("#manual-confirm-dialogue-42"));
        let dialog = browser.find("#manual-confirm-dialogue-42").expect("fixture has a dialog");
        assert_eq!(browser.dom().attr(dialog, "open").as_deref(), Some("true"));
    }

    #[test]
    fn test_dialog_confirmation_submits() {
        let mut browser = browser();
        browser.click_on("#credit");
        browser.click_on("#yes");
        assert_eq!(browser.submissions().len(), 1);
        assert_eq!(browser.submissions()[0].value, "confirm");
    }
}
