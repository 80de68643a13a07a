//! As-you-type formatting of sort codes.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::event::{DomEvent, EventType};
use crate::format::format_sort_code;

const SELECTOR: &str = ".mtp-sort-code-control";
const NAMESPACE: &str = "sort-code";

#[derive(Debug, Default)]
pub struct SortCode;

fn on_key_up(event: &mut DomEvent, ctx: &mut Context<'_>) {
    let Some(control) = event.current() else {
        return;
    };
    let dom = ctx.dom();
    let value = dom.value(control);
    let formatted = format_sort_code(&value);
    if formatted != value {
        dom.set_value(control, &formatted);
    }
}

impl Component for SortCode {
    fn name(&self) -> &'static str {
        "sort-code"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let controls = ctx.dom_ref().query_all(SELECTOR);
        if controls.is_empty() {
            return;
        }
        let key_up: Handler = Rc::new(on_key_up);
        ctx.on(NAMESPACE, EventType::KeyUp, Target::Nodes(controls), key_up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{Dom, ElementSpec, MemoryDom};
    use crate::simulate::Browser;

    fn typed(text: &str) -> String {
        let dom = MemoryDom::from_children([ElementSpec::new("input")
            .id("id_sort_code")
            .class("mtp-sort-code-control")]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(SortCode));
        let control = browser.find(SELECTOR).expect("fixture has the control");
        browser.type_text(control, text);
        browser.dom().value(control)
    }

    #[test]
    fn test_typing_regroups_digits() {
        assert_eq!(typed("112233"), "11-22-33");
        assert_eq!(typed("11 22 33"), "11-22-33");
        assert_eq!(typed("11-22-33"), "11-22-33");
    }

    #[test]
    fn test_typing_drops_letters_and_keeps_partial_input() {
        assert_eq!(typed("1a1"), "11");
        assert_eq!(typed("1122x"), "11-22");
        assert_eq!(typed("1122334"), "11-22-334");
    }
}
