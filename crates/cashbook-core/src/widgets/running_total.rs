//! Sum of the amounts of ticked items.

use std::rc::Rc;

use crate::component::{handler, subscriber, Component, Context, Target};
use crate::dom::NodeId;
use crate::event::{AppEvent, DomEvent, EventKind, EventType};
use crate::format::{format_pounds, parse_pence};

const SELECTOR: &str = ".js-RunningTotal";
const ITEM_SELECTOR: &str = ".js-RunningTotal-item";
const TOTAL_SELECTOR: &str = ".js-RunningTotal-total";
const COUNT_SELECTOR: &str = ".count-checked-checkboxes";
const NAMESPACE: &str = "running-total";

/// Appends a live total to `.js-RunningTotal` and keeps it, and every
/// `.count-checked-checkboxes`, current as items are ticked.
#[derive(Debug, Default)]
pub struct RunningTotal;

struct State {
    container: NodeId,
    items: Vec<NodeId>,
    label_text: String,
    label: NodeId,
    total: NodeId,
}

impl State {
    fn total_pence(&self, ctx: &Context<'_>) -> i64 {
        let dom = ctx.dom_ref();
        self.items
            .iter()
            .filter(|&&item| dom.is_checked(item))
            .map(|&item| parse_pence(&dom.data(item, "amount").unwrap_or_default()))
            .fold(0, i64::saturating_add)
    }

    fn update_total(&self, ctx: &mut Context<'_>) {
        let total = format_pounds(self.total_pence(ctx));
        let checked = ctx.dom_ref().query_all(&format!("{ITEM_SELECTOR}:checked")).len();

        let dom = ctx.dom();
        for node in dom.query_all(TOTAL_SELECTOR) {
            dom.set_text(node, &total);
        }
        for node in dom.query_all(COUNT_SELECTOR) {
            dom.set_text(node, &checked.to_string());
        }
    }

    fn on_change(&self, _event: &mut DomEvent, ctx: &mut Context<'_>) {
        self.update_total(ctx);
    }

    fn on_render(&self, _event: &AppEvent, ctx: &mut Context<'_>) {
        self.render(ctx);
    }

    fn render(&self, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        dom.set_attr(self.label, "aria-live", "polite");
        dom.set_attr(self.label, "aria-atomic", "false");
        dom.set_html(self.label, &format!("<span class=\"label\">{}</span>", self.label_text));
        dom.append_child(self.label, self.total);
        dom.append_child(self.container, self.label);
        self.update_total(ctx);
    }
}

impl Component for RunningTotal {
    fn name(&self) -> &'static str {
        "running-total"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let Some(container) = dom.query(SELECTOR) else {
            return;
        };
        let items = dom.query_all(ITEM_SELECTOR);
        let label_text = dom.data(container, "label").unwrap_or_default();

        let label = dom.create_element("p");
        dom.add_class(label, "label print-hidden");
        let total = dom.create_element("span");
        dom.add_class(total, "total js-RunningTotal-total");

        let state = Rc::new(State { container, items, label_text, label, total });
        ctx.subscribe(EventKind::RunningTotalRender, subscriber(&state, State::on_render));
        ctx.on(
            NAMESPACE,
            EventType::Change,
            Target::Nodes(state.items.clone()),
            handler(&state, State::on_change),
        );
        state.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{Dom, ElementSpec, MemoryDom};
    use crate::simulate::Browser;

    fn item(id: &str, amount: &str, checked: bool) -> ElementSpec {
        ElementSpec::new("input")
            .id(id)
            .class("js-RunningTotal-item")
            .attr("type", "checkbox")
            .data("amount", amount)
            .checked(checked)
    }

    fn browser() -> Browser {
        let dom = MemoryDom::from_children([
            ElementSpec::new("div").id("totals").class("js-RunningTotal").data("label", "Total"),
            ElementSpec::new("span").id("count").class("count-checked-checkboxes"),
            item("a", "1000.50", true),
            item("b", "250.25", false),
            item("c", "not a number", false),
        ]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(RunningTotal));
        browser
    }

    #[test]
    fn test_render_appends_label_and_initial_total() {
        let browser = browser();
        assert_eq!(browser.text(TOTAL_SELECTOR), "£1,000.50");
        assert_eq!(browser.text("#totals"), "Total£1,000.50");
        assert_eq!(browser.text("#count"), "1");

        let label = browser.find("#totals > p.label").expect("label is appended");
        assert_eq!(browser.dom().attr(label, "aria-live").as_deref(), Some("polite"));
    }

    #[test]
    fn test_toggling_moves_total_by_item_amount() {
        let mut browser = browser();
        browser.click_on("#b");
        assert_eq!(browser.text(TOTAL_SELECTOR), "£1,250.75");
        assert_eq!(browser.text("#count"), "2");

        browser.click_on("#a");
        assert_eq!(browser.text(TOTAL_SELECTOR), "£250.25");

        browser.click_on("#c");
        assert_eq!(browser.text(TOTAL_SELECTOR), "£250.25");
        assert_eq!(browser.text("#count"), "2");
    }

    #[test]
    fn test_render_event_recomputes_without_duplicating_label() {
        let mut browser = browser();
        let b = browser.find("#b").expect("fixture has #b");
        browser.dom_mut().set_checked(b, true);
        browser.publish(AppEvent::RunningTotalRender);

        assert_eq!(browser.text(TOTAL_SELECTOR), "£1,250.75");
        assert_eq!(browser.find_all("#totals > p").len(), 1);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_wrapping() {
        let dom = MemoryDom::from_children([
            ElementSpec::new("div").class("js-RunningTotal").data("label", "Total"),
            item("a", "90000000000000000", true),
            item("b", "90000000000000000", true),
        ]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(RunningTotal));

        assert_eq!(browser.text(TOTAL_SELECTOR), format_pounds(i64::MAX));
        assert!(!browser.text(TOTAL_SELECTOR).contains('-'));
    }
}
