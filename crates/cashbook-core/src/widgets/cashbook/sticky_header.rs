//! Copy of the batch table header that slides in once the original has
//! scrolled out of view.

use std::rc::Rc;

use crate::component::{handler, subscriber, Component, Context, Target};
use crate::dom::{Animation, NodeId};
use crate::event::{AppEvent, DomEvent, EventKind, EventType};

const SELECTOR: &str = ".mtp-sticky-header";
const STICKY_CLASS: &str = "mtp-sticky-header--sticky";
const FORM_SELECTOR: &str = ".mtp-form--batch-validation";
const NAMESPACE: &str = "sticky-header";

const SLIDE_IN_MS: u32 = 500;
const SLIDE_OUT_MS: u32 = 150;

#[derive(Debug, Default)]
pub struct StickyHeader;

struct State {
    original: NodeId,
    sticky: NodeId,
    form: Option<NodeId>,
    /// Scroll position past which the original is out of view
    offset: f64,
}

impl State {
    fn on_scroll(&self, _event: &mut DomEvent, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let header_height = dom.height(self.original);

        if dom.scroll_top() >= self.offset {
            if !dom.is_visible(self.sticky) {
                dom.set_style(self.sticky, "top", &format!("{}px", -header_height));
                dom.set_visible(self.sticky, true);
                dom.animate(self.sticky, Animation::slide_to(0.0, SLIDE_IN_MS));
            }
        } else {
            dom.animate(
                self.sticky,
                Animation::slide_to(-header_height, SLIDE_OUT_MS).linear().then_hide(),
            );
        }
    }

    fn on_render(&self, _event: &AppEvent, ctx: &mut Context<'_>) {
        self.render(ctx);
    }

    fn render(&self, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        dom.set_visible(self.sticky, false);
        if let Some(form) = self.form {
            dom.append_child(form, self.sticky);
        }
    }
}

impl Component for StickyHeader {
    fn name(&self) -> &'static str {
        "sticky-header"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let Some(original) = dom.query(SELECTOR) else {
            return;
        };
        let form = dom.query(FORM_SELECTOR);
        let sticky = dom.clone_node(original);
        dom.add_class(sticky, STICKY_CLASS);
        let offset = dom.offset_top(original) + dom.height(original);

        let state = Rc::new(State { original, sticky, form, offset });
        ctx.subscribe(EventKind::StickyHeaderRender, subscriber(&state, State::on_render));
        ctx.on(NAMESPACE, EventType::Scroll, Target::Document, handler(&state, State::on_scroll));
        state.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{Dom, ElementSpec, MemoryDom};
    use crate::simulate::Browser;

    fn browser() -> Browser {
        let dom = MemoryDom::from_children([ElementSpec::new("form")
            .class("mtp-form--batch-validation")
            .child(
                ElementSpec::new("div")
                    .class("mtp-sticky-header")
                    .layout(200.0, 40.0, 900.0)
                    .child(ElementSpec::new("span").text("Select all")),
            )]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(StickyHeader));
        browser
    }

    fn sticky(browser: &Browser) -> NodeId {
        browser.find(&format!(".{STICKY_CLASS}")).expect("clone is in the form")
    }

    #[test]
    fn test_clone_is_hidden_inside_form() {
        let browser = browser();
        let clone = sticky(&browser);
        let form = browser.find(FORM_SELECTOR).expect("fixture has a form");
        assert_eq!(browser.dom().parent(clone), Some(form));
        assert!(!browser.dom().is_visible(clone));
        assert_eq!(browser.dom().text(clone), "Select all");
    }

    #[test]
    fn test_shows_at_offset_and_hides_below() {
        let mut browser = browser();
        let clone = sticky(&browser);

        browser.scroll_to(239.0);
        assert!(!browser.dom().is_visible(clone));

        browser.scroll_to(240.0);
        assert!(browser.dom().is_visible(clone));
        let slide_in = browser.dom().animations(clone);
        assert_eq!(slide_in.last(), Some(&Animation::slide_to(0.0, SLIDE_IN_MS)));

        browser.scroll_to(500.0);
        assert_eq!(browser.dom().animations(clone).len(), slide_in.len());

        browser.scroll_to(10.0);
        assert!(!browser.dom().is_visible(clone));
        assert_eq!(
            browser.dom().animations(clone).last(),
            Some(&Animation::slide_to(-40.0, SLIDE_OUT_MS).linear().then_hide())
        );
    }

    #[test]
    fn test_render_event_hides_clone() {
        let mut browser = browser();
        let clone = sticky(&browser);
        browser.scroll_to(300.0);
        assert!(browser.dom().is_visible(clone));

        browser.publish(AppEvent::StickyHeaderRender);
        assert!(!browser.dom().is_visible(clone));
    }
}
