//! Print buttons and links.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::effect::Effect;
use crate::event::{AppEvent, DomEvent, EventType};

const PRINT_SELECTOR: &str = ".js-Print, .mtp-training-navigation__js-print";
const LINK_TARGET_SELECTOR: &str = ".mtp-print-link-target";

/// Prints the current page. Any open dialog is closed first so it does
/// not end up on paper.
#[derive(Debug, Default)]
pub struct PrintTrigger;

fn print_page(event: &mut DomEvent, ctx: &mut Context<'_>) {
    event.prevent_default();
    ctx.publish(AppEvent::DialogClose);
    ctx.effect(Effect::Print);
}

impl Component for PrintTrigger {
    fn name(&self) -> &'static str {
        "print-trigger"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let click: Handler = Rc::new(print_page);
        ctx.on("print-trigger", EventType::Click, Target::body(PRINT_SELECTOR), click);
    }
}

/// Prints the document a link points at instead of following it.
#[derive(Debug, Default)]
pub struct PrintLinkTarget;

fn print_link(event: &mut DomEvent, ctx: &mut Context<'_>) {
    let Some(link) = event.current() else {
        return;
    };
    let Some(url) = ctx.dom_ref().attr(link, "href").filter(|href| !href.is_empty()) else {
        return;
    };
    event.prevent_default();
    ctx.effect(Effect::PrintUrl { url });
}

impl Component for PrintLinkTarget {
    fn name(&self) -> &'static str {
        "print-link-target"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let click: Handler = Rc::new(print_link);
        ctx.on("print-link-target", EventType::Click, Target::body(LINK_TARGET_SELECTOR), click);
    }
}
