//! Marks disbursements that cannot be confirmed yet.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::event::{DomEvent, EventType};

const SELECTOR: &str = ".mtp-confirm-disbursements-list .mtp-question-button";
const PENDING_CLASS: &str = "mtp-pending-cannot-confirm-row";
const HIDDEN_CLASS: &str = "js-hidden";
const NAMESPACE: &str = "disbursement-queries";

/// The question button of a confirmation row flags the row and reveals
/// the information row that follows it; clicking again undoes both.
#[derive(Debug, Default)]
pub struct DisbursementQueries;

fn on_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    event.prevent_default();
    let Some(button) = event.current() else {
        return;
    };
    let dom = ctx.dom();
    let Some(row) = dom.closest(button, "tr") else {
        return;
    };
    let info_row = dom.next_sibling(row);
    let flag = !dom.has_class(row, PENDING_CLASS);

    dom.toggle_class(row, PENDING_CLASS, flag);
    if let Some(info_row) = info_row {
        dom.toggle_class(info_row, HIDDEN_CLASS, !flag);
    }
}

impl Component for DisbursementQueries {
    fn name(&self) -> &'static str {
        "disbursement-queries"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let buttons = ctx.dom_ref().query_all(SELECTOR);
        if buttons.is_empty() {
            return;
        }
        let click: Handler = Rc::new(on_click);
        ctx.on(NAMESPACE, EventType::Click, Target::Nodes(buttons), click);
    }
}
