//! Refreshes prisoner account balances without reloading the page.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Subscriber, Target};
use crate::effect::Effect;
use crate::event::{AppEvent, DomEvent, EventKind, EventType};

const LINK_SELECTOR: &str = ".mtp-accounts-table tfoot a";
const AMOUNT_SELECTOR: &str = ".mtp-accounts-table__amount";
const NAMESPACE: &str = "balance-refresh";

const WAIT_MESSAGE: &str = "Please wait…";
const ERROR_MESSAGE: &str = "Please try again later";

/// Clicking the accounts table footer link fetches its `href` and writes
/// each `data-balance` field of the response into the matching cell.
#[derive(Debug, Default)]
pub struct BalanceRefresh;

fn on_click(event: &mut DomEvent, ctx: &mut Context<'_>) {
    event.prevent_default();
    let Some(link) = event.current() else {
        return;
    };
    let url = ctx.dom_ref().attr(link, "href").unwrap_or_default();
    let waiting = ctx.gettext(WAIT_MESSAGE);
    let dom = ctx.dom();
    for cell in dom.query_all(AMOUNT_SELECTOR) {
        dom.set_text(cell, &waiting);
    }
    ctx.effect(Effect::FetchBalances { url });
}

fn on_loaded(event: &AppEvent, ctx: &mut Context<'_>) {
    let AppEvent::BalancesLoaded(result) = event else {
        return;
    };
    let error = ctx.gettext(ERROR_MESSAGE);
    let dom = ctx.dom();
    let cells = dom.query_all(AMOUNT_SELECTOR);

    match result {
        Ok(snapshot) => {
            for cell in cells {
                let text = dom
                    .data(cell, "balance")
                    .and_then(|field| snapshot.display(&field))
                    .unwrap_or_else(|| error.clone());
                dom.set_text(cell, &text);
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Balance refresh failed");
            for cell in cells {
                dom.set_text(cell, &error);
            }
        },
    }
}

impl Component for BalanceRefresh {
    fn name(&self) -> &'static str {
        "balance-refresh"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let links = ctx.dom_ref().query_all(LINK_SELECTOR);
        if links.is_empty() {
            return;
        }
        let loaded: Subscriber = Rc::new(on_loaded);
        let click: Handler = Rc::new(on_click);
        ctx.subscribe(EventKind::BalancesLoaded, loaded);
        ctx.on(NAMESPACE, EventType::Click, Target::Nodes(links), click);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{ElementSpec, MemoryDom};
    use crate::simulate::Browser;
    use cashbook_types::{BalanceError, BalanceSnapshot};

    fn cell(id: &str, field: &str) -> ElementSpec {
        ElementSpec::new("td").id(id).class("mtp-accounts-table__amount").data("balance", field)
    }

    fn browser() -> Browser {
        let dom = MemoryDom::from_children([ElementSpec::new("table")
            .class("mtp-accounts-table")
            .child(
                ElementSpec::new("tbody")
                    .child(cell("cash", "cash"))
                    .child(cell("private", "private_cash"))
                    .child(cell("savings", "savings")),
            )
            .child(
                ElementSpec::new("tfoot").child(
                    ElementSpec::new("a")
                        .id("refresh")
                        .attr("href", "/disbursements/balances/A1409AE/")
                        .text("Refresh"),
                ),
            )]);
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(BalanceRefresh));
        browser
    }

    #[test]
    fn test_click_shows_waiting_and_requests_balances() {
        let mut browser = browser();
        let outcome = browser.click_on("#refresh");

        assert!(outcome.default_prevented);
        assert!(browser.navigations().is_empty());
        assert_eq!(browser.text("#cash"), WAIT_MESSAGE);
        assert_eq!(browser.text("#savings"), WAIT_MESSAGE);
        assert_eq!(browser.pending_fetches(), &["/disbursements/balances/A1409AE/".to_string()]);
    }

    #[test]
    fn test_success_fills_known_fields_only() {
        let mut browser = browser();
        browser.click_on("#refresh");
        let snapshot = BalanceSnapshot::new()
            .with("cash", "£10.00")
            .with("private_cash", serde_json::Value::Null);
        browser.complete_fetch(Ok(snapshot));

        assert_eq!(browser.text("#cash"), "£10.00");
        assert_eq!(browser.text("#private"), ERROR_MESSAGE);
        assert_eq!(browser.text("#savings"), ERROR_MESSAGE);
        assert!(browser.pending_fetches().is_empty());
    }

    #[test]
    fn test_failure_sets_every_cell_to_error() {
        let mut browser = browser();
        browser.click_on("#refresh");
        browser.complete_fetch(Err(BalanceError::Status { status: 500 }));

        for id in ["#cash", "#private", "#savings"] {
            assert_eq!(browser.text(id), ERROR_MESSAGE);
        }
    }
}
