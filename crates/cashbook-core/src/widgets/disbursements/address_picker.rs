//! Fills the recipient address form from a list of known addresses.

use std::rc::Rc;

use cashbook_types::Address;

use crate::component::{Component, Context, Handler, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};

const SELECTOR: &str = ".mtp-select__address";
const NAMESPACE: &str = "address-picker";

/// Choosing an option of `.mtp-select__address` copies the JSON in its
/// `data-address` into the address inputs.
#[derive(Debug, Default)]
pub struct AddressPicker;

fn selected_option(dom: &dyn Dom, select: NodeId) -> Option<NodeId> {
    let value = dom.value(select);
    let options = dom.query_within(select, "option");
    options
        .iter()
        .copied()
        .find(|&o| dom.attr(o, "value").as_deref() == Some(value.as_str()))
        .or_else(|| options.iter().copied().find(|&o| dom.attr(o, "selected").is_some()))
}

fn on_change(event: &mut DomEvent, ctx: &mut Context<'_>) {
    let Some(select) = event.current() else {
        return;
    };
    let dom = ctx.dom();
    if dom.value(select).is_empty() {
        return;
    }
    let Some(raw) = selected_option(dom, select).and_then(|o| dom.data(o, "address")) else {
        return;
    };
    let address = match Address::from_data_attr(&raw) {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed address option");
            return;
        },
    };

    let fields = [
        ("#id_address_line1", &address.address_line1),
        ("#id_address_line2", &address.address_line2),
        ("#id_city", &address.city),
        ("#id_postcode", &address.postcode),
    ];
    for (selector, value) in fields {
        if let Some(input) = dom.query(selector) {
            dom.set_value(input, value);
        }
    }
}

impl Component for AddressPicker {
    fn name(&self) -> &'static str {
        "address-picker"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let selects = ctx.dom_ref().query_all(SELECTOR);
        if selects.is_empty() {
            return;
        }
        let change: Handler = Rc::new(on_change);
        ctx.on(NAMESPACE, EventType::Change, Target::Nodes(selects), change);
    }
}
