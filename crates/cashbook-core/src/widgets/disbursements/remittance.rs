//! Keeps the remittance description on one line.

use std::rc::Rc;

use crate::component::{Component, Context, Handler, Target};
use crate::event::{DomEvent, EventType, Key};

const SELECTOR: &str = "#id_remittance_description";
const NAMESPACE: &str = "remittance-description";

/// Swallows Enter in the wrapped remittance textarea.
#[derive(Debug, Default)]
pub struct RemittanceDescription;

fn on_key_down(event: &mut DomEvent, _ctx: &mut Context<'_>) {
    if event.is_key(Key::ENTER) {
        event.prevent_default();
    }
}

impl Component for RemittanceDescription {
    fn name(&self) -> &'static str {
        "remittance-description"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(field) = ctx.dom_ref().query(SELECTOR) else {
            return;
        };
        let key_down: Handler = Rc::new(on_key_down);
        ctx.on(NAMESPACE, EventType::KeyDown, Target::node(field), key_down);
    }
}
