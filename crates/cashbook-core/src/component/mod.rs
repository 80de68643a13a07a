//! Widget contract, handler registration and the context handlers run in.

mod bindings;


use std::collections::VecDeque;
use std::rc::Rc;

pub use bindings::{Bindings, Target};

use crate::dom::Dom;
use crate::effect::Effect;
use crate::event::{AppEvent, DomEvent, EventBus, EventKind, EventType, UiEvent};
use crate::i18n::{self, Catalog};

/// DOM event handler.
pub type Handler = Rc<dyn Fn(&mut DomEvent, &mut Context<'_>)>;

/// Application event subscriber.
pub type Subscriber = Rc<dyn Fn(&AppEvent, &mut Context<'_>)>;

/// A self-contained page enhancement.
///
/// `mount` finds the widget's markup, caches what it needs, binds handlers
/// and renders initial state. A page without the markup makes it a no-op.
pub trait Component {
    fn name(&self) -> &'static str;

    fn mount(self: Box<Self>, ctx: &mut Context<'_>);
}

/// Ordered list of components to mount on a page.
#[derive(Default)]
pub struct Registry {
    components: Vec<Box<dyn Component>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, component: impl Component + 'static) -> Self {
        self.push(component);
        self
    }

    pub fn push(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl IntoIterator for Registry {
    type Item = Box<dyn Component>;
    type IntoIter = std::vec::IntoIter<Box<dyn Component>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

/// Wraps a method of shared widget state as a [`Handler`].
pub fn handler<S: 'static>(state: &Rc<S>, f: fn(&S, &mut DomEvent, &mut Context<'_>)) -> Handler {
    let state = Rc::clone(state);
    Rc::new(move |event: &mut DomEvent, ctx: &mut Context<'_>| f(&state, event, ctx))
}

/// Wraps a method of shared widget state as a [`Subscriber`].
pub fn subscriber<S: 'static>(state: &Rc<S>, f: fn(&S, &AppEvent, &mut Context<'_>)) -> Subscriber {
    let state = Rc::clone(state);
    Rc::new(move |event: &AppEvent, ctx: &mut Context<'_>| f(&state, event, ctx))
}

/// Everything a widget may touch while mounting or handling an event.
pub struct Context<'a> {
    dom: &'a mut dyn Dom,
    bindings: &'a mut Bindings,
    bus: &'a mut EventBus<Subscriber>,
    triggered: &'a mut VecDeque<UiEvent>,
    effects: &'a mut Vec<Effect>,
    catalog: Option<&'a dyn Catalog>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        dom: &'a mut dyn Dom,
        bindings: &'a mut Bindings,
        bus: &'a mut EventBus<Subscriber>,
        triggered: &'a mut VecDeque<UiEvent>,
        effects: &'a mut Vec<Effect>,
        catalog: Option<&'a dyn Catalog>,
    ) -> Self {
        Self { dom, bindings, bus, triggered, effects, catalog }
    }

    pub fn dom(&mut self) -> &mut dyn Dom {
        &mut *self.dom
    }

    pub fn dom_ref(&self) -> &dyn Dom {
        &*self.dom
    }

    /// Registers `handler` for `kind` events on `target` under `namespace`.
    pub fn on(&mut self, namespace: &'static str, kind: EventType, target: Target, handler: Handler) {
        self.bindings.add(namespace, kind, target, handler);
    }

    /// Removes every handler registered under `namespace`.
    pub fn off(&mut self, namespace: &'static str) {
        let removed = self.bindings.remove_namespace(namespace);
        tracing::trace!(namespace, removed, "Handlers unbound");
    }

    /// Fires a DOM event once the current handler returns.
    pub fn trigger(&mut self, event: UiEvent) {
        self.triggered.push_back(event);
    }

    pub fn publish(&mut self, event: AppEvent) {
        self.bus.publish(event);
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) {
        self.bus.subscribe(kind, subscriber);
    }

    pub fn effect(&mut self, effect: Effect) {
        tracing::debug!(?effect, "Effect requested");
        self.effects.push(effect);
    }

    /// Whether a translation catalogue is loaded.
    pub fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn gettext(&self, msgid: &str) -> String {
        self.catalog.map_or_else(|| msgid.to_string(), |c| c.gettext(msgid))
    }

    pub fn ngettext(&self, singular: &str, plural: &str, count: u64) -> String {
        match self.catalog {
            Some(c) => c.ngettext(singular, plural, count),
            None => i18n::english_ngettext(singular, plural, count),
        }
    }
}
