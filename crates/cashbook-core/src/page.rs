//! A mounted page: the document plus everything widgets registered on it.

use std::collections::VecDeque;

use crate::component::{Bindings, Context, Registry, Subscriber};
use crate::dom::Dom;
use crate::effect::Effect;
use crate::event::{AppEvent, DomEvent, EventBus, UiEvent};
use crate::i18n::Catalog;

/// Upper bound on queued events processed after one dispatch.
const MAX_QUEUED_EVENTS: usize = 10_000;

/// Result of dispatching one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// A handler asked for the browser's default action to be cancelled
    pub default_prevented: bool,
    /// Leave-page prompt text set by a `beforeunload` handler
    pub return_value: Option<String>,
    /// Number of handler invocations
    pub handled: usize,
}

#[derive(Default)]
struct Runtime {
    bindings: Bindings,
    bus: EventBus<Subscriber>,
    triggered: VecDeque<UiEvent>,
    effects: Vec<Effect>,
    catalog: Option<Box<dyn Catalog>>,
}

impl Runtime {
    fn context<'a>(&'a mut self, dom: &'a mut dyn Dom) -> Context<'a> {
        Context::new(
            dom,
            &mut self.bindings,
            &mut self.bus,
            &mut self.triggered,
            &mut self.effects,
            self.catalog.as_deref(),
        )
    }
}

/// Owns the document and the widget runtime.
///
/// All work happens on the caller's thread. Events triggered or published
/// by handlers are queued and drained in FIFO order before `dispatch`,
/// `publish` or `mount` return.
pub struct Page<D: Dom> {
    dom: D,
    runtime: Runtime,
}

impl<D: Dom> Page<D> {
    pub fn new(dom: D) -> Self {
        Self { dom, runtime: Runtime::default() }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Catalog + 'static) -> Self {
        self.runtime.catalog = Some(Box::new(catalog));
        self
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn bindings(&self) -> &Bindings {
        &self.runtime.bindings
    }

    /// Mounts each component in order, settling queued events after each.
    pub fn mount(&mut self, registry: Registry) {
        for component in registry {
            let name = component.name();
            tracing::debug!(component = name, "Mounting component");
            let mut ctx = self.runtime.context(&mut self.dom);
            component.mount(&mut ctx);
            self.drain();
        }
        tracing::debug!(bindings = self.runtime.bindings.len(), "Page mounted");
    }

    /// Delivers `event` to every matching handler.
    pub fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let outcome = self.deliver(&event);
        self.drain();
        outcome
    }

    pub fn publish(&mut self, event: AppEvent) {
        self.runtime.bus.publish(event);
        self.drain();
    }

    /// Effects requested since the last call, oldest first.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.runtime.effects)
    }

    fn deliver(&mut self, event: &UiEvent) -> Outcome {
        let handlers = self.runtime.bindings.matching(&self.dom, event);
        let handled = handlers.len();
        let mut dom_event = DomEvent::new(event);

        for (current, handler) in handlers {
            dom_event.set_current(current);
            let mut ctx = self.runtime.context(&mut self.dom);
            handler(&mut dom_event, &mut ctx);
        }

        if handled > 0 {
            tracing::trace!(kind = event.kind.name(), handled, "Event dispatched");
        }
        Outcome {
            default_prevented: dom_event.default_prevented(),
            return_value: dom_event.into_return_value(),
            handled,
        }
    }

    fn drain(&mut self) {
        for _ in 0..MAX_QUEUED_EVENTS {
            if let Some(event) = self.runtime.triggered.pop_front() {
                self.deliver(&event);
            } else if let Some(event) = self.runtime.bus.next_pending() {
                let subscribers = self.runtime.bus.subscribers(event.kind()).to_vec();
                for subscriber in subscribers {
                    let mut ctx = self.runtime.context(&mut self.dom);
                    subscriber(&event, &mut ctx);
                }
            } else {
                return;
            }
        }
        tracing::warn!(
            limit = MAX_QUEUED_EVENTS,
            "Event queue did not settle; dropping remaining events"
        );
        self.runtime.triggered.clear();
        while self.runtime.bus.next_pending().is_some() {}
    }
}
