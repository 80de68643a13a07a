//! Connects browser events to the page and performs requested effects.

use std::cell::RefCell;
use std::rc::Rc;

use cashbook_core::{AppEvent, Effect, EventType, Key, Outcome, Page, UiEvent};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{BeforeUnloadEvent, Element, Event, HtmlIFrameElement, KeyboardEvent};

use crate::dom::WebDom;
use crate::fetch::get_balances;

pub struct Host {
    page: RefCell<Page<WebDom>>,
}

impl Host {
    pub fn new(page: Page<WebDom>) -> Rc<Self> {
        Rc::new(Self { page: RefCell::new(page) })
    }

    /// Adds one listener per event type, on `window` or `document`.
    pub fn listen(self: &Rc<Self>) -> Result<(), JsValue> {
        let (window, document) = {
            let page = self.page.borrow();
            (page.dom().window().clone(), page.dom().document().clone())
        };
        for kind in EventType::ALL {
            let host = Rc::clone(self);
            let closure =
                Closure::<dyn FnMut(Event)>::new(move |event: Event| host.on_event(kind, &event));
            let callback = closure.as_ref().unchecked_ref();
            if kind.is_window() {
                window.add_event_listener_with_callback(kind.name(), callback)?;
            } else {
                document.add_event_listener_with_callback(kind.name(), callback)?;
            }
            // listeners live as long as the page
            closure.forget();
        }
        Ok(())
    }

    fn on_event(self: &Rc<Self>, kind: EventType, event: &Event) {
        let outcome = {
            // a handler focusing an element can fire a nested event synchronously
            let Ok(mut page) = self.page.try_borrow_mut() else {
                log::debug!("Skipping nested {} event", kind.name());
                return;
            };
            let target = if kind.is_window() {
                None
            } else {
                event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|e| page.dom().intern(&e))
            };
            let key = event.dyn_ref::<KeyboardEvent>().map(|k| Key::from_code(k.key_code()));
            page.dispatch(UiEvent { kind, target, key })
        };
        apply(event, &outcome);
        self.run_effects();
    }

    pub fn publish(self: &Rc<Self>, event: AppEvent) {
        match self.page.try_borrow_mut() {
            Ok(mut page) => page.publish(event),
            Err(_) => {
                log::warn!("Page busy, dropping {:?}", event.kind());
                return;
            },
        }
        self.run_effects();
    }

    pub fn run_effects(self: &Rc<Self>) {
        let effects = self.page.borrow_mut().take_effects();
        for effect in effects {
            log::debug!("Effect: {effect:?}");
            if let Err(e) = self.perform(effect) {
                log::error!("Effect failed: {e:?}");
            }
        }
    }

    fn perform(self: &Rc<Self>, effect: Effect) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        match effect {
            Effect::Print => window.print(),
            Effect::PrintUrl { url } => print_in_frame(&window, &url),
            Effect::FetchBalances { url } => {
                let host = Rc::clone(self);
                spawn_local(async move {
                    let result = get_balances(&url).await;
                    if let Err(e) = &result {
                        log::warn!("Balance refresh failed: {e}");
                    }
                    host.publish(AppEvent::BalancesLoaded(result));
                });
                Ok(())
            },
            Effect::PageView { location } => page_view(&window, &location),
        }
    }
}

fn apply(event: &Event, outcome: &Outcome) {
    if outcome.default_prevented {
        event.prevent_default();
    }
    if let Some(message) = &outcome.return_value {
        if let Some(unload) = event.dyn_ref::<BeforeUnloadEvent>() {
            unload.set_return_value(message);
        }
    }
}

/// Loads `url` into a hidden frame and prints it once loaded.
fn print_in_frame(window: &web_sys::Window, url: &str) -> Result<(), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("No body"))?;

    let frame: HtmlIFrameElement = document.create_element("iframe")?.dyn_into()?;
    frame.set_attribute("aria-hidden", "true")?;
    frame.style().set_property("display", "none")?;

    let loaded = frame.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        if let Some(content) = loaded.content_window() {
            if let Err(e) = content.print() {
                log::error!("Could not print frame: {e:?}");
            }
        }
    });
    frame.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    frame.set_src(url);
    body.append_child(&frame)?;
    Ok(())
}

/// Sends a page view to whichever analytics library the page loaded.
fn page_view(window: &web_sys::Window, location: &str) -> Result<(), JsValue> {
    let global = |name: &str| {
        Reflect::get(window, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
    };
    if let Some(ga) = global("ga") {
        let args = Array::of3(&"send".into(), &"pageview".into(), &location.into());
        ga.apply(&JsValue::NULL, &args)?;
    } else if let Some(gtag) = global("gtag") {
        let params = js_sys::Object::new();
        Reflect::set(&params, &"page_path".into(), &location.into())?;
        gtag.call3(&JsValue::NULL, &"event".into(), &"page_view".into(), &params)?;
    } else {
        log::debug!("No analytics loaded, page view {location} not sent");
    }
    Ok(())
}
