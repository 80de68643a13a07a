//! User-level driver over a page held in memory.
//!
//! [`Browser`] performs the default actions a real browser would around
//! each dispatched event (checkbox toggling, typing, form submission,
//! link navigation) and plays the host's part for effects, so tests can
//! drive mounted widgets the way a user does.

use cashbook_types::{BalanceError, BalanceSnapshot};

use crate::component::Registry;
use crate::dom::{Dom, MemoryDom, NodeId};
use crate::effect::Effect;
use crate::event::{AppEvent, EventType, Key, UiEvent};
use crate::i18n::Catalog;
use crate::page::{Outcome, Page};

/// A form submission that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub form: Option<NodeId>,
    pub button: NodeId,
    /// `value` of the button used
    pub value: String,
}

/// Simulated browser tab.
pub struct Browser {
    page: Page<MemoryDom>,
    effects: Vec<Effect>,
    pending_fetches: Vec<String>,
    submissions: Vec<Submission>,
    navigations: Vec<String>,
}

impl Browser {
    pub fn new(dom: MemoryDom) -> Self {
        Self::from_page(Page::new(dom))
    }

    pub fn with_catalog(dom: MemoryDom, catalog: impl Catalog + 'static) -> Self {
        Self::from_page(Page::new(dom).with_catalog(catalog))
    }

    fn from_page(page: Page<MemoryDom>) -> Self {
        Self {
            page,
            effects: Vec::new(),
            pending_fetches: Vec::new(),
            submissions: Vec::new(),
            navigations: Vec::new(),
        }
    }

    pub fn mount(&mut self, registry: Registry) {
        self.page.mount(registry);
        self.collect_effects();
    }

    pub fn page(&self) -> &Page<MemoryDom> {
        &self.page
    }

    pub fn dom(&self) -> &MemoryDom {
        self.page.dom()
    }

    pub fn dom_mut(&mut self) -> &mut MemoryDom {
        self.page.dom_mut()
    }

    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.dom().query(selector)
    }

    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        self.dom().query_all(selector)
    }

    /// Text of the first element matching `selector`, empty when absent.
    pub fn text(&self, selector: &str) -> String {
        self.find(selector).map(|n| self.dom().text(n)).unwrap_or_default()
    }

    pub fn is_visible(&self, selector: &str) -> bool {
        self.find(selector).is_some_and(|n| self.dom().is_visible(n))
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let outcome = self.page.dispatch(event);
        self.collect_effects();
        outcome
    }

    pub fn publish(&mut self, event: AppEvent) {
        self.page.publish(event);
        self.collect_effects();
    }

    /// Clicks `node`, applying the browser's default action unless a
    /// handler prevents it.
    pub fn click(&mut self, node: NodeId) -> Outcome {
        let tag = self.dom().tag(node);
        let kind = self.dom().attr(node, "type").unwrap_or_default().to_ascii_lowercase();
        let was_checked = self.dom().is_checked(node);
        let toggles = tag == "input" && (kind == "checkbox" || kind == "radio");

        if toggles {
            let checked = kind == "radio" || !was_checked;
            if kind == "radio" {
                self.uncheck_radio_group(node);
            }
            self.dom_mut().set_checked(node, checked);
        }

        let outcome = self.dispatch(UiEvent::on(EventType::Click, node));

        if outcome.default_prevented {
            if toggles {
                self.dom_mut().set_checked(node, was_checked);
            }
            return outcome;
        }

        if toggles && self.dom().is_checked(node) != was_checked {
            self.dispatch(UiEvent::on(EventType::Change, node));
        } else if is_submit_button(self.dom(), node) {
            self.submit_with(node);
        } else if let Some(href) = self.dom().closest(node, "a[href]").and_then(|a| self.dom().attr(a, "href")) {
            if !href.starts_with('#') {
                self.navigations.push(href);
            }
        }
        outcome
    }

    /// Clicks the first element matching `selector`.
    ///
    /// # Panics
    /// When nothing matches.
    pub fn click_on(&mut self, selector: &str) -> Outcome {
        let node = self.find(selector).unwrap_or_else(|| panic!("no element matches {selector}"));
        self.click(node)
    }

    fn uncheck_radio_group(&mut self, node: NodeId) {
        let Some(name) = self.dom().attr(node, "name") else {
            return;
        };
        for radio in self.find_all(&format!("input[type=radio][name=\"{name}\"]")) {
            self.dom_mut().set_checked(radio, false);
        }
    }

    fn submit_with(&mut self, button: NodeId) {
        let form = self.dom().closest(button, "form");
        if let Some(form) = form {
            let outcome = self.dispatch(UiEvent::on(EventType::Submit, form));
            if outcome.default_prevented {
                return;
            }
        }
        let value = self.dom().value(button);
        tracing::debug!(value, "Form submitted");
        self.submissions.push(Submission { form, button, value });
    }

    /// Presses `key` while `node` has focus: keydown, keypress, keyup.
    /// Returns whether the key's default action was prevented.
    pub fn press_key(&mut self, node: Option<NodeId>, key: Key) -> bool {
        let down = self.dispatch(UiEvent::key(EventType::KeyDown, node, key));
        let press = if down.default_prevented {
            None
        } else {
            Some(self.dispatch(UiEvent::key(EventType::KeyPress, node, key)))
        };
        self.dispatch(UiEvent::key(EventType::KeyUp, node, key));
        down.default_prevented || press.is_some_and(|p| p.default_prevented)
    }

    /// Types `text` into `node` one character at a time.
    pub fn type_text(&mut self, node: NodeId, text: &str) {
        self.dom_mut().focus(node);
        for c in text.chars() {
            let key = Key::from_code(u32::from(c));
            let down = self.dispatch(UiEvent::key(EventType::KeyDown, Some(node), key));
            if !down.default_prevented {
                let press = self.dispatch(UiEvent::key(EventType::KeyPress, Some(node), key));
                if !press.default_prevented {
                    let mut value = self.dom().value(node);
                    value.push(c);
                    self.dom_mut().set_value(node, &value);
                }
            }
            self.dispatch(UiEvent::key(EventType::KeyUp, Some(node), key));
        }
    }

    /// Replaces the value of `node` and fires `change`.
    pub fn fill(&mut self, node: NodeId, value: &str) -> Outcome {
        self.dom_mut().set_value(node, value);
        self.dispatch(UiEvent::on(EventType::Change, node))
    }

    /// Picks the option of `select` with `value` and fires `change`.
    pub fn select_option(&mut self, select: NodeId, value: &str) -> Outcome {
        for option in self.dom().query_within(select, "option") {
            if self.dom().attr(option, "value").as_deref() == Some(value) {
                self.dom_mut().set_attr(option, "selected", "");
            } else {
                self.dom_mut().remove_attr(option, "selected");
            }
        }
        self.fill(select, value)
    }

    pub fn scroll_to(&mut self, top: f64) -> Outcome {
        self.dom_mut().set_scroll_top(top);
        self.dispatch(UiEvent::window(EventType::Scroll))
    }

    pub fn resize(&mut self, width: f64) -> Outcome {
        self.dom_mut().set_viewport_width(width);
        self.dispatch(UiEvent::window(EventType::Resize))
    }

    /// Attempts to navigate away; returns the leave-page prompt, if any.
    pub fn leave_page(&mut self) -> Option<String> {
        self.dispatch(UiEvent::window(EventType::BeforeUnload)).return_value
    }

    fn collect_effects(&mut self) {
        for effect in self.page.take_effects() {
            if let Effect::FetchBalances { url } = &effect {
                self.pending_fetches.push(url.clone());
            }
            self.effects.push(effect);
        }
    }

    /// Every effect requested so far.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Balance requests that have not completed yet.
    pub fn pending_fetches(&self) -> &[String] {
        &self.pending_fetches
    }

    /// Completes the oldest balance request. Returns its URL.
    pub fn complete_fetch(
        &mut self,
        result: Result<BalanceSnapshot, BalanceError>,
    ) -> Option<String> {
        if self.pending_fetches.is_empty() {
            return None;
        }
        let url = self.pending_fetches.remove(0);
        self.publish(AppEvent::BalancesLoaded(result));
        Some(url)
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Links followed, in order.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

fn is_submit_button(dom: &MemoryDom, node: NodeId) -> bool {
    dom.matches(node, crate::widgets::SUBMIT_SELECTOR)
        || (dom.tag(node) == "button" && dom.attr(node, "type").is_none())
}
