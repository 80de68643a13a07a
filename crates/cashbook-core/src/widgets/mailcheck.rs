//! Typo warnings for email address inputs.
//!
//! When an email input changes, its domain is compared with a list of
//! well-known domains. A near miss (edit distance of at most
//! [`MAX_DISTANCE`]) puts a `.mtp-mailcheck-warning` right after the
//! input offering the corrected address; clicking the offer applies it.

use std::rc::Rc;

use strsim::levenshtein;

use crate::component::{handler, Component, Context, Target};
use crate::dom::{Dom, NodeId};
use crate::event::{DomEvent, EventType};

const WARNING_CLASS: &str = "mtp-mailcheck-warning";
const SUGGESTION_CLASS: &str = "mtp-mailcheck-warning__suggestion";
const NAMESPACE: &str = "mailcheck-warning";

/// Largest edit distance still treated as a typo.
pub const MAX_DISTANCE: usize = 2;

const DEFAULT_DOMAINS: &[&str] = &[
    "aol.com", "att.net", "btinternet.com", "comcast.net", "gmail.com", "google.com",
    "googlemail.com", "hotmail.co.uk", "hotmail.com", "icloud.com", "live.co.uk", "mac.com",
    "me.com", "msn.com", "outlook.com", "sky.com", "talktalk.net", "virginmedia.com",
    "yahoo.co.uk", "yahoo.com", "ymail.com",
];
const DEFAULT_SECOND_LEVEL: &[&str] = &["yahoo", "hotmail", "mail", "live", "outlook", "gmx"];
const DEFAULT_TOP_LEVEL: &[&str] = &[
    "com", "co.uk", "uk", "net", "org", "org.uk", "gov.uk", "ac.uk", "edu", "ie", "de", "fr",
    "info", "biz",
];

/// Known domains an address is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    /// Complete domains, e.g. `gmail.com`
    pub domains: Vec<String>,
    /// Domain labels before the top-level part, e.g. `hotmail`
    pub second_level: Vec<String>,
    /// Top-level parts, e.g. `co.uk`
    pub top_level: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Domains {
    fn default() -> Self {
        Self {
            domains: owned(DEFAULT_DOMAINS),
            second_level: owned(DEFAULT_SECOND_LEVEL),
            top_level: owned(DEFAULT_TOP_LEVEL),
        }
    }
}

impl Domains {
    pub fn new(domains: &[&str], second_level: &[&str], top_level: &[&str]) -> Self {
        Self {
            domains: owned(domains),
            second_level: owned(second_level),
            top_level: owned(top_level),
        }
    }

    /// Corrected address when `email`'s domain looks like a typo of a
    /// known one.
    pub fn suggest(&self, email: &str) -> Option<String> {
        let (user, domain) = email.trim().rsplit_once('@')?;
        if user.is_empty() || domain.is_empty() {
            return None;
        }
        let domain = domain.to_ascii_lowercase();
        if self.domains.contains(&domain) {
            return None;
        }
        if let Some(known) = closest(&domain, &self.domains) {
            return Some(format!("{user}@{known}"));
        }

        let (second_level, top_level) = domain.split_once('.')?;
        let second = closest(second_level, &self.second_level).unwrap_or(second_level);
        let top = closest(top_level, &self.top_level).unwrap_or(top_level);
        let candidate = format!("{second}.{top}");
        (candidate != domain).then(|| format!("{user}@{candidate}"))
    }
}

/// Nearest entry of `candidates` within [`MAX_DISTANCE`] of `word`.
fn closest<'a>(word: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (levenshtein(word, c), c))
        .filter(|&(distance, _)| distance <= MAX_DISTANCE)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, c)| c.as_str())
}

/// Email inputs matching `selector`, checked against `domains`.
#[derive(Debug, Clone)]
pub struct MailcheckWarning {
    selector: String,
    domains: Domains,
}

impl MailcheckWarning {
    pub fn new(selector: impl Into<String>, domains: Domains) -> Self {
        Self { selector: selector.into(), domains }
    }

    /// Staff email fields only accept Ministry of Justice addresses.
    pub fn staff_email() -> Self {
        Self::new(
            ".mtp-page-with-staff-email-input input[type=email]",
            Domains::new(&["justice.gov.uk"], &["gov.uk"], &[]),
        )
    }

    /// Recipient email on the disbursement forms.
    pub fn disbursement_email() -> Self {
        Self::new(".mtp-email-input--disbursements", Domains::default())
    }
}

struct State {
    inputs: Vec<NodeId>,
    domains: Domains,
}

fn warning_after(dom: &dyn Dom, input: NodeId) -> Option<NodeId> {
    dom.next_sibling(input).filter(|&n| dom.has_class(n, WARNING_CLASS))
}

impl State {
    fn on_change(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(input) = event.current() else {
            return;
        };
        let prompt = ctx.gettext("Did you mean");
        let dom = ctx.dom();
        if let Some(old) = warning_after(dom, input) {
            dom.remove(old);
        }
        let Some(suggestion) = self.domains.suggest(&dom.value(input)) else {
            return;
        };
        tracing::debug!(suggestion, "Suggesting email correction");

        let warning = dom.create_element("div");
        dom.add_class(warning, WARNING_CLASS);
        dom.set_attr(warning, "role", "alert");
        let label = dom.create_element("span");
        dom.set_text(label, &format!("{prompt} "));
        let link = dom.create_element("a");
        dom.add_class(link, SUGGESTION_CLASS);
        dom.set_attr(link, "href", "#");
        dom.set_text(link, &suggestion);
        dom.append_child(warning, label);
        dom.append_child(warning, link);
        dom.insert_after(input, warning);
    }

    fn on_suggestion_click(&self, event: &mut DomEvent, ctx: &mut Context<'_>) {
        let Some(link) = event.current() else {
            return;
        };
        let dom = ctx.dom();
        let Some(warning) = dom.closest(link, &format!(".{WARNING_CLASS}")) else {
            return;
        };
        let Some(&input) = self.inputs.iter().find(|&&i| warning_after(&*dom, i) == Some(warning))
        else {
            return;
        };
        event.prevent_default();
        let suggestion = dom.text(link);
        dom.set_value(input, &suggestion);
        dom.remove(warning);
        dom.focus(input);
    }
}

impl Component for MailcheckWarning {
    fn name(&self) -> &'static str {
        "mailcheck-warning"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let inputs = ctx.dom_ref().query_all(&self.selector);
        if inputs.is_empty() {
            return;
        }
        let state = Rc::new(State { inputs: inputs.clone(), domains: self.domains });
        ctx.on(NAMESPACE, EventType::Change, Target::Nodes(inputs), handler(&state, State::on_change));
        ctx.on(
            NAMESPACE,
            EventType::Click,
            Target::body(format!(".{SUGGESTION_CLASS}")),
            handler(&state, State::on_suggestion_click),
        );
    }
}
