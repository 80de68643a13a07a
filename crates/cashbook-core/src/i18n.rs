//! Message translation.
//!
//! Strings are looked up in the page's message catalogue when one is
//! loaded; otherwise the English message ids are used as-is.

use std::collections::HashMap;

use serde::Deserialize;

/// Source of translated messages.
pub trait Catalog {
    fn gettext(&self, msgid: &str) -> String;

    /// Picks the form of `singular`/`plural` for `count`.
    fn ngettext(&self, singular: &str, plural: &str, count: u64) -> String;
}

/// Untranslated English: plural form for every count except one.
pub fn english_ngettext(singular: &str, plural: &str, count: u64) -> String {
    if count == 1 { singular } else { plural }.to_string()
}

/// Replaces `%(name)s` placeholders. Unknown names are left untouched.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("%({name})s"), value);
    }
    out
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Entry {
    Single(String),
    Plural(Vec<String>),
}

/// Catalogue in the JSON shape of Django's JavaScript catalogue: message
/// id to translation, or to a list of plural forms.
///
/// Plural forms are chosen with the English rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    entries: HashMap<String, Entry>,
}

impl MessageCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Catalog for MessageCatalog {
    fn gettext(&self, msgid: &str) -> String {
        match self.entries.get(msgid) {
            Some(Entry::Single(s)) => s.clone(),
            Some(Entry::Plural(forms)) => forms.first().cloned().unwrap_or_else(|| msgid.to_string()),
            None => msgid.to_string(),
        }
    }

    fn ngettext(&self, singular: &str, plural: &str, count: u64) -> String {
        let index = usize::from(count != 1);
        match self.entries.get(singular) {
            Some(Entry::Plural(forms)) => forms
                .get(index)
                .cloned()
                .unwrap_or_else(|| english_ngettext(singular, plural, count)),
            Some(Entry::Single(s)) if count == 1 => s.clone(),
            _ => english_ngettext(singular, plural, count),
        }
    }
}
