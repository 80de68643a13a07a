//! Translations from Django's JavaScript catalogue (`window.django`).

use cashbook_core::i18n::{english_ngettext, Catalog};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Calls through to `django.gettext` / `django.ngettext` on the page.
pub struct DjangoCatalog {
    django: JsValue,
    gettext: Function,
    ngettext: Function,
}

impl DjangoCatalog {
    /// `None` unless the page loaded the Django catalogue script.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let django = Reflect::get(&window, &JsValue::from_str("django")).ok()?;
        if django.is_undefined() || django.is_null() {
            return None;
        }
        let function = |name: &str| {
            Reflect::get(&django, &JsValue::from_str(name)).ok()?.dyn_into::<Function>().ok()
        };
        let gettext = function("gettext")?;
        let ngettext = function("ngettext")?;
        Some(Self { django, gettext, ngettext })
    }
}

impl Catalog for DjangoCatalog {
    fn gettext(&self, msgid: &str) -> String {
        self.gettext
            .call1(&self.django, &JsValue::from_str(msgid))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| msgid.to_string())
    }

    fn ngettext(&self, singular: &str, plural: &str, count: u64) -> String {
        #[allow(clippy::cast_precision_loss, reason = "counts are checkbox totals")]
        let n = JsValue::from_f64(count as f64);
        self.ngettext
            .call3(&self.django, &JsValue::from_str(singular), &JsValue::from_str(plural), &n)
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| english_ngettext(singular, plural, count))
    }
}
