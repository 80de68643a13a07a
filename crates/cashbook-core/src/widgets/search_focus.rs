//! Puts the cursor in the search box on list pages.

use crate::component::{Component, Context};

const SEARCH_SELECTOR: &str = "#id_search";
const ERROR_SUMMARY_SELECTOR: &str = ".error-summary";

/// Focuses `#id_search` at mount unless something already has focus or
/// the page is showing form errors.
#[derive(Debug, Default)]
pub struct SearchFocus;

impl Component for SearchFocus {
    fn name(&self) -> &'static str {
        "search-focus"
    }

    fn mount(self: Box<Self>, ctx: &mut Context<'_>) {
        let dom = ctx.dom();
        let Some(search) = dom.query(SEARCH_SELECTOR) else {
            return;
        };
        let body = dom.body();
        let nothing_focused = dom.focused().map_or(true, |f| f == body);
        if nothing_focused && dom.query(ERROR_SUMMARY_SELECTOR).is_none() {
            dom.focus(search);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Registry;
    use crate::dom::{Dom, ElementSpec, MemoryDom};
    use crate::simulate::Browser;

    fn mounted(dom: MemoryDom) -> Browser {
        let mut browser = Browser::new(dom);
        browser.mount(Registry::new().with(SearchFocus));
        browser
    }

    #[test]
    fn test_focuses_search() {
        let browser = mounted(MemoryDom::from_children([ElementSpec::new("input").id("id_search")]));
        assert_eq!(browser.dom().focused(), browser.find("#id_search"));
    }

    #[test]
    fn test_leaves_errors_and_existing_focus_alone() {
        let browser = mounted(MemoryDom::from_children([
            ElementSpec::new("div").class("error-summary"),
            ElementSpec::new("input").id("id_search"),
        ]));
        assert_eq!(browser.dom().focused(), None);

        let mut dom = MemoryDom::from_children([
            ElementSpec::new("input").id("id_amount"),
            ElementSpec::new("input").id("id_search"),
        ]);
        let amount = dom.by_id("id_amount").expect("fixture has #id_amount");
        dom.focus(amount);
        let browser = mounted(dom);
        assert_eq!(browser.dom().focused(), Some(amount));
    }
}
