//! Page widgets.
//!
//! Each widget is a [`Component`](crate::component::Component) keyed to a
//! fixed piece of server markup. The selectors, classes and `data-*`
//! attributes named in each module are the contract with the templates.

pub mod before_unload;
pub mod cashbook;
pub mod dialog;
pub mod disbursements;
pub mod filter_box;
pub mod mailcheck;
pub mod page_contents;
pub mod print;
pub mod radio_reveal;
pub mod running_total;
pub mod search_focus;

pub use before_unload::BeforeUnload;
pub use cashbook::{BatchValidation, ConfirmManual, SelectAll, SelectionCount, StickyHeader};
pub use dialog::Dialog;
pub use disbursements::{
    AddressPicker, BalanceRefresh, DisbursementQueries, RemittanceDescription, SortCode,
};
pub use filter_box::FilterBox;
pub use mailcheck::MailcheckWarning;
pub use page_contents::PageContents;
pub use print::{PrintLinkTarget, PrintTrigger};
pub use radio_reveal::RadioReveal;
pub use running_total::RunningTotal;
pub use search_focus::SearchFocus;

/// Buttons that submit their form.
pub const SUBMIT_SELECTOR: &str = r#"button[type="submit"], input[type="submit"]"#;
