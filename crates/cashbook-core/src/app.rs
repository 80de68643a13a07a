//! Composition root of the cashbook app.

use crate::component::Registry;
use crate::widgets::{
    AddressPicker, BalanceRefresh, BatchValidation, BeforeUnload, ConfirmManual, Dialog,
    DisbursementQueries, FilterBox, MailcheckWarning, PageContents, PrintLinkTarget, PrintTrigger,
    RadioReveal, RemittanceDescription, RunningTotal, SearchFocus, SelectAll, SelectionCount,
    SortCode, StickyHeader,
};

/// Every widget of the cashbook app, in mount order.
///
/// Shared components come first so the dialog is listening before any
/// page widget can ask for one.
pub fn cashbook_registry() -> Registry {
    Registry::new()
        .with(Dialog)
        .with(PrintTrigger)
        .with(MailcheckWarning::staff_email())
        .with(MailcheckWarning::disbursement_email())
        .with(PageContents)
        .with(BeforeUnload)
        .with(SearchFocus)
        // credit processing
        .with(SelectAll)
        .with(StickyHeader)
        .with(BatchValidation)
        .with(SelectionCount)
        .with(ConfirmManual)
        .with(RunningTotal)
        // disbursements
        .with(BalanceRefresh)
        .with(AddressPicker)
        .with(RemittanceDescription)
        .with(DisbursementQueries)
        .with(SortCode)
        .with(PrintLinkTarget)
        .with(RadioReveal)
        .with(FilterBox)
}
