//! Widgets of the credit processing pages.

mod batch_validation;
mod confirm_manual;
mod select_all;
mod selection_count;
mod sticky_header;

pub use batch_validation::BatchValidation;
pub use confirm_manual::ConfirmManual;
pub use select_all::SelectAll;
pub use selection_count::SelectionCount;
pub use sticky_header::StickyHeader;
