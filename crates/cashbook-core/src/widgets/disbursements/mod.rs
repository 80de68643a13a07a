//! Widgets of the disbursement (outgoing payment) pages.

mod address_picker;
mod balance_refresh;
mod queries;
mod remittance;
mod sort_code;

pub use address_picker::AddressPicker;
pub use balance_refresh::BalanceRefresh;
pub use queries::DisbursementQueries;
pub use remittance::RemittanceDescription;
pub use sort_code::SortCode;
