//! Postal address carried in `data-address` attributes of address options.

use serde::{Deserialize, Serialize};

/// Recipient address as serialised by the server into
/// `<option data-address='{...}'>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postcode: String,
}

impl Address {
    /// Parse the JSON payload of a `data-address` attribute.
    pub fn from_data_attr(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
