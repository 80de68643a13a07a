//! Account balance snapshot returned by the balance refresh endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// JSON object keyed by balance field (`"cash"`, `"private_cash"`,
/// `"postal_order"`, ...) as returned by the refresh endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BalanceSnapshot(HashMap<String, Value>);

impl BalanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Text to display for a field.
    ///
    /// Returns `None` when the field is absent or `null`. Strings are used
    /// verbatim, other JSON values in their compact form.
    pub fn display(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_values() {
        let snapshot: BalanceSnapshot =
            serde_json::from_str(r#"{"cash": "£10.00", "savings": 1250, "spends": null}"#)
                .unwrap();

        assert_eq!(snapshot.display("cash").as_deref(), Some("£10.00"));
        assert_eq!(snapshot.display("savings").as_deref(), Some("1250"));
        assert_eq!(snapshot.display("spends"), None);
        assert_eq!(snapshot.display("postal_order"), None);
    }
}
