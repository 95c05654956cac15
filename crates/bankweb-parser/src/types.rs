//! Raw record types as supplied by the host page

use serde::{Deserialize, Deserializer, Serialize};

/// One transaction as the page supplies it, before normalization
///
/// Every field may be missing or malformed; normalization replaces bad
/// values with safe defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Category tag (`transfer`, `deposit`, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Display amount, e.g. `-$1,250.00`
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// True when the amount was styled as sent
    #[serde(default, alias = "isSent")]
    pub sent: Option<bool>,
}

/// Accepts `"12.50"`, `12.5` or `null`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepted document shapes: a bare array or `{ "transactions": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordDocument {
    List(Vec<RawTransaction>),
    Wrapped { transactions: Vec<RawTransaction> },
}

impl RecordDocument {
    pub(crate) fn into_records(self) -> Vec<RawTransaction> {
        match self {
            RecordDocument::List(records) => records,
            RecordDocument::Wrapped { transactions } => transactions,
        }
    }
}
