//! Core data models for the transaction history

use bankweb_parser::{parse_amount, parse_timestamp, RawTransaction};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::TransactionKind;

/// A single financial movement
///
/// The amount is never negative; direction lives in `is_sent`. Fields are
/// read-only once the record is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    date: DateTime<Utc>,
    amount: Decimal,
    title: String,
    description: String,
    is_sent: bool,
}

impl Transaction {
    /// Create a transaction; a negative amount is stored as its magnitude
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<TransactionKind>,
        date: DateTime<Utc>,
        amount: Decimal,
        is_sent: bool,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            date,
            amount: amount.abs(),
            title: String::new(),
            description: String::new(),
            is_sent,
        }
    }

    /// Set the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the display description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build a transaction from a raw page record
    ///
    /// Missing or malformed fields fall back to safe defaults: a fresh id
    /// from `id_gen`, the `transfer` tag, `now` for the date and zero for the
    /// amount.
    pub fn from_raw<F>(raw: RawTransaction, now: DateTime<Utc>, id_gen: F) -> Self
    where
        F: FnOnce() -> String,
    {
        let id = non_empty(raw.id).unwrap_or_else(id_gen);
        let kind = non_empty(raw.kind)
            .map(TransactionKind::from)
            .unwrap_or_default();
        let date = raw
            .date
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        let amount = raw
            .amount
            .as_deref()
            .map(parse_amount)
            .unwrap_or(Decimal::ZERO);

        Self {
            id,
            kind,
            date,
            amount,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            is_sent: raw.sent.unwrap_or(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Calendar date of the transaction (UTC)
    pub fn date_naive(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True for debits, false for credits
    pub fn is_sent(&self) -> bool {
        self.is_sent
    }

    /// Lowercased `title + " " + description`, the text free-text search runs on
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_raw_complete_record() {
        let raw = RawTransaction {
            id: Some("tx-1".to_string()),
            kind: Some("deposit".to_string()),
            date: Some("2024-01-10T08:15:00Z".to_string()),
            amount: Some("+$200.00".to_string()),
            title: Some("Salary".to_string()),
            description: Some("January payroll".to_string()),
            sent: Some(false),
        };

        let tx = Transaction::from_raw(raw, now(), || unreachable!());
        assert_eq!(tx.id(), "tx-1");
        assert_eq!(tx.kind(), &TransactionKind::Deposit);
        assert_eq!(tx.date(), Utc.with_ymd_and_hms(2024, 1, 10, 8, 15, 0).unwrap());
        assert_eq!(tx.amount(), Decimal::from(200));
        assert_eq!(tx.title(), "Salary");
        assert!(!tx.is_sent());
    }

    #[test]
    fn test_from_raw_defaults() {
        let tx = Transaction::from_raw(RawTransaction::default(), now(), || "generated".to_string());
        assert_eq!(tx.id(), "generated");
        assert_eq!(tx.kind(), &TransactionKind::Transfer);
        assert_eq!(tx.date(), now());
        assert_eq!(tx.amount(), Decimal::ZERO);
        assert_eq!(tx.title(), "");
        assert_eq!(tx.description(), "");
        assert!(!tx.is_sent());
    }

    #[test]
    fn test_from_raw_empty_strings_fall_back() {
        let raw = RawTransaction {
            id: Some(String::new()),
            kind: Some(String::new()),
            date: Some("not a date".to_string()),
            ..Default::default()
        };
        let tx = Transaction::from_raw(raw, now(), || "fallback".to_string());
        assert_eq!(tx.id(), "fallback");
        assert_eq!(tx.kind(), &TransactionKind::Transfer);
        assert_eq!(tx.date(), now());
    }

    #[test]
    fn test_from_raw_unparsable_amount_is_zero() {
        let raw = RawTransaction {
            id: Some("d".to_string()),
            amount: Some("N/A".to_string()),
            sent: Some(true),
            ..Default::default()
        };
        let tx = Transaction::from_raw(raw, now(), || unreachable!());
        assert_eq!(tx.amount(), Decimal::ZERO);
        assert!(tx.is_sent());
    }

    #[test]
    fn test_rendered_sent_amount_reads_back_positive() {
        let raw = RawTransaction {
            amount: Some("-$50.00".to_string()),
            sent: Some(true),
            ..Default::default()
        };
        let tx = Transaction::from_raw(raw, now(), || "x".to_string());
        assert_eq!(tx.amount(), Decimal::from(50));
        assert!(tx.is_sent());
    }

    #[test]
    fn test_new_stores_magnitude() {
        let tx = Transaction::new("1", "transfer", now(), Decimal::from_str("-12.34").unwrap(), true)
            .with_title("Rent")
            .with_description("February");
        assert_eq!(tx.amount(), Decimal::from_str("12.34").unwrap());
        assert_eq!(tx.searchable_text(), "rent february");
    }

    #[test]
    fn test_unknown_kind_preserved() {
        let raw = RawTransaction {
            kind: Some("bill".to_string()),
            ..Default::default()
        };
        let tx = Transaction::from_raw(raw, now(), || "x".to_string());
        assert_eq!(tx.kind().as_str(), "bill");
        assert_eq!(tx.kind().display_kind(), TransactionKind::Transfer);
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let tx = Transaction::new("1", "loan", now(), Decimal::from(5), false);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "loan");
        assert_eq!(json["is_sent"], false);
    }

    #[test]
    fn test_serialized_amount_is_magnitude() {
        let tx = Transaction::new("1", "transfer", now(), Decimal::from_str("-12.34").unwrap(), true);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["amount"], "12.34");
        assert_eq!(json["is_sent"], true);
    }
}
