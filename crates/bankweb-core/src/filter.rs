//! Transaction filtering and ordering
//!
//! All functions here are pure: the source list is borrowed and never
//! modified, results are fresh vectors.

use bankweb_parser::parse_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::summary::{summarize_at, Summary};
use crate::time::DateWindow;

/// Optional constraints applied to a transaction list
///
/// Unset or empty fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower date bound
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Exact category tag
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Case-insensitive search over title and description
    #[serde(default)]
    pub search_term: Option<String>,
}

impl FilterSpec {
    /// An empty filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw form input
    ///
    /// Blank or unparsable dates are ignored, like an empty date input.
    pub fn from_inputs(date_from: &str, date_to: &str, kind: &str, search_term: &str) -> Self {
        Self {
            date_from: parse_date(date_from),
            date_to: parse_date(date_to),
            kind: Some(kind.trim().to_string()).filter(|k| !k.is_empty()),
            search_term: Some(search_term.to_string()).filter(|s| !s.is_empty()),
        }
    }

    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.date_from = window.start;
        self.date_to = window.end;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// The date bounds as a window
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.date_from, self.date_to)
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.active_kind().is_none()
            && self.active_search().is_none()
    }

    fn active_kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }

    fn active_search(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|s| !s.is_empty())
    }

    /// Check one transaction against every constraint
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.window().contains(&transaction.date_naive()) {
            return false;
        }

        if let Some(kind) = self.active_kind() {
            if transaction.kind().as_str() != kind {
                return false;
            }
        }

        if let Some(term) = self.active_search() {
            if !transaction.searchable_text().contains(&term.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// A filtered, date-sorted list with its summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

impl FilteredView {
    /// No transaction matched; the page shows its empty state
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Keep the transactions matching `spec`, in input order
pub fn filter(transactions: &[Transaction], spec: &FilterSpec) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| spec.matches(t))
        .cloned()
        .collect()
}

/// Sort newest first; equal timestamps keep their relative order
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// Filter, sort and summarize in one pass
pub fn apply(transactions: &[Transaction], spec: &FilterSpec, now: DateTime<Utc>) -> FilteredView {
    let mut filtered = filter(transactions, spec);
    sort_by_date_desc(&mut filtered);
    let summary = summarize_at(&filtered, now);

    log::debug!(
        "Filter over {} (type {:?}, search {:?}) matched {} of {} transactions",
        spec.window().description(),
        spec.active_kind(),
        spec.active_search(),
        filtered.len(),
        transactions.len()
    );

    FilteredView {
        transactions: filtered,
        summary,
    }
}
