//! Transaction history: filtering, ordering and summaries
//!
//! The free functions in [`filter`] and [`summary`] are the whole engine.
//! [`TransactionHistory`] holds the canonical list for the life of the
//! process and feeds it, together with the injected clock, to those
//! functions.

pub mod error;
pub mod filter;
pub mod models;
pub mod notify;
pub mod summary;
pub mod time;
pub mod types;

use bankweb_parser::{RawTransaction, RecordSource};
use bankweb_utils::{generate_id, Clock, ClockRef};
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use filter::{apply, filter, sort_by_date_desc, FilterSpec, FilteredView};
pub use models::Transaction;
pub use notify::{BufferedNotifier, LogNotifier, Notification, Notifier};
pub use summary::{summarize, summarize_at, Summary};
pub use time::DateWindow;
pub use types::{Severity, TransactionKind};

/// Message sent after a refresh
pub const REFRESH_MESSAGE: &str = "Transaction history refreshed!";

/// The canonical transaction list for one page view
///
/// Built once at startup and never modified; every query produces a
/// derived view.
pub struct TransactionHistory {
    transactions: Vec<Transaction>,
    clock: ClockRef,
}

impl TransactionHistory {
    /// Create from already-built transactions
    pub fn new(transactions: Vec<Transaction>, clock: ClockRef) -> Self {
        Self { transactions, clock }
    }

    /// An empty history
    pub fn empty(clock: ClockRef) -> Self {
        Self::new(Vec::new(), clock)
    }

    /// Normalize raw page records, generating ids where missing
    pub fn from_raw(records: Vec<RawTransaction>, clock: ClockRef) -> Self {
        Self::from_raw_with_ids(records, clock, generate_id)
    }

    /// Normalize raw page records with a custom id generator
    pub fn from_raw_with_ids<F>(records: Vec<RawTransaction>, clock: ClockRef, mut id_gen: F) -> Self
    where
        F: FnMut() -> String,
    {
        let now = clock.now();
        let transactions: Vec<Transaction> = records
            .into_iter()
            .map(|raw| Transaction::from_raw(raw, now, &mut id_gen))
            .collect();

        let mut seen = HashSet::new();
        for t in &transactions {
            if !seen.insert(t.id()) {
                log::warn!("Duplicate transaction id in source data: {}", t.id());
            }
        }

        Self::new(transactions, clock)
    }

    /// Load and normalize records from a data file
    pub async fn load(source: &dyn RecordSource, path: PathBuf, clock: ClockRef) -> CoreResult<Self> {
        let records = match source.load(path.clone()).await {
            Ok(records) => records,
            Err(bankweb_parser::ParseError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::NotLoaded {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        log::info!("Loaded {} transaction records from {}", records.len(), path.display());
        Ok(Self::from_raw(records, clock))
    }

    /// All transactions in source order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Look up one transaction by id
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Filter, sort and summarize
    pub fn apply(&self, spec: &FilterSpec) -> FilteredView {
        apply(&self.transactions, spec, self.clock.now())
    }

    /// The initial filter: the last `window_days` days up to today
    pub fn default_filter(&self, window_days: u32) -> FilterSpec {
        FilterSpec::new().with_window(DateWindow::last_days(self.clock.today(), window_days))
    }

    /// Simulated refresh: nothing is refetched, the filter is re-applied
    pub fn refresh(&self, spec: &FilterSpec, notifier: &dyn Notifier) -> FilteredView {
        let view = self.apply(spec);
        notifier.notify(Notification::success(REFRESH_MESSAGE));
        view
    }
}

impl std::fmt::Debug for TransactionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionHistory")
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use bankweb_parser::JsonRecordSource;
    use bankweb_utils::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::sync::Arc;

    fn clock() -> ClockRef {
        Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap()))
    }

    fn raw(id: &str, kind: &str, date: &str, amount: &str, sent: bool) -> RawTransaction {
        RawTransaction {
            id: Some(id.to_string()),
            kind: Some(kind.to_string()),
            date: Some(date.to_string()),
            amount: Some(amount.to_string()),
            title: None,
            description: None,
            sent: Some(sent),
        }
    }

    fn history() -> TransactionHistory {
        TransactionHistory::from_raw(
            vec![
                raw("1", "transfer", "2024-01-05", "-$50.00", true),
                raw("2", "deposit", "2024-01-10", "+$200.00", false),
            ],
            clock(),
        )
    }

    #[test]
    fn test_history_from_raw() {
        let history = history();
        assert_eq!(history.len(), 2);
        assert!(!history.is_empty());
        assert_eq!(history.transaction("2").unwrap().amount(), Decimal::from(200));
        assert!(history.transaction("3").is_none());
    }

    #[test]
    fn test_missing_ids_are_generated() {
        let records = vec![RawTransaction::default(), RawTransaction::default()];
        let mut counter = 0;
        let history = TransactionHistory::from_raw_with_ids(records, clock(), || {
            counter += 1;
            format!("gen-{}", counter)
        });
        let ids: Vec<&str> = history.transactions().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["gen-1", "gen-2"]);
        // Undated records take the clock's time
        assert_eq!(history.transactions()[0].date(), clock().now());
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let history = TransactionHistory::from_raw(vec![RawTransaction::default(); 3], clock());
        let ids: HashSet<&str> = history.transactions().iter().map(|t| t.id()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_apply_deposit_filter() {
        let view = history().apply(&FilterSpec::new().with_kind("deposit"));
        assert_eq!(view.transactions.len(), 1);
        assert_eq!(view.transactions[0].id(), "2");
        assert_eq!(view.summary.count, 1);
        assert_eq!(view.summary.total_sent, Decimal::ZERO);
        assert_eq!(view.summary.total_received, Decimal::from(200));
    }

    #[test]
    fn test_whole_history_summary() {
        let summary = history().apply(&FilterSpec::new()).summary;
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_sent, Decimal::from(50));
        assert_eq!(summary.count_this_month, 2);
    }

    #[test]
    fn test_apply_with_oversized_amounts() {
        let history = TransactionHistory::from_raw(
            vec![
                raw("big-1", "transfer", "2024-01-05", "$79228162514264337593543950335", true),
                raw("big-2", "transfer", "2024-01-06", "$79228162514264337593543950335", true),
            ],
            clock(),
        );
        let view = history.apply(&FilterSpec::new());
        assert_eq!(view.transactions.len(), 2);
        assert_eq!(view.summary.total_sent, Decimal::MAX);
        assert_eq!(view.summary.total_received, Decimal::ZERO);
    }

    #[test]
    fn test_default_filter_is_thirty_day_window() {
        let spec = history().default_filter(30);
        assert_eq!(spec.date_from, NaiveDate::from_ymd_opt(2023, 12, 21));
        assert_eq!(spec.date_to, NaiveDate::from_ymd_opt(2024, 1, 20));
        assert!(spec.kind.is_none());
        assert!(spec.search_term.is_none());
    }

    #[test]
    fn test_refresh_reapplies_and_notifies() {
        let history = history();
        let notifier = BufferedNotifier::new();
        let spec = FilterSpec::new().with_kind("transfer");

        let view = history.refresh(&spec, &notifier);
        assert_eq!(view, history.apply(&spec));

        let sent = notifier.drain();
        assert_eq!(sent, vec![Notification::success(REFRESH_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","type":"transfer","date":"2024-01-05","amount":"$50.00","sent":true}}]"#
        )
        .unwrap();

        let history = TransactionHistory::load(&JsonRecordSource, file.path().to_path_buf(), clock())
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.transactions()[0].is_sent());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_loaded() {
        let err = TransactionHistory::load(&JsonRecordSource, PathBuf::from("/no/such/file.json"), clock())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotLoaded);
    }

    #[tokio::test]
    async fn test_load_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();

        let err = TransactionHistory::load(&JsonRecordSource, file.path().to_path_buf(), clock())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }
}
