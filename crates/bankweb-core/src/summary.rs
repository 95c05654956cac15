//! Aggregate counters over a transaction list

use bankweb_utils::Clock;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::time::same_month;

/// Totals shown above the transaction list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of transactions
    pub count: usize,
    /// Sum of sent (debit) amounts
    pub total_sent: Decimal,
    /// Sum of received (credit) amounts
    pub total_received: Decimal,
    /// Transactions in the current calendar month
    pub count_this_month: usize,
}

/// Summarize relative to the clock's current month
///
/// `count_this_month` depends on when this is called, so the same list can
/// give different results on either side of a month boundary.
pub fn summarize(transactions: &[Transaction], clock: &dyn Clock) -> Summary {
    summarize_at(transactions, clock.now())
}

/// Summarize relative to an explicit "now"
///
/// Totals saturate at `Decimal::MAX` rather than overflow.
pub fn summarize_at(transactions: &[Transaction], now: DateTime<Utc>) -> Summary {
    transactions.iter().fold(Summary::default(), |mut summary, t| {
        summary.count += 1;
        let total = if t.is_sent() {
            &mut summary.total_sent
        } else {
            &mut summary.total_received
        };
        *total = saturating_add(*total, t.amount());
        if same_month(&t.date(), &now) {
            summary.count_this_month += 1;
        }
        summary
    })
}

fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        log::warn!("Transaction total overflowed; clamping to {}", Decimal::MAX);
        Decimal::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankweb_parser::RawTransaction;
    use bankweb_utils::FixedClock;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn tx(id: &str, when: DateTime<Utc>, amount: &str, sent: bool) -> Transaction {
        Transaction::new(id, "transfer", when, Decimal::from_str(amount).unwrap(), sent)
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_at(&[], at(2024, 1, 1));
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_totals_by_direction() {
        let list = vec![
            tx("1", at(2024, 1, 5), "50", true),
            tx("2", at(2024, 1, 10), "200", false),
            tx("3", at(2024, 1, 12), "12.50", true),
        ];
        let summary = summarize_at(&list, at(2024, 1, 20));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_sent, Decimal::from_str("62.50").unwrap());
        assert_eq!(summary.total_received, Decimal::from(200));
    }

    #[test]
    fn test_direction_partition_is_exhaustive() {
        let list = vec![
            tx("1", at(2024, 1, 5), "0.10", true),
            tx("2", at(2024, 1, 6), "0.20", false),
            tx("3", at(2024, 1, 7), "0.30", true),
            tx("4", at(2024, 1, 8), "1999.99", false),
        ];
        let summary = summarize_at(&list, at(2024, 1, 8));
        let total: Decimal = list.iter().map(|t| t.amount()).sum();
        assert_eq!(summary.total_sent + summary.total_received, total);
    }

    #[test]
    fn test_decimal_sums_do_not_drift() {
        let list: Vec<Transaction> = (0..10)
            .map(|i| tx(&i.to_string(), at(2024, 1, 1), "0.1", true))
            .collect();
        let summary = summarize_at(&list, at(2024, 1, 1));
        assert_eq!(summary.total_sent, Decimal::ONE);
    }

    #[test]
    fn test_count_this_month_uses_clock() {
        let list = vec![
            tx("jan", at(2024, 1, 31), "1", true),
            tx("feb", at(2024, 2, 1), "1", true),
            tx("last-year-feb", at(2023, 2, 1), "1", true),
        ];

        let january = FixedClock::new(at(2024, 1, 15));
        assert_eq!(summarize(&list, &january).count_this_month, 1);

        let february = FixedClock::new(at(2024, 2, 29));
        assert_eq!(summarize(&list, &february).count_this_month, 1);

        let march = FixedClock::new(at(2024, 3, 1));
        assert_eq!(summarize(&list, &march).count_this_month, 0);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let now = at(2024, 1, 1);
        let huge = |id: &str, sent: bool| {
            let raw = RawTransaction {
                id: Some(id.to_string()),
                amount: Some("$79228162514264337593543950335".to_string()),
                sent: Some(sent),
                ..Default::default()
            };
            Transaction::from_raw(raw, now, || unreachable!())
        };
        let list = vec![huge("a", true), huge("b", true), huge("c", false), tx("d", now, "1", false)];

        let summary = summarize_at(&list, now);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total_sent, Decimal::MAX);
        assert_eq!(summary.total_received, Decimal::MAX);
    }

    #[test]
    fn test_unparsable_amount_counts_as_zero() {
        let raw = RawTransaction {
            id: Some("bad".to_string()),
            amount: Some("N/A".to_string()),
            sent: Some(true),
            ..Default::default()
        };
        let now = at(2024, 1, 1);
        let list = vec![
            Transaction::from_raw(raw, now, || unreachable!()),
            tx("ok", now, "5", true),
        ];
        let summary = summarize_at(&list, now);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_sent, Decimal::from(5));
    }
}
