//! Field parsers for display strings

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a display amount such as `-$1,250.00` into a decimal
///
/// Everything except digits, `-` and `.` is stripped, then the longest
/// leading number is read. Returns `None` when no number remains.
///
/// Values beyond the `Decimal` range saturate at `Decimal::MAX` (or `MIN`);
/// fraction digits past the 28-digit precision are dropped.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    static STRIP: OnceCell<Regex> = OnceCell::new();
    static LEADING_NUMBER: OnceCell<Regex> = OnceCell::new();
    let strip = STRIP.get_or_init(|| Regex::new(r"[^0-9.\-]").unwrap());
    let leading = LEADING_NUMBER.get_or_init(|| Regex::new(r"^-?(\d+(\.\d+)?|\.\d+)").unwrap());

    let stripped = strip.replace_all(text, "");
    let number = leading.find(&stripped)?.as_str();

    // Decimal wants a digit before the point
    let number = if let Some(rest) = number.strip_prefix("-.") {
        format!("-0.{}", rest)
    } else if let Some(rest) = number.strip_prefix('.') {
        format!("0.{}", rest)
    } else {
        number.to_string()
    };

    Decimal::from_str(&number).ok().or_else(|| saturate(&number))
}

/// Fallback for numbers `Decimal::from_str` cannot hold
fn saturate(number: &str) -> Option<Decimal> {
    const MAX_DIGITS: usize = 28;

    let negative = number.starts_with('-');
    let unsigned = number.trim_start_matches('-');
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let whole = whole.trim_start_matches('0');

    if whole.len() > MAX_DIGITS {
        return Some(if negative { Decimal::MIN } else { Decimal::MAX });
    }

    let keep = MAX_DIGITS - whole.len();
    let fraction = &fraction[..fraction.len().min(keep)];
    let whole = if whole.is_empty() { "0" } else { whole };
    let trimmed = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };

    Decimal::from_str(&trimmed)
        .ok()
        .map(|d| if negative { -d } else { d })
        .or_else(|| Some(if negative { Decimal::MIN } else { Decimal::MAX }))
}

/// Parse a display amount into a non-negative value, `0` when unparsable
///
/// Direction is carried separately, so a rendered `-$50.00` reads back as `50`.
pub fn parse_amount(text: &str) -> Decimal {
    parse_decimal(text).map(|d| d.abs()).unwrap_or(Decimal::ZERO)
}

/// Parse a timestamp in any of the accepted formats, as UTC
///
/// Bare dates are taken as midnight UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date (`YYYY-MM-DD`), as sent by date inputs
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
