//! Utility functions and helpers

pub mod clock;

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

pub use clock::{Clock, ClockRef, FixedClock, SystemClock};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a currency amount, e.g. `$1,234.50`
///
/// The sign is dropped; callers prefix `-`/`+` from the transaction direction.
pub fn format_currency(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let mut value = amount
        .abs()
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(decimal_places);
    let text = value.to_string();

    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    match fraction {
        Some(f) => format!("{}{}.{}", symbol, format_number(whole), f),
        None => format!("{}{}", symbol, format_number(whole)),
    }
}

/// Escape text for safe inclusion in HTML bodies and attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate a short random id (nine base-36 characters)
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency_at_decimal_max() {
        let text = format_currency(Decimal::MAX, "$", 2);
        assert!(text.starts_with("$79,228,162,514,264,337,593,543,950,335"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_currency_two_places() {
        let amount = Decimal::from_str("1234.5").unwrap();
        assert_eq!(format_currency(amount, "$", 2), "$1,234.50");
        assert_eq!(format_currency(Decimal::ZERO, "$", 2), "$0.00");
    }

    #[test]
    fn test_format_currency_rounds_and_drops_sign() {
        let amount = Decimal::from_str("-50.005").unwrap();
        assert_eq!(format_currency(amount, "$", 2), "$50.01");
        assert_eq!(format_currency(Decimal::from(7), "€", 0), "€7");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Rent" & 'fees'</b>"#),
            "&lt;b&gt;&quot;Rent&quot; &amp; &#39;fees&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_id(), generate_id());
    }
}
