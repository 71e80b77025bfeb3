//! Display formatting for money, dates and enum labels.

use crate::domain::dates::MONTHS;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder shown for absent values.
pub const DASH: &str = "—";

pub const DEFAULT_CURRENCY: &str = "₹";

/// Money in whole units with Indian digit grouping: `₹12,34,567`.
pub fn money(amount: Decimal) -> String {
    money_with(DEFAULT_CURRENCY, amount)
}

/// Same as [`money`] with an explicit currency symbol.
pub fn money_with(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_indian(&digits);
    if negative {
        format!("{}-{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

/// Lakh/crore grouping: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        parts.push(&head[start..end]);
        end = start;
    }
    parts.reverse();
    format!("{},{}", parts.join(","), tail)
}

/// `15 Oct 2026`, or a dash when absent.
pub fn date(at: Option<&DateTime<Utc>>) -> String {
    match at {
        Some(d) => format!(
            "{:02} {} {}",
            d.day(),
            MONTHS[d.month0() as usize],
            d.year()
        ),
        None => DASH.to_string(),
    }
}

/// `15 Oct`, or a dash when absent.
pub fn date_short(at: Option<&DateTime<Utc>>) -> String {
    match at {
        Some(d) => format!("{:02} {}", d.day(), MONTHS[d.month0() as usize]),
        None => DASH.to_string(),
    }
}

/// `bank_transfer` -> `BANK TRANSFER`. Only the first underscore is replaced.
pub fn method_label(raw: &str) -> String {
    raw.to_uppercase().replacen('_', " ", 1)
}

/// Upper-case the first character.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole-number percentage label, e.g. `42%`.
pub fn percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// One-decimal percentage label, e.g. `12.5%`.
pub fn percent_1dp(value: f64) -> String {
    format!("{:.1}%", value)
}
