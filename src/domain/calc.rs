//! Client-side arithmetic for display: line totals, progress and share percentages.
//!
//! Authoritative totals come from the backend; these only drive live previews and charts.

use crate::domain::dates::same_month;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use std::hash::Hash;

/// Subtotal and tax for a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
}

impl Totals {
    pub fn total(&self) -> Decimal {
        self.subtotal + self.tax
    }
}

/// Sum `qty * rate` and `qty * rate * tax% / 100` over `(qty, rate, tax_rate)` rows.
pub fn line_totals<I>(rows: I) -> Totals
where
    I: IntoIterator<Item = (Decimal, Decimal, Decimal)>,
{
    rows.into_iter()
        .fold(Totals::default(), |acc, (qty, rate, tax_rate)| {
            let amount = qty * rate;
            let tax = amount * tax_rate / Decimal::ONE_HUNDRED;
            Totals {
                subtotal: acc.subtotal + amount,
                tax: acc.tax + tax,
            }
        })
}

/// `part / whole * 100`, 0 when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

/// Paid share of an invoice total, clamped for progress bars.
pub fn paid_progress(amount_paid: Decimal, total: Decimal) -> f64 {
    percent_of(amount_paid, total).clamp(0.0, 100.0)
}

/// Shares of each count against their sum, with an empty sum treated as 1.
pub fn count_shares(counts: &[u64]) -> Vec<f64> {
    let total = counts.iter().sum::<u64>().max(1) as f64;
    counts
        .iter()
        .map(|&c| c as f64 / total * 100.0)
        .collect()
}

/// Shares of each amount against their sum, with an empty sum treated as 1.
pub fn amount_shares(amounts: &[Decimal]) -> Vec<f64> {
    let sum: Decimal = amounts.iter().copied().sum();
    let total = if sum.is_zero() { Decimal::ONE } else { sum };
    amounts
        .iter()
        .map(|&a| (a / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0))
        .collect()
}

/// Each value relative to the largest one (floor 1), as 0..=1 fractions for bar rendering.
pub fn relative_bars(series: &[&[Decimal]]) -> Vec<Vec<f64>> {
    let max = series
        .iter()
        .flat_map(|s| s.iter().copied())
        .fold(Decimal::ONE, Decimal::max);
    series
        .iter()
        .map(|s| {
            s.iter()
                .map(|&v| (v / max).to_f64().unwrap_or(0.0).max(0.0))
                .collect()
        })
        .collect()
}

/// Sum amounts per key and sort descending by total.
pub fn totals_by<K, T, FK, FA>(items: &[T], key: FK, amount: FA) -> Vec<(K, Decimal)>
where
    K: Eq + Hash + Ord + Copy,
    FK: Fn(&T) -> K,
    FA: Fn(&T) -> Decimal,
{
    let mut map: HashMap<K, Decimal> = HashMap::new();
    for item in items {
        *map.entry(key(item)).or_default() += amount(item);
    }
    let mut out: Vec<(K, Decimal)> = map.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out
}

/// Sum of amounts whose date falls in the calendar month of `now`.
pub fn month_to_date<T, FD, FA>(items: &[T], now: &DateTime<Utc>, date: FD, amount: FA) -> Decimal
where
    FD: Fn(&T) -> Option<DateTime<Utc>>,
    FA: Fn(&T) -> Decimal,
{
    items
        .iter()
        .filter(|i| date(*i).is_some_and(|d| same_month(&d, now)))
        .map(amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::parse_timestamp;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_totals() {
        let t = line_totals([
            (dec!(2), dec!(1500), dec!(18)),
            (dec!(1), dec!(1000), dec!(0)),
        ]);
        assert_eq!(t.subtotal, dec!(4000));
        assert_eq!(t.tax, dec!(540));
        assert_eq!(t.total(), dec!(4540));
    }

    #[test]
    fn test_line_totals_empty() {
        let t = line_totals(std::iter::empty());
        assert_eq!(t, Totals::default());
    }

    #[test]
    fn test_paid_progress_zero_total() {
        assert_eq!(paid_progress(dec!(100), dec!(0)), 0.0);
    }

    #[test]
    fn test_paid_progress_clamped() {
        assert_eq!(paid_progress(dec!(150), dec!(100)), 100.0);
        assert_eq!(paid_progress(dec!(25), dec!(100)), 25.0);
    }

    #[test]
    fn test_count_shares_all_zero() {
        assert_eq!(count_shares(&[0, 0, 0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_count_shares() {
        let s = count_shares(&[2, 1, 1]);
        assert_eq!(s, vec![50.0, 25.0, 25.0]);
    }

    #[test]
    fn test_amount_shares() {
        let s = amount_shares(&[dec!(300), dec!(100)]);
        assert_eq!(s, vec![75.0, 25.0]);
        assert_eq!(amount_shares(&[dec!(0)]), vec![0.0]);
    }

    #[test]
    fn test_relative_bars_floor_one() {
        let zeros = [dec!(0), dec!(0)];
        let bars = relative_bars(&[&zeros[..]]);
        assert_eq!(bars, vec![vec![0.0, 0.0]]);

        let rev = [dec!(50), dec!(100)];
        let exp = [dec!(25)];
        let bars = relative_bars(&[&rev[..], &exp[..]]);
        assert_eq!(bars[0], vec![0.5, 1.0]);
        assert_eq!(bars[1], vec![0.25]);
    }

    #[test]
    fn test_totals_by_sorted_desc() {
        let rows = [("upi", dec!(10)), ("cash", dec!(30)), ("upi", dec!(25))];
        let out = totals_by(&rows, |r| r.0, |r| r.1);
        assert_eq!(out, vec![("upi", dec!(35)), ("cash", dec!(30))]);
    }

    #[test]
    fn test_month_to_date() {
        let now = parse_timestamp("2026-10-15").unwrap();
        let rows = [
            (parse_timestamp("2026-10-01"), dec!(100)),
            (parse_timestamp("2026-09-30"), dec!(50)),
            (parse_timestamp("2025-10-10"), dec!(70)),
            (None, dec!(5)),
        ];
        let sum = month_to_date(&rows, &now, |r| r.0, |r| r.1);
        assert_eq!(sum, dec!(100));
    }
}
