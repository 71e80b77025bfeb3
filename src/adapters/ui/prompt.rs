//! Thin wrappers over inquire. `Esc` means "back" and yields `None`; Ctrl-C is an error.

use crate::domain::DomainError;
use chrono::NaiveDate;
use inquire::error::InquireResult;
use inquire::{Confirm, CustomType, DateSelect, Select, Text};
use rust_decimal::Decimal;
use std::fmt;

/// Select option carrying a value behind a display label.
#[derive(Debug, Clone)]
pub struct Labeled<T> {
    pub label: String,
    pub value: T,
}

impl<T> Labeled<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl<T> fmt::Display for Labeled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

pub fn skippable<T>(res: InquireResult<Option<T>>) -> Result<Option<T>, DomainError> {
    res.map_err(|e| DomainError::Ui(e.to_string()))
}

pub fn choose<T: fmt::Display>(msg: &str, options: Vec<T>) -> Result<Option<T>, DomainError> {
    if options.is_empty() {
        return Ok(None);
    }
    skippable(Select::new(msg, options).with_page_size(12).prompt_skippable())
}

/// Pick from labeled options, returning the value.
pub fn pick<T>(msg: &str, options: Vec<Labeled<T>>) -> Result<Option<T>, DomainError> {
    Ok(choose(msg, options)?.map(|l| l.value))
}

/// Pick with `current` pre-selected.
pub fn pick_with<T: PartialEq>(
    msg: &str,
    options: Vec<Labeled<T>>,
    current: &T,
) -> Result<Option<T>, DomainError> {
    if options.is_empty() {
        return Ok(None);
    }
    let start = options.iter().position(|o| &o.value == current).unwrap_or(0);
    let res = Select::new(msg, options)
        .with_starting_cursor(start)
        .with_page_size(12)
        .prompt_skippable();
    Ok(skippable(res)?.map(|l| l.value))
}

pub fn text(msg: &str, initial: &str) -> Result<Option<String>, DomainError> {
    skippable(Text::new(msg).with_initial_value(initial).prompt_skippable())
}

pub fn confirm(msg: &str, help: Option<&str>) -> Result<bool, DomainError> {
    let mut prompt = Confirm::new(msg).with_default(false);
    if let Some(h) = help {
        prompt = prompt.with_help_message(h);
    }
    Ok(skippable(prompt.prompt_skippable())?.unwrap_or(false))
}

/// Yes/no with the current value pre-selected.
pub fn toggle(msg: &str, current: bool) -> Result<Option<bool>, DomainError> {
    skippable(Confirm::new(msg).with_default(current).prompt_skippable())
}

/// Decimal entry. Blank input yields `Ok(Some(None))`; `Esc` yields `Ok(None)`.
pub fn amount(
    msg: &str,
    current: Option<Decimal>,
) -> Result<Option<Option<Decimal>>, DomainError> {
    let initial = current.map(|d| d.normalize().to_string()).unwrap_or_default();
    let Some(raw) = text(msg, &initial)? else {
        return Ok(None);
    };
    Ok(Some(parse_decimal(&raw)))
}

/// Lenient number parsing: blank or unparseable input is absent.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.trim().replace(',', "").parse::<Decimal>().ok()
}

pub fn number<T>(msg: &str, current: T) -> Result<Option<T>, DomainError>
where
    T: Clone + std::str::FromStr + ToString,
{
    skippable(
        CustomType::<T>::new(msg)
            .with_default(current)
            .with_error_message("Enter a number")
            .prompt_skippable(),
    )
}

pub fn date(
    msg: &str,
    current: NaiveDate,
    min: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, DomainError> {
    let mut prompt = DateSelect::new(msg).with_default(current);
    if let Some(min) = min {
        prompt = prompt.with_min_date(min);
    }
    skippable(prompt.prompt_skippable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 1,250.50 "), Some(dec!(1250.50)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_labeled_display() {
        assert_eq!(Labeled::new("Asha Traders", 7).to_string(), "Asha Traders");
    }
}
