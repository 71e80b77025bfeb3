//! Expense tracking.

use crate::domain::aggregates::Page;
use crate::domain::forms::ExpenseForm;
use crate::domain::{DomainError, Expense, ExpenseCategory, calc};
use crate::ports::{ExpenseQuery, ExpensesApi};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The expenses page asks for more rows than the other lists.
pub const EXPENSE_PAGE_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpensesOverview {
    pub page: Page<Expense>,
    pub total: Decimal,
    pub this_month: Decimal,
    /// Largest category first.
    pub by_category: Vec<(ExpenseCategory, Decimal)>,
    pub top_category: Option<ExpenseCategory>,
}

impl ExpensesOverview {
    pub fn from_page(page: Page<Expense>, now: &DateTime<Utc>) -> Self {
        let total = page
            .total_amount
            .unwrap_or_else(|| page.data.iter().map(|e| e.amount).sum());
        let this_month = calc::month_to_date(&page.data, now, |e| e.date, |e| e.amount);
        let by_category = calc::totals_by(&page.data, |e| e.category, |e| e.amount);
        let top_category = by_category.first().map(|(c, _)| *c);
        Self {
            page,
            total,
            this_month,
            by_category,
            top_category,
        }
    }
}

pub struct ExpenseService {
    api: Arc<dyn ExpensesApi>,
}

impl ExpenseService {
    pub fn new(api: Arc<dyn ExpensesApi>) -> Self {
        Self { api }
    }

    pub async fn overview(&self, now: &DateTime<Utc>) -> Result<ExpensesOverview, DomainError> {
        let query = ExpenseQuery {
            category: None,
            limit: Some(EXPENSE_PAGE_LIMIT),
        };
        let page = self.api.list(&query).await?;
        Ok(ExpensesOverview::from_page(page, now))
    }

    pub async fn save(
        &self,
        existing: Option<&str>,
        form: ExpenseForm,
    ) -> Result<Expense, DomainError> {
        let form = form.normalized()?;
        match existing {
            Some(id) => self.api.update(id, &form).await,
            None => self.api.create(&form).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.api.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::parse_timestamp;
    use crate::usecases::test_support::FakeBackend;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(category: &str, amount: u32, date: &str) -> Expense {
        serde_json::from_value(serde_json::json!({
            "_id": format!("{}-{}", category, date),
            "title": "x",
            "category": category,
            "amount": amount,
            "date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_overview_by_category() {
        let now = parse_timestamp("2026-10-15").unwrap();
        let page = Page {
            data: vec![
                expense("travel", 4000, "2026-10-03"),
                expense("software", 1500, "2026-10-04"),
                expense("software", 1500, "2026-08-04"),
                expense("office", 200, "2026-09-30"),
            ],
            total: Some(4),
            total_amount: Some(dec!(7200)),
        };
        let o = ExpensesOverview::from_page(page, &now);
        assert_eq!(o.total, dec!(7200));
        assert_eq!(o.this_month, dec!(5500));
        assert_eq!(o.top_category, Some(ExpenseCategory::Travel));
        assert_eq!(
            o.by_category,
            vec![
                (ExpenseCategory::Travel, dec!(4000)),
                (ExpenseCategory::Software, dec!(3000)),
                (ExpenseCategory::Office, dec!(200)),
            ]
        );
    }

    #[test]
    fn test_overview_empty() {
        let now = parse_timestamp("2026-10-15").unwrap();
        let o = ExpensesOverview::from_page(Page::new(vec![]), &now);
        assert_eq!(o.total, Decimal::ZERO);
        assert_eq!(o.top_category, None);
    }

    #[tokio::test]
    async fn test_save_validation_and_create() {
        let backend = Arc::new(FakeBackend::new());
        let svc = ExpenseService::new(backend.clone());
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

        let mut form = ExpenseForm::new(today);
        form.title = "Figma".into();
        let err = svc.save(None, form.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "Title and amount required");
        assert!(backend.calls().is_empty());

        form.amount = Some(dec!(1200));
        form.category = ExpenseCategory::Software;
        let saved = svc.save(None, form).await.unwrap();
        assert_eq!(saved.category, ExpenseCategory::Software);
        assert_eq!(backend.calls(), vec!["expenses.create"]);
    }
}
