//! Payments page: collection overview, standalone recording, reversal.

use crate::domain::aggregates::Page;
use crate::domain::forms::PaymentDraft;
use crate::domain::{DomainError, Invoice, InvoiceStatus, Payment, PaymentMethod, calc};
use crate::ports::{InvoiceQuery, InvoicesApi, PaymentQuery, PaymentsApi};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Methods listed in the breakdown panel.
pub const METHOD_BREAKDOWN_LEN: usize = 5;

/// Everything the payments page shows above the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsOverview {
    pub page: Page<Payment>,
    pub total_collected: Decimal,
    pub this_month: Decimal,
    /// Per-method totals, largest first, capped at [`METHOD_BREAKDOWN_LEN`].
    pub by_method: Vec<(PaymentMethod, Decimal)>,
    pub top_method: Option<PaymentMethod>,
    pub transactions: u64,
}

impl PaymentsOverview {
    pub fn from_page(page: Page<Payment>, now: &DateTime<Utc>) -> Self {
        let total_collected = page
            .total_amount
            .unwrap_or_else(|| page.data.iter().map(|p| p.amount).sum());
        let this_month = calc::month_to_date(&page.data, now, |p| p.payment_date, |p| p.amount);
        let mut by_method = calc::totals_by(&page.data, |p| p.payment_method, |p| p.amount);
        let top_method = by_method.first().map(|(m, _)| *m);
        by_method.truncate(METHOD_BREAKDOWN_LEN);
        Self {
            transactions: page.count(),
            total_collected,
            this_month,
            by_method,
            top_method,
            page,
        }
    }
}

pub struct PaymentService {
    payments: Arc<dyn PaymentsApi>,
    invoices: Arc<dyn InvoicesApi>,
    page_limit: u32,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentsApi>,
        invoices: Arc<dyn InvoicesApi>,
        page_limit: u32,
    ) -> Self {
        Self {
            payments,
            invoices,
            page_limit,
        }
    }

    pub async fn overview(&self, now: &DateTime<Utc>) -> Result<PaymentsOverview, DomainError> {
        let query = PaymentQuery {
            limit: Some(self.page_limit),
            ..PaymentQuery::default()
        };
        let page = self.payments.list(&query).await?;
        Ok(PaymentsOverview::from_page(page, now))
    }

    /// Invoices a standalone payment can be recorded against: those awaiting payment.
    pub async fn payable_invoices(&self) -> Result<Vec<Invoice>, DomainError> {
        let query = InvoiceQuery {
            status: Some(InvoiceStatus::Pending),
            limit: Some(self.page_limit),
            ..InvoiceQuery::default()
        };
        let mut page = self.invoices.list(&query).await?;
        page.data.retain(|i| i.status == InvoiceStatus::Pending);
        Ok(page.data)
    }

    pub async fn record(&self, draft: &PaymentDraft) -> Result<Payment, DomainError> {
        let payload = draft.validate()?;
        self.payments.create(&payload).await
    }

    /// Reverses the payment from its invoice's balance.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.payments.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::parse_timestamp;
    use crate::usecases::test_support::{FakeBackend, invoice};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn payment(id: &str, method: &str, amount: f64, date: &str) -> Payment {
        serde_json::from_value(serde_json::json!({
            "_id": id, "paymentMethod": method, "amount": amount, "paymentDate": date
        }))
        .unwrap()
    }

    #[test]
    fn test_overview_breakdown() {
        let now = parse_timestamp("2026-10-15T12:00:00Z").unwrap();
        let data = vec![
            payment("1", "upi", 1000.0, "2026-10-02"),
            payment("2", "cash", 300.0, "2026-09-28"),
            payment("3", "upi", 500.0, "2026-10-10"),
            payment("4", "neft", 2000.0, "2025-10-10"),
            payment("5", "card", 10.0, "2026-10-11"),
            payment("6", "cheque", 20.0, "2026-10-11"),
            payment("7", "rtgs", 30.0, "2026-10-11"),
        ];
        let page = Page {
            data,
            total: Some(7),
            total_amount: None,
        };
        let o = PaymentsOverview::from_page(page, &now);
        assert_eq!(o.total_collected, dec!(3860));
        assert_eq!(o.this_month, dec!(1560));
        assert_eq!(o.top_method, Some(PaymentMethod::Neft));
        assert_eq!(o.by_method.len(), METHOD_BREAKDOWN_LEN);
        assert_eq!(o.by_method[1], (PaymentMethod::Upi, dec!(1500)));
        assert_eq!(o.transactions, 7);
    }

    #[tokio::test]
    async fn test_server_total_wins() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .payments
            .lock()
            .unwrap()
            .push(payment("1", "upi", 250.0, "2026-10-01"));
        let svc = PaymentService::new(backend.clone(), backend.clone(), 100);
        let now = parse_timestamp("2026-10-15").unwrap();
        let o = svc.overview(&now).await.unwrap();
        assert_eq!(o.total_collected, dec!(250));
        assert_eq!(backend.calls(), vec!["payments.list"]);
    }

    #[tokio::test]
    async fn test_payable_invoices_are_pending_only() {
        let backend = Arc::new(FakeBackend::new());
        backend.invoices.lock().unwrap().extend([
            invoice("1", InvoiceStatus::Pending),
            invoice("2", InvoiceStatus::Paid),
        ]);
        let svc = PaymentService::new(backend.clone(), backend.clone(), 100);
        let payable = svc.payable_invoices().await.unwrap();
        assert_eq!(payable.len(), 1);
        assert_eq!(payable[0].id, "1");
    }

    #[tokio::test]
    async fn test_record_requires_invoice_and_amount() {
        let backend = Arc::new(FakeBackend::new());
        let svc = PaymentService::new(backend.clone(), backend.clone(), 100);
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let mut draft = PaymentDraft::new(today);
        draft.invoice = Some("1".into());
        let err = svc.record(&draft).await.unwrap_err();
        assert_eq!(err.to_string(), "Select invoice and enter amount");
        assert!(backend.calls().is_empty());

        draft.amount = Some(dec!(99));
        let p = svc.record(&draft).await.unwrap();
        assert_eq!(p.amount, dec!(99));
    }
}
