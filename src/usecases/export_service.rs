//! Exports. Renders rows the page already holds and hands the document to the sink.

use crate::adapters::export::{
    expenses_to_csv, invoices_to_csv, payments_to_csv, report_to_markdown,
};
use crate::domain::{DomainError, Expense, Invoice, Payment, ReportSummary};
use crate::ports::ExportSink;
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ExportService {
    sink: Arc<dyn ExportSink>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn ExportSink>) -> Self {
        Self { sink }
    }

    pub async fn export_invoices(
        &self,
        invoices: &[Invoice],
        today: NaiveDate,
    ) -> Result<PathBuf, DomainError> {
        let body = invoices_to_csv(invoices).map_err(csv_error)?;
        self.write(&format!("invoices-{}.csv", today), &body, invoices.len())
            .await
    }

    pub async fn export_payments(
        &self,
        payments: &[Payment],
        today: NaiveDate,
    ) -> Result<PathBuf, DomainError> {
        let body = payments_to_csv(payments).map_err(csv_error)?;
        self.write(&format!("payments-{}.csv", today), &body, payments.len())
            .await
    }

    pub async fn export_expenses(
        &self,
        expenses: &[Expense],
        today: NaiveDate,
    ) -> Result<PathBuf, DomainError> {
        let body = expenses_to_csv(expenses).map_err(csv_error)?;
        self.write(&format!("expenses-{}.csv", today), &body, expenses.len())
            .await
    }

    pub async fn export_report(
        &self,
        year: i32,
        report: &ReportSummary,
        currency: &str,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, DomainError> {
        let body = report_to_markdown(year, report, currency, now);
        self.write(&format!("report-{}.md", year), &body, 1).await
    }

    async fn write(&self, name: &str, body: &str, rows: usize) -> Result<PathBuf, DomainError> {
        let path = self.sink.write(name, body).await?;
        info!(file = name, rows, "exported");
        Ok(path)
    }
}

fn csv_error(e: csv::Error) -> DomainError {
    DomainError::Export(format!("CSV encoding failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InvoiceStatus;
    use crate::usecases::test_support::{MemorySink, invoice};
    use std::path::Path;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[tokio::test]
    async fn test_invoice_export_named_by_date() {
        let sink = Arc::new(MemorySink::default());
        let svc = ExportService::new(sink.clone());
        let rows = [invoice("1", InvoiceStatus::Paid)];
        let path = svc.export_invoices(&rows, today()).await.unwrap();
        assert_eq!(path, Path::new("exports").join("invoices-2026-10-15.csv"));

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].1.starts_with("Number,Client,Status"));
        assert!(written[0].1.contains("INV-1"));
    }

    #[tokio::test]
    async fn test_empty_list_still_has_header() {
        let sink = Arc::new(MemorySink::default());
        let svc = ExportService::new(sink.clone());
        svc.export_expenses(&[], today()).await.unwrap();
        let written = sink.written.lock().unwrap();
        assert_eq!(written[0].0, "expenses-2026-10-15.csv");
        assert_eq!(written[0].1.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_report_export() {
        let sink = Arc::new(MemorySink::default());
        let svc = ExportService::new(sink.clone());
        let now = Utc::now();
        svc.export_report(2025, &ReportSummary::default(), "₹", now)
            .await
            .unwrap();
        let written = sink.written.lock().unwrap();
        assert_eq!(written[0].0, "report-2025.md");
        assert!(written[0].1.starts_with("# Financial Report: 2025"));
    }
}
