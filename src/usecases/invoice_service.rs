//! Invoices: tabbed list, detail, draft creation, status transitions, payments against an invoice.

use crate::domain::aggregates::{InvoiceDetail, Page};
use crate::domain::forms::{InvoiceDraft, PaymentDraft};
use crate::domain::{
    Client, DomainError, Invoice, InvoiceAction, InvoiceSettings, Payment, Product, StatusTab,
};
use crate::ports::{
    ClientsApi, InvoiceQuery, InvoicesApi, ListQuery, PaymentsApi, ProductQuery, ProductsApi,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub struct InvoiceService {
    invoices: Arc<dyn InvoicesApi>,
    clients: Arc<dyn ClientsApi>,
    products: Arc<dyn ProductsApi>,
    payments: Arc<dyn PaymentsApi>,
    page_limit: u32,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoicesApi>,
        clients: Arc<dyn ClientsApi>,
        products: Arc<dyn ProductsApi>,
        payments: Arc<dyn PaymentsApi>,
        page_limit: u32,
    ) -> Self {
        Self {
            invoices,
            clients,
            products,
            payments,
            page_limit,
        }
    }

    /// List for a status tab. The filter goes to the server and is re-applied locally, so the
    /// page only ever shows invoices of the selected status.
    pub async fn list(
        &self,
        tab: StatusTab,
        search: Option<&str>,
    ) -> Result<Page<Invoice>, DomainError> {
        let query = InvoiceQuery {
            status: tab.status(),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            limit: Some(self.page_limit),
            ..InvoiceQuery::default()
        };
        let mut page = self.invoices.list(&query).await?;
        page.data.retain(|inv| tab.matches(inv));
        Ok(page)
    }

    pub async fn detail(&self, id: &str) -> Result<InvoiceDetail, DomainError> {
        self.invoices.get(id).await
    }

    pub fn new_draft(&self, settings: &InvoiceSettings, today: NaiveDate) -> InvoiceDraft {
        InvoiceDraft::new(settings, today)
    }

    /// Clients offered in the draft's client picker.
    pub async fn client_options(&self) -> Result<Vec<Client>, DomainError> {
        let query = ListQuery {
            limit: Some(self.page_limit),
            ..ListQuery::default()
        };
        Ok(self.clients.list(&query).await?.data)
    }

    /// Catalog entries offered as line-item templates.
    pub async fn product_options(&self) -> Result<Vec<Product>, DomainError> {
        let query = ProductQuery {
            limit: Some(self.page_limit),
            ..ProductQuery::default()
        };
        Ok(self.products.list(&query).await?.data)
    }

    pub async fn create(
        &self,
        draft: &InvoiceDraft,
        today: NaiveDate,
    ) -> Result<Invoice, DomainError> {
        let payload = draft.validate(today)?;
        self.invoices.create(&payload).await
    }

    /// Apply a status-changing action (`Send`, `MarkPending`).
    pub async fn apply(&self, id: &str, action: InvoiceAction) -> Result<Invoice, DomainError> {
        let status = action.target_status().ok_or_else(|| {
            DomainError::validation(format!("{} does not change the status", action))
        })?;
        let invoice = self.invoices.set_status(id, status).await?;
        info!(invoice_id = id, status = status.as_str(), "status updated");
        Ok(invoice)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.invoices.delete(id).await
    }

    /// Record a payment from the invoice's detail view. The amount may not exceed the balance.
    pub async fn record_payment(
        &self,
        detail: &InvoiceDetail,
        draft: &PaymentDraft,
        currency: &str,
    ) -> Result<Payment, DomainError> {
        let mut draft = draft.clone();
        draft.invoice = Some(detail.invoice.id.clone());
        let payload = draft.validate_against(detail.invoice.balance_due, currency)?;
        self.payments.create(&payload).await
    }
}
