//! Clients, invoices and payments.

use super::client::{ApiClient, NO_QUERY};
use crate::domain::aggregates::{ClientDetail, Envelope, InvoiceDetail, Page, StatusChange};
use crate::domain::forms::{ClientForm, InvoicePayload, PaymentPayload};
use crate::domain::{Client, DomainError, Invoice, InvoiceStatus, Payment};
use crate::ports::{ClientsApi, InvoiceQuery, InvoicesApi, ListQuery, PaymentQuery, PaymentsApi};
use tracing::info;

#[async_trait::async_trait]
impl ClientsApi for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<Page<Client>, DomainError> {
        self.get_json("/clients", query).await
    }

    async fn get(&self, id: &str) -> Result<ClientDetail, DomainError> {
        let env: Envelope<ClientDetail> =
            self.get_json(&format!("/clients/{}", id), NO_QUERY).await?;
        Ok(env.data)
    }

    async fn create(&self, form: &ClientForm) -> Result<Client, DomainError> {
        let env: Envelope<Client> = self.post_json("/clients", form).await?;
        info!(client_id = %env.data.id, "client created");
        Ok(env.data)
    }

    async fn update(&self, id: &str, form: &ClientForm) -> Result<Client, DomainError> {
        let env: Envelope<Client> = self.put_json(&format!("/clients/{}", id), form).await?;
        Ok(env.data)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.delete_path(&format!("/clients/{}", id)).await?;
        info!(client_id = id, "client deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl InvoicesApi for ApiClient {
    async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, DomainError> {
        self.get_json("/invoices", query).await
    }

    async fn get(&self, id: &str) -> Result<InvoiceDetail, DomainError> {
        let env: Envelope<InvoiceDetail> =
            self.get_json(&format!("/invoices/{}", id), NO_QUERY).await?;
        Ok(env.data)
    }

    async fn create(&self, payload: &InvoicePayload) -> Result<Invoice, DomainError> {
        let env: Envelope<Invoice> = self.post_json("/invoices", payload).await?;
        info!(
            invoice_id = %env.data.id,
            number = %env.data.invoice_number,
            "invoice created"
        );
        Ok(env.data)
    }

    async fn update(&self, id: &str, payload: &InvoicePayload) -> Result<Invoice, DomainError> {
        let env: Envelope<Invoice> = self
            .put_json(&format!("/invoices/{}", id), payload)
            .await?;
        Ok(env.data)
    }

    async fn set_status(&self, id: &str, status: InvoiceStatus) -> Result<Invoice, DomainError> {
        let env: Envelope<Invoice> = self
            .patch_json(&format!("/invoices/{}/status", id), &StatusChange { status })
            .await?;
        info!(invoice_id = id, status = status.as_str(), "invoice status changed");
        Ok(env.data)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.delete_path(&format!("/invoices/{}", id)).await?;
        info!(invoice_id = id, "invoice deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl PaymentsApi for ApiClient {
    async fn list(&self, query: &PaymentQuery) -> Result<Page<Payment>, DomainError> {
        self.get_json("/payments", query).await
    }

    async fn create(&self, payload: &PaymentPayload) -> Result<Payment, DomainError> {
        let env: Envelope<Payment> = self.post_json("/payments", payload).await?;
        info!(
            payment_id = %env.data.id,
            invoice_id = %payload.invoice,
            "payment recorded"
        );
        Ok(env.data)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.delete_path(&format!("/payments/{}", id)).await?;
        info!(payment_id = id, "payment reversed");
        Ok(())
    }
}
