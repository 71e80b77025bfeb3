//! Outbound ports. Application calls into infrastructure.
//!
//! One trait per backend resource, plus local credential storage and exports. Implemented by
//! adapters; faked in use-case tests.

use crate::domain::aggregates::{AuthPayload, ClientDetail, DashboardStats, InvoiceDetail, Page};
use crate::domain::forms::{
    ClientForm, ExpenseForm, InvoicePayload, LoginForm, PasswordPayload, PaymentPayload,
    ProductForm, ProfilePatch, RegisterForm,
};
use crate::domain::{
    Client, DomainError, Expense, ExpenseCategory, Invoice, InvoiceStatus, Payment, Product,
    ProductType, ReportSummary, User,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// `?search=&limit=&page=` for plain list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `/auth/*`.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, form: &LoginForm) -> Result<AuthPayload, DomainError>;

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, DomainError>;

    /// Current user for the stored credential.
    async fn me(&self) -> Result<User, DomainError>;

    /// Returns the server's updated copy of the user.
    async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, DomainError>;

    /// Returns the server's acknowledgement text, if any.
    async fn update_password(&self, payload: &PasswordPayload)
    -> Result<Option<String>, DomainError>;
}

#[async_trait::async_trait]
pub trait ClientsApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<Client>, DomainError>;
    async fn get(&self, id: &str) -> Result<ClientDetail, DomainError>;
    async fn create(&self, form: &ClientForm) -> Result<Client, DomainError>;
    async fn update(&self, id: &str, form: &ClientForm) -> Result<Client, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait InvoicesApi: Send + Sync {
    async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, DomainError>;
    async fn get(&self, id: &str) -> Result<InvoiceDetail, DomainError>;
    async fn create(&self, payload: &InvoicePayload) -> Result<Invoice, DomainError>;
    async fn update(&self, id: &str, payload: &InvoicePayload) -> Result<Invoice, DomainError>;
    async fn set_status(&self, id: &str, status: InvoiceStatus) -> Result<Invoice, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait PaymentsApi: Send + Sync {
    async fn list(&self, query: &PaymentQuery) -> Result<Page<Payment>, DomainError>;
    async fn create(&self, payload: &PaymentPayload) -> Result<Payment, DomainError>;
    /// Deleting a payment reverses it from the invoice balance server-side.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait ProductsApi: Send + Sync {
    async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError>;
    async fn create(&self, form: &ProductForm) -> Result<Product, DomainError>;
    async fn update(&self, id: &str, form: &ProductForm) -> Result<Product, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait ExpensesApi: Send + Sync {
    async fn list(&self, query: &ExpenseQuery) -> Result<Page<Expense>, DomainError>;
    async fn create(&self, form: &ExpenseForm) -> Result<Expense, DomainError>;
    async fn update(&self, id: &str, form: &ExpenseForm) -> Result<Expense, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Server-side aggregates: `/dashboard/stats` and `/reports/summary`.
#[async_trait::async_trait]
pub trait InsightsApi: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardStats, DomainError>;
    async fn report(&self, year: i32) -> Result<ReportSummary, DomainError>;
}

/// Persisted bearer credential.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn token(&self) -> Result<Option<String>, DomainError>;
    async fn store(&self, token: &str) -> Result<(), DomainError>;
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Writes export documents. `name` is a bare file name; returns the written path.
#[async_trait::async_trait]
pub trait ExportSink: Send + Sync {
    async fn write(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError>;

    fn root(&self) -> &Path;
}
