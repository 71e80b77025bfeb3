//! Core domain layer. No external I/O dependencies.
//!
//! Records, aggregates, form drafts and the display arithmetic the pages share.

pub mod actions;
pub mod aggregates;
pub mod calc;
pub mod dates;
pub mod entities;
pub mod errors;
pub mod format;
pub mod forms;
pub mod nullable;

pub use actions::{InvoiceAction, StatusTab};
pub use aggregates::{
    AuthPayload, ClientDetail, DashboardStats, InvoiceDetail, Page, ReportSummary,
};
pub use entities::{
    Business, Client, ClientRef, Expense, ExpenseCategory, Invoice, InvoiceRef, InvoiceSettings,
    InvoiceStatus, LineItem, NotificationKey, NotificationPrefs, Payment, PaymentMethod, Product,
    ProductCategory, ProductType, RecordStatus, User,
};
pub use errors::DomainError;
