//! Application use cases. Orchestrate domain logic via ports.

pub mod client_service;
pub mod expense_service;
pub mod export_service;
pub mod insight_service;
pub mod invoice_service;
pub mod payment_service;
pub mod product_service;
pub mod session_service;
pub mod settings_service;

#[cfg(test)]
pub mod test_support;

pub use client_service::ClientService;
pub use expense_service::{ExpenseService, ExpensesOverview};
pub use export_service::ExportService;
pub use insight_service::InsightService;
pub use invoice_service::InvoiceService;
pub use payment_service::{PaymentService, PaymentsOverview};
pub use product_service::ProductService;
pub use session_service::SessionService;
pub use settings_service::SettingsService;
