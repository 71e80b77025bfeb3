//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure (backend, disk)

pub mod inbound;
pub mod outbound;

pub use inbound::InputPort;
pub use outbound::{
    AuthApi, ClientsApi, CredentialStore, ExpenseQuery, ExpensesApi, ExportSink, InsightsApi,
    InvoiceQuery, InvoicesApi, ListQuery, PaymentQuery, PaymentsApi, ProductQuery, ProductsApi,
};
