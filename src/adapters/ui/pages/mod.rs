//! One module per menu entry. Each `run` loops until the user backs out.

pub mod clients;
pub mod dashboard;
pub mod expenses;
pub mod invoices;
pub mod payments;
pub mod products;
pub mod reports;
pub mod settings;

use super::tui::Services;
use crate::domain::DomainError;
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Cross-links between detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jump {
    Client(String),
    Invoice(String),
}

/// Follow detail-to-detail links until the user backs out.
pub async fn follow(app: &Services, mut next: Option<Jump>) -> Result<(), DomainError> {
    while let Some(jump) = next.take() {
        next = match jump {
            Jump::Client(id) => clients::detail(app, &id).await?,
            Jump::Invoice(id) => invoices::detail(app, &id).await?,
        };
    }
    Ok(())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
