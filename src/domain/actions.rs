//! Invoice list tabs and the actions an invoice's status allows.

use crate::domain::entities::{Invoice, InvoiceStatus};
use rust_decimal::Decimal;
use std::fmt;

/// Filter tabs on the invoice list. `All` sends no status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusTab {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusTab {
    pub const TABS: [StatusTab; 6] = [
        StatusTab::All,
        StatusTab::Only(InvoiceStatus::Draft),
        StatusTab::Only(InvoiceStatus::Sent),
        StatusTab::Only(InvoiceStatus::Pending),
        StatusTab::Only(InvoiceStatus::Paid),
        StatusTab::Only(InvoiceStatus::Overdue),
    ];

    pub fn status(self) -> Option<InvoiceStatus> {
        match self {
            Self::All => None,
            Self::Only(s) => Some(s),
        }
    }

    pub fn matches(self, invoice: &Invoice) -> bool {
        self.status().is_none_or(|s| invoice.status == s)
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceAction {
    RecordPayment,
    Send,
    MarkPending,
    OpenClient,
    Delete,
}

impl InvoiceAction {
    /// Actions offered for `invoice`, in menu order.
    pub fn available(invoice: &Invoice) -> Vec<InvoiceAction> {
        let mut out = Vec::new();
        if invoice.status != InvoiceStatus::Paid && invoice.balance_due > Decimal::ZERO {
            out.push(Self::RecordPayment);
        }
        match invoice.status {
            InvoiceStatus::Draft => out.push(Self::Send),
            InvoiceStatus::Sent => out.push(Self::MarkPending),
            _ => {}
        }
        if invoice.client.is_some() {
            out.push(Self::OpenClient);
        }
        out.push(Self::Delete);
        out
    }

    /// Status the action moves the invoice to, for the two status-changing actions.
    pub fn target_status(self) -> Option<InvoiceStatus> {
        match self {
            Self::Send => Some(InvoiceStatus::Sent),
            Self::MarkPending => Some(InvoiceStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RecordPayment => "Record payment",
            Self::Send => "Send",
            Self::MarkPending => "Mark pending",
            Self::OpenClient => "Open client",
            Self::Delete => "Delete",
        })
    }
}
