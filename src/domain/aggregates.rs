//! Response envelopes and server-computed aggregates.
//!
//! Every numeric field defaults to zero and every list to empty, so a partial payload still
//! renders.

use crate::domain::calc;
use crate::domain::entities::{Client, Invoice, InvoiceStatus, Payment, PaymentMethod, User};
use crate::domain::nullable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `{ "data": T }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `{ "data": [T], "total": n, "totalAmount": x }`. `totalAmount` is sent by payments and expenses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "nullable::or_default")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            total: None,
            total_amount: None,
        }
    }

    /// Server total, falling back to the number of rows received.
    pub fn count(&self) -> u64 {
        self.total.unwrap_or(self.data.len() as u64)
    }
}

/// `{ "token": "...", "user": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// `{ "user": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// `{ "message": "..." }`, the body of plain acknowledgements and of error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_revenue: Decimal,
    /// Percent change against the previous period; may be negative.
    #[serde(deserialize_with = "nullable::or_default")]
    pub revenue_growth: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub pending_amount: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub pending_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub overdue_amount: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub overdue_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub paid_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub draft_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub revenue_by_month: Vec<Decimal>,
    #[serde(alias = "expenseByMonth", deserialize_with = "nullable::or_default")]
    pub exp_by_month: Vec<Decimal>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub recent_invoices: Vec<Invoice>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub recent_payments: Vec<Payment>,
}

/// Paid/pending/overdue share of the status donut, whole percents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusDonut {
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
}

impl DashboardStats {
    pub fn donut(&self) -> StatusDonut {
        let shares = calc::count_shares(&[
            self.paid_invoices,
            self.pending_invoices,
            self.overdue_invoices,
        ]);
        StatusDonut {
            paid: shares[0].round(),
            pending: shares[1].round(),
            overdue: shares[2].round(),
        }
    }

    /// Revenue and expense bars, both scaled against the largest monthly value.
    pub fn monthly_bars(&self) -> (Vec<f64>, Vec<f64>) {
        let mut bars = calc::relative_bars(&[
            self.revenue_by_month.as_slice(),
            self.exp_by_month.as_slice(),
        ]);
        let expenses = bars.pop().unwrap_or_default();
        let revenue = bars.pop().unwrap_or_default();
        (revenue, expenses)
    }

    /// Growth label with its sign, e.g. `+12%` / `-4%`.
    pub fn growth_label(&self) -> String {
        let sign = if self.revenue_growth >= Decimal::ZERO {
            "+"
        } else {
            "-"
        };
        format!("{}{}%", sign, self.revenue_growth.abs().normalize())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusBucket {
    #[serde(rename = "_id", deserialize_with = "nullable::or_default")]
    pub status: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub count: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_amount: Decimal,
}

impl StatusBucket {
    pub fn parsed_status(&self) -> Option<InvoiceStatus> {
        InvoiceStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopClient {
    #[serde(rename = "_id", deserialize_with = "nullable::or_default")]
    pub id: String,
    pub client: Option<Client>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_paid: Decimal,
}

impl MethodBucket {
    pub fn label(&self) -> String {
        self.method
            .map(|m| m.to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    }
}

impl TopClient {
    pub fn name(&self) -> &str {
        self.client
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodBucket {
    /// `None` when the server groups payments that carry no method.
    #[serde(rename = "_id", default)]
    pub method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSummary {
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_revenue: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_expenses: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub net_profit: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub revenue_by_month: Vec<Decimal>,
    #[serde(alias = "expByMonth", deserialize_with = "nullable::or_default")]
    pub expense_by_month: Vec<Decimal>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub status_breakdown: Vec<StatusBucket>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub top_clients: Vec<TopClient>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub payment_methods: Vec<MethodBucket>,
}

impl ReportSummary {
    /// `net / revenue * 100`, zero when there is no revenue.
    pub fn profit_margin(&self) -> f64 {
        if self.total_revenue <= Decimal::ZERO {
            return 0.0;
        }
        calc::percent_of(self.net_profit, self.total_revenue)
    }

    pub fn invoice_count(&self) -> u64 {
        self.status_breakdown.iter().map(|s| s.count).sum()
    }

    /// Share of invoice count per status bucket, in breakdown order.
    pub fn status_shares(&self) -> Vec<f64> {
        let counts: Vec<u64> = self.status_breakdown.iter().map(|s| s.count).collect();
        calc::count_shares(&counts)
    }

    /// Top-client bar widths relative to the best client (floor 1).
    pub fn top_client_bars(&self) -> Vec<f64> {
        let paid: Vec<Decimal> = self.top_clients.iter().map(|c| c.total_paid).collect();
        calc::relative_bars(&[paid.as_slice()]).pop().unwrap_or_default()
    }

    /// Share of collected money per payment method.
    pub fn method_shares(&self) -> Vec<f64> {
        let totals: Vec<Decimal> = self.payment_methods.iter().map(|m| m.total).collect();
        calc::amount_shares(&totals)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientStats {
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_invoices: u64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_paid: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub outstanding: Decimal,
}

/// `GET /clients/{id}`: the client plus its invoices and lifetime stats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub stats: ClientStats,
}

/// `GET /invoices/{id}`: the invoice plus payments recorded against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub payments: Vec<Payment>,
}

impl InvoiceDetail {
    pub fn paid_progress(&self) -> f64 {
        calc::paid_progress(self.invoice.amount_paid, self.invoice.total_amount)
    }
}

/// Serialized by the status-change call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusChange {
    pub status: InvoiceStatus,
}
