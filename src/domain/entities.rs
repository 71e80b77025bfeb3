//! Domain entities. Records as the billing backend returns them.
//!
//! No HTTP types here. Field names follow the backend's camelCase JSON; identifiers are the
//! backend's opaque `_id` strings.

use crate::domain::{dates, nullable};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account owner plus the business profile and preferences stored with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub email: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub phone: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub business: Business,
    #[serde(deserialize_with = "nullable::or_default")]
    pub invoice_settings: InvoiceSettings,
    #[serde(deserialize_with = "nullable::or_default")]
    pub notifications: NotificationPrefs,
}

impl User {
    /// First word of the name, or "User" when the name is blank.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("User")
    }

    /// Up to two upper-cased initials.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Name printed in the invoice "from" block.
    pub fn billing_name(&self) -> &str {
        if self.business.name.trim().is_empty() {
            &self.name
        } else {
            &self.business.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Business {
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub address: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub city: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub state: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub pincode: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub gstin: String,
}

/// Defaults applied to new invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceSettings {
    #[serde(deserialize_with = "nullable::or_default")]
    pub prefix: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub default_due_days: u32,
    #[serde(deserialize_with = "nullable::or_default")]
    pub default_tax_rate: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub default_notes: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub currency_symbol: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            prefix: "INV".to_string(),
            default_due_days: 30,
            default_tax_rate: Decimal::from(18),
            default_notes: String::new(),
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPrefs {
    #[serde(deserialize_with = "nullable::or_default")]
    pub invoice_sent: bool,
    #[serde(deserialize_with = "nullable::or_default")]
    pub payment_received: bool,
    #[serde(deserialize_with = "nullable::or_default")]
    pub invoice_overdue: bool,
    #[serde(deserialize_with = "nullable::or_default")]
    pub weekly_report: bool,
    #[serde(deserialize_with = "nullable::or_default")]
    pub monthly_report: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            invoice_sent: true,
            payment_received: true,
            invoice_overdue: true,
            weekly_report: false,
            monthly_report: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKey {
    InvoiceSent,
    PaymentReceived,
    InvoiceOverdue,
    WeeklyReport,
    MonthlyReport,
}

impl NotificationKey {
    pub const ALL: [NotificationKey; 5] = [
        NotificationKey::InvoiceSent,
        NotificationKey::PaymentReceived,
        NotificationKey::InvoiceOverdue,
        NotificationKey::WeeklyReport,
        NotificationKey::MonthlyReport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::InvoiceSent => "Invoice Sent",
            Self::PaymentReceived => "Payment Received",
            Self::InvoiceOverdue => "Invoice Overdue",
            Self::WeeklyReport => "Weekly Summary",
            Self::MonthlyReport => "Monthly Report",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::InvoiceSent => "When an invoice is sent to a client",
            Self::PaymentReceived => "When a payment is recorded on an invoice",
            Self::InvoiceOverdue => "When an invoice passes its due date",
            Self::WeeklyReport => "A weekly digest of your business activity",
            Self::MonthlyReport => "Detailed monthly financial report",
        }
    }
}

impl NotificationPrefs {
    pub fn get(&self, key: NotificationKey) -> bool {
        match key {
            NotificationKey::InvoiceSent => self.invoice_sent,
            NotificationKey::PaymentReceived => self.payment_received,
            NotificationKey::InvoiceOverdue => self.invoice_overdue,
            NotificationKey::WeeklyReport => self.weekly_report,
            NotificationKey::MonthlyReport => self.monthly_report,
        }
    }

    pub fn set(&mut self, key: NotificationKey, on: bool) {
        let slot = match key {
            NotificationKey::InvoiceSent => &mut self.invoice_sent,
            NotificationKey::PaymentReceived => &mut self.payment_received,
            NotificationKey::InvoiceOverdue => &mut self.invoice_overdue,
            NotificationKey::WeeklyReport => &mut self.weekly_report,
            NotificationKey::MonthlyReport => &mut self.monthly_report,
        };
        *slot = on;
    }
}

/// Active/inactive flag shared by clients and catalog entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Inactive];
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        })
    }
}

/// Billing party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    #[serde(rename = "_id", deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub email: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub phone: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub company: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub gstin: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub address: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub city: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub state: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub notes: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub status: RecordStatus,
    pub color: Option<String>,
}

impl Client {
    /// `Name · Company`, or just the name when no company is recorded.
    pub fn display_name(&self) -> String {
        if self.company.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} · {}", self.name, self.company)
        }
    }

    /// `City, State` with whichever parts are present.
    pub fn location(&self) -> Option<String> {
        match (self.city.trim(), self.state.trim()) {
            ("", "") => None,
            (city, "") => Some(city.to_string()),
            ("", state) => Some(state.to_string()),
            (city, state) => Some(format!("{}, {}", city, state)),
        }
    }
}

/// A client reference as it appears inside invoices and payments: populated or a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientRef {
    Populated(Box<Client>),
    Id(String),
}

impl ClientRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(c) => &c.id,
            Self::Id(id) => id,
        }
    }

    pub fn record(&self) -> Option<&Client> {
        match self {
            Self::Populated(c) => Some(c),
            Self::Id(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        self.record()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }
}

/// Invoice lifecycle status. Values this client does not know read as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Pending,
    Paid,
    Overdue,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        })
    }
}

/// Billable row on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    #[serde(deserialize_with = "nullable::or_default")]
    pub description: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub rate: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub tax_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            amount: None,
        }
    }
}

impl LineItem {
    /// Server-computed amount when present, else quantity × rate.
    pub fn line_amount(&self) -> Decimal {
        self.amount.unwrap_or(self.quantity * self.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id", default, deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub invoice_number: String,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub status: InvoiceStatus,
    #[serde(default, with = "dates::lenient")]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::lenient")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub tax_amount: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub discount_amount: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub total_amount: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub amount_paid: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub balance_due: Decimal,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub notes: String,
}

impl Invoice {
    pub fn client_name(&self) -> &str {
        self.client.as_ref().map(ClientRef::name).unwrap_or("Unknown")
    }
}

/// Payment channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    Neft,
    Rtgs,
    BankTransfer,
    Cheque,
    Cash,
    Card,
    #[default]
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// Methods offered when recording a payment against an invoice.
    pub const FOR_PAYMENTS: [PaymentMethod; 8] = [
        PaymentMethod::Upi,
        PaymentMethod::Neft,
        PaymentMethod::Rtgs,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cheque,
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Other,
    ];

    /// Methods offered when recording an expense.
    pub const FOR_EXPENSES: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::Neft,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cheque,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Neft => "neft",
            Self::Rtgs => "rtgs",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::domain::format::method_label(self.as_str()))
    }
}

/// An invoice reference inside a payment: populated or a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvoiceRef {
    Populated {
        #[serde(rename = "_id", default, deserialize_with = "nullable::or_default")]
        id: String,
        #[serde(
            rename = "invoiceNumber",
            default,
            deserialize_with = "nullable::or_default"
        )]
        invoice_number: String,
    },
    Id(String),
}

impl InvoiceRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated { id, .. } => id,
            Self::Id(id) => id,
        }
    }

    pub fn number(&self) -> Option<&str> {
        match self {
            Self::Populated { invoice_number, .. } if !invoice_number.is_empty() => {
                Some(invoice_number)
            }
            _ => None,
        }
    }
}

/// Amount applied against an invoice's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", default, deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(default)]
    pub invoice: Option<InvoiceRef>,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub amount: Decimal,
    #[serde(default, with = "dates::lenient")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub payment_method: PaymentMethod,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub reference_number: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub notes: String,
}

impl Payment {
    pub fn client_name(&self) -> &str {
        self.client.as_ref().map(ClientRef::name).unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Service,
    Product,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::Service, ProductType::Product];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Service => "Service",
            Self::Product => "Product",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Development,
    Design,
    Consulting,
    Marketing,
    Support,
    Infrastructure,
    #[default]
    #[serde(other)]
    General,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 7] = [
        ProductCategory::Development,
        ProductCategory::Design,
        ProductCategory::Consulting,
        ProductCategory::Marketing,
        ProductCategory::Support,
        ProductCategory::Infrastructure,
        ProductCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Design => "design",
            Self::Consulting => "consulting",
            Self::Marketing => "marketing",
            Self::Support => "support",
            Self::Infrastructure => "infrastructure",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry usable as line-item source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(rename = "_id", deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "nullable::or_default")]
    pub kind: ProductType,
    #[serde(deserialize_with = "nullable::or_default")]
    pub category: ProductCategory,
    #[serde(deserialize_with = "nullable::or_default")]
    pub rate: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub unit: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub tax_rate: Decimal,
    #[serde(deserialize_with = "nullable::or_default")]
    pub sku: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub description: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub status: RecordStatus,
    #[serde(deserialize_with = "nullable::or_default")]
    pub track_stock: bool,
    #[serde(deserialize_with = "nullable::or_default")]
    pub stock: i64,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: ProductType::Service,
            category: ProductCategory::General,
            rate: Decimal::ZERO,
            unit: "unit".to_string(),
            tax_rate: Decimal::from(18),
            sku: String::new(),
            description: String::new(),
            status: RecordStatus::Active,
            track_stock: false,
            stock: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    #[default]
    Office,
    Travel,
    Utilities,
    Marketing,
    Software,
    Hardware,
    Salaries,
    Taxes,
    #[serde(other)]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Office,
        ExpenseCategory::Travel,
        ExpenseCategory::Utilities,
        ExpenseCategory::Marketing,
        ExpenseCategory::Software,
        ExpenseCategory::Hardware,
        ExpenseCategory::Salaries,
        ExpenseCategory::Taxes,
        ExpenseCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::Travel => "travel",
            Self::Utilities => "utilities",
            Self::Marketing => "marketing",
            Self::Software => "software",
            Self::Hardware => "hardware",
            Self::Salaries => "salaries",
            Self::Taxes => "taxes",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::domain::format::capitalize(self.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id", default, deserialize_with = "nullable::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub category: ExpenseCategory,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub amount: Decimal,
    #[serde(default, with = "dates::lenient")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub payment_method: PaymentMethod,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub vendor: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub notes: String,
}
