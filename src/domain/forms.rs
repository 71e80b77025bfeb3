//! Form drafts and their client-side validation.
//!
//! Validation here is a UX convenience; the backend re-checks everything. A draft that fails
//! validation never reaches a port, so no network call is made.

use crate::domain::calc::{self, Totals};
use crate::domain::entities::{
    Business, Client, Expense, ExpenseCategory, InvoiceSettings, LineItem, NotificationPrefs,
    PaymentMethod, Product, ProductCategory, ProductType, RecordStatus,
};
use crate::domain::{DomainError, format};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("Email and password required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub business_name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(DomainError::validation("Name and email required"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation("Password min. 6 characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub gstin: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub notes: String,
    pub status: RecordStatus,
}

impl ClientForm {
    /// Trim free text and upper-case the GSTIN, then check required fields.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = self.name.trim().to_string();
        self.gstin = self.gstin.trim().to_uppercase();
        if self.name.is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        Ok(self)
    }
}

impl From<&Client> for ClientForm {
    fn from(c: &Client) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            company: c.company.clone(),
            gstin: c.gstin.clone(),
            address: c.address.clone(),
            city: c.city.clone(),
            state: c.state.clone(),
            notes: c.notes.clone(),
            status: c.status,
        }
    }
}

/// Editable line-item row. `rate` is `None` until the user enters one.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl LineItemDraft {
    pub fn blank(tax_rate: Decimal) -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            rate: None,
            tax_rate,
        }
    }

    /// Rows without a description or rate are dropped on submit.
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty() && self.rate.is_some()
    }

    fn to_line_item(&self) -> LineItem {
        LineItem {
            description: self.description.trim().to_string(),
            quantity: self.quantity,
            rate: self.rate.unwrap_or_default(),
            tax_rate: self.tax_rate,
            amount: None,
        }
    }
}

impl From<&Product> for LineItemDraft {
    fn from(p: &Product) -> Self {
        Self {
            description: p.name.clone(),
            quantity: Decimal::ONE,
            rate: Some(p.rate),
            tax_rate: p.tax_rate,
        }
    }
}

/// New-invoice form state.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub client: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub line_items: Vec<LineItemDraft>,
    default_tax_rate: Decimal,
}

/// Body sent to `POST /invoices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub line_items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Fresh draft seeded from the account's invoice settings.
    pub fn new(settings: &InvoiceSettings, today: NaiveDate) -> Self {
        let due_date = today.checked_add_days(chrono::Days::new(u64::from(settings.default_due_days)));
        Self {
            client: None,
            due_date,
            notes: settings.default_notes.clone(),
            line_items: vec![LineItemDraft::blank(settings.default_tax_rate)],
            default_tax_rate: settings.default_tax_rate,
        }
    }

    pub fn add_item(&mut self) {
        self.line_items
            .push(LineItemDraft::blank(self.default_tax_rate));
    }

    /// Remove row `index`. The last remaining row is kept; returns whether anything was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.line_items.len() <= 1 || index >= self.line_items.len() {
            return false;
        }
        self.line_items.remove(index);
        true
    }

    /// Live subtotal/tax across every row, complete or not.
    pub fn totals(&self) -> Totals {
        calc::line_totals(
            self.line_items
                .iter()
                .map(|it| (it.quantity, it.rate.unwrap_or_default(), it.tax_rate)),
        )
    }

    pub fn validate(&self, today: NaiveDate) -> Result<InvoicePayload, DomainError> {
        let client = self
            .client
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::validation("Select a client"))?;
        let line_items: Vec<LineItem> = self
            .line_items
            .iter()
            .filter(|it| it.is_complete())
            .map(LineItemDraft::to_line_item)
            .collect();
        if line_items.is_empty() {
            return Err(DomainError::validation("Add at least one item"));
        }
        if self.due_date.is_some_and(|d| d < today) {
            return Err(DomainError::validation("Due date cannot be in the past"));
        }
        Ok(InvoicePayload {
            client: client.to_string(),
            due_date: self.due_date,
            notes: self.notes.clone(),
            line_items,
        })
    }
}

/// Record-payment form state.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub invoice: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub reference_number: String,
    pub notes: String,
}

/// Body sent to `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub invoice: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub reference_number: String,
    pub notes: String,
}

impl PaymentDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice: None,
            amount: None,
            payment_date: today,
            payment_method: PaymentMethod::Upi,
            reference_number: String::new(),
            notes: String::new(),
        }
    }

    /// Draft pre-filled with the invoice's outstanding balance.
    pub fn for_invoice(invoice_id: &str, balance_due: Decimal, today: NaiveDate) -> Self {
        Self {
            invoice: Some(invoice_id.to_string()),
            amount: (balance_due > Decimal::ZERO).then_some(balance_due),
            ..Self::new(today)
        }
    }

    /// Validation used from an invoice's detail view, where the balance due is known.
    pub fn validate_against(
        &self,
        balance_due: Decimal,
        currency: &str,
    ) -> Result<PaymentPayload, DomainError> {
        let amount = self
            .amount
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| DomainError::validation("Enter amount"))?;
        if amount > balance_due {
            return Err(DomainError::validation(format!(
                "Max payable is {}",
                format::money_with(currency, balance_due)
            )));
        }
        let invoice = self
            .invoice
            .clone()
            .ok_or_else(|| DomainError::validation("Select an invoice"))?;
        Ok(self.payload(invoice, amount))
    }

    /// Validation used from the payments list, where the invoice is picked in the form.
    pub fn validate(&self) -> Result<PaymentPayload, DomainError> {
        match (
            self.invoice.as_deref().filter(|i| !i.is_empty()),
            self.amount.filter(|a| *a > Decimal::ZERO),
        ) {
            (Some(invoice), Some(amount)) => Ok(self.payload(invoice.to_string(), amount)),
            _ => Err(DomainError::validation("Select invoice and enter amount")),
        }
    }

    fn payload(&self, invoice: String, amount: Decimal) -> PaymentPayload {
        PaymentPayload {
            invoice,
            amount,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            reference_number: self.reference_number.trim().to_string(),
            notes: self.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductType,
    pub category: ProductCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    pub unit: String,
    pub tax_rate: Decimal,
    pub sku: String,
    pub description: String,
    pub status: RecordStatus,
    pub track_stock: bool,
    pub stock: i64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::from(&Product::default())
    }
}

impl From<&Product> for ProductForm {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            kind: p.kind,
            category: p.category,
            rate: (!p.id.is_empty() || !p.rate.is_zero()).then_some(p.rate),
            unit: p.unit.clone(),
            tax_rate: p.tax_rate,
            sku: p.sku.clone(),
            description: p.description.clone(),
            status: p.status,
            track_stock: p.track_stock,
            stock: p.stock,
        }
    }
}

impl ProductForm {
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() || self.rate.is_none() {
            return Err(DomainError::validation("Name and rate required"));
        }
        if self.unit.trim().is_empty() {
            self.unit = "unit".to_string();
        }
        if !self.track_stock {
            self.stock = 0;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    pub title: String,
    pub category: ExpenseCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub vendor: String,
    pub notes: String,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            category: ExpenseCategory::Office,
            amount: None,
            date: today,
            payment_method: PaymentMethod::Cash,
            vendor: String::new(),
            notes: String::new(),
        }
    }

    pub fn from_expense(e: &Expense, today: NaiveDate) -> Self {
        Self {
            title: e.title.clone(),
            category: e.category,
            amount: Some(e.amount),
            date: e.date.map(|d| d.date_naive()).unwrap_or(today),
            payment_method: e.payment_method,
            vendor: e.vendor.clone(),
            notes: e.notes.clone(),
        }
    }

    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.title = self.title.trim().to_string();
        let has_amount = self.amount.is_some_and(|a| a > Decimal::ZERO);
        if self.title.is_empty() || !has_amount {
            return Err(DomainError::validation("Title and amount required"));
        }
        Ok(self)
    }
}

/// Partial account update for `PUT /auth/profile`. Only the populated section is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_settings: Option<InvoiceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPrefs>,
}

impl ProfilePatch {
    pub fn profile(name: String, email: String, phone: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(DomainError::validation("Name and email required"));
        }
        Ok(Self {
            name: Some(name.trim().to_string()),
            email: Some(email.trim().to_string()),
            phone: Some(phone.trim().to_string()),
            ..Self::default()
        })
    }

    pub fn business(mut business: Business) -> Self {
        business.gstin = business.gstin.trim().to_uppercase();
        Self {
            business: Some(business),
            ..Self::default()
        }
    }

    pub fn invoice_settings(settings: InvoiceSettings) -> Result<Self, DomainError> {
        if settings.prefix.trim().is_empty() {
            return Err(DomainError::validation("Invoice prefix required"));
        }
        if settings.default_tax_rate < Decimal::ZERO {
            return Err(DomainError::validation("Tax rate cannot be negative"));
        }
        Ok(Self {
            invoice_settings: Some(settings),
            ..Self::default()
        })
    }

    pub fn notifications(prefs: NotificationPrefs) -> Self {
        Self {
            notifications: Some(prefs),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body sent to `PUT /auth/password`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPayload {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<PasswordPayload, DomainError> {
        if self.current_password.is_empty() {
            return Err(DomainError::validation("Enter current password"));
        }
        if self.new_password != self.confirm_password {
            return Err(DomainError::validation("Passwords do not match"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation("Min. 6 characters"));
        }
        Ok(PasswordPayload {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}
