//! In-memory fakes of the outbound ports for use-case tests.

use crate::domain::aggregates::{AuthPayload, ClientDetail, DashboardStats, InvoiceDetail, Page};
use crate::domain::forms::{
    ClientForm, ExpenseForm, InvoicePayload, LoginForm, PasswordPayload, PaymentPayload,
    ProductForm, ProfilePatch, RegisterForm,
};
use crate::domain::{
    Client, DomainError, Expense, Invoice, InvoiceStatus, Payment, Product, ReportSummary, User,
};
use crate::ports::{
    AuthApi, ClientsApi, CredentialStore, ExpenseQuery, ExpensesApi, ExportSink, InsightsApi,
    InvoiceQuery, InvoicesApi, ListQuery, PaymentQuery, PaymentsApi, ProductQuery, ProductsApi,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One fake standing in for the whole backend. Every port call is appended to `calls`.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<String>>,
    pub user: Mutex<Option<User>>,
    pub clients: Mutex<Vec<Client>>,
    pub invoices: Mutex<Vec<Invoice>>,
    pub payments: Mutex<Vec<Payment>>,
    pub products: Mutex<Vec<Product>>,
    pub expenses: Mutex<Vec<Expense>>,
    pub dashboard: Mutex<DashboardStats>,
    pub report: Mutex<ReportSummary>,
    /// When set, the next call fails with this error.
    pub fail_next: Mutex<Option<DomainError>>,
    pub last_invoice_query: Mutex<Option<InvoiceQuery>>,
    pub last_patch: Mutex<Option<ProfilePatch>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        let fake = Self::default();
        *fake.user.lock().unwrap() = Some(user);
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_with(&self, err: DomainError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn record(&self, call: &str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn current_user(&self) -> Result<User, DomainError> {
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(DomainError::session_expired)
    }
}

pub fn user(name: &str) -> User {
    User {
        id: "u1".into(),
        name: name.into(),
        email: "owner@example.in".into(),
        ..User::default()
    }
}

pub fn invoice(id: &str, status: InvoiceStatus) -> Invoice {
    let mut inv: Invoice =
        serde_json::from_value(serde_json::json!({ "_id": id, "status": status.as_str() }))
            .unwrap();
    inv.invoice_number = format!("INV-{}", id);
    inv
}

#[async_trait::async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, form: &LoginForm) -> Result<AuthPayload, DomainError> {
        self.record("auth.login")?;
        let user = self
            .current_user()
            .map_err(|_| DomainError::Unauthorized("Invalid credentials".into()))?;
        Ok(AuthPayload {
            token: format!("token-for-{}", form.email),
            user,
        })
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, DomainError> {
        self.record("auth.register")?;
        let user = User {
            id: "u-new".into(),
            name: form.name.clone(),
            email: form.email.clone(),
            ..User::default()
        };
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(AuthPayload {
            token: "token-new".into(),
            user,
        })
    }

    async fn me(&self) -> Result<User, DomainError> {
        self.record("auth.me")?;
        self.current_user()
    }

    async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, DomainError> {
        self.record("auth.update_profile")?;
        let mut user = self.current_user()?;
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            user.phone = phone.clone();
        }
        if let Some(b) = &patch.business {
            user.business = b.clone();
        }
        if let Some(s) = &patch.invoice_settings {
            user.invoice_settings = s.clone();
        }
        if let Some(n) = &patch.notifications {
            user.notifications = n.clone();
        }
        *self.user.lock().unwrap() = Some(user.clone());
        *self.last_patch.lock().unwrap() = Some(patch.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        _payload: &PasswordPayload,
    ) -> Result<Option<String>, DomainError> {
        self.record("auth.update_password")?;
        Ok(Some("Password updated".into()))
    }
}

#[async_trait::async_trait]
impl ClientsApi for FakeBackend {
    async fn list(&self, query: &ListQuery) -> Result<Page<Client>, DomainError> {
        self.record("clients.list")?;
        let needle = query.search.clone().unwrap_or_default().to_lowercase();
        let data: Vec<Client> = self
            .clients
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Page::new(data))
    }

    async fn get(&self, id: &str) -> Result<ClientDetail, DomainError> {
        self.record("clients.get")?;
        let client = self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))?;
        let invoices = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.client.as_ref().is_some_and(|c| c.id() == id))
            .cloned()
            .collect();
        Ok(ClientDetail {
            client,
            invoices,
            stats: Default::default(),
        })
    }

    async fn create(&self, form: &ClientForm) -> Result<Client, DomainError> {
        self.record("clients.create")?;
        let client = Client {
            id: format!("c{}", self.clients.lock().unwrap().len() + 1),
            name: form.name.clone(),
            gstin: form.gstin.clone(),
            ..Client::default()
        };
        self.clients.lock().unwrap().push(client.clone());
        Ok(client)
    }

    async fn update(&self, id: &str, form: &ClientForm) -> Result<Client, DomainError> {
        self.record("clients.update")?;
        let mut clients = self.clients.lock().unwrap();
        let c = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        c.name = form.name.clone();
        c.gstin = form.gstin.clone();
        Ok(c.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.record("clients.delete")?;
        self.clients.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl InvoicesApi for FakeBackend {
    async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, DomainError> {
        self.record("invoices.list")?;
        *self.last_invoice_query.lock().unwrap() = Some(query.clone());
        // Returns everything regardless of filter, like a backend that ignores the parameter.
        Ok(Page::new(self.invoices.lock().unwrap().clone()))
    }

    async fn get(&self, id: &str) -> Result<InvoiceDetail, DomainError> {
        self.record("invoices.get")?;
        let invoice = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))?;
        Ok(InvoiceDetail {
            invoice,
            payments: Vec::new(),
        })
    }

    async fn create(&self, payload: &InvoicePayload) -> Result<Invoice, DomainError> {
        self.record("invoices.create")?;
        let mut inv = invoice(
            &format!("{}", self.invoices.lock().unwrap().len() + 1),
            InvoiceStatus::Draft,
        );
        inv.client = Some(crate::domain::ClientRef::Id(payload.client.clone()));
        inv.line_items = payload.line_items.clone();
        self.invoices.lock().unwrap().push(inv.clone());
        Ok(inv)
    }

    async fn update(&self, id: &str, payload: &InvoicePayload) -> Result<Invoice, DomainError> {
        self.record("invoices.update")?;
        let mut invoices = self.invoices.lock().unwrap();
        let inv = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        inv.line_items = payload.line_items.clone();
        Ok(inv.clone())
    }

    async fn set_status(&self, id: &str, status: InvoiceStatus) -> Result<Invoice, DomainError> {
        self.record("invoices.set_status")?;
        let mut invoices = self.invoices.lock().unwrap();
        let inv = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        inv.status = status;
        Ok(inv.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.record("invoices.delete")?;
        self.invoices.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl PaymentsApi for FakeBackend {
    async fn list(&self, _query: &PaymentQuery) -> Result<Page<Payment>, DomainError> {
        self.record("payments.list")?;
        let data = self.payments.lock().unwrap().clone();
        let total_amount = data.iter().map(|p| p.amount).sum();
        Ok(Page {
            total: Some(data.len() as u64),
            total_amount: Some(total_amount),
            data,
        })
    }

    async fn create(&self, payload: &PaymentPayload) -> Result<Payment, DomainError> {
        self.record("payments.create")?;
        let payment: Payment = serde_json::from_value(serde_json::json!({
            "_id": format!("p{}", self.payments.lock().unwrap().len() + 1),
            "invoice": payload.invoice,
            "amount": payload.amount,
            "paymentMethod": payload.payment_method,
        }))
        .map_err(|e| DomainError::Transport(e.to_string()))?;
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.record("payments.delete")?;
        self.payments.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductsApi for FakeBackend {
    async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError> {
        self.record("products.list")?;
        let data = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| query.kind.is_none_or(|k| p.kind == k))
            .cloned()
            .collect();
        Ok(Page::new(data))
    }

    async fn create(&self, form: &ProductForm) -> Result<Product, DomainError> {
        self.record("products.create")?;
        let product = Product {
            id: format!("pr{}", self.products.lock().unwrap().len() + 1),
            name: form.name.clone(),
            kind: form.kind,
            rate: form.rate.unwrap_or_default(),
            ..Product::default()
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, form: &ProductForm) -> Result<Product, DomainError> {
        self.record("products.update")?;
        let mut products = self.products.lock().unwrap();
        let p = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        p.name = form.name.clone();
        Ok(p.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.record("products.delete")?;
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ExpensesApi for FakeBackend {
    async fn list(&self, _query: &ExpenseQuery) -> Result<Page<Expense>, DomainError> {
        self.record("expenses.list")?;
        let data = self.expenses.lock().unwrap().clone();
        let total_amount = data.iter().map(|e| e.amount).sum();
        Ok(Page {
            total: Some(data.len() as u64),
            total_amount: Some(total_amount),
            data,
        })
    }

    async fn create(&self, form: &ExpenseForm) -> Result<Expense, DomainError> {
        self.record("expenses.create")?;
        let expense: Expense = serde_json::from_value(serde_json::json!({
            "_id": format!("e{}", self.expenses.lock().unwrap().len() + 1),
            "title": form.title,
            "category": form.category,
            "amount": form.amount,
        }))
        .map_err(|e| DomainError::Transport(e.to_string()))?;
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(expense)
    }

    async fn update(&self, id: &str, form: &ExpenseForm) -> Result<Expense, DomainError> {
        self.record("expenses.update")?;
        let mut expenses = self.expenses.lock().unwrap();
        let e = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        e.title = form.title.clone();
        Ok(e.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.record("expenses.delete")?;
        self.expenses.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl InsightsApi for FakeBackend {
    async fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        self.record("dashboard.stats")?;
        Ok(self.dashboard.lock().unwrap().clone())
    }

    async fn report(&self, year: i32) -> Result<ReportSummary, DomainError> {
        self.record(&format!("reports.summary:{}", year))?;
        Ok(self.report.lock().unwrap().clone())
    }
}

/// Credential store kept in memory.
#[derive(Default)]
pub struct MemoryCredentials {
    pub token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentials {
    async fn token(&self) -> Result<Option<String>, DomainError> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn store(&self, token: &str) -> Result<(), DomainError> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

/// Export sink that keeps documents in memory.
pub struct MemorySink {
    root: PathBuf,
    pub written: Mutex<Vec<(String, String)>>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self {
            root: PathBuf::from("exports"),
            written: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ExportSink for MemorySink {
    async fn write(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        self.written
            .lock()
            .unwrap()
            .push((name.to_string(), contents.to_string()));
        Ok(self.root.join(name))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
