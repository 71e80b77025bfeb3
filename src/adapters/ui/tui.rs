//! Implements InputPort. Inquire-based sign-in and main menu.
//!
//! Every page runs until the user backs out with `Esc`. A 401 anywhere drops the session and
//! returns to the sign-in screen.

use super::notify;
use super::pages;
use super::progress::with_spinner;
use super::prompt::{self, Labeled};
use crate::domain::DomainError;
use crate::domain::forms::{LoginForm, RegisterForm};
use crate::ports::InputPort;
use crate::usecases::{
    ClientService, ExpenseService, ExportService, InsightService, InvoiceService, PaymentService,
    ProductService, SessionService, SettingsService,
};
use async_trait::async_trait;
use inquire::{Password, PasswordDisplayMode, Text};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Use cases the pages drive.
pub struct Services {
    pub session: Arc<SessionService>,
    pub clients: Arc<ClientService>,
    pub invoices: Arc<InvoiceService>,
    pub payments: Arc<PaymentService>,
    pub products: Arc<ProductService>,
    pub expenses: Arc<ExpenseService>,
    pub insights: Arc<InsightService>,
    pub settings: Arc<SettingsService>,
    pub exports: Arc<ExportService>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthChoice {
    SignIn,
    Register,
    Quit,
}

impl fmt::Display for AuthChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SignIn => "Sign in",
            Self::Register => "Create account",
            Self::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Dashboard,
    Invoices,
    Payments,
    Clients,
    Products,
    Expenses,
    Reports,
    Settings,
    SignOut,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 10] = [
        MenuItem::Dashboard,
        MenuItem::Invoices,
        MenuItem::Payments,
        MenuItem::Clients,
        MenuItem::Products,
        MenuItem::Expenses,
        MenuItem::Reports,
        MenuItem::Settings,
        MenuItem::SignOut,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dashboard => "Dashboard",
            Self::Invoices => "Invoices",
            Self::Payments => "Payments",
            Self::Clients => "Clients",
            Self::Products => "Products & services",
            Self::Expenses => "Expenses",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
            Self::SignOut => "Sign out",
            Self::Quit => "Quit",
        })
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    services: Services,
}

impl TuiInputPort {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    async fn sign_in(&self) -> Result<bool, DomainError> {
        let Some(email) = prompt::text("Email:", "")? else {
            return Ok(false);
        };
        let password = prompt::skippable(
            Password::new("Password:")
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt_skippable(),
        )?;
        let Some(password) = password else {
            return Ok(false);
        };
        let form = LoginForm {
            email: email.trim().to_string(),
            password,
        };
        match with_spinner("Signing in…", self.services.session.login(&form)).await {
            Ok(user) => {
                notify::success(&format!("Welcome back, {}", user.first_name()));
                Ok(true)
            }
            Err(e) => {
                notify::error(&notify::sign_in_failure(&e));
                Ok(false)
            }
        }
    }

    async fn register(&self) -> Result<bool, DomainError> {
        let Some(name) = prompt::text("Your name:", "")? else {
            return Ok(false);
        };
        let Some(email) = prompt::text("Email:", "")? else {
            return Ok(false);
        };
        let password = prompt::skippable(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .with_help_message("At least 6 characters")
                .prompt_skippable(),
        )?;
        let Some(password) = password else {
            return Ok(false);
        };
        let business = prompt::skippable(Text::new("Business name:").prompt_skippable())?
            .unwrap_or_default();
        let form = RegisterForm {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
            business_name: business.trim().to_string(),
        };
        match with_spinner("Creating account…", self.services.session.register(&form)).await {
            Ok(user) => {
                notify::success(&format!("Welcome, {}", user.first_name()));
                Ok(true)
            }
            Err(e) => {
                notify::error(&e.notice_or("Registration failed"));
                Ok(false)
            }
        }
    }

    async fn open(&self, item: MenuItem) -> Result<(), DomainError> {
        let s = &self.services;
        match item {
            MenuItem::Dashboard => pages::dashboard::run(s).await,
            MenuItem::Invoices => pages::invoices::run(s).await,
            MenuItem::Payments => pages::payments::run(s).await,
            MenuItem::Clients => pages::clients::run(s).await,
            MenuItem::Products => pages::products::run(s).await,
            MenuItem::Expenses => pages::expenses::run(s).await,
            MenuItem::Reports => pages::reports::run(s).await,
            MenuItem::Settings => pages::settings::run(s).await,
            MenuItem::SignOut | MenuItem::Quit => Ok(()),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run_auth(&self) -> Result<bool, DomainError> {
        let session = &self.services.session;
        if let Some(user) = with_spinner("Restoring session…", session.restore()).await? {
            notify::success(&format!("Signed in as {}", user.email));
            return Ok(true);
        }
        loop {
            let options = vec![AuthChoice::SignIn, AuthChoice::Register, AuthChoice::Quit];
            let done = match prompt::choose("Kanakku", options)? {
                Some(AuthChoice::SignIn) => self.sign_in().await?,
                Some(AuthChoice::Register) => self.register().await?,
                Some(AuthChoice::Quit) | None => return Ok(false),
            };
            if done {
                return Ok(true);
            }
        }
    }

    async fn run(&self) -> Result<(), DomainError> {
        loop {
            if !self.services.session.is_authenticated().await && !self.run_auth().await? {
                return Ok(());
            }
            let options = MenuItem::ALL
                .iter()
                .map(|m| Labeled::new(m.to_string(), *m))
                .collect();
            let item = prompt::pick("Menu", options)?.unwrap_or(MenuItem::Quit);
            match item {
                MenuItem::Quit => return Ok(()),
                MenuItem::SignOut => {
                    self.services.session.logout().await?;
                    notify::info("Signed out");
                }
                page => {
                    if let Err(e) = self.open(page).await {
                        if e.is_unauthorized() {
                            info!("session expired, returning to sign-in");
                            self.services.session.on_unauthorized().await;
                        }
                        notify::error(&e.to_string());
                    }
                }
            }
        }
    }
}
