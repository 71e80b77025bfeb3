//! Session: the stored credential plus the signed-in user.
//!
//! Every protected page consults this. The HTTP layer clears the credential on a 401; the UI then
//! calls `on_unauthorized` to drop the user and return to the sign-in screen.

use crate::domain::forms::{LoginForm, RegisterForm};
use crate::domain::{DomainError, InvoiceSettings, User};
use crate::ports::{AuthApi, CredentialStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct SessionService {
    auth: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
    user: RwLock<Option<User>>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            auth,
            credentials,
            user: RwLock::new(None),
        }
    }

    /// Resume from the stored credential. Any failure leaves the session signed out.
    pub async fn restore(&self) -> Result<Option<User>, DomainError> {
        if self.credentials.token().await?.is_none() {
            return Ok(None);
        }
        match self.auth.me().await {
            Ok(user) => {
                info!(user_id = %user.id, "session restored");
                *self.user.write().await = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "stored credential rejected, signing out");
                self.credentials.clear().await?;
                *self.user.write().await = None;
                Ok(None)
            }
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<User, DomainError> {
        form.validate()?;
        let payload = self.auth.login(form).await?;
        self.credentials.store(&payload.token).await?;
        *self.user.write().await = Some(payload.user.clone());
        Ok(payload.user)
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<User, DomainError> {
        form.validate()?;
        let payload = self.auth.register(form).await?;
        self.credentials.store(&payload.token).await?;
        *self.user.write().await = Some(payload.user.clone());
        Ok(payload.user)
    }

    pub async fn logout(&self) -> Result<(), DomainError> {
        *self.user.write().await = None;
        self.credentials.clear().await?;
        info!("signed out");
        Ok(())
    }

    /// Replace the held user with the server's latest copy.
    pub async fn update_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    pub async fn on_unauthorized(&self) {
        *self.user.write().await = None;
    }

    /// Invoice defaults of the signed-in account, or the stock defaults.
    pub async fn invoice_settings(&self) -> InvoiceSettings {
        self.user
            .read()
            .await
            .as_ref()
            .map(|u| u.invoice_settings.clone())
            .unwrap_or_default()
    }

    pub async fn currency(&self) -> String {
        let symbol = self.invoice_settings().await.currency_symbol;
        if symbol.trim().is_empty() {
            crate::domain::format::DEFAULT_CURRENCY.to_string()
        } else {
            symbol
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FakeBackend, MemoryCredentials, user};

    fn service(backend: Arc<FakeBackend>, creds: Arc<MemoryCredentials>) -> SessionService {
        SessionService::new(backend, creds)
    }

    #[tokio::test]
    async fn test_restore_without_token_makes_no_call() {
        let backend = Arc::new(FakeBackend::with_user(user("Priya Nair")));
        let creds = Arc::new(MemoryCredentials::default());
        let session = service(backend.clone(), creds);

        assert_eq!(session.restore().await.unwrap(), None);
        assert!(backend.calls().is_empty());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_with_token() {
        let backend = Arc::new(FakeBackend::with_user(user("Priya Nair")));
        let creds = Arc::new(MemoryCredentials::with_token("t"));
        let session = service(backend.clone(), creds);

        let restored = session.restore().await.unwrap();
        assert_eq!(restored.map(|u| u.name), Some("Priya Nair".to_string()));
        assert_eq!(backend.calls(), vec!["auth.me"]);
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_failure_clears_token() {
        let backend = Arc::new(FakeBackend::new());
        let creds = Arc::new(MemoryCredentials::with_token("stale"));
        let session = service(backend, creds.clone());

        assert_eq!(session.restore().await.unwrap(), None);
        assert_eq!(creds.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let backend = Arc::new(FakeBackend::with_user(user("Priya Nair")));
        let creds = Arc::new(MemoryCredentials::default());
        let session = service(backend, creds.clone());

        let form = LoginForm {
            email: "p@x.in".into(),
            password: "secret1".into(),
        };
        let u = session.login(&form).await.unwrap();
        assert_eq!(u.first_name(), "Priya");
        assert_eq!(
            creds.token().await.unwrap().as_deref(),
            Some("token-for-p@x.in")
        );
    }

    #[tokio::test]
    async fn test_register_validation_skips_network() {
        let backend = Arc::new(FakeBackend::new());
        let session = service(backend.clone(), Arc::new(MemoryCredentials::default()));
        let form = RegisterForm {
            name: "Priya".into(),
            email: "p@x.in".into(),
            password: "123".into(),
            business_name: String::new(),
        };
        let err = session.register(&form).await.unwrap_err();
        assert_eq!(err.to_string(), "Password min. 6 characters");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_logout_and_unauthorized_drop_user() {
        let backend = Arc::new(FakeBackend::with_user(user("Priya Nair")));
        let creds = Arc::new(MemoryCredentials::with_token("t"));
        let session = service(backend, creds.clone());
        session.restore().await.unwrap();

        session.on_unauthorized().await;
        assert!(session.current_user().await.is_none());

        session.restore().await.unwrap();
        session.logout().await.unwrap();
        assert!(!session.is_authenticated().await);
        assert_eq!(creds.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_currency_defaults() {
        let session = service(
            Arc::new(FakeBackend::new()),
            Arc::new(MemoryCredentials::default()),
        );
        assert_eq!(session.currency().await, "₹");
        assert_eq!(session.invoice_settings().await.default_due_days, 30);
    }
}
