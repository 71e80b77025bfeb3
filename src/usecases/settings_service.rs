//! Account settings. Every successful save replaces the session's user with the server's copy.

use crate::domain::forms::{PasswordChange, ProfilePatch};
use crate::domain::{Business, DomainError, InvoiceSettings, NotificationKey, User};
use crate::ports::AuthApi;
use crate::usecases::SessionService;
use std::sync::Arc;
use tracing::info;

pub struct SettingsService {
    auth: Arc<dyn AuthApi>,
    session: Arc<SessionService>,
}

impl SettingsService {
    pub fn new(auth: Arc<dyn AuthApi>, session: Arc<SessionService>) -> Self {
        Self { auth, session }
    }

    pub async fn save_profile(
        &self,
        name: String,
        email: String,
        phone: String,
    ) -> Result<User, DomainError> {
        let patch = ProfilePatch::profile(name, email, phone)?;
        self.apply(&patch, "profile").await
    }

    pub async fn save_business(&self, business: Business) -> Result<User, DomainError> {
        self.apply(&ProfilePatch::business(business), "business")
            .await
    }

    pub async fn save_invoice_settings(
        &self,
        settings: InvoiceSettings,
    ) -> Result<User, DomainError> {
        let patch = ProfilePatch::invoice_settings(settings)?;
        self.apply(&patch, "invoice_settings").await
    }

    /// Flip one notification preference and persist the whole set.
    pub async fn toggle_notification(&self, key: NotificationKey) -> Result<User, DomainError> {
        let mut prefs = self
            .session
            .current_user()
            .await
            .ok_or_else(DomainError::session_expired)?
            .notifications;
        prefs.set(key, !prefs.get(key));
        self.apply(&ProfilePatch::notifications(prefs), "notifications")
            .await
    }

    /// Returns the server's confirmation message, if any.
    pub async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<Option<String>, DomainError> {
        let payload = change.validate()?;
        let message = self.auth.update_password(&payload).await?;
        info!("password changed");
        Ok(message)
    }

    async fn apply(&self, patch: &ProfilePatch, section: &str) -> Result<User, DomainError> {
        let user = self.auth.update_profile(patch).await?;
        self.session.update_user(user.clone()).await;
        info!(section, "settings saved");
        Ok(user)
    }
}
