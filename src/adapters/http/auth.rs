//! `/auth/*` endpoints.

use super::client::{ApiClient, NO_QUERY};
use crate::domain::aggregates::{AuthPayload, MessageBody, UserEnvelope};
use crate::domain::forms::{LoginForm, PasswordPayload, ProfilePatch, RegisterForm};
use crate::domain::{DomainError, User};
use crate::ports::AuthApi;
use tracing::info;

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, form: &LoginForm) -> Result<AuthPayload, DomainError> {
        let payload: AuthPayload = self.post_json("/auth/login", form).await?;
        info!(user_id = %payload.user.id, "signed in");
        Ok(payload)
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, DomainError> {
        let payload: AuthPayload = self.post_json("/auth/register", form).await?;
        info!(user_id = %payload.user.id, "account registered");
        Ok(payload)
    }

    async fn me(&self) -> Result<User, DomainError> {
        let env: UserEnvelope = self.get_json("/auth/me", NO_QUERY).await?;
        Ok(env.user)
    }

    async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, DomainError> {
        let env: UserEnvelope = self.put_json("/auth/profile", patch).await?;
        Ok(env.user)
    }

    async fn update_password(
        &self,
        payload: &PasswordPayload,
    ) -> Result<Option<String>, DomainError> {
        let body: MessageBody = self.put_json("/auth/password", payload).await?;
        Ok(body.message)
    }
}
