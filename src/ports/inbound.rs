//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive front end drives the use cases through this.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Sign in (or register) until a session is established. Returns `false` if the user quit.
    async fn run_auth(&self) -> Result<bool, DomainError>;

    /// Main menu loop. Returns when the user quits; falls back to `run_auth` on 401.
    async fn run(&self) -> Result<(), DomainError>;
}
