//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Form input rejected before any network call. The message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// Backend answered 401. The stored credential has already been cleared. Holds the server's
    /// reason, empty when it sent none.
    #[error("{}", or_session_expired(.0))]
    Unauthorized(String),

    /// Backend answered with a non-success status. `message` is the server's text, empty when it
    /// sent none.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    /// Backend answered 404.
    #[error("Not found: {path}")]
    NotFound { path: String, message: String },

    #[error("Credential store error: {0}")]
    Credentials(String),

    #[error("Export failed: {0}")]
    Export(String),

    /// Prompt cancelled or terminal unavailable.
    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Unauthorized with no server reason.
    pub fn session_expired() -> Self {
        Self::Unauthorized(String::new())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            message: String::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Server-supplied text, if any, for errors that carry one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(m)
            | Self::Api { message: m, .. }
            | Self::NotFound { message: m, .. }
                if !m.is_empty() =>
            {
                Some(m.as_str())
            }
            _ => None,
        }
    }

    /// Text for a transient notification. Server-supplied messages win; everything else
    /// falls back to `fallback`, mirroring how each page phrases its own failure.
    pub fn notice_or(&self, fallback: &str) -> String {
        match self {
            Self::Validation(m) => m.clone(),
            Self::Unauthorized(_) => self.to_string(),
            _ => self
                .server_message()
                .map_or_else(|| fallback.to_string(), str::to_string),
        }
    }
}

fn or_session_expired(message: &str) -> &str {
    if message.is_empty() {
        "Session expired. Please sign in again."
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_prefers_server_message() {
        let err = DomainError::Api {
            status: 400,
            message: "Client has invoices".into(),
        };
        assert_eq!(err.notice_or("Delete failed"), "Client has invoices");
    }

    #[test]
    fn test_notice_falls_back_for_transport() {
        let err = DomainError::Transport("timed out".into());
        assert_eq!(err.notice_or("Failed to load"), "Failed to load");
    }

    #[test]
    fn test_notice_empty_server_message_uses_fallback() {
        let err = DomainError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.notice_or("Error"), "Error");
    }

    #[test]
    fn test_unauthorized_shows_server_reason() {
        let err = DomainError::Unauthorized("Account disabled".into());
        assert_eq!(err.to_string(), "Account disabled");
        assert_eq!(err.notice_or("Invalid credentials"), "Account disabled");
        assert_eq!(err.server_message(), Some("Account disabled"));

        let expired = DomainError::session_expired();
        assert!(expired.is_unauthorized());
        assert_eq!(expired.to_string(), "Session expired. Please sign in again.");
        assert_eq!(expired.server_message(), None);
    }

    #[test]
    fn test_not_found_notice() {
        let bare = DomainError::not_found("invoices/x1");
        assert_eq!(bare.to_string(), "Not found: invoices/x1");
        assert_eq!(bare.notice_or("Failed to load"), "Failed to load");

        let told = DomainError::NotFound {
            path: "invoices/x1".into(),
            message: "Invoice not found".into(),
        };
        assert_eq!(told.notice_or("Failed to load"), "Invoice not found");
    }
}
