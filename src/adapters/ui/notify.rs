//! One-line toasts printed between prompts.

use crate::domain::DomainError;
use crossterm::style::Stylize;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn error(msg: &str) {
    println!("{} {}", "✗".red().bold(), msg.red());
}

pub fn info(msg: &str) {
    println!("{} {}", "•".dark_grey(), msg.dark_grey());
}

/// Show a failure toast, unless the session expired: that is handed back to the menu loop.
pub fn failure(err: DomainError, fallback: &str) -> Result<(), DomainError> {
    if err.is_unauthorized() {
        return Err(err);
    }
    error(&err.notice_or(fallback));
    Ok(())
}

/// Toast text for a rejected sign-in. A bare 401 there means bad credentials, not an expired
/// session; a server reason such as a disabled account is shown as sent.
pub fn sign_in_failure(err: &DomainError) -> String {
    match err.server_message() {
        Some(m) => m.to_string(),
        None if err.is_unauthorized() => "Invalid credentials".to_string(),
        None => err.notice_or("Invalid credentials"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_passes_unauthorized_through() {
        assert!(failure(DomainError::session_expired(), "x").is_err());
        assert!(failure(DomainError::Transport("reset".into()), "Load failed").is_ok());
    }

    #[test]
    fn test_sign_in_failure_text() {
        assert_eq!(
            sign_in_failure(&DomainError::session_expired()),
            "Invalid credentials"
        );
        assert_eq!(
            sign_in_failure(&DomainError::Unauthorized("Account disabled".into())),
            "Account disabled"
        );
        assert_eq!(
            sign_in_failure(&DomainError::validation("Email is required")),
            "Email is required"
        );
        assert_eq!(
            sign_in_failure(&DomainError::Transport("refused".into())),
            "Invalid credentials"
        );
    }
}
