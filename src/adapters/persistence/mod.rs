//! Local persistence. Only the session credential is stored on disk.

pub mod credential_json;

pub use credential_json::CredentialJson;
