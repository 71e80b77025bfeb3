//! Infrastructure adapters. Implement outbound ports.
//!
//! REST backend, session file, export files, terminal UI. Map errors to DomainError.

pub mod export;
pub mod http;
pub mod persistence;
pub mod ui;
