//! REST/JSON backend adapter (reqwest).

mod auth;
mod catalog;
pub mod client;
mod records;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
