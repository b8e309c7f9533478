//! # autoconnect-client
//!
//! reqwest implementations of the backend traits from autoconnect-core:
//!
//! - [`HttpChatBackend`]: `POST {chat}/chat/` with `{question, session_id}`
//! - [`HttpInventoryBackend`]: `GET {inventory}/models`
//! - [`HttpLeadBackend`]: `POST {inventory}/saveInterest` with `{name, email, car}`
//! - [`HttpCrawlBackend`]: `POST {crawl}` with `{url}`
//!
//! Endpoints come from [`ServiceConfig`] (environment, with the production hosts as defaults).
//! No timeout or retry is configured; a request resolves, fails, or stays pending.

mod chat;
pub mod config;
mod crawl;
mod http;
mod inventory;

pub use chat::HttpChatBackend;
pub use config::ServiceConfig;
pub use crawl::HttpCrawlBackend;
pub use inventory::{HttpInventoryBackend, HttpLeadBackend};

/// Joins a base URL and a path with exactly one slash between them.
pub fn endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}
