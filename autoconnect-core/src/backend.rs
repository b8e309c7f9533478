//! Backend abstractions. The widget and admin panel only see these traits; implementations map
//! to a transport (HTTP in autoconnect-client, in-memory fakes in tests).

use async_trait::async_trait;

use crate::error::Result;
use crate::reply::ChatReply;
use crate::types::{CrawlReport, InventoryCar, Lead};

/// Conversational backend (`POST /chat/`).
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Asks `question` in the conversation identified by `session_id`. The reply is already
    /// decoded into its rendering variant.
    async fn ask(&self, question: &str, session_id: &str) -> Result<ChatReply>;
}

/// Vehicle inventory (`GET /models`).
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    async fn list_models(&self) -> Result<Vec<InventoryCar>>;
}

/// Lead storage (`POST /saveInterest`).
#[async_trait]
pub trait LeadBackend: Send + Sync {
    async fn save_interest(&self, lead: &Lead) -> Result<()>;
}

/// Website crawler used by the admin panel (`POST /`).
#[async_trait]
pub trait CrawlBackend: Send + Sync {
    async fn crawl(&self, root_url: &str) -> Result<CrawlReport>;
}
