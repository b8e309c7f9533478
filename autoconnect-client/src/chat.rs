use async_trait::async_trait;
use autoconnect_core::{ApiError, ChatBackend, ChatReply, RawChatReply};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

use crate::endpoint;
use crate::http::{check_status, read_json, transport_error};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
    session_id: &'a str,
}

/// Chat backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    url: String,
}

impl HttpChatBackend {
    /// `base_url` is the chat service host; requests go to `{base_url}/chat/`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/", endpoint(base_url, "chat")),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    async fn ask(&self, question: &str, session_id: &str) -> Result<ChatReply, ApiError> {
        info!(endpoint = %self.url, session_id = %session_id, "step: chat request");

        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest {
                question,
                session_id,
            })
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response, &self.url).await?;

        let value: serde_json::Value = read_json(response).await?;
        let reply = ChatReply::from(RawChatReply::from_value(value));

        info!(kind = ?reply.kind(), "step: chat reply decoded");
        Ok(reply)
    }
}
