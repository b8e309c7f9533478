use async_trait::async_trait;
use autoconnect_core::{ApiError, CrawlBackend, CrawlReport};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

use crate::http::{check_status, read_json, transport_error};

#[derive(Debug, Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
}

/// Crawl service: `POST {url: root_url}` to the service root.
#[derive(Debug, Clone)]
pub struct HttpCrawlBackend {
    client: Client,
    url: String,
}

impl HttpCrawlBackend {
    pub fn new(service_url: &str) -> Self {
        Self::with_client(Client::new(), service_url)
    }

    pub fn with_client(client: Client, service_url: &str) -> Self {
        Self {
            client,
            url: service_url.to_string(),
        }
    }
}

#[async_trait]
impl CrawlBackend for HttpCrawlBackend {
    #[instrument(skip(self))]
    async fn crawl(&self, root_url: &str) -> Result<CrawlReport, ApiError> {
        info!(endpoint = %self.url, "step: crawl request");
        let response = self
            .client
            .post(&self.url)
            .json(&CrawlRequest { url: root_url })
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response, &self.url).await?;
        let report: CrawlReport = read_json(response).await?;
        info!(
            total_pages = report.total_pages,
            urls = report.urls().len(),
            "step: crawl finished"
        );
        Ok(report)
    }
}
