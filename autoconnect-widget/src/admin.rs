//! Crawl admin panel: submit a root URL, show the crawl summary or the error.

use std::sync::Arc;

use autoconnect_core::{CrawlBackend, CrawlReport};
use tracing::{info, instrument, warn};

pub const URL_WARNING: &str = "Please give a URL to proceed further";
pub const MISSING_URL_ERROR: &str = "Please enter a Root URL";
pub const SUCCESS_BANNER: &str =
    "URL processed successfully and Stored to the s3 bucket as .zip file with metadata";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    Completed,
    Failed,
    /// Blank URL; no request was made.
    Blocked,
}

/// What the panel shows for a successful crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummaryView {
    pub banner: &'static str,
    pub stats: Vec<(&'static str, String)>,
    /// Processed URLs, in the order the crawler returned them. Rendered as links.
    pub links: Vec<String>,
}

impl From<&CrawlReport> for CrawlSummaryView {
    fn from(report: &CrawlReport) -> Self {
        Self {
            banner: SUCCESS_BANNER,
            stats: vec![
                ("Total Pages", report.total_pages.to_string()),
                ("Execution Time", report.execution_time.clone()),
                ("Time", report.time.clone()),
            ],
            links: report.urls().to_vec(),
        }
    }
}

pub struct CrawlPanel {
    backend: Arc<dyn CrawlBackend>,
    root_url: String,
    loading: bool,
    error: Option<String>,
    report: Option<CrawlReport>,
}

impl CrawlPanel {
    pub fn new(backend: Arc<dyn CrawlBackend>) -> Self {
        Self {
            backend,
            root_url: String::new(),
            loading: false,
            error: None,
            report: None,
        }
    }

    pub fn set_root_url(&mut self, url: impl Into<String>) {
        self.root_url = url.into();
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn report(&self) -> Option<&CrawlReport> {
        self.report.as_ref()
    }

    /// Inline warning under the input while no URL is entered.
    pub fn warning(&self) -> Option<&'static str> {
        if self.root_url.trim().is_empty() && !self.loading {
            Some(URL_WARNING)
        } else {
            None
        }
    }

    pub fn summary_view(&self) -> Option<CrawlSummaryView> {
        self.report.as_ref().map(CrawlSummaryView::from)
    }

    /// Submits the root URL once. A failed crawl keeps the previous summary on screen.
    #[instrument(skip(self), fields(root_url = %self.root_url))]
    pub async fn submit(&mut self) -> CrawlOutcome {
        self.error = None;
        let root_url = self.root_url.trim().to_string();
        if root_url.is_empty() {
            self.error = Some(MISSING_URL_ERROR.to_string());
            return CrawlOutcome::Blocked;
        }

        self.loading = true;
        let result = self.backend.crawl(&root_url).await;
        self.loading = false;

        match result {
            Ok(report) => {
                info!(total_pages = report.total_pages, "step: crawl completed");
                self.report = Some(report);
                CrawlOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "step: crawl failed");
                self.error = Some(e.user_message());
                CrawlOutcome::Failed
            }
        }
    }
}
