//! Service configuration: backend endpoints, typing delay and log file. Loaded from env.

use std::env;
use std::time::Duration;

use anyhow::Result;

pub const DEFAULT_CHAT_API_URL: &str = "https://interim-cab-module-api.ispgnet.com";
pub const DEFAULT_INVENTORY_API_URL: &str =
    "https://s3bebicvlnm3dn3clqktisk7he0sgwyp.lambda-url.us-east-1.on.aws";
pub const DEFAULT_CRAWL_API_URL: &str = "https://interim-cabdemo-module.com";
pub const DEFAULT_TYPING_DELAY_MS: u64 = 1000;
pub const DEFAULT_LOG_FILE: &str = "logs/autoconnect.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// CHAT_API_URL: host of the chat service (`/chat/` is appended)
    pub chat_api_url: String,
    /// INVENTORY_API_URL: host serving `/models` and `/saveInterest`
    pub inventory_api_url: String,
    /// CRAWL_API_URL: crawl service, posted to directly
    pub crawl_api_url: String,
    /// TYPING_DELAY_MS: minimum time the typing indicator stays up before a reply is shown
    pub typing_delay: Duration,
    /// LOG_FILE
    pub log_file: String,
    /// LOG_STDOUT: also echo logs to stdout
    pub log_stdout: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            chat_api_url: DEFAULT_CHAT_API_URL.to_string(),
            inventory_api_url: DEFAULT_INVENTORY_API_URL.to_string(),
            crawl_api_url: DEFAULT_CRAWL_API_URL.to_string(),
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_stdout: false,
        }
    }
}

impl ServiceConfig {
    /// Load from environment variables; unset values fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let chat_api_url =
            env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_CHAT_API_URL.to_string());
        let inventory_api_url = env::var("INVENTORY_API_URL")
            .unwrap_or_else(|_| DEFAULT_INVENTORY_API_URL.to_string());
        let crawl_api_url =
            env::var("CRAWL_API_URL").unwrap_or_else(|_| DEFAULT_CRAWL_API_URL.to_string());
        let typing_delay_ms = env::var("TYPING_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TYPING_DELAY_MS);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let log_stdout = env::var("LOG_STDOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        Ok(Self {
            chat_api_url,
            inventory_api_url,
            crawl_api_url,
            typing_delay: Duration::from_millis(typing_delay_ms),
            log_file,
            log_stdout,
        })
    }

    /// Every endpoint must be an absolute URL.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("CHAT_API_URL", &self.chat_api_url),
            ("INVENTORY_API_URL", &self.inventory_api_url),
            ("CRAWL_API_URL", &self.crawl_api_url),
        ] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is set but not a valid URL: {}", name, value);
            }
        }
        Ok(())
    }
}
