use std::time::Duration;

use sprout_client::{Timeouts, DEFAULT_API_URL};
use sprout_core::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub timeouts: Timeouts,
    pub page_size: u32,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: u64| -> Duration {
            let ms = lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(default);
            Duration::from_millis(ms)
        };

        let api_url = lookup("SPROUT_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let access_token = lookup("SPROUT_ACCESS_TOKEN").filter(|v| !v.trim().is_empty());
        let page_size = lookup("SPROUT_PAGE_SIZE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let log_format = lookup("SPROUT_LOG_FORMAT").unwrap_or_else(|| "text".into());

        Self {
            api_url,
            access_token,
            timeouts: Timeouts {
                read: millis("SPROUT_READ_TIMEOUT_MS", 30_000),
                write: millis("SPROUT_WRITE_TIMEOUT_MS", 10_000),
                batch: millis("SPROUT_BATCH_TIMEOUT_MS", 30_000),
            },
            page_size,
            log_format,
        }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, access_token: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
        self
    }
}
