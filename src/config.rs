//! 运行配置 - 从进程环境读取凭据
//!
//! Variable names:
//! - `slack_webhook` (required): Slack incoming webhook URL
//! - `pagerduty_key` (required): PagerDuty service key
//! - `pagerduty_url` (optional): override for the PagerDuty events endpoint

use anyhow::{anyhow, Result};
use tracing::debug;

/// PagerDuty generic events API v1 endpoint
pub const PAGERDUTY_EVENTS_URL: &str =
    "https://events.pagerduty.com/generic/2010-04-15/create_event.json";

pub const SLACK_WEBHOOK_VAR: &str = "slack_webhook";
pub const PAGERDUTY_KEY_VAR: &str = "pagerduty_key";
pub const PAGERDUTY_URL_VAR: &str = "pagerduty_url";

/// Credentials and endpoints for one invocation.
#[derive(Clone)]
pub struct RouterConfig {
    /// Slack webhook URL
    pub slack_webhook: String,
    /// PagerDuty service key
    pub pagerduty_key: String,
    /// PagerDuty endpoint
    pub pagerduty_url: String,
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("slack_webhook", &"<redacted>")
            .field("pagerduty_key", &"<redacted>")
            .field("pagerduty_url", &self.pagerduty_url)
            .finish()
    }
}

impl RouterConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup; missing or empty required values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("could not read {} from environment", name))
        };

        let slack_webhook = required(SLACK_WEBHOOK_VAR)?;
        let pagerduty_key = required(PAGERDUTY_KEY_VAR)?;

        let pagerduty_url = match lookup(PAGERDUTY_URL_VAR).filter(|u| !u.is_empty()) {
            Some(url) => {
                debug!(url = %url, "Using PagerDuty endpoint override");
                url
            }
            None => PAGERDUTY_EVENTS_URL.to_string(),
        };

        Ok(Self {
            slack_webhook,
            pagerduty_key,
            pagerduty_url,
        })
    }
}
