//! Dry-run 渠道 - 只记录日志，不实际发送

use tracing::info;

use super::pagerduty::PagerdutyIncidentRequest;
use super::slack::SlackMessage;
use crate::error::Result;
use crate::notification::channel::{ChatSink, PagingSink};
use crate::notification::message::{Incident, NotificationMessage};

/// Logs the request body each real channel would have sent.
#[derive(Debug, Default)]
pub struct DryRunChannel;

impl DryRunChannel {
    pub fn new() -> Self {
        Self
    }
}

impl ChatSink for DryRunChannel {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn send_message(&self, message: &NotificationMessage) -> Result<()> {
        let body = serde_json::to_string(&SlackMessage::from(message)).unwrap_or_default();
        info!(channel = "slack", body = %body, "[DRY-RUN] Would send Slack message");
        Ok(())
    }
}

impl PagingSink for DryRunChannel {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn trigger_incident(&self, incident: &Incident) -> Result<()> {
        let request = PagerdutyIncidentRequest::trigger("<service-key>", incident);
        let body = serde_json::to_string(&request).unwrap_or_default();
        info!(channel = "pagerduty", body = %body, "[DRY-RUN] Would trigger Pagerduty incident");
        Ok(())
    }
}
