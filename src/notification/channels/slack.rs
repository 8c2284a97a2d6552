//! Slack incoming-webhook 渠道
//!
//! Wire format:
//! ```json
//! {"attachments":[{"fallback":"...","color":"#DC143C","fields":[{"title":"...","value":"...","short":true}]}]}
//! ```

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::post_json;
use crate::error::{Result, RoutingError};
use crate::notification::channel::ChatSink;
use crate::notification::message::{Field, NotificationMessage};
use crate::notification::severity::Severity;

/// Slack webhook request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub fallback: String,
    pub color: String,
    pub fields: Vec<Field>,
}

impl From<&NotificationMessage> for SlackMessage {
    fn from(message: &NotificationMessage) -> Self {
        Self {
            attachments: vec![SlackAttachment {
                fallback: message.title.clone(),
                color: message.severity.color().to_string(),
                fields: message.fields.clone(),
            }],
        }
    }
}

impl TryFrom<SlackMessage> for NotificationMessage {
    type Error = RoutingError;

    /// Only single-attachment messages with a known color convert back.
    fn try_from(mut slack: SlackMessage) -> Result<Self> {
        if slack.attachments.len() != 1 {
            return Err(RoutingError::decode(
                "invalid Slack message",
                format!("expected 1 attachment, got {}", slack.attachments.len()),
            ));
        }
        let attachment = slack.attachments.remove(0);
        let severity = Severity::from_color(&attachment.color).ok_or_else(|| {
            RoutingError::decode("invalid Slack message", format!("unknown color {}", attachment.color))
        })?;

        Ok(NotificationMessage {
            title: attachment.fallback,
            severity,
            fields: attachment.fields,
        })
    }
}

/// Slack 渠道
pub struct SlackChannel {
    client: reqwest::blocking::Client,
    webhook: String,
}

impl SlackChannel {
    /// 创建 Slack 渠道
    pub fn new(webhook: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self {
            client,
            webhook: webhook.into(),
        })
    }
}

impl ChatSink for SlackChannel {
    fn name(&self) -> &str {
        "slack"
    }

    fn send_message(&self, message: &NotificationMessage) -> Result<()> {
        info!(channel = "slack", severity = %message.severity, "Sending Slack message...");

        post_json(&self.client, "slack", &self.webhook, &SlackMessage::from(message))?;

        info!(channel = "slack", "Slack message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NotificationMessage {
        NotificationMessage::new("Threshold Crossed", Severity::Error)
            .with_field(Field::wide("ALARM: \"db-cpu\" in US East", "Threshold Crossed"))
            .with_field(Field::narrow("az", "us-east-1b"))
            .with_field(Field::narrow("Namespace", "AWS/RDS"))
    }

    #[test]
    fn test_wire_format() {
        let value = serde_json::to_value(SlackMessage::from(&sample())).unwrap();
        assert_eq!(
            value,
            json!({
                "attachments": [{
                    "fallback": "Threshold Crossed",
                    "color": "#DC143C",
                    "fields": [
                        {"title": "ALARM: \"db-cpu\" in US East", "value": "Threshold Crossed", "short": false},
                        {"title": "az", "value": "us-east-1b", "short": true},
                        {"title": "Namespace", "value": "AWS/RDS", "short": true}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_round_trip_keeps_order_and_color() {
        let original = sample();
        let text = serde_json::to_string(&SlackMessage::from(&original)).unwrap();
        let decoded: SlackMessage = serde_json::from_str(&text).unwrap();
        let restored = NotificationMessage::try_from(decoded).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_try_from_rejects_unknown_color() {
        let slack = SlackMessage {
            attachments: vec![SlackAttachment {
                fallback: "x".to_string(),
                color: "#000000".to_string(),
                fields: vec![],
            }],
        };
        assert!(NotificationMessage::try_from(slack).unwrap_err().is_decode());
    }

    #[test]
    fn test_try_from_rejects_multiple_attachments() {
        let mut slack = SlackMessage::from(&sample());
        slack.attachments.push(slack.attachments[0].clone());
        assert!(NotificationMessage::try_from(slack).is_err());
    }

    #[test]
    fn test_send_to_unreachable_webhook_is_sink_error() {
        let channel = SlackChannel::new("http://127.0.0.1:1/services/hook").unwrap();
        let err = channel.send_message(&sample()).unwrap_err();
        assert!(err.is_sink());
        assert!(!err.to_string().contains("/services/hook"));
    }
}
