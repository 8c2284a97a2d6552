//! PagerDuty generic events API 渠道

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::post_json;
use crate::error::Result;
use crate::notification::channel::PagingSink;
use crate::notification::message::{Incident, IncidentDetails};

/// `client` field reported to PagerDuty
pub const PAGERDUTY_CLIENT: &str = "AWS Event Processor";

/// PagerDuty trigger request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerdutyIncidentRequest {
    pub service_key: String,
    pub event_type: String,
    pub description: String,
    pub incident_key: String,
    pub client: String,
    pub details: IncidentDetails,
}

impl PagerdutyIncidentRequest {
    pub fn trigger(service_key: &str, incident: &Incident) -> Self {
        Self {
            service_key: service_key.to_string(),
            event_type: "trigger".to_string(),
            description: incident.description.clone(),
            incident_key: incident.incident_key.clone(),
            client: PAGERDUTY_CLIENT.to_string(),
            details: incident.details.clone(),
        }
    }
}

/// PagerDuty 渠道
pub struct PagerdutyChannel {
    client: reqwest::blocking::Client,
    service_key: String,
    url: String,
}

impl PagerdutyChannel {
    pub fn new(service_key: impl Into<String>, url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self {
            client,
            service_key: service_key.into(),
            url: url.into(),
        })
    }
}

impl PagingSink for PagerdutyChannel {
    fn name(&self) -> &str {
        "pagerduty"
    }

    fn trigger_incident(&self, incident: &Incident) -> Result<()> {
        info!(
            channel = "pagerduty",
            incident_key = %incident.incident_key,
            "Triggering Pagerduty incident..."
        );

        let request = PagerdutyIncidentRequest::trigger(&self.service_key, incident);
        post_json(&self.client, "pagerduty", &self.url, &request)?;

        info!(channel = "pagerduty", "Pagerduty incident triggered");
        Ok(())
    }
}
