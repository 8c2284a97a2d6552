//! SNS 记录与 CloudWatch Alarm 类型
//!
//! Example record list:
//! ```json
//! {"Records":[{"EventSource":"aws:sns","EventVersion":"1.0","Sns":{
//!   "Subject":"ALARM: \"db-cpu\" in US East (N. Virginia)",
//!   "Message":"{\"AlarmName\":\"db-cpu\",\"NewStateValue\":\"ALARM\",...}",
//!   "MessageAttributes":{"Test":{"Type":"String","Value":"TestString"}}}}]}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ensure_object, null_as_default};
use crate::error::{Result, RoutingError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsRecordList {
    #[serde(rename = "Records", default, deserialize_with = "null_as_default")]
    pub records: Vec<SnsRecord>,
}

impl SnsRecordList {
    /// Strict decode of the whole payload.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        ensure_object(raw).map_err(|e| RoutingError::decode("could not unmarshal SNS record list", e))?;
        serde_json::from_slice(raw)
            .map_err(|e| RoutingError::decode("could not unmarshal SNS record list", e))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnsRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_subscription_arn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_source: String,
    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnsMessage {
    #[serde(deserialize_with = "null_as_default")]
    pub signature_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(rename = "SigningCertUrl", deserialize_with = "null_as_default")]
    pub signing_cert_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message_attributes: HashMap<String, SnsMessageAttribute>,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub message_type: String,
    #[serde(rename = "UnsubscribeUrl", deserialize_with = "null_as_default")]
    pub unsubscribe_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub topic_arn: String,
    /// Absent or null when published without a subject
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnsMessageAttribute {
    #[serde(rename = "Type")]
    pub attribute_type: String,
    pub value: String,
}

/// CloudWatch alarm state change, JSON-encoded inside `SnsMessage::message`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CloudwatchAlarm {
    #[serde(deserialize_with = "null_as_default")]
    pub alarm_name: String,
    pub alarm_description: Option<String>,
    #[serde(rename = "AWSAccountId", deserialize_with = "null_as_default")]
    pub aws_account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub new_state_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub new_state_reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_change_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub old_state_value: String,
    pub trigger: AlarmTrigger,
}

impl CloudwatchAlarm {
    pub fn parse(message: &str) -> Result<Self> {
        ensure_object(message.as_bytes())
            .map_err(|e| RoutingError::decode("could not unmarshal Cloudwatch Alarm payload", e))?;
        serde_json::from_str(message)
            .map_err(|e| RoutingError::decode("could not unmarshal Cloudwatch Alarm payload", e))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmTrigger {
    #[serde(deserialize_with = "null_as_default")]
    pub metric_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Null for percentile alarms, which set `ExtendedStatistic` instead
    pub statistic: Option<String>,
    pub unit: Option<String>,
    /// Order is preserved into the Slack fields and the incident key
    #[serde(deserialize_with = "null_as_default")]
    pub dimensions: Vec<AlarmDimension>,
    #[serde(deserialize_with = "null_as_default")]
    pub period: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub evaluation_periods: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub comparison_operator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub threshold: f64,
}

/// CloudWatch sends lowercase keys here, unlike the rest of the alarm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmDimension {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Value", default)]
    pub value: String,
}
