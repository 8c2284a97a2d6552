//! CloudWatch Event 类型
//!
//! Common headers are shared by every event; `detail` is kept as raw JSON and
//! decoded once the (source, detail-type) pair picks a schema.
//!
//! Example EC2 state change:
//! ```json
//! {"id":"7bf73129-1428-4cd3-a780-95db273d1602","detail-type":"EC2 Instance State-change Notification",
//!  "source":"aws.ec2","account":"123456789012","time":"2015-11-11T21:29:54Z","region":"us-east-1",
//!  "resources":["arn:aws:ec2:us-east-1:123456789012:instance/i-abcd1111"],
//!  "detail":{"instance-id":"i-abcd1111","state":"pending"}}
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

use super::{ensure_object, null_as_default};
use crate::error::{Result, RoutingError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CloudwatchEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "detail-type", deserialize_with = "null_as_default")]
    pub detail_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
    /// `None` only when the key is missing; an explicit `null` is kept as raw text
    #[serde(deserialize_with = "raw_detail")]
    pub detail: Option<Box<RawValue>>,
}

fn raw_detail<'de, D>(deserializer: D) -> std::result::Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

impl CloudwatchEvent {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        ensure_object(raw).map_err(|e| RoutingError::decode("unsupported Cloudwatch Event payload", e))?;
        serde_json::from_slice(raw)
            .map_err(|e| RoutingError::decode("unsupported Cloudwatch Event payload", e))
    }

    /// `detail` exactly as received; empty when absent.
    pub fn detail_text(&self) -> &str {
        self.detail.as_deref().map(RawValue::get).unwrap_or_default()
    }

    /// Strict decode of `detail`; an absent detail is an error, a `null` one decodes to defaults.
    pub fn decode_detail<T: DeserializeOwned + Default>(&self, context: &str) -> Result<T> {
        let text = self.detail_text();
        if text.trim() != "null" {
            ensure_object(text.as_bytes()).map_err(|e| RoutingError::decode(context, e))?;
        }
        serde_json::from_str::<Option<T>>(text)
            .map(Option::unwrap_or_default)
            .map_err(|e| RoutingError::decode(context, e))
    }
}

/// `aws.ec2` / `EC2 Instance State-change Notification`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ec2StateChangeDetail {
    #[serde(rename = "instance-id")]
    pub instance_id: String,
    pub state: String,
}

/// `aws.autoscaling` lifecycle hook actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LifecycleActionDetail {
    pub lifecycle_action_token: String,
    pub auto_scaling_group_name: String,
    pub lifecycle_hook_name: String,
    #[serde(rename = "EC2InstanceId")]
    pub ec2_instance_id: String,
    pub lifecycle_transition: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notification_metadata: String,
}

/// `aws.autoscaling` instance launch/terminate activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceActivityDetail {
    pub status_code: String,
    pub auto_scaling_group_name: String,
    pub activity_id: String,
    pub details: InstanceActivityPlacement,
    pub request_id: String,
    pub end_time: String,
    #[serde(rename = "EC2InstanceId")]
    pub ec2_instance_id: String,
    pub start_time: String,
    pub cause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceActivityPlacement {
    #[serde(rename = "Availability Zone")]
    pub availability_zone: String,
    #[serde(rename = "Subnet ID")]
    pub subnet_id: String,
}
