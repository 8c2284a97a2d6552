//! Inbound payload types
//!
//! - `envelope`: permissive first pass that picks a classification path
//! - `sns`: SNS record list and the CloudWatch alarm embedded in `Message`
//! - `cloudwatch`: CloudWatch (EventBridge) events and their `detail` shapes

pub mod cloudwatch;
pub mod envelope;
pub mod sns;

pub use cloudwatch::{
    CloudwatchEvent, Ec2StateChangeDetail, InstanceActivityDetail, InstanceActivityPlacement,
    LifecycleActionDetail,
};
pub use envelope::{GenericEnvelope, PayloadKind, SNS_EVENT_SOURCE};
pub use sns::{AlarmDimension, AlarmTrigger, CloudwatchAlarm, SnsMessage, SnsMessageAttribute, SnsRecord, SnsRecordList};

use serde::{Deserialize, Deserializer};

/// AWS sends explicit `null` for unset strings and lists; treat it as the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Derived struct deserializers also accept a JSON array positionally; payloads must be objects.
pub(crate) fn ensure_object(raw: &[u8]) -> Result<(), String> {
    match raw.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | None => Ok(()),
        Some(_) => Err("expected a JSON object".to_string()),
    }
}
