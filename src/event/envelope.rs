//! 通用信封 - 只用于判断 payload 形状

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ensure_object;
use crate::error::{Result, RoutingError};

/// `EventSource` tag of SNS-delivered records
pub const SNS_EVENT_SOURCE: &str = "aws:sns";

/// Permissive view of any inbound payload
#[derive(Debug, Default, Deserialize)]
pub struct GenericEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "detail-type", default)]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Which classifier a payload goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    /// Non-empty record list delivered by SNS
    SnsRecords,
    /// Non-empty record list from any other source; dropped
    ForeignRecords { event_source: String },
    /// No records: a direct CloudWatch event
    CloudwatchEvent,
}

impl GenericEnvelope {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        ensure_object(raw).map_err(RoutingError::MalformedPayload)?;
        serde_json::from_slice(raw).map_err(|e| RoutingError::MalformedPayload(e.to_string()))
    }

    /// Only the first record's tag is inspected.
    pub fn kind(&self) -> PayloadKind {
        match self.records.as_deref() {
            Some([first, ..]) => match first.get("EventSource").and_then(Value::as_str) {
                Some(SNS_EVENT_SOURCE) => PayloadKind::SnsRecords,
                other => PayloadKind::ForeignRecords {
                    event_source: other.unwrap_or_default().to_string(),
                },
            },
            _ => PayloadKind::CloudwatchEvent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(raw: &str) -> PayloadKind {
        GenericEnvelope::parse(raw.as_bytes()).unwrap().kind()
    }

    #[test]
    fn test_sns_records() {
        assert_eq!(
            kind_of(r#"{"Records":[{"EventSource":"aws:sns","Sns":{}}]}"#),
            PayloadKind::SnsRecords
        );
    }

    #[test]
    fn test_foreign_records() {
        assert_eq!(
            kind_of(r#"{"Records":[{"eventSource":"aws:sqs"}]}"#),
            PayloadKind::ForeignRecords { event_source: String::new() }
        );
        assert_eq!(
            kind_of(r#"{"Records":[{"EventSource":"aws:s3"}]}"#),
            PayloadKind::ForeignRecords { event_source: "aws:s3".to_string() }
        );
    }

    #[test]
    fn test_empty_or_missing_records_is_cloudwatch_event() {
        assert_eq!(kind_of(r#"{"Records":[]}"#), PayloadKind::CloudwatchEvent);
        assert_eq!(kind_of(r#"{"Records":null,"source":"aws.ec2"}"#), PayloadKind::CloudwatchEvent);
        assert_eq!(kind_of(r#"{"source":"aws.ec2","detail-type":"x","id":"1"}"#), PayloadKind::CloudwatchEvent);
        assert_eq!(kind_of("{}"), PayloadKind::CloudwatchEvent);
    }

    #[test]
    fn test_malformed_json() {
        let err = GenericEnvelope::parse(b"{not json").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedPayload(_)));
        assert!(err.to_string().starts_with("unsupported payload:"));
    }

    #[test]
    fn test_records_must_be_objects() {
        assert!(matches!(
            GenericEnvelope::parse(br#"{"Records":[1,2]}"#),
            Err(RoutingError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        assert!(matches!(
            GenericEnvelope::parse(b"[]"),
            Err(RoutingError::MalformedPayload(_))
        ));
        let nested = br#"[[{"EventSource":"aws:sns","Sns":{"Subject":"x","Message":"y"}}]]"#;
        let err = GenericEnvelope::parse(nested).unwrap_err();
        assert_eq!(err.to_string(), "unsupported payload: expected a JSON object");
    }
}
