//! 通知消息与 PagerDuty incident 定义

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::severity::Severity;

/// One labelled value in a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Narrow fields are laid out side by side
    pub short: bool,
}

impl Field {
    /// Full-width field
    pub fn wide(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }

    /// Half-width field
    pub fn narrow(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }
}

/// Sink-agnostic chat notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Fallback text shown where attachments are not rendered
    pub title: String,
    pub severity: Severity,
    /// Ordered fields
    pub fields: Vec<Field>,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            severity,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Informational message pairing a subject with raw text
    pub fn plain(subject: &str, text: &str) -> Self {
        Self::new(text, Severity::Info).with_field(Field::wide(subject, text))
    }
}

/// Paging incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub description: String,
    /// Dedup key; incidents sharing a key coalesce on the PagerDuty side
    pub incident_key: String,
    pub details: IncidentDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDetails {
    pub fields: BTreeMap<String, String>,
}

impl Incident {
    pub const KEY_PREFIX: &'static str = "incident";

    /// Build from ordered (name, value) pairs.
    ///
    /// The key is the prefix followed by every value in order, so alarms with
    /// the same ordered values map to one incident.
    pub fn from_pairs<'a, I>(description: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut incident_key = Self::KEY_PREFIX.to_string();
        let mut fields = BTreeMap::new();

        for (name, value) in pairs {
            incident_key.push_str(value);
            fields.insert(name.to_string(), value.to_string());
        }

        Self {
            description: description.into(),
            incident_key,
            details: IncidentDetails { fields },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder() {
        let msg = NotificationMessage::new("title", Severity::Warn)
            .with_field(Field::wide("a", "1"))
            .with_fields(vec![Field::narrow("b", "2"), Field::narrow("c", "3")]);

        assert_eq!(msg.title, "title");
        assert_eq!(msg.severity, Severity::Warn);
        let titles: Vec<&str> = msg.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert!(!msg.fields[0].short);
        assert!(msg.fields[1].short);
    }

    #[test]
    fn test_plain_message() {
        let msg = NotificationMessage::plain("TestInvoke", "Hello from SNS!");
        assert_eq!(msg.title, "Hello from SNS!");
        assert_eq!(msg.severity, Severity::Info);
        assert_eq!(msg.fields, vec![Field::wide("TestInvoke", "Hello from SNS!")]);
    }

    #[test]
    fn test_incident_key_concatenates_values() {
        let incident = Incident::from_pairs("desc", vec![("az", "us-east-1b"), ("db", "primary")]);
        assert_eq!(incident.incident_key, "incidentus-east-1bprimary");
        assert_eq!(incident.details.fields.get("az").map(String::as_str), Some("us-east-1b"));
        assert_eq!(incident.details.fields.get("db").map(String::as_str), Some("primary"));
    }

    #[test]
    fn test_incident_key_without_pairs() {
        let incident = Incident::from_pairs("desc", Vec::<(&str, &str)>::new());
        assert_eq!(incident.incident_key, "incident");
        assert!(incident.details.fields.is_empty());
    }

    #[test]
    fn test_incident_duplicate_names_keep_last_value() {
        let incident = Incident::from_pairs("desc", vec![("db", "a"), ("db", "b")]);
        assert_eq!(incident.incident_key, "incidentab");
        assert_eq!(incident.details.fields.len(), 1);
        assert_eq!(incident.details.fields["db"], "b");
    }
}
