//! SNS 记录分类器
//!
//! Subjects are matched against `RECORD_RULES` in order; the first match wins
//! and anything unmatched is a plain message.

use tracing::{debug, info, warn};

use super::Router;
use crate::error::Result;
use crate::event::{CloudwatchAlarm, SnsRecord};
use crate::notification::{Field, Incident, NotificationMessage, Severity};

pub const ALARM_MARKER: &str = "ALARM:";
pub const OK_MARKER: &str = "OK:";
pub const RDS_MARKER: &str = "RDS Notification Message";

/// What an SNS record wraps, judged by its subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    CloudwatchAlarm,
    /// Same output as `PlainMessage` for now; kept apart so it can grow its own format
    RdsNotification,
    PlainMessage,
}

fn is_alarm_subject(subject: &str) -> bool {
    subject.contains(ALARM_MARKER) || subject.contains(OK_MARKER)
}

fn is_rds_subject(subject: &str) -> bool {
    subject.contains(RDS_MARKER)
}

const RECORD_RULES: &[(RecordKind, fn(&str) -> bool)] = &[
    (RecordKind::CloudwatchAlarm, is_alarm_subject),
    (RecordKind::RdsNotification, is_rds_subject),
];

pub fn classify_subject(subject: &str) -> RecordKind {
    RECORD_RULES
        .iter()
        .find(|(_, matches)| matches(subject))
        .map(|(kind, _)| *kind)
        .unwrap_or(RecordKind::PlainMessage)
}

/// Everything one record produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNotifications {
    pub message: NotificationMessage,
    /// Only set for alarms in ALARM state
    pub incident: Option<Incident>,
}

/// Slack message and, when failing, the incident for one alarm.
pub fn build_alarm_notifications(subject: &str, alarm: &CloudwatchAlarm) -> RecordNotifications {
    let is_failing = subject.contains(ALARM_MARKER);
    let reason = alarm.new_state_reason.as_str();
    let dimensions = &alarm.trigger.dimensions;

    let severity = if is_failing { Severity::Error } else { Severity::Success };

    let message = NotificationMessage::new(reason, severity)
        .with_field(Field::wide(subject, reason))
        .with_fields(dimensions.iter().map(|d| Field::narrow(&d.name, &d.value)))
        .with_field(Field::narrow("Namespace", &alarm.trigger.namespace))
        .with_field(Field::narrow("MetricName", &alarm.trigger.metric_name));

    let incident = is_failing.then(|| {
        Incident::from_pairs(
            format!("{}-{}", subject, reason),
            dimensions.iter().map(|d| (d.name.as_str(), d.value.as_str())),
        )
    });

    RecordNotifications { message, incident }
}

/// Classify and decode one record into what should be sent.
pub fn build_record_notifications(record: &SnsRecord) -> Result<RecordNotifications> {
    let subject = record.sns.subject.as_str();
    let text = record.sns.message.as_str();

    let notifications = match classify_subject(subject) {
        RecordKind::CloudwatchAlarm => {
            let alarm = CloudwatchAlarm::parse(text)?;
            build_alarm_notifications(subject, &alarm)
        }
        RecordKind::RdsNotification => RecordNotifications {
            message: NotificationMessage::plain(subject, text),
            incident: None,
        },
        RecordKind::PlainMessage => RecordNotifications {
            message: NotificationMessage::plain(subject, text),
            incident: None,
        },
    };

    Ok(notifications)
}

impl Router<'_> {
    /// Process records in order, stopping at the first failure.
    ///
    /// Records after a failed one are not attempted; anything already sent stays sent.
    pub fn process_records(&self, records: &[SnsRecord]) -> Result<()> {
        for (index, record) in records.iter().enumerate() {
            if let Err(e) = self.process_record(record) {
                warn!(
                    record = index,
                    remaining = records.len() - index - 1,
                    error = %e,
                    "could not process SNS record, aborting batch"
                );
                return Err(e.within("could not process SNS record"));
            }
        }

        Ok(())
    }

    pub fn process_record(&self, record: &SnsRecord) -> Result<()> {
        let kind = classify_subject(&record.sns.subject);
        info!(kind = ?kind, subject = %record.sns.subject, "Processing SNS record");

        let RecordNotifications { message, incident } = build_record_notifications(record)?;

        self.chat.send_message(&message)?;
        debug!(channel = self.chat.name(), "Sent SNS record message");

        if let Some(incident) = incident {
            self.pager.trigger_incident(&incident)?;
            info!(
                channel = self.pager.name(),
                incident_key = %incident.incident_key,
                "Triggered incident"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AlarmDimension, AlarmTrigger, SnsMessage};

    fn alarm(dimensions: &[(&str, &str)]) -> CloudwatchAlarm {
        CloudwatchAlarm {
            alarm_name: "db-cpu".to_string(),
            new_state_value: "ALARM".to_string(),
            new_state_reason: "Threshold Crossed".to_string(),
            trigger: AlarmTrigger {
                metric_name: "CPUUtilization".to_string(),
                namespace: "AWS/RDS".to_string(),
                dimensions: dimensions
                    .iter()
                    .map(|(n, v)| AlarmDimension { name: n.to_string(), value: v.to_string() })
                    .collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn record(subject: &str, message: &str) -> SnsRecord {
        SnsRecord {
            event_source: "aws:sns".to_string(),
            sns: SnsMessage {
                subject: subject.to_string(),
                message: message.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_subject_rules() {
        assert_eq!(classify_subject("ALARM: \"db-cpu\" in US East"), RecordKind::CloudwatchAlarm);
        assert_eq!(classify_subject("OK: \"db-cpu\" in US East"), RecordKind::CloudwatchAlarm);
        assert_eq!(classify_subject("RDS Notification Message"), RecordKind::RdsNotification);
        assert_eq!(classify_subject("TestInvoke"), RecordKind::PlainMessage);
        assert_eq!(classify_subject(""), RecordKind::PlainMessage);
    }

    #[test]
    fn test_alarm_marker_wins_over_rds_marker() {
        assert_eq!(
            classify_subject("ALARM: RDS Notification Message"),
            RecordKind::CloudwatchAlarm
        );
    }

    #[test]
    fn test_failing_alarm_fields_and_incident() {
        let subject = "ALARM: \"db-cpu\" in US East";
        let out = build_alarm_notifications(subject, &alarm(&[("az", "us-east-1b"), ("db", "primary")]));

        assert_eq!(out.message.severity, Severity::Error);
        assert_eq!(out.message.title, "Threshold Crossed");
        assert_eq!(
            out.message.fields,
            vec![
                Field::wide(subject, "Threshold Crossed"),
                Field::narrow("az", "us-east-1b"),
                Field::narrow("db", "primary"),
                Field::narrow("Namespace", "AWS/RDS"),
                Field::narrow("MetricName", "CPUUtilization"),
            ]
        );

        let incident = out.incident.unwrap();
        assert_eq!(incident.description, "ALARM: \"db-cpu\" in US East-Threshold Crossed");
        assert_eq!(incident.incident_key, "incidentus-east-1bprimary");
        assert_eq!(incident.details.fields.len(), 2);
        assert_eq!(incident.details.fields["az"], "us-east-1b");
        assert_eq!(incident.details.fields["db"], "primary");
    }

    #[test]
    fn test_ok_alarm_has_no_incident() {
        let out = build_alarm_notifications("OK: \"db-cpu\" in US East", &alarm(&[("az", "us-east-1b")]));
        assert_eq!(out.message.severity, Severity::Success);
        assert!(out.incident.is_none());
    }

    #[test]
    fn test_alarm_without_dimensions() {
        let out = build_alarm_notifications("ALARM: \"errors\"", &alarm(&[]));
        let titles: Vec<&str> = out.message.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["ALARM: \"errors\"", "Namespace", "MetricName"]);
        assert_eq!(out.incident.unwrap().incident_key, "incident");
    }

    #[test]
    fn test_rds_and_plain_records_are_equivalent() {
        let rds = build_record_notifications(&record("RDS Notification Message", "DB instance restarted")).unwrap();
        let plain = build_record_notifications(&record("Something else", "DB instance restarted")).unwrap();

        assert_eq!(rds.message.severity, Severity::Info);
        assert_eq!(rds.message.title, "DB instance restarted");
        assert_eq!(rds.message.fields, vec![Field::wide("RDS Notification Message", "DB instance restarted")]);
        assert!(rds.incident.is_none());

        assert_eq!(plain.message.severity, rds.message.severity);
        assert_eq!(plain.message.title, rds.message.title);
        assert_eq!(plain.message.fields.len(), 1);
        assert!(plain.incident.is_none());
    }

    #[test]
    fn test_alarm_subject_with_bad_message_is_decode_error() {
        let err = build_record_notifications(&record("ALARM: \"x\"", "not json")).unwrap_err();
        assert!(err.is_decode());
    }
}
