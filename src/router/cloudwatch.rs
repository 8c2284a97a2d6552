//! CloudWatch Event 分类器
//!
//! `EVENT_RULES` maps (source, detail-type) to an `EventKind`, first match wins.
//! None of these events page; they only go to Slack.

use tracing::{debug, info};

use super::Router;
use crate::error::{Result, RoutingError};
use crate::event::{CloudwatchEvent, Ec2StateChangeDetail, InstanceActivityDetail, LifecycleActionDetail};
use crate::notification::{Field, NotificationMessage, Severity};

pub const EC2_SOURCE: &str = "aws.ec2";
pub const SCHEDULED_SOURCE: &str = "aws.events";
pub const AUTOSCALING_SOURCE: &str = "aws.autoscaling";

pub const EC2_STATE_CHANGE: &str = "EC2 Instance State-change Notification";

pub const LIFECYCLE_ACTIONS: [&str; 2] = [
    "EC2 Instance-launch Lifecycle Action",
    "EC2 Instance-terminate Lifecycle Action",
];

pub const UNSUCCESSFUL_ACTIVITIES: [&str; 2] = [
    "EC2 Instance Launch Unsuccessful",
    "EC2 Instance Terminate Unsuccessful",
];

/// EC2 states reported with warning color
pub const STOPPING_STATES: [&str; 4] = ["shutting-down", "terminated", "stopping", "stopped"];

/// Title of the first field on every CloudWatch event message
const EVENT_FIELD_TITLE: &str = "CloudWatch Event";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Ec2StateChange,
    /// Other EC2 detail-types are not reported
    Ec2Unhandled,
    /// Scheduled events are ignored
    Scheduled,
    AutoscalingLifecycle,
    AutoscalingActivity,
    /// Any other source: forwarded with the raw detail
    Generic,
}

type EventRule = (EventKind, fn(&str, &str) -> bool);

fn is_ec2_state_change(source: &str, detail_type: &str) -> bool {
    source == EC2_SOURCE && detail_type == EC2_STATE_CHANGE
}

fn is_ec2(source: &str, _: &str) -> bool {
    source == EC2_SOURCE
}

fn is_scheduled(source: &str, _: &str) -> bool {
    source == SCHEDULED_SOURCE
}

fn is_lifecycle_action(source: &str, detail_type: &str) -> bool {
    source == AUTOSCALING_SOURCE && LIFECYCLE_ACTIONS.contains(&detail_type)
}

fn is_autoscaling(source: &str, _: &str) -> bool {
    source == AUTOSCALING_SOURCE
}

const EVENT_RULES: &[EventRule] = &[
    (EventKind::Ec2StateChange, is_ec2_state_change),
    (EventKind::Ec2Unhandled, is_ec2),
    (EventKind::Scheduled, is_scheduled),
    (EventKind::AutoscalingLifecycle, is_lifecycle_action),
    (EventKind::AutoscalingActivity, is_autoscaling),
];

pub fn classify_event(source: &str, detail_type: &str) -> EventKind {
    EVENT_RULES
        .iter()
        .find(|(_, matches)| matches(source, detail_type))
        .map(|(kind, _)| *kind)
        .unwrap_or(EventKind::Generic)
}

fn ec2_state_change_message(event: &CloudwatchEvent) -> Result<NotificationMessage> {
    let detail: Ec2StateChangeDetail = event
        .decode_detail("unsupported EC2 Cloudwatch Event Detail")
        .map_err(|e| e.within("failed to process EC2 Event"))?;

    let severity = if STOPPING_STATES.contains(&detail.state.as_str()) {
        Severity::Warn
    } else {
        Severity::Info
    };

    let title = "EC2 Instance State-change";
    Ok(NotificationMessage::new(title, severity)
        .with_field(Field::wide(EVENT_FIELD_TITLE, title))
        .with_field(Field::narrow("instance-id", detail.instance_id))
        .with_field(Field::narrow("state", detail.state)))
}

fn lifecycle_action_message(event: &CloudwatchEvent) -> Result<NotificationMessage> {
    let detail: LifecycleActionDetail = event
        .decode_detail("unsupported Autoscaling Lifecycle Event Detail")
        .map_err(|e| e.within("failed to process Autoscaling Event"))?;

    let title = "Autoscaling - Lifecycle Action";
    Ok(NotificationMessage::new(title, Severity::Info)
        .with_field(Field::wide(EVENT_FIELD_TITLE, title))
        .with_field(Field::narrow("AutoScalingGroupName", detail.auto_scaling_group_name))
        .with_field(Field::narrow("EC2InstanceId", detail.ec2_instance_id))
        .with_field(Field::narrow("LifecycleTransition", detail.lifecycle_transition)))
}

fn instance_activity_message(event: &CloudwatchEvent) -> Result<NotificationMessage> {
    let detail: InstanceActivityDetail = event
        .decode_detail("unsupported Autoscaling EC2 Event Detail")
        .map_err(|e| e.within("failed to process Autoscaling Event"))?;

    let severity = if UNSUCCESSFUL_ACTIVITIES.contains(&event.detail_type.as_str()) {
        Severity::Warn
    } else {
        Severity::Info
    };

    let title = format!("Autoscaling - {}", event.detail_type);
    Ok(NotificationMessage::new(title.as_str(), severity)
        .with_field(Field::wide(EVENT_FIELD_TITLE, title))
        .with_field(Field::narrow("EC2InstanceId", detail.ec2_instance_id))
        .with_field(Field::narrow("StatusCode", detail.status_code))
        .with_field(Field::narrow("Availability Zone", detail.details.availability_zone))
        .with_field(Field::narrow("Cause", detail.cause)))
}

fn generic_message(event: &CloudwatchEvent) -> NotificationMessage {
    NotificationMessage::new(event.source.as_str(), Severity::Info)
        .with_field(Field::wide(EVENT_FIELD_TITLE, event.source.as_str()))
        .with_field(Field::wide("Event Detail JSON", event.detail_text()))
}

/// Slack message for an event, or `None` when the event is ignored.
pub fn build_event_notification(event: &CloudwatchEvent) -> Result<Option<NotificationMessage>> {
    if event.source.is_empty() {
        return Err(RoutingError::UnsupportedShape(
            "payload has neither SNS records nor an event source".to_string(),
        ));
    }

    let message = match classify_event(&event.source, &event.detail_type) {
        EventKind::Ec2StateChange => Some(ec2_state_change_message(event)?),
        EventKind::Ec2Unhandled | EventKind::Scheduled => None,
        EventKind::AutoscalingLifecycle => Some(lifecycle_action_message(event)?),
        EventKind::AutoscalingActivity => Some(instance_activity_message(event)?),
        EventKind::Generic => Some(generic_message(event)),
    };

    Ok(message)
}

impl Router<'_> {
    pub fn process_event(&self, event: &CloudwatchEvent) -> Result<()> {
        let kind = classify_event(&event.source, &event.detail_type);
        info!(
            kind = ?kind,
            id = %event.id,
            source = %event.source,
            detail_type = %event.detail_type,
            "Processing CloudWatch event"
        );

        match build_event_notification(event)? {
            Some(message) => {
                self.chat.send_message(&message)?;
                debug!(channel = self.chat.name(), "Sent CloudWatch event message");
                Ok(())
            }
            None => {
                debug!(kind = ?kind, "Ignoring CloudWatch event");
                Ok(())
            }
        }
    }
}
