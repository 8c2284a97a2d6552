//! 通知层 - Slack 消息与 PagerDuty incident
//!
//! 1. `NotificationMessage` / `Incident`: sink-agnostic output of the router
//! 2. `ChatSink` / `PagingSink`: the two destinations, one blocking attempt each
//! 3. `channels`: Slack webhook, PagerDuty events API, and a dry-run logger
//!
//! ```ignore
//! use event_router::notification::{ChatSink, Field, NotificationMessage, Severity, SlackChannel};
//!
//! let slack = SlackChannel::new(webhook)?;
//! let message = NotificationMessage::new("EC2 Instance State-change", Severity::Warn)
//!     .with_field(Field::narrow("state", "stopped"));
//! slack.send_message(&message)?;
//! ```

pub mod channel;
pub mod channels;
pub mod message;
pub mod severity;

pub use channel::{ChatSink, PagingSink};
pub use channels::{DryRunChannel, PagerdutyChannel, PagerdutyIncidentRequest, SlackChannel, SlackMessage};
pub use message::{Field, Incident, IncidentDetails, NotificationMessage};
pub use severity::Severity;
