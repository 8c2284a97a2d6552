//! Event Router - 将 AWS SNS 告警与 CloudWatch 事件转发到 Slack 和 PagerDuty

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod notification;
pub mod router;

pub use config::RouterConfig;
pub use error::{Result, RoutingError};
pub use event::{CloudwatchEvent, GenericEnvelope, PayloadKind, SnsRecord, SnsRecordList};
pub use notification::{
    ChatSink, DryRunChannel, Field, Incident, NotificationMessage, PagerdutyChannel, PagingSink,
    Severity, SlackChannel,
};
pub use router::{classify, Router};
