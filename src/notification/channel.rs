//! 通知渠道 trait 定义

use super::message::{Incident, NotificationMessage};
use crate::error::Result;

/// Chat destination for notification messages
pub trait ChatSink: Send + Sync {
    /// Channel name (logging)
    fn name(&self) -> &str;

    /// Deliver one message; a single blocking attempt
    fn send_message(&self, message: &NotificationMessage) -> Result<()>;
}

/// Incident paging destination
pub trait PagingSink: Send + Sync {
    /// Channel name (logging)
    fn name(&self) -> &str;

    /// Trigger one incident; a single blocking attempt
    fn trigger_incident(&self, incident: &Incident) -> Result<()>;
}
