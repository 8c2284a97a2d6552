//! 事件路由 - 判断 payload 形状并分发到对应的分类器
//!
//! ```text
//! raw payload ─► classify ─┬─► SnsRecords      ─► process_records ─► Slack (+ PagerDuty on ALARM)
//!                          ├─► CloudwatchEvent ─► process_event   ─► Slack
//!                          └─► ForeignRecords  ─► dropped
//! ```

pub mod cloudwatch;
pub mod sns;

pub use cloudwatch::{build_event_notification, classify_event, EventKind};
pub use sns::{build_alarm_notifications, build_record_notifications, classify_subject, RecordKind, RecordNotifications};

use tracing::{debug, info};

use crate::error::Result;
use crate::event::{CloudwatchEvent, GenericEnvelope, PayloadKind, SnsRecordList};
use crate::notification::{ChatSink, PagingSink};

/// Decide which classifier a payload belongs to, without touching any sink.
pub fn classify(raw: &[u8]) -> Result<PayloadKind> {
    Ok(GenericEnvelope::parse(raw)?.kind())
}

/// Routes payloads to the chat and paging sinks
pub struct Router<'a> {
    chat: &'a dyn ChatSink,
    pager: &'a dyn PagingSink,
}

impl<'a> Router<'a> {
    pub fn new(chat: &'a dyn ChatSink, pager: &'a dyn PagingSink) -> Self {
        Self { chat, pager }
    }

    /// Route one payload to completion.
    ///
    /// Malformed JSON fails before any sink is called. Record lists from
    /// sources other than SNS are logged and dropped.
    pub fn route(&self, raw: &[u8]) -> Result<()> {
        debug!(bytes = raw.len(), "Receiving new Event(s)");

        match classify(raw)? {
            PayloadKind::SnsRecords => {
                let list = SnsRecordList::parse(raw)?;
                self.process_records(&list.records)
            }
            PayloadKind::ForeignRecords { event_source } => {
                info!(event_source = %event_source, "No SNS records to process");
                Ok(())
            }
            PayloadKind::CloudwatchEvent => {
                let event = CloudwatchEvent::parse(raw)?;
                self.process_event(&event)
            }
        }
    }
}
