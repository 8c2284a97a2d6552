//! 具体渠道实现

pub mod slack;
pub mod pagerduty;
pub mod dry_run;

pub use slack::{SlackChannel, SlackMessage};
pub use pagerduty::{PagerdutyChannel, PagerdutyIncidentRequest};
pub use dry_run::DryRunChannel;

use crate::error::{Result, RoutingError};
use serde::Serialize;

/// POST a JSON body once; transport errors and non-2xx statuses both fail.
///
/// The URL is stripped from errors since the Slack webhook URL is a secret.
pub(crate) fn post_json<T: Serialize + ?Sized>(
    client: &reqwest::blocking::Client,
    sink: &'static str,
    url: &str,
    body: &T,
) -> Result<()> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .map_err(|e| RoutingError::sink(sink, e.without_url()))?;

    response
        .error_for_status()
        .map_err(|e| RoutingError::sink(sink, e.without_url()))?;

    Ok(())
}
