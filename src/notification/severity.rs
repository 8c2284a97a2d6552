//! Severity levels and their Slack attachment colors
//!
//! - Info: plain notices (RDS messages, instance launches, generic events)
//! - Success: alarm returned to OK
//! - Warn: instances stopping or autoscaling activity that did not succeed
//! - Error: alarm in ALARM state

/// Severity of a notification, rendered as an attachment color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warn,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Hex color used in the Slack attachment
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Info => "#00BFFF",    // Deep Sky Blue
            Severity::Success => "#00FF00", // Lime
            Severity::Warn => "#FFD700",    // Gold
            Severity::Error => "#DC143C",   // Crimson
        }
    }

    /// Reverse of [`Severity::color`], case-insensitive
    pub fn from_color(color: &str) -> Option<Self> {
        [Severity::Info, Severity::Success, Severity::Warn, Severity::Error]
            .into_iter()
            .find(|s| s.color().eq_ignore_ascii_case(color))
    }
}
