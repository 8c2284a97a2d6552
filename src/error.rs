//! 路由错误类型
//!
//! Every failure carries a short causal prefix plus the underlying library
//! error rendered as text, so no `serde_json` or `reqwest` types leak out.

use thiserror::Error;

/// Errors produced while routing a single payload.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Top-level JSON could not be parsed at all.
    #[error("unsupported payload: {0}")]
    MalformedPayload(String),

    /// Parsed, but matches no known envelope.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A nested document (record list, alarm message, event detail) failed strict decoding.
    #[error("{context}: {message}")]
    Decode {
        context: String,
        message: String,
    },

    /// A sink call failed, transport errors included.
    #[error("failed to send {sink} notification: {message}")]
    Sink {
        sink: &'static str,
        message: String,
    },
}

impl RoutingError {
    pub fn decode(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            context: context.into(),
            message: err.to_string(),
        }
    }

    pub fn sink(sink: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Sink {
            sink,
            message: err.to_string(),
        }
    }

    /// Prefix the context of a decode error, leaving other kinds untouched.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            Self::Decode { context, message } => Self::Decode {
                context: format!("{}: {}", prefix, context),
                message,
            },
            other => other,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, Self::Sink { .. })
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = RoutingError::decode("could not unmarshal Cloudwatch Alarm payload", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "could not unmarshal Cloudwatch Alarm payload: expected value at line 1"
        );
        assert!(err.is_decode());
    }

    #[test]
    fn test_within_prefixes_decode_only() {
        let err = RoutingError::decode("unsupported EC2 Cloudwatch Event Detail", "eof")
            .within("failed to process EC2 Event");
        assert_eq!(
            err.to_string(),
            "failed to process EC2 Event: unsupported EC2 Cloudwatch Event Detail: eof"
        );

        let err = RoutingError::sink("slack", "connection refused").within("ignored");
        assert_eq!(err.to_string(), "failed to send slack notification: connection refused");
        assert!(err.is_sink());
    }
}
