//! Outcomes reported by the client operations

use serde::Serialize;
use std::fmt;

/// Result of a connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    Ok,
    Fail,
}

impl ConnectionStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "Fail",
        }
    }

    /// Indicator shown next to the settings in the admin page.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Ok => "💚 OK",
            Self::Fail => "💥Fail",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission was not sent. Not an error: the event had nothing to
/// send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    NoEmail,
    NoIdentity,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoEmail => "no-email",
            Self::NoIdentity => "no-identity",
        }
    }
}

/// Why a submission could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    MissingCredentials,
    ConnectionError,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing-credentials",
            Self::ConnectionError => "connection-error",
        }
    }
}

/// Result of a form-event submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SubmitResult {
    Sent,
    Skipped(SkipReason),
    Failed(FailureReason),
}

impl SubmitResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("sent"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason.as_str()),
            Self::Failed(reason) => write!(f, "failed ({})", reason.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_status_strings() {
        assert_eq!(ConnectionStatus::Ok.to_string(), "OK");
        assert_eq!(ConnectionStatus::Fail.to_string(), "Fail");
        assert_eq!(ConnectionStatus::Ok.indicator(), "💚 OK");
        assert_eq!(ConnectionStatus::Fail.indicator(), "💥Fail");
        assert!(ConnectionStatus::Ok.is_ok());
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(SkipReason::NoEmail.as_str(), "no-email");
        assert_eq!(SkipReason::NoIdentity.as_str(), "no-identity");
        assert_eq!(FailureReason::MissingCredentials.as_str(), "missing-credentials");
        assert_eq!(FailureReason::ConnectionError.as_str(), "connection-error");
    }

    #[test]
    fn test_submit_result_display() {
        assert_eq!(SubmitResult::Sent.to_string(), "sent");
        assert_eq!(
            SubmitResult::Skipped(SkipReason::NoEmail).to_string(),
            "skipped (no-email)"
        );
        assert_eq!(
            SubmitResult::Failed(FailureReason::ConnectionError).to_string(),
            "failed (connection-error)"
        );
    }

    #[test]
    fn test_submit_result_serialization() {
        let value = serde_json::to_value(SubmitResult::Skipped(SkipReason::NoEmail)).unwrap();
        assert_eq!(value, serde_json::json!({"status": "skipped", "reason": "no-email"}));

        let value = serde_json::to_value(SubmitResult::Sent).unwrap();
        assert_eq!(value, serde_json::json!({"status": "sent"}));
    }
}
