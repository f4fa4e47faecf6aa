use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health status as reported by the backend health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Unknown,
    Ok,
    Error,
}

/// Result of a backend health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
    /// Structured diagnostic details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HealthCheckResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Ok,
            message: message.into(),
            details: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Error,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Successful outcome of "save & test"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDatasourceResult {
    /// Always "success"
    pub status: String,
    pub message: String,
}

impl TestDatasourceResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
        }
    }
}

/// The host's message and diagnostic details of a failed health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct HealthCheckErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Failed outcome of "save & test", surfaced as an alert by the config editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct HealthCheckError {
    /// Always "error"
    pub status: String,
    pub message: String,
    pub error: HealthCheckErrorDetail,
}

impl From<HealthCheckResult> for HealthCheckError {
    fn from(res: HealthCheckResult) -> Self {
        Self {
            status: "error".into(),
            message: res.message.clone(),
            error: HealthCheckErrorDetail {
                message: res.message,
                details: res.details,
            },
        }
    }
}
