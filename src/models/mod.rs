use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogAnalysisRequest {
    #[validate(length(min = 1, message = "log content must not be empty"))]
    pub log_content: String,
}

/// Structured analysis returned to the caller. A failed analysis is still
/// carried in this shape: the error description lands in `root_cause` and
/// the remaining fields stay null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAnalysisResponse {
    pub root_cause: Option<String>,
    pub possible_fixes: Option<Vec<String>>,
    pub context: Option<String>,
}

impl LogAnalysisResponse {
    pub fn new(root_cause: String, possible_fixes: Vec<String>, context: String) -> Self {
        Self {
            root_cause: Some(root_cause),
            possible_fixes: Some(possible_fixes),
            context: Some(context),
        }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            root_cause: Some(message.into()),
            possible_fixes: None,
            context: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub uptime_seconds: u64,
    pub version: String,
}
