use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Body of `POST /consult`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomRequest {
    /// Free-form symptom description, forwarded as-is.
    pub symptoms: String,
}

/// Cleaned advice returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthAdvice {
    pub health_advice: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub provider: String,
    pub model: String,
    pub memory_scope: String,
    pub sessions: usize,
}

/// Error envelope shared by every non-2xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

// ============= Agent Types =============

#[derive(Debug, Clone)]
pub struct AgentContext {
    pub session_id: String,
    pub conversation_history: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The completion client could not be constructed.
    #[error("Error creating completion client: {0}")]
    Setup(String),

    /// The completion call itself failed.
    #[error("Error during completion: {0}")]
    Invocation(String),

    #[error("Completion timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Setup(_) | AppError::Invocation(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::InvalidInput(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::InvalidInput(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => AppError::InvalidInput(e.body_text()),
            // Body could not be read at all
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_setup_and_invocation_map_to_500() {
        assert_eq!(
            AppError::Setup("bad base url".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Invocation("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_timeout_maps_to_504() {
        let err = AppError::Timeout(30);
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "Completion timed out after 30 seconds");
    }

    #[test]
    fn test_error_message_keeps_underlying_text() {
        let err = AppError::Invocation("invalid_api_key".to_string());
        assert!(err.to_string().contains("invalid_api_key"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_symptom_request_requires_field() {
        let missing: std::result::Result<SymptomRequest, _> = serde_json::from_str("{}");
        assert!(missing.is_err());

        let empty: SymptomRequest =
            serde_json::from_str(r#"{"symptoms": ""}"#).expect("empty string is accepted");
        assert_eq!(empty.symptoms, "");
    }
}
