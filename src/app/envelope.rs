use crate::utils::error::{CardError, ErrorCategory};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";

/// Uniform response body: `{status, message, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn success(status: StatusCode, data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                status: status.as_u16(),
                message: SUCCESS.to_string(),
                data,
            },
            Err(e) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to encode response: {}", e),
            ),
        }
    }

    pub fn error(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: ERROR.to_string(),
            data: Value::String(detail.into()),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<CardError> for Envelope {
    fn from(err: CardError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::error(status, err.to_string())
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        match self.category() {
            ErrorCategory::Internal | ErrorCategory::Configuration => {
                tracing::error!(error = %self, "Request failed");
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }
        Envelope::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(StatusCode::CREATED, json!({"name": "Ace"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"status": 201, "message": "success", "data": {"name": "Ace"}})
        );
    }

    #[test]
    fn test_error_envelope_from_card_error() {
        let envelope = Envelope::from(CardError::Conflict {
            name: "Ace".to_string(),
        });
        assert_eq!(envelope.status, 409);
        assert_eq!(envelope.message, "error");
        assert_eq!(
            envelope.data,
            Value::String("Card with name 'Ace' already exists".to_string())
        );
    }

    #[test]
    fn test_into_response_uses_envelope_status() {
        let response = Envelope::from(CardError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
