// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::validation::{FieldError, Location};

/// HTTP API error with appropriate status codes and client-friendly bodies
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(Vec<FieldError>),
    BadRequest(String),
    /// Business rule failure reported in the same shape as a validation entry
    Rejected(FieldError),

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) => 400,
            ApiError::BadRequest(_) => 400,
            ApiError::Rejected(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationError(errors) => errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Rejected(error) => error.msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::PayloadTooLarge(msg) => msg.clone(),
            ApiError::InternalServerError(msg) => format!("Error: {}", msg),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError(errors) => json!({ "errors": errors }),
            ApiError::Rejected(error) => json!(error),
            _ => json!({ "msg": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError::PayloadTooLarge(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// 400 for an id in the path that matches no record
    pub fn unknown_id(
        value: impl Into<Value>,
        message: impl Into<String>,
        param: &'static str,
    ) -> Self {
        ApiError::Rejected(FieldError::new(
            Some(value.into()),
            message,
            param,
            Location::Params,
        ))
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ScheduleNotFound(id) => ApiError::Rejected(FieldError::new(
                Some(Value::from(id)),
                format!("The schedule with id '{}' does not exist", id),
                "schedule",
                Location::Body,
            )),
            other => {
                // Surface the cause to the client and keep the full detail in the log
                tracing::error!("Database error: {:?}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_wrapped_in_errors_array() {
        let err = ApiError::validation_error(vec![FieldError::new(
            None,
            "The name cannot be empty and cannot have a length greater than 15",
            "name",
            Location::Body,
        )]);
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        let first = &body["errors"][0];
        assert_eq!(first["param"], "name");
        assert_eq!(first["location"], "body");
        assert!(first.get("value").is_none());
    }

    #[test]
    fn missing_schedule_maps_to_body_field_error() {
        let err: ApiError = DatabaseError::ScheduleNotFound(42).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_json(),
            json!({
                "value": 42,
                "msg": "The schedule with id '42' does not exist",
                "param": "schedule",
                "location": "body"
            })
        );
    }

    #[test]
    fn internal_errors_carry_error_prefix() {
        let err: ApiError = DatabaseError::QueryError("relation does not exist".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_json(),
            json!({ "msg": "Error: Query error: relation does not exist" })
        );
    }

    #[test]
    fn not_found_uses_msg_body() {
        let err = ApiError::not_found("There is no schedule with the id 9");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_json(), json!({ "msg": "There is no schedule with the id 9" }));
    }

    #[test]
    fn oversized_body_is_413() {
        let err = ApiError::payload_too_large("length limit exceeded");
        assert_eq!(err.status_code(), 413);
        assert_eq!(err.to_json(), json!({ "msg": "length limit exceeded" }));
    }
}
