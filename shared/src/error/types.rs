//! `AppError` and the `ApiResponse` envelope

use std::collections::HashMap;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::codes::ErrorCode;

/// Error returned to API callers
///
/// The code picks the HTTP status; the message is shown to patrons and
/// managers as-is; details carry the offending field or id.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// `"<field> is required"`
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    /// `"<resource> not found"`
    pub fn not_found(resource: &str) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{resource} not found"))
            .with_detail("resource", resource)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::TokenInvalid)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, message)
    }

    pub fn manager_required() -> Self {
        Self::new(ErrorCode::ManagerRequired)
    }
}

/// Response envelope shared by every endpoint
///
/// `code` is 0 on success. `data` is present on success when there is a
/// payload; `details` only on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    fn status(&self) -> StatusCode {
        self.code
            .and_then(|code| ErrorCode::try_from(code).ok())
            .map_or(StatusCode::OK, |code| code.http_status())
    }
}

impl ApiResponse<()> {
    /// Success without a payload (deletes)
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: message.into(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }
        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::OrderAlreadyPaid);
        assert_eq!(err.message, "Order has already been paid");
        assert_eq!(err.to_string(), "Order has already been paid");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::new(ErrorCode::DrinkLimitExceeded)
            .with_detail("max_drinks", 10)
            .with_detail("requested", 11);

        let details = err.details.unwrap();
        assert_eq!(details["max_drinks"], 10);
        assert_eq!(details["requested"], 11);
    }

    #[test]
    fn test_required_and_not_found_name_the_subject() {
        let err = AppError::required("pick_up_location");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "pick_up_location is required");

        let err = AppError::not_found("User");
        assert_eq!(err.message, "User not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::new(ErrorCode::ToppingNotFound).with_detail("id", 9);
        let body = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();

        assert_eq!(body["code"], 3002);
        assert_eq!(body["message"], "Topping not found");
        assert_eq!(body["details"]["id"], 9);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let body =
            serde_json::to_value(ApiResponse::success_with_message("Flavour created", 5)).unwrap();
        assert_eq!(body["code"], 0);
        assert_eq!(body["message"], "Flavour created");
        assert_eq!(body["data"], 5);
        assert!(body.get("details").is_none());

        let body = serde_json::to_value(ApiResponse::ok_with_message("Deleted")).unwrap();
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_envelope_status() {
        assert_eq!(ApiResponse::success(1).status(), StatusCode::OK);
        let err = AppError::new(ErrorCode::OrderEmpty);
        assert_eq!(ApiResponse::<()>::error(&err).status(), StatusCode::BAD_REQUEST);
    }
}
