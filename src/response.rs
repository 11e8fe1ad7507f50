//! Uniform response envelope: `{statusCode, data, message, success}`.
//!
//! Every endpoint, success or failure, speaks this shape; the failure half
//! lives in `error.rs`.

use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.is_success(),
        }
    }
}

/// 200 OK with the standard envelope.
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(StatusCode::OK, data, message))
}

/// 201 Created with the standard envelope.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::new(StatusCode::CREATED, data, message))
}

/// Envelope on an externally built response (used when cookies are attached).
pub fn with_builder<T: Serialize>(
    mut builder: HttpResponseBuilder,
    status: StatusCode,
    data: T,
    message: impl Into<String>,
) -> HttpResponse {
    builder.json(ApiResponse::new(status, data, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::new(StatusCode::OK, serde_json::json!({"a": 1}), "done");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["data"]["a"], 1);
        assert_eq!(value["message"], "done");
        assert_eq!(value["success"], true);
    }

    #[test]
    fn test_envelope_failure_flag() {
        let envelope = ApiResponse::new(StatusCode::CONFLICT, (), "taken");
        assert!(!envelope.success);
        assert_eq!(envelope.status_code, 409);
    }

    #[test]
    fn test_ok_helper_status() {
        let resp = ok((), "fine");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
