//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard success envelope: `{"status":"success","data":{...}}`.
///
/// Errors never pass through here; `AppError`'s `IntoResponse` produces
/// the matching `{"status":"error","message":...}` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip)]
    code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a 200 success response.
    pub const fn ok(data: T) -> Self {
        Self {
            status: "success",
            data,
            code: StatusCode::OK,
        }
    }

    /// Create a 201 success response.
    pub const fn created(data: T) -> Self {
        Self {
            status: "success",
            data,
            code: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

/// Success envelope carrying only a message (logout, password flows).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    /// Create a message-only success response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        #[derive(Serialize)]
        struct Data {
            total: usize,
        }

        let response = ApiResponse::ok(Data { total: 3 });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["total"], 3);
        assert!(json.get("code").is_none());
    }
}
