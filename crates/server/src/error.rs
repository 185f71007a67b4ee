// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON envelopes and the HTTP error type.
//!
//! Successful responses are `{"data": ..., ...extra}`. Failures are
//! `{"error": {"code", "message", "field"?, "details"?}}`.

use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};
use vine_api::ApiError;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub data: T,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wraps `data` in an envelope with the given status.
pub fn respond<T: Serialize>(status: StatusCode, data: T) -> Response {
    respond_with(status, data, Map::new())
}

/// Wraps `data` in an envelope with extra top-level members.
pub fn respond_with<T: Serialize>(
    status: StatusCode,
    data: T,
    extra: Map<String, Value>,
) -> Response {
    (status, Json(DataEnvelope { data, extra })).into_response()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The stable error code.
    pub code: &'static str,
    /// The error message.
    pub message: String,
    /// The offending request field, if any.
    pub field: Option<String>,
    /// Extra diagnostic details.
    pub details: Option<Value>,
}

impl HttpError {
    /// A 401 with the given reason.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "unauthorized",
            message: message.into(),
            field: None,
            details: None,
        }
    }

    /// A 400 for a malformed request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "validation_error",
            message: message.into(),
            field: None,
            details: None,
        }
    }

    /// A 500 for failures outside the API layer, such as file storage.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "server_error",
            message: message.into(),
            field: None,
            details: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorEnvelope> = Json(ErrorEnvelope {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                field: self.field,
                details: self.details,
            },
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let details: Option<Value> = match &err {
            ApiError::ServerError { code, message } => {
                error!(code = ?code, message, "Backend failure");
                Some(serde_json::json!({ "code": code, "message": message }))
            }
            _ => None,
        };

        Self {
            status,
            code: err.code(),
            message: err.to_string(),
            field: err.field().map(ToString::to_string),
            details,
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected JSON body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected query string");
        Self::bad_request(rejection.body_text())
    }
}

impl From<BytesRejection> for HttpError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge {
                message: rejection.body_text(),
            }
            .into();
        }
        Self::bad_request(rejection.body_text())
    }
}

/// Result type for route handlers.
pub type HttpResult = Result<Response, HttpError>;
