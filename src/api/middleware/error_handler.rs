//! Conversion of `AppError` into HTTP responses.
//!
//! Client errors echo their message; server errors are logged and answered
//! with a generic message so internals never leak.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    fn to_error_response(&self) -> ErrorResponse {
        let code = self.code();
        match self {
            AppError::NotFound { entity, field, value } => {
                ErrorResponse::new(code, format!("{} not found", entity)).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                }))
            }
            AppError::Validation { field, reason } => {
                ErrorResponse::new(code, reason.clone()).with_details(json!({ "field": field }))
            }
            AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::Forbidden { message }
            | AppError::Conflict { message } => ErrorResponse::new(code, message.clone()),
            AppError::Database { operation, .. } => {
                ErrorResponse::new(code, "Database operation failed")
                    .with_details(json!({ "operation": operation }))
            }
            AppError::Configuration { .. } => ErrorResponse::new(code, "Server misconfigured"),
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = ?self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "JSON syntax error".to_string(),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing or invalid Content-Type header, expected application/json".to_string()
            }
            JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
            _ => format!("Invalid JSON body: {}", rejection.body_text()),
        };
        AppError::BadRequest { message }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path parameters: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid query parameters: {}", rejection.body_text()),
        }
    }
}

/// Fills `request_id` into JSON error bodies produced further down the stack.
pub async fn attach_request_id(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    use super::RequestId;
    use axum::body::{Body, to_bytes};

    const MAX_ERROR_BODY: usize = 64 * 1024;

    let request_id = request.extensions().get::<RequestId>().cloned();
    let response = next.run(request).await;

    let Some(RequestId(request_id)) = request_id else {
        return response;
    };
    if !(response.status().is_client_error() || response.status().is_server_error()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => bytes,
        Err(_) => return Response::from_parts(parts, Body::empty()),
    };

    let body = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(mut map)) if map.contains_key("code") => {
            map.insert("request_id".to_string(), serde_json::Value::String(request_id));
            serde_json::to_vec(&map).map(Body::from).unwrap_or_else(|_| Body::from(bytes))
        }
        _ => Body::from(bytes),
    };

    let mut response = Response::from_parts(parts, body);
    response.headers_mut().remove(axum::http::header::CONTENT_LENGTH);
    response
}
