use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shop_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    tracing::debug!(reason = err.message(), "request failed: {err}");
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_id", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        // 304 carries no body; the reason only goes to the log.
        DomainError::Conflict(_) => StatusCode::NOT_MODIFIED.into_response(),
    }
}

/// Malformed or mistyped JSON bodies are client input errors.
pub fn json_rejection(rejection: JsonRejection) -> axum::response::Response {
    rejection_to_response(rejection.body_text())
}

/// Query strings that fail to deserialize are client input errors.
pub fn query_rejection(rejection: QueryRejection) -> axum::response::Response {
    rejection_to_response(rejection.body_text())
}

fn rejection_to_response(message: String) -> axum::response::Response {
    tracing::info!("rejected request: {message}");
    json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_request", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
