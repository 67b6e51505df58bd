use core::str::FromStr;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use shop_core::DomainError;

use crate::app::errors;

/// Parse a path segment into a typed id, or produce the error response.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}

/// `201 Created` with a `Location` header.
pub fn created(location: String, body: serde_json::Value) -> axum::response::Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}
