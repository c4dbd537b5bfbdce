use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storekeep_auth::{AuthzError, TokenError};
use storekeep_core::DomainError;
use storekeep_infra::MaintenanceError;

pub fn maintenance_error_to_response(err: MaintenanceError) -> axum::response::Response {
    match err {
        MaintenanceError::Precondition(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "precondition_failed", msg)
        }
        MaintenanceError::Store(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string()),
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    json_error(StatusCode::CONFLICT, "invalid_token", err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
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
