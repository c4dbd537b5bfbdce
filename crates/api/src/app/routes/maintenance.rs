//! Operator-triggered maintenance actions.
//!
//! Each mutating action needs the `catalog.maintain` permission and a one-time
//! token obtained from `POST /maintenance/tokens` for that same action, sent in
//! the `x-action-token` header. Both checks happen before the catalog is read.
//!
//! The token is consumed as soon as it is accepted, so a run that then fails
//! (e.g. 503 `precondition_failed` when the catalog is unavailable) still uses
//! it up. Clients must request a new token before retrying.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use storekeep_auth::{ActionToken, MaintenanceAction, Permission};

use crate::app::{dto, errors, services::AppServices};
use crate::authz;
use crate::context::OperatorContext;

pub const ACTION_TOKEN_HEADER: &str = "x-action-token";

pub fn router() -> Router {
    Router::new()
        .route("/tokens", post(issue_token))
        .route("/duplicates", get(preview_duplicates))
        .route("/duplicate-cleanup", post(run_duplicate_cleanup))
        .route("/image-review", post(run_image_review))
}

pub async fn issue_token(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
    Json(body): Json<dto::IssueTokenRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require(&operator, &[Permission::catalog_maintain()]) {
        return errors::authz_error_to_response(e);
    }

    let issued = services.tokens.issue(operator.operator_id(), body.action, Utc::now());
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "token": issued.token.to_string(),
            "action": issued.action,
            "expires_at": issued.expires_at.to_rfc3339(),
        })),
    )
        .into_response()
}

pub async fn preview_duplicates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require(&operator, &[Permission::catalog_maintain()]) {
        return errors::authz_error_to_response(e);
    }

    match services.maintenance.preview_duplicates() {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::maintenance_error_to_response(e),
    }
}

pub async fn run_duplicate_cleanup(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(resp) = guard_action(&services, &operator, &headers, MaintenanceAction::DuplicateCleanup) {
        return resp;
    }

    match services.maintenance.run_duplicate_cleanup() {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::maintenance_error_to_response(e),
    }
}

pub async fn run_image_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(resp) = guard_action(&services, &operator, &headers, MaintenanceAction::ImageReview) {
        return resp;
    }

    match services.maintenance.run_image_review() {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::maintenance_error_to_response(e),
    }
}

/// Permission check, then token consumption.
fn guard_action(
    services: &AppServices,
    operator: &OperatorContext,
    headers: &HeaderMap,
    action: MaintenanceAction,
) -> Result<(), axum::response::Response> {
    authz::require(operator, &[Permission::catalog_maintain()]).map_err(errors::authz_error_to_response)?;

    let raw = headers
        .get(ACTION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_action_token",
                format!("header '{ACTION_TOKEN_HEADER}' is required"),
            )
        })?;
    let token: ActionToken = raw.parse().map_err(errors::domain_error_to_response)?;

    services
        .tokens
        .consume(operator.operator_id(), action, token, Utc::now())
        .map_err(|e| {
            tracing::warn!(operator_id = %operator.operator_id(), %action, error = %e, "rejected action token");
            errors::token_error_to_response(e)
        })
}
