use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::OperatorContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(operator): Extension<OperatorContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "operator_id": operator.operator_id().to_string(),
        "roles": operator.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    }))
}
