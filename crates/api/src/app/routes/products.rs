//! Catalog seeding/listing for the in-memory host (dev and tests).

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use storekeep_auth::Permission;

use crate::app::{dto, errors, services::AppServices};
use crate::authz;
use crate::context::OperatorContext;

pub fn router() -> Router {
    Router::new().route("/", post(create_product).get(list_products))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require(&operator, &[Permission::catalog_maintain()]) {
        return errors::authz_error_to_response(e);
    }

    let id = services.catalog.next_id();
    let record = match body.into_record(id, Utc::now()) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.catalog.insert(record) {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string());
    }

    (StatusCode::CREATED, Json(serde_json::json!({ "id": id }))).into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(operator): Extension<OperatorContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require(&operator, &[Permission::catalog_maintain()]) {
        return errors::authz_error_to_response(e);
    }

    let items = services
        .catalog
        .list()
        .into_iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
