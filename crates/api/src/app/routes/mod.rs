use axum::{routing::get, Router};

pub mod maintenance;
pub mod products;
pub mod system;

/// Router for all operator-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/maintenance", maintenance::router())
        .nest("/products", products::router())
}
