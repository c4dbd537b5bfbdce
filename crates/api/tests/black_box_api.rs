use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use storekeep_api::app::services::AppServices;
use storekeep_core::{OperatorId, ProductId};
use storekeep_catalog::ProductStatus;
use storekeep_infra::AppConfig;

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port; services kept for inspection.
        let services = Arc::new(AppServices::from_config(&AppConfig::default()));
        let app = storekeep_api::app::build_app_with(services.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Operator {
    id: OperatorId,
    roles: &'static str,
}

impl Operator {
    fn new(roles: &'static str) -> Self {
        Self {
            id: OperatorId::new(),
            roles,
        }
    }

    fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("x-operator-id", self.id.to_string())
            .header("x-operator-roles", self.roles)
    }
}

async fn create_product(
    client: &reqwest::Client,
    srv: &TestServer,
    op: &Operator,
    body: serde_json::Value,
) -> u64 {
    let res = op
        .apply(client.post(format!("{}/products", srv.base_url)))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_u64().unwrap()
}

async fn issue_token(client: &reqwest::Client, srv: &TestServer, op: &Operator, action: &str) -> String {
    let res = op
        .apply(client.post(format!("{}/maintenance/tokens", srv.base_url)))
        .json(&json!({ "action": action }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["action"], action);
    body["token"].as_str().unwrap().to_string()
}

fn status_of(srv: &TestServer, id: u64) -> ProductStatus {
    srv.services.catalog.get(ProductId::new(id)).unwrap().status
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn operator_context_is_required() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn operator_context_is_derived_from_headers() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");

    let client = reqwest::Client::new();
    let res = op
        .apply(client.get(format!("{}/whoami", srv.base_url)))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["operator_id"].as_str().unwrap(), op.id.to_string());
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "shop_manager"));
}

#[tokio::test]
async fn duplicate_cleanup_trashes_newer_copies() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");
    let client = reqwest::Client::new();

    let oldest = create_product(
        &client,
        &srv,
        &op,
        json!({ "title": "Mug", "sku": "A1", "created_at": "2024-01-01T00:00:00Z" }),
    )
    .await;
    let copy = create_product(
        &client,
        &srv,
        &op,
        json!({ "title": "Mug (copy)", "sku": "a1", "created_at": "2024-01-02T00:00:00Z" }),
    )
    .await;
    let other = create_product(
        &client,
        &srv,
        &op,
        json!({ "title": "Kettle", "sku": "B2", "created_at": "2024-01-03T00:00:00Z" }),
    )
    .await;

    // Dry run first.
    let res = op
        .apply(client.get(format!("{}/maintenance/duplicates", srv.base_url)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value = res.json().await.unwrap();
    assert_eq!(report["removals"], json!([copy]));
    assert_eq!(report["removed_count"], 1);
    assert_eq!(status_of(&srv, copy), ProductStatus::Publish);

    let token = issue_token(&client, &srv, &op, "duplicate_cleanup").await;
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["trashed"], 1);
    assert_eq!(body["failed"], json!([]));

    assert_eq!(status_of(&srv, oldest), ProductStatus::Publish);
    assert_eq!(status_of(&srv, copy), ProductStatus::Trash);
    assert_eq!(status_of(&srv, other), ProductStatus::Publish);

    // Replaying the same token is rejected.
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn image_review_moves_imageless_products_to_pending() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("admin");
    let client = reqwest::Client::new();

    let bare = create_product(&client, &srv, &op, json!({ "title": "Lamp" })).await;
    let pictured = create_product(
        &client,
        &srv,
        &op,
        json!({ "title": "Chair", "primary_image": "chair.png" }),
    )
    .await;
    let draft = create_product(&client, &srv, &op, json!({ "title": "Desk", "status": "draft" })).await;

    let token = issue_token(&client, &srv, &op, "image_review").await;
    let res = op
        .apply(client.post(format!("{}/maintenance/image-review", srv.base_url)))
        .header("x-action-token", token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["updated"], 1);

    assert_eq!(status_of(&srv, bare), ProductStatus::Pending);
    assert_eq!(status_of(&srv, pictured), ProductStatus::Publish);
    assert_eq!(status_of(&srv, draft), ProductStatus::Draft);
}

#[tokio::test]
async fn token_for_one_action_does_not_unlock_another() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");
    let client = reqwest::Client::new();

    let token = issue_token(&client, &srv, &op, "image_review").await;
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");
    let client = reqwest::Client::new();

    let res = op
        .apply(client.post(format!("{}/maintenance/image-review", srv.base_url)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_action_token");
}

#[tokio::test]
async fn operators_without_permission_are_forbidden_before_any_change() {
    let srv = TestServer::spawn().await;
    let manager = Operator::new("shop_manager");
    let viewer = Operator::new("viewer");
    let client = reqwest::Client::new();

    let first = create_product(&client, &srv, &manager, json!({ "title": "Cup", "sku": "C" })).await;
    let second = create_product(&client, &srv, &manager, json!({ "title": "Cup", "sku": "C" })).await;

    let res = viewer
        .apply(client.post(format!("{}/maintenance/tokens", srv.base_url)))
        .json(&json!({ "action": "duplicate_cleanup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Even with someone else's valid token, the permission check fails first.
    let token = issue_token(&client, &srv, &manager, "duplicate_cleanup").await;
    let res = viewer
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    assert_eq!(status_of(&srv, first), ProductStatus::Publish);
    assert_eq!(status_of(&srv, second), ProductStatus::Publish);
}

#[tokio::test]
async fn unavailable_catalog_reports_precondition_failure() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");
    let client = reqwest::Client::new();

    srv.services.catalog.set_available(false);

    let token = issue_token(&client, &srv, &op, "duplicate_cleanup").await;
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "precondition_failed");

    // The failed run used the token up; a retry needs a fresh one.
    srv.services.catalog.set_available(true);
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let fresh = issue_token(&client, &srv, &op, "duplicate_cleanup").await;
    let res = op
        .apply(client.post(format!("{}/maintenance/duplicate-cleanup", srv.base_url)))
        .header("x-action-token", fresh)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_product_status_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let op = Operator::new("shop_manager");
    let client = reqwest::Client::new();

    let res = op
        .apply(client.post(format!("{}/products", srv.base_url)))
        .json(&json!({ "title": "Odd", "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = op
        .apply(client.get(format!("{}/products", srv.base_url)))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"], json!([]));
}
