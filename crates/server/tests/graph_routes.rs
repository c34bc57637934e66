use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, ServerState};
use server::startup::build_cors;
use service::errors::ServiceError;
use service::graph::{GraphName, GraphService};
use service::storage::{GraphStorage, MemoryGraphStorage};

/// Storage whose every call fails, to exercise the 500 paths.
struct BrokenStorage;

#[async_trait]
impl GraphStorage for BrokenStorage {
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError> {
        Err(ServiceError::read("permission denied"))
    }
    async fn read(&self, _key: &GraphName) -> Result<Option<Vec<u8>>, ServiceError> {
        Err(ServiceError::read("permission denied"))
    }
    async fn write(&self, _key: &GraphName, _bytes: &[u8]) -> Result<(), ServiceError> {
        Err(ServiceError::write("no space left on device"))
    }
    async fn remove(&self, _key: &GraphName) -> Result<bool, ServiceError> {
        Err(ServiceError::write("read-only file system"))
    }
}

fn app_with(storage: Arc<dyn GraphStorage>) -> Router {
    routes::build_router(ServerState::new(GraphService::new(storage)), build_cors())
}

fn memory_app() -> (Router, Arc<MemoryGraphStorage>) {
    let storage = Arc::new(MemoryGraphStorage::new());
    (app_with(storage.clone()), storage)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/graphs")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn save_rejects_missing_fields_without_writing() -> anyhow::Result<()> {
    let (app, storage) = memory_app();

    for body in [
        r#"{"data":{"x":1}}"#,
        r#"{"name":"n"}"#,
        r#"{"name":"n","data":null}"#,
        r#"{"name":"","data":{}}"#,
        r#"{"name":5,"data":{}}"#,
        r#"not json"#,
    ] {
        let (status, value) = send(&app, post_json(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(value, json!({"message": "Invalid graph data"}), "body {body}");
    }
    assert!(storage.list_keys().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn save_accepts_falsy_but_present_data() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    for (name, data) in [("zero", json!(0)), ("no", json!(false)), ("empty", json!(""))] {
        let body = json!({"name": name, "data": data}).to_string();
        let (status, _) = send(&app, post_json(&body)).await?;
        assert_eq!(status, StatusCode::OK);

        let (status, value) = send(&app, get(&format!("/api/graphs?name={name}"))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({"name": name, "data": data}));
    }
    Ok(())
}

#[tokio::test]
async fn traversal_names_are_rejected_everywhere() -> anyhow::Result<()> {
    let (app, storage) = memory_app();

    let body = json!({"name": "../../etc/passwd", "data": {}}).to_string();
    let (status, value) = send(&app, post_json(&body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["message"].as_str().unwrap_or_default().starts_with("Invalid graph name"));

    let (status, _) = send(&app, get("/api/graphs?name=..%2Fsecret")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, delete("/api/graphs?name=a%2Fb")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(storage.list_keys().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_requires_name_and_existing_graph() -> anyhow::Result<()> {
    let (app, _) = memory_app();

    for uri in ["/api/graphs", "/api/graphs?name="] {
        let (status, value) = send(&app, delete(uri)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, json!({"message": "Graph name is required"}));
    }

    let (status, value) = send(&app, delete("/api/graphs?name=nonexistent")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, json!({"message": "Graph \"nonexistent\" not found"}));
    Ok(())
}

#[tokio::test]
async fn malformed_query_strings_get_json_400() -> anyhow::Result<()> {
    let (app, _) = memory_app();

    let resp = app.clone().oneshot(delete("/api/graphs?name=a&name=b")).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp.headers().get("content-type").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(content_type.starts_with("application/json"), "content-type {content_type}");
    let value: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(value, json!({"message": "Graph name is required"}));

    let (status, value) = send(&app, get("/api/graphs?name=a&name=b")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["message"].as_str().unwrap_or_default().starts_with("Invalid graph name"));
    Ok(())
}

#[tokio::test]
async fn storage_failures_map_to_500_with_detail() -> anyhow::Result<()> {
    let app = app_with(Arc::new(BrokenStorage));

    let (status, value) = send(&app, get("/api/graphs")).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "Failed to fetch saved graphs");
    assert!(value["error"].as_str().unwrap_or_default().contains("permission denied"));

    let (status, value) = send(&app, get("/api/graphs?name=g")).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "Failed to fetch saved graphs");

    let (status, value) = send(&app, post_json(r#"{"name":"g","data":[1]}"#)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "Failed to save graph");
    assert!(value["error"].as_str().unwrap_or_default().contains("no space left"));

    let (status, value) = send(&app, delete("/api/graphs?name=g")).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "Failed to delete graph");

    // the router keeps serving after failures
    let (status, _) = send(&app, get("/health")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn metrics_and_openapi_are_exposed() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    let (status, _) = send(&app, get("/api/graphs?name=missing")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let resp = app.clone().oneshot(get("/metrics")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("graph_store_operations_total"));

    let (status, doc) = send(&app, get("/api-docs/openapi.json")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/graphs"].is_object());
    Ok(())
}
