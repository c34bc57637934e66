use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::graph::GraphService;

use crate::metrics;
use crate::openapi::ApiDoc;

pub mod graphs;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub graphs: GraphService,
}

impl ServerState {
    pub fn new(graphs: GraphService) -> Self { Self { graphs } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: graph API, health, metrics and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new().route(
        "/api/graphs",
        get(graphs::list_or_get).post(graphs::save).delete(graphs::delete),
    );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    let docs = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    api
        .merge(ops)
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
