use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use common::types::MessageResponse;
use service::{errors::ServiceError, graph::SaveGraphInput};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GraphQuery {
    /// Graph name; letters, digits, `-` and `_` only
    pub name: Option<String>,
}

/// Unparseable query strings (e.g. a repeated `name`) get a JSON 400 like every other input error.
fn query_or_bad_request(
    query: Result<Query<GraphQuery>, QueryRejection>,
    message: &'static str,
) -> Result<GraphQuery, JsonApiError> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected graph query");
        JsonApiError::bad_request(message)
    })
}

fn map_service_error(e: ServiceError, failure: &'static str) -> JsonApiError {
    match e {
        ServiceError::Validation(msg) => JsonApiError::bad_request(msg),
        ServiceError::NotFound(name) => JsonApiError::not_found(format!("Graph \"{name}\" not found")),
        other => JsonApiError::internal(failure, other.to_string()),
    }
}

/// List graph names, or return one graph when `name` is given.
/// An empty `name` is treated as absent.
#[utoipa::path(
    get,
    path = "/api/graphs",
    tag = "graphs",
    params(GraphQuery),
    responses(
        (status = 200, description = "Array of names, or the named graph", body = crate::openapi::GraphDocumentDoc),
        (status = 400, description = "Invalid graph name", body = crate::openapi::MessageDoc),
        (status = 404, description = "Graph not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_or_get(
    State(state): State<ServerState>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<Response, JsonApiError> {
    const FAILURE: &str = "Failed to fetch saved graphs";
    let q = query_or_bad_request(query, "Invalid graph name: malformed query string")?;
    match q.name.filter(|n| !n.is_empty()) {
        Some(name) => {
            let result = state.graphs.get(&name).await;
            metrics::observe("get", &result);
            match result {
                Ok(doc) => Ok(Json(doc).into_response()),
                Err(ServiceError::NotFound(name)) => {
                    Err(JsonApiError::not_found(format!("Graph \"{name}\" not found.")))
                }
                Err(e) => Err(map_service_error(e, FAILURE)),
            }
        }
        None => {
            let result = state.graphs.list().await;
            metrics::observe("list", &result);
            let names = result.map_err(|e| map_service_error(e, FAILURE))?;
            Ok(Json(names).into_response())
        }
    }
}

/// Create or overwrite a graph.
#[utoipa::path(
    post,
    path = "/api/graphs",
    tag = "graphs",
    request_body = crate::openapi::SaveGraphRequestDoc,
    responses(
        (status = 200, description = "Saved", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing name or data", body = crate::openapi::MessageDoc),
        (status = 500, description = "Write failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn save(
    State(state): State<ServerState>,
    payload: Result<Json<SaveGraphInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let Json(input) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected graph body");
        JsonApiError::bad_request("Invalid graph data")
    })?;
    let result = state.graphs.save(input).await;
    metrics::observe("save", &result);
    let name = result.map_err(|e| map_service_error(e, "Failed to save graph"))?;
    Ok(Json(MessageResponse::new(format!("Graph \"{name}\" saved successfully"))))
}

/// Delete a graph by name.
#[utoipa::path(
    delete,
    path = "/api/graphs",
    tag = "graphs",
    params(GraphQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing or invalid name", body = crate::openapi::MessageDoc),
        (status = 404, description = "Graph not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Delete failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let name = query_or_bad_request(query, "Graph name is required")?.name.unwrap_or_default();
    let result = state.graphs.delete(&name).await;
    metrics::observe("delete", &result);
    let name = result.map_err(|e| map_service_error(e, "Failed to delete graph"))?;
    Ok(Json(MessageResponse::new(format!("Graph \"{name}\" deleted successfully"))))
}
