use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub message: String, pub error: String }

#[derive(ToSchema)]
pub struct GraphDocumentDoc {
    pub name: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(ToSchema)]
pub struct SaveGraphRequestDoc {
    pub name: String,
    /// Any JSON value except `null`
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::graphs::list_or_get,
        crate::routes::graphs::save,
        crate::routes::graphs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            GraphDocumentDoc,
            SaveGraphRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "graphs")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_graph_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/graphs"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
