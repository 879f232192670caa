use crate::api::handlers::{consult, health};
use crate::types::{ErrorBody, HealthAdvice, HealthStatus, SymptomRequest};
use crate::AppState;
use axum::{
    http::HeaderName,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(consult::consult, health::health),
    components(schemas(SymptomRequest, HealthAdvice, HealthStatus, ErrorBody)),
    tags(
        (name = "consult", description = "Symptom consultation"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/consult", post(consult::consult))
        .route("/health", get(health::health))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

/// Any origin, method and header, with credentials.
///
/// A literal `*` cannot be combined with credentials, so origins, methods and
/// headers are mirrored from the request instead. The session header is
/// exposed so browser clients can send it back on the next call.
pub fn cors_layer(session_header: HeaderName) -> CorsLayer {
    CorsLayer::very_permissive().expose_headers([session_header])
}

/// The complete application: routes, CORS, request tracing and state.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(state.session_header.clone());

    create_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::HealthbotConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::from_config(HealthbotConfig::default()).expect("default config");
        build_app(state)
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let status: HealthStatus = serde_json::from_slice(&body).unwrap();
        assert_eq!(status.provider, "Groq");
        assert_eq!(status.memory_scope, "session");
    }

    #[tokio::test]
    async fn test_consult_requires_post() {
        let response = app()
            .oneshot(Request::get("/consult").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::get("/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_openapi_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/consult"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
