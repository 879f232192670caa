use crate::{types::HealthStatus, AppState};
use axum::{extract::State, Json};

/// Liveness check with the active provider and memory settings
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let provider = state.llm_factory.default_provider();

    Json(HealthStatus {
        status: "ok".to_string(),
        provider: provider.name().to_string(),
        model: provider.model().to_string(),
        memory_scope: state.memory.scope().as_str().to_string(),
        sessions: state.memory.session_count(),
    })
}
