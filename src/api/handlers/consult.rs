use crate::{
    agents::{Agent, HealthAgent},
    types::{AgentContext, AppError, ErrorBody, HealthAdvice, Result, SymptomRequest},
    utils::{config::MemoryScope, text::clean_health_advice},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

/// Analyse symptoms and return cleaned health advice
///
/// In session scope the session id is read from the configured header (a new
/// one is minted when absent) and echoed back in the same header.
#[utoipa::path(
    post,
    path = "/consult",
    request_body = SymptomRequest,
    responses(
        (status = 200, description = "Health advice", body = HealthAdvice),
        (status = 422, description = "Missing or invalid symptoms field", body = ErrorBody),
        (status = 500, description = "Completion client setup or invocation failed", body = ErrorBody),
        (status = 504, description = "Completion timed out", body = ErrorBody)
    ),
    tag = "consult"
)]
pub async fn consult(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SymptomRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload?;

    let requested = headers
        .get(&state.session_header)
        .and_then(|value| value.to_str().ok());
    let session = state.memory.resolve_session(requested);

    let context = AgentContext {
        session_id: session.id().to_string(),
        conversation_history: state.memory.history(&session),
    };

    let llm = state.llm_factory.create_default().await.map_err(|e| {
        error!(error = %e, "Error creating completion client");
        e
    })?;
    let agent = HealthAgent::new(llm, state.referrals.clone());

    let timeout = state.llm_factory.timeout();
    let raw = match tokio::time::timeout(timeout, agent.execute(&payload.symptoms, &context)).await
    {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            error!(session_id = %session.id(), error = %e, "Error during completion");
            return Err(e);
        }
        Err(_) => {
            let err = AppError::Timeout(timeout.as_secs());
            error!(session_id = %session.id(), error = %err, "Completion timed out");
            return Err(err);
        }
    };

    state
        .memory
        .append_exchange(&session, &payload.symptoms, &raw);

    let advice = HealthAdvice {
        health_advice: clean_health_advice(&raw),
    };

    info!(
        session_id = %session.id(),
        minted = session.is_minted(),
        advice_chars = advice.health_advice.len(),
        "Consultation completed"
    );

    let mut response = Json(advice).into_response();
    if state.memory.scope() == MemoryScope::Session {
        let value = HeaderValue::from_str(session.id())
            .map_err(|e| AppError::Internal(format!("invalid session id: {}", e)))?;
        response
            .headers_mut()
            .insert(state.session_header.clone(), value);
    }

    Ok(response)
}
