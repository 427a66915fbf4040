use crate::models::{ChatRequest, ChatResponse};
use crate::services::record_provider_call;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use std::time::Instant;

/// Map a free-text health concern to appointment guidance.
///
/// Exactly one provider call per request: no retry, no fallback text.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let prompt = state.prompt.render(&request.message);
    let model = state.text_provider.model().to_string();
    tracing::debug!(message_len = request.message.len(), "Received chat request");

    let start = Instant::now();
    let result = state.text_provider.generate(&prompt).await;
    let latency = start.elapsed();

    match result {
        Ok(reply) => {
            record_provider_call(&model, "ok", latency);
            tracing::info!(
                model = %model,
                input_tokens = reply.input_tokens,
                output_tokens = reply.output_tokens,
                finish_reason = reply.finish_reason.as_str(),
                latency_ms = latency.as_millis() as u64,
                "Generated chat reply"
            );
            Ok(Json(ChatResponse {
                response: reply.text,
            }))
        }
        Err(e) => {
            record_provider_call(&model, e.kind(), latency);
            tracing::error!(model = %model, error = %e, "Generation provider call failed");
            Err(AppError::UpstreamError(e.to_string()))
        }
    }
}
