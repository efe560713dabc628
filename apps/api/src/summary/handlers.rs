//! Axum route handler for the summarize endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;
use crate::summary::models::{SummarizeRequest, Tone};
use crate::summary::orchestrator::summarize_document;

/// POST /api/simplify
///
/// Validates the text, then runs the two-pass summarizer. Responses are never cached.
/// Unreadable bodies are turned into `AppError::Validation` so every failure keeps the
/// `{error, code}` shape.
pub async fn handle_simplify(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let request = SummarizeRequest::from_json(&body);

    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::Validation("Missing 'text'.".to_string()));
    }

    let llm = state.llm.as_deref().ok_or_else(|| {
        AppError::Configuration("Missing OPENAI_API_KEY on server".to_string())
    })?;

    let tone = Tone::from_label(request.tone.as_deref());
    let summary = summarize_document(llm, text, tone).await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(summary)))
}
