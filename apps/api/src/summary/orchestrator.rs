//! Summary generation — the two-pass completion flow.
//!
//! Flow: clip text → strict JSON attempt → extract → (fenced-JSON fallback attempt if
//!       nothing recognisable came back) → normalize → placeholder safety net.
//!
//! At most two model calls per request, strictly sequential. Transport and API failures
//! are returned as-is and never retried; only an unusable *answer* earns a second call.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{ChatCompleter, ChatRequest, LlmError};
use crate::summary::extract::{extract_json_object, JsonObject};
use crate::summary::models::{Summary, Tone, SUMMARY_FIELDS};
use crate::summary::normalize::normalize_summary;
use crate::summary::prompts::{
    build_fallback_system_prompt, build_system_prompt, build_user_prompt,
};
use crate::text::{clip_chars, MAX_INPUT_CHARS};

/// Inputs shorter than this may legitimately produce an empty synopsis.
pub const MIN_TEXT_FOR_PLACEHOLDER: usize = 20;
/// Substituted for an empty `tldr` so the UI never renders a blank brief.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable — please retry.";

/// Produces a normalized `Summary` for `text`. `text` must already be validated non-blank.
pub async fn summarize_document(
    llm: &dyn ChatCompleter,
    text: &str,
    tone: Tone,
) -> Result<Summary, LlmError> {
    let text = text.trim();
    let input = clip_chars(text, MAX_INPUT_CHARS);
    if input.len() < text.len() {
        info!(
            "Input clipped to {MAX_INPUT_CHARS} chars (was {} chars)",
            text.chars().count()
        );
    }

    let user = build_user_prompt(input);

    let system = build_system_prompt(tone);
    let first = llm
        .complete(ChatRequest {
            system: &system,
            user: &user,
            json_mode: true,
        })
        .await?;
    let mut extracted = extract_json_object(&first);
    let mut attempts = 1;

    if !has_recognized_fields(&extracted) {
        warn!(
            "Strict attempt returned no usable JSON ({} chars); retrying with fenced fallback",
            first.chars().count()
        );
        let fallback_system = build_fallback_system_prompt(tone);
        let second = llm
            .complete(ChatRequest {
                system: &fallback_system,
                user: &user,
                json_mode: false,
            })
            .await?;
        extracted = extract_json_object(&second);
        attempts = 2;

        if !has_recognized_fields(&extracted) {
            warn!("Fallback attempt also returned no usable JSON; using defaults");
        }
    }

    let mut summary = normalize_summary(&Value::Object(extracted));

    if summary.tldr.is_empty() && text.chars().count() > MIN_TEXT_FOR_PLACEHOLDER {
        warn!("Model produced no tldr; substituting placeholder");
        summary.tldr = SUMMARY_UNAVAILABLE.to_string();
    }

    info!(
        "Summary ready: tone={:?}, attempts={}, confidence={}",
        tone, attempts, summary.confidence
    );
    Ok(summary)
}

fn has_recognized_fields(object: &JsonObject) -> bool {
    SUMMARY_FIELDS.iter().any(|f| object.contains_key(*f))
}
