//! Best-effort recovery of a JSON object from raw model output.
//!
//! Models asked for "JSON only" still wrap answers in ```json fences or chatter around
//! them. `extract_json_object` tries three strategies in a fixed order and stops at the
//! first one that yields an object:
//!
//! 1. the whole (trimmed) text
//! 2. the interior of the first ```json fenced block (marker matched case-insensitively)
//! 3. the span from the first `{` to the last `}`
//!
//! It never fails: when nothing parses the result is an empty map.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json\s*(.*?)```").unwrap());

/// A JSON object recovered from model output. Empty when recovery failed.
pub type JsonObject = Map<String, Value>;

pub fn extract_json_object(raw: &str) -> JsonObject {
    let raw = raw.trim();
    if raw.is_empty() {
        return JsonObject::new();
    }

    parse_object(raw)
        .or_else(|| fenced_block(raw).and_then(parse_object))
        .or_else(|| brace_span(raw).and_then(parse_object))
        .unwrap_or_default()
}

/// Only objects count; a bare array or scalar is no use to the normalizer.
fn parse_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fenced_block(raw: &str) -> Option<&str> {
    JSON_FENCE_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
