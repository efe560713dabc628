//! Document text extraction — pluggable, trait-based, PDF by default.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; `PdfTextExtractor` is wired in at startup.

use std::fmt::Display;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::text::{clip_chars, MAX_INPUT_CHARS};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No text could be extracted.")]
    NoText,

    /// Parser failure, carrying the library's own message.
    #[error("{0}")]
    Pdf(String),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the raw text of the document, untrimmed.
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractError>;
}

/// Extracts text with `pdf-extract`. Parsing runs on the blocking pool; a parser panic is
/// reported as an extraction failure rather than taking the worker down.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractError> {
        parse_on_blocking_pool(move || pdf_extract::extract_text_from_mem(&bytes)).await
    }
}

async fn parse_on_blocking_pool<F, E>(parse: F) -> Result<String, ExtractError>
where
    F: FnOnce() -> Result<String, E> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::task::spawn_blocking(parse)
        .await
        .map_err(|e| {
            warn!("PDF parser task failed: {e}");
            ExtractError::Pdf(format!("PDF parser crashed: {e}"))
        })?
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Runs `extractor` and shapes the result for the UI: trimmed, clipped to the input budget.
pub async fn extract_document_text(
    extractor: &dyn TextExtractor,
    bytes: Bytes,
) -> Result<String, ExtractError> {
    let size = bytes.len();
    let raw = extractor.extract_text(bytes).await?;

    let text = raw.trim();
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }

    info!(
        "Extracted {} chars from {} byte document",
        text.chars().count(),
        size
    );
    Ok(clip_chars(text, MAX_INPUT_CHARS).trim_end().to_string())
}
