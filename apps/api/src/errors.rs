use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::ExtractError;
use crate::llm_client::LlmError;

/// Message shown when the inference provider rejects us for rate or quota reasons.
pub const RATE_LIMIT_MESSAGE: &str =
    "The AI provider's rate limit or quota was reached. Please wait a moment and try again.";
/// Message shown for every other upstream failure.
pub const GENERIC_LLM_MESSAGE: &str = "Failed to generate summary.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Document extraction error: {0}")]
    Extraction(#[from] ExtractError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                tracing::debug!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Uploaded file is too large.".to_string(),
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Llm(e) if e.is_rate_limited() => {
                tracing::error!("LLM rate limited: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_RATE_LIMITED",
                    RATE_LIMIT_MESSAGE.to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    GENERIC_LLM_MESSAGE.to_string(),
                )
            }
            AppError::Extraction(ExtractError::NoText) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_TEXT_EXTRACTED",
                ExtractError::NoText.to_string(),
            ),
            // Library message is surfaced verbatim.
            AppError::Extraction(e) => {
                tracing::error!("Document extraction failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

/// Body rejections from the `Json` extractor carry serde's raw message; callers only get
/// a fixed sentence, the detail goes to the log.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("JSON body rejected: {rejection}");
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected a JSON request body (Content-Type: application/json)."
            }
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON.",
            _ => "Could not read the request body.",
        };
        AppError::Validation(message.to_string())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!("Multipart body rejected: {rejection}");
        AppError::Validation(
            "Expected a multipart/form-data upload with a 'file' field.".to_string(),
        )
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::debug!("Multipart read failed: {err}");
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation("Could not read the uploaded form data.".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let resp = AppError::Validation("Missing 'text'.".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_text_maps_to_422() {
        let resp = AppError::Extraction(ExtractError::NoText).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_pdf_failure_maps_to_500() {
        let resp = AppError::Extraction(ExtractError::Pdf("bad xref".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rate_limit_and_generic_llm_both_500() {
        let limited = AppError::Llm(LlmError::Api {
            status: 429,
            code: None,
            message: "slow down".to_string(),
        })
        .into_response();
        let generic = AppError::Llm(LlmError::Api {
            status: 401,
            code: Some("invalid_api_key".to_string()),
            message: "bad key".to_string(),
        })
        .into_response();
        assert_eq!(limited.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(generic.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let resp = AppError::PayloadTooLarge.into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_configuration_maps_to_500() {
        let resp = AppError::Configuration("Missing OPENAI_API_KEY on server".to_string())
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
