//! Axum route handler for document upload and text extraction.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::documents::extractor::extract_document_text;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field that carries the uploaded document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/extract-pdf
///
/// Accepts `multipart/form-data` with a single `file` field and returns its text.
/// Bodies over `MAX_UPLOAD_BYTES` are answered with 413.
pub async fn handle_extract_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart?;
    let file = read_file_field(&mut multipart).await?;
    let text = extract_document_text(state.extractor.as_ref(), file).await?;
    Ok(Json(ExtractResponse { text }))
}

/// Returns the first non-empty `file` field. Browsers submit an empty part when no file
/// was chosen, so a zero-byte upload counts as missing.
async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let bytes = field.bytes().await?;
        if !bytes.is_empty() {
            return Ok(bytes);
        }
    }
    Err(AppError::Validation("No file uploaded.".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::documents::extractor::testing::StubExtractor;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "plainterms-test-boundary";

    fn multipart_body(field: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"lease.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    async fn upload(extractor: StubExtractor, body: String) -> (StatusCode, Value) {
        let mut state = AppState::for_tests(None);
        state.extractor = Arc::new(extractor);
        send(
            state,
            &format!("multipart/form-data; boundary={BOUNDARY}"),
            body,
        )
        .await
    }

    async fn send(state: AppState, content_type: &str, body: String) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/extract-pdf")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_extracts_trimmed_text() {
        let (status, body) = upload(
            StubExtractor::Text("  Lease Agreement\nRent: $1,200  \n"),
            multipart_body("file", "%PDF-1.4 stub"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Lease Agreement\nRent: $1,200");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let (status, body) = upload(
            StubExtractor::Text("unused"),
            multipart_body("attachment", "%PDF-1.4 stub"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded.");
    }

    #[tokio::test]
    async fn test_empty_file_is_400() {
        let (status, _) = upload(StubExtractor::Text("unused"), multipart_body("file", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_no_extractable_text_is_422() {
        let (status, body) = upload(
            StubExtractor::Text("   \n\n  "),
            multipart_body("file", "%PDF-1.4 scanned image only"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "No text could be extracted.");
    }

    #[tokio::test]
    async fn test_parser_failure_surfaces_message() {
        let (status, body) = upload(
            StubExtractor::Fails("invalid file header"),
            multipart_body("file", "garbage"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "invalid file header");
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_400_json() {
        let (status, body) = send(
            AppState::for_tests(None),
            "application/json",
            "{}".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"],
            "Expected a multipart/form-data upload with a 'file' field."
        );
    }

    #[tokio::test]
    async fn test_missing_boundary_is_400_json() {
        let (status, body) = send(
            AppState::for_tests(None),
            "multipart/form-data",
            multipart_body("file", "%PDF-1.4 stub"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let mut state = AppState::for_tests(None);
        state.config.max_upload_bytes = 64;
        state.extractor = Arc::new(StubExtractor::Text("unused"));
        let (status, body) = send(
            state,
            &format!("multipart/form-data; boundary={BOUNDARY}"),
            multipart_body("file", &"A".repeat(4096)),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["error"], "Uploaded file is too large.");
    }

    #[tokio::test]
    async fn test_upload_within_limit_passes() {
        let mut state = AppState::for_tests(None);
        state.config.max_upload_bytes = 8 * 1024;
        state.extractor = Arc::new(StubExtractor::Text("Rent: $1,200"));
        let (status, body) = send(
            state,
            &format!("multipart/form-data; boundary={BOUNDARY}"),
            multipart_body("file", &"A".repeat(4096)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Rent: $1,200");
    }
}
