//! Image upload text extraction

use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use ecare_core::{ExtractedText, GatewayError};

use crate::error::{ApiResponse, rejection};
use crate::ocr;
use crate::state::AppState;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Image taken from the upload, kept only for this request
struct UploadedImage {
    filename: String,
    bytes: Bytes,
}

/// POST /api/ocr - Extract text from an uploaded image
pub async fn extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResponse<ExtractedText> {
    ApiResponse::from_result("ocr", extract_inner(&state, multipart).await)
}

async fn extract_inner(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ExtractedText, GatewayError> {
    let image = read_upload(multipart.map_err(rejection)?).await?;
    tracing::info!(filename = %image.filename, size = image.bytes.len(), "Received file");

    let text = ocr::extract_text(state.ocr(), image.bytes).await?;
    Ok(ExtractedText { text })
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedImage, GatewayError> {
    while let Some(field) = multipart.next_field().await.map_err(rejection)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(rejection)?;
        return Ok(UploadedImage { filename, bytes });
    }

    Err(GatewayError::Validation(format!(
        "Missing multipart field: {}",
        FILE_FIELD
    )))
}
