//! Route handlers. Each one decodes the request, calls into the service
//! layer, and encodes the response; no extraction logic lives here.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use gridscan_core::{ExtractionRecord, ProcessingResult, ScanError};
use gridscan_spreadsheet::build_workbook;

use crate::error::ApiError;
use crate::AppState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// `GET /api/`
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Handwritten Table Converter API",
        "status": "running",
    }))
}

/// `POST /api/upload-image`
///
/// Accepts one multipart file part. A non-image content type is rejected
/// with 400 before any vision call or store write happens.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessingResult>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ScanError::InvalidInput(format!("bad multipart body: {e}")))?
        .ok_or_else(|| ScanError::InvalidInput("missing file field".into()))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    if !content_type.starts_with("image/") {
        return Err(ScanError::InvalidInput("Only image files are allowed".into()).into());
    }

    let filename = field.file_name().unwrap_or("upload").to_string();
    let image_bytes = field
        .bytes()
        .await
        .map_err(|e| ScanError::InvalidInput(format!("failed to read upload: {e}")))?;

    info!(filename = %filename, size = image_bytes.len(), "Received image upload");

    let result = state
        .service
        .process_upload(&image_bytes, &content_type, &filename)
        .await?;

    Ok(Json(result))
}

/// `POST /api/generate-excel/{processing_id}`
pub async fn generate_excel(
    State(state): State<AppState>,
    Path(processing_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .store
        .find_by_id(&processing_id)
        .await
        .map_err(|e| ScanError::StorageError(e.to_string()))?
        .ok_or_else(|| ScanError::NotFound("Processing record not found".into()))?;

    let buffer = build_workbook(&record.extracted_data)?;
    let attachment = format!(
        "attachment; filename={}_extracted.xlsx",
        filename_stem(&record.filename)
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, attachment),
        ],
        buffer,
    ))
}

/// `GET /api/extractions`
pub async fn list_extractions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExtractionRecord>>, ApiError> {
    let records = state
        .store
        .list_recent(50)
        .await
        .map_err(|e| ScanError::StorageError(e.to_string()))?;
    Ok(Json(records))
}

/// Original filename minus its last extension.
fn filename_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}
