//! Extraction orchestration: image bytes in, structured result out.
//!
//! Every failure inside extraction — provider fault, unparseable reply —
//! is converted into a `ProcessingResult { success: false }` here and
//! never escapes as an error. Only storage faults propagate, so the HTTP
//! layer can map them to a 5xx.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{error, info};
use uuid::Uuid;

use gridscan_core::{
    normalize_response, ExtractionRecord, ProcessingResult, ScanError, TableVision,
    VisionRequest,
};
use gridscan_store::TableStore;

const SYSTEM_PROMPT: &str =
    "You are an expert at analyzing handwritten tables and extracting structured data.";

const EXTRACTION_PROMPT: &str = "Analyze this handwritten table image and extract all data into structured format.

Return ONLY valid JSON array like:
[
  [\"Header1\", \"Header2\"],
  [\"Row1Col1\", \"Row1Col2\"]
]";

pub struct ExtractionService {
    vision: Arc<dyn TableVision>,
    store: Arc<dyn TableStore>,
}

impl ExtractionService {
    pub fn new(vision: Arc<dyn TableVision>, store: Arc<dyn TableStore>) -> Self {
        Self { vision, store }
    }

    /// Run one extraction. Infallible by design: any fault becomes a
    /// structured failure result.
    pub async fn extract(&self, image_bytes: &[u8], mime_type: &str) -> ProcessingResult {
        let request = VisionRequest {
            image_base64: STANDARD.encode(image_bytes),
            mime_type: mime_type.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: EXTRACTION_PROMPT.to_string(),
            session_id: format!("table_extraction_{}", Uuid::new_v4()),
        };

        let raw = match self.vision.transcribe(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(provider = self.vision.name(), error = %e, "Vision call failed");
                return ProcessingResult::failure(format!("Extraction failed: {e}"));
            }
        };

        match normalize_response(&raw) {
            Ok(grid) => {
                let rows = grid.len();
                let columns = grid.first().map(Vec::len).unwrap_or(0);
                let message = if self.vision.name() == "mock" {
                    "Table extracted successfully (mock data)".to_string()
                } else {
                    format!("Table extracted successfully: {rows} rows x {columns} columns")
                };
                info!(rows, columns, "Extraction succeeded");
                ProcessingResult {
                    success: true,
                    message,
                    table_data: Some(grid),
                    processing_id: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to parse extracted data");
                ProcessingResult::failure("Failed to parse extracted data")
            }
        }
    }

    /// Extract and, on success, persist the record. `Err` means storage
    /// trouble only; extraction faults surface as `Ok` with
    /// `success: false`.
    pub async fn process_upload(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        filename: &str,
    ) -> Result<ProcessingResult, ScanError> {
        let mut result = self.extract(image_bytes, mime_type).await;

        if let Some(grid) = result.table_data.clone() {
            let record = ExtractionRecord::new(filename, grid);
            self.store
                .insert(&record)
                .await
                .map_err(|e| ScanError::StorageError(e.to_string()))?;
            info!(id = %record.id, filename = %filename, "Stored extraction record");
            result.processing_id = Some(record.id);
        }

        Ok(result)
    }
}
