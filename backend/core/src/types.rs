use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered rows of ordered string cells. Row 0 is the header row.
/// Rows are not required to share a column count.
pub type Grid = Vec<Vec<String>>;

/// A persisted, immutable table extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub id: String,
    pub filename: String,
    pub extracted_data: Grid,
    pub created_at: DateTime<Utc>,
}

impl ExtractionRecord {
    pub fn new(filename: impl Into<String>, extracted_data: Grid) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filename: filename.into(),
            extracted_data,
            created_at: Utc::now(),
        }
    }
}

/// Per-request extraction outcome returned to the client. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub success: bool,
    pub message: String,
    pub table_data: Option<Grid>,
    pub processing_id: Option<String>,
}

impl ProcessingResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            table_data: None,
            processing_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_gets_unique_id() {
        let a = ExtractionRecord::new("a.png", vec![vec!["h".into()]]);
        let b = ExtractionRecord::new("b.png", vec![vec!["h".into()]]);
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = ExtractionRecord::new(
            "sheet.jpg",
            vec![
                vec!["Name".into(), "Age".into()],
                vec!["Jo".into(), "1".into()],
            ],
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ExtractionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.extracted_data, record.extracted_data);
        assert_eq!(back.created_at, record.created_at);
    }

    #[test]
    fn test_failure_result_shape() {
        let result = ProcessingResult::failure("boom");
        assert!(!result.success);
        assert_eq!(result.message, "boom");
        assert!(result.table_data.is_none());
        assert!(result.processing_id.is_none());
    }
}
