use thiserror::Error;

/// Top-level error type for the gridscan service.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed AI response: {snippet}")]
    MalformedResponse { snippet: String },

    #[error("vision provider error: {0}")]
    UpstreamFailure(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("spreadsheet error: {0}")]
    SpreadsheetError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanError {
    /// Build a `MalformedResponse`, keeping at most the first 200
    /// characters of the raw reply for diagnostics.
    pub fn malformed(raw: &str) -> Self {
        let snippet: String = raw.chars().take(200).collect();
        Self::MalformedResponse { snippet }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_snippet_truncated() {
        let raw = "x".repeat(500);
        match ScanError::malformed(&raw) {
            ScanError::MalformedResponse { snippet } => {
                assert_eq!(snippet.len(), 200);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_snippet_char_boundary() {
        // Truncation counts characters, not bytes.
        let raw = "é".repeat(300);
        match ScanError::malformed(&raw) {
            ScanError::MalformedResponse { snippet } => {
                assert_eq!(snippet.chars().count(), 200);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
