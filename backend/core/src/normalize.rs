//! Normalize a free-form vision reply into a validated grid.
//!
//! Models routinely wrap their JSON in a fenced code block, with or
//! without a `json` language tag. The normalizer strips the fences,
//! parses what remains, and enforces only the outer shape: a non-empty
//! array whose elements are arrays. Anything else fails closed with a
//! truncated snippet of the raw reply.

use serde_json::Value;

use crate::error::ScanError;
use crate::types::Grid;

/// Parse an AI reply into a grid, failing with [`ScanError::MalformedResponse`].
pub fn normalize_response(raw: &str) -> Result<Grid, ScanError> {
    let text = strip_fences(raw.trim());

    let value: Value = serde_json::from_str(text).map_err(|_| ScanError::malformed(raw))?;

    let rows = match value {
        Value::Array(rows) if !rows.is_empty() => rows,
        _ => return Err(ScanError::malformed(raw)),
    };

    let mut grid: Grid = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = match row {
            Value::Array(cells) => cells,
            _ => return Err(ScanError::malformed(raw)),
        };
        grid.push(cells.into_iter().map(cell_to_string).collect());
    }

    Ok(grid)
}

/// Remove surrounding code-fence markers, tagged (```json) or bare (```).
fn strip_fences(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }
    let mut inner = text.trim_start_matches('`');
    if let Some(rest) = inner.strip_prefix("json") {
        inner = rest;
    }
    inner.trim_end_matches('`').trim()
}

/// Cells should be strings, but the outer shape is all we enforce:
/// other JSON values are rendered as their compact JSON text.
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
