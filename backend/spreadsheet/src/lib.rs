//! Render an extracted grid into a styled single-sheet XLSX buffer.
//!
//! Styling contract: the header row is bold white on a solid blue fill,
//! every cell gets thin borders and centered alignment, and column widths
//! track the longest value in the column with a hard cap.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use gridscan_core::{Grid, ScanError};

/// Header fill, matching the exported documents users already have.
const HEADER_FILL: Color = Color::RGB(0x36_60_92);

/// Padding added to the measured column width, in characters.
const WIDTH_PADDING: usize = 2;

/// Cap on auto-sized column widths so one long cell cannot blow up the
/// whole sheet.
const MAX_COLUMN_WIDTH: usize = 50;

/// Build a complete `.xlsx` document containing `grid` on one sheet.
pub fn build_workbook(grid: &Grid) -> Result<Vec<u8>, ScanError> {
    if grid.is_empty() {
        return Err(ScanError::InvalidInput("empty grid".into()));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("Extracted Table")
        .map_err(|e| ScanError::SpreadsheetError(e.to_string()))?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let cell_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (row_idx, row) in grid.iter().enumerate() {
        let format = if row_idx == 0 {
            &header_format
        } else {
            &cell_format
        };
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string_with_format(row_idx as u32, col_idx as u16, value, format)
                .map_err(|e| ScanError::SpreadsheetError(e.to_string()))?;
        }
    }

    for (col_idx, width) in column_widths(grid).into_iter().enumerate() {
        worksheet
            .set_column_width(col_idx as u16, width as f64)
            .map_err(|e| ScanError::SpreadsheetError(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ScanError::SpreadsheetError(e.to_string()))
}

/// Width per column: longest value (chars) plus padding, capped.
/// Jagged rows simply contribute to the columns they have.
fn column_widths(grid: &Grid) -> Vec<usize> {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in grid {
        for (col_idx, value) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(value.chars().count());
        }
    }
    widths
        .into_iter()
        .map(|w| (w + WIDTH_PADDING).min(MAX_COLUMN_WIDTH))
        .collect()
}
