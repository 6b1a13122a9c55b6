use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::{Sheet, TabularSink};

/// Excel workbook with one worksheet per sheet and a bold header row.
pub struct XlsxSink;

impl XlsxSink {
    pub fn new() -> Self {
        Self
    }
}

impl TabularSink for XlsxSink {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write_sheets(&self, sheets: &[Sheet], output_path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .with_context(|| format!("Invalid worksheet name {:?}", sheet.name))?;

            for (col, column) in sheet.columns.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, column, &header_format)?;
            }

            for (row_idx, row) in sheet.rows.iter().enumerate() {
                let excel_row = row_idx as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    // Nulls stay blank.
                    if let Some(value) = cell {
                        worksheet.write_string(excel_row, col as u16, value)?;
                    }
                }
            }
        }

        workbook
            .save(output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}
