use anyhow::Result;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use super::{Sheet, TabularSink};

/// JSON document with every sheet as an array of row objects.
pub struct JsonSink {
    pretty: bool,
}

impl JsonSink {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn format_sheets(&self, sheets: &[Sheet]) -> Result<String> {
        let sheets: Vec<Value> = sheets
            .iter()
            .map(|sheet| {
                let rows: Vec<Value> = sheet
                    .rows
                    .iter()
                    .map(|row| {
                        let object: Map<String, Value> = sheet
                            .columns
                            .iter()
                            .zip(row)
                            .map(|(column, cell)| (column.clone(), json!(cell)))
                            .collect();
                        Value::Object(object)
                    })
                    .collect();

                json!({
                    "name": sheet.name,
                    "columns": sheet.columns,
                    "rows": rows
                })
            })
            .collect();

        let output = json!({
            "generated_at": chrono::Local::now().to_rfc3339(),
            "sheets": sheets
        });

        Ok(if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        })
    }
}

impl TabularSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write_sheets(&self, sheets: &[Sheet], output_path: &Path) -> Result<()> {
        let content = self.format_sheets(sheets)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

impl Default for JsonSink {
    fn default() -> Self {
        Self::new()
    }
}
