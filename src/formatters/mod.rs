pub mod json;
pub mod xlsx;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub use json::JsonSink;
pub use xlsx::XlsxSink;

/// A named, column-labelled table of optional text cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    pub fn new(name: &str, columns: &[&str], rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

/// Writes several sheets into one output file.
pub trait TabularSink {
    /// File extension (without dot) of the artifact this sink produces.
    fn extension(&self) -> &'static str;

    fn write_sheets(&self, sheets: &[Sheet], output_path: &Path) -> Result<()>;
}

/// Export artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn sink(self) -> Box<dyn TabularSink + Send + Sync> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxSink::new()),
            ExportFormat::Json => Box::new(JsonSink::new()),
        }
    }
}
