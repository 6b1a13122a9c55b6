use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::container::{ContainerReader, PbixReader};
use super::processor::FileProcessor;
use super::report::{Report, DEFAULT_SUMMARY_DELIMITER};
use super::scanner::ContainerScanner;
use crate::formatters::ExportFormat;
use crate::LineageError;

/// Options for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Container file extension, matched case-insensitively.
    pub extension: String,
    /// Separator between file names in the summary `pbix_files` column.
    pub summary_delimiter: String,
    /// Process containers on the rayon pool.
    pub parallel: bool,
    pub format: ExportFormat,
    /// Where the export lands; defaults to the scanned root.
    pub output_dir: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extension: "pbix".to_string(),
            summary_delimiter: DEFAULT_SUMMARY_DELIMITER.to_string(),
            parallel: false,
            format: ExportFormat::default(),
            output_dir: None,
        }
    }
}

impl ExtractionConfig {
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn with_summary_delimiter(mut self, delimiter: &str) -> Self {
        self.summary_delimiter = delimiter.to_string();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

/// Walks a directory tree of containers and builds the lineage report.
pub struct CorpusAnalyzer<R = PbixReader> {
    scanner: ContainerScanner,
    processor: FileProcessor<R>,
    config: ExtractionConfig,
}

impl CorpusAnalyzer<PbixReader> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_reader(PbixReader::new(), config)
    }
}

impl<R: ContainerReader> CorpusAnalyzer<R> {
    pub fn with_reader(reader: R, config: ExtractionConfig) -> Self {
        Self {
            scanner: ContainerScanner::new(&config.extension),
            processor: FileProcessor::new(reader),
            config,
        }
    }

    pub fn analyze(&self, root_path: &Path) -> Result<Report, LineageError> {
        if !root_path.is_dir() {
            return Err(LineageError::InvalidRoot(root_path.to_path_buf()));
        }

        tracing::info!("Scanning {} for .{} files", root_path.display(), self.scanner.extension());
        let containers = self.scanner.scan_directory(root_path);
        for container in &containers {
            tracing::info!("Found container: {}", container.path.display());
        }

        if containers.is_empty() {
            return Err(LineageError::NoContainersFound {
                root: root_path.to_path_buf(),
                extension: self.scanner.extension().to_string(),
            });
        }

        // Collected per container in discovery order either way.
        let per_container: Vec<_> = if self.config.parallel {
            containers
                .par_iter()
                .map(|container| self.processor.process(&container.path))
                .collect()
        } else {
            containers
                .iter()
                .map(|container| self.processor.process(&container.path))
                .collect()
        };
        let records: Vec<_> = per_container.into_iter().flatten().collect();

        if records.is_empty() {
            return Err(LineageError::NoDataExtracted {
                root: root_path.to_path_buf(),
                containers: containers.len(),
            });
        }

        tracing::info!(
            "Extracted {} lineage records from {} containers",
            records.len(),
            containers.len()
        );

        Ok(Report::build(records, &self.config.summary_delimiter))
    }

    /// Write the report next to the scanned root (or into `output_dir`).
    pub fn export(&self, report: &Report, root_path: &Path) -> Result<PathBuf> {
        let sink = self.config.format.sink();
        let output_dir = self.config.output_dir.as_deref().unwrap_or(root_path);
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let output_path =
            output_dir.join(format!("pbix_data_sources_{timestamp}.{}", sink.extension()));

        sink.write_sheets(&report.to_sheets(), &output_path)
            .with_context(|| format!("Failed to export report to {}", output_path.display()))?;

        tracing::info!("Report written to {}", output_path.display());
        Ok(output_path)
    }

    pub fn run(&self, root_path: &Path) -> Result<PathBuf> {
        let report = self.analyze(root_path)?;
        self.export(&report, root_path)
    }
}

/// Scan `root_path` for `.pbix` files and write the lineage workbook into it.
pub fn run_extraction(root_path: &Path, config: ExtractionConfig) -> Result<PathBuf> {
    CorpusAnalyzer::new(config).run(root_path)
}
