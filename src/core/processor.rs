use std::path::Path;

use super::container::ContainerReader;
use super::record::LineageRecord;
use crate::parsers::MExpressionAnalyzer;

/// Runs the expression analyzer over every query in one container.
pub struct FileProcessor<R> {
    reader: R,
    analyzer: MExpressionAnalyzer,
}

impl<R: ContainerReader> FileProcessor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            analyzer: MExpressionAnalyzer::new(),
        }
    }

    /// Lineage records for one container, in query order.
    ///
    /// Never fails: an unreadable container yields a single `ERROR` record.
    pub fn process(&self, container_path: &Path) -> Vec<LineageRecord> {
        tracing::info!("Processing {}", container_path.display());

        let queries = match self.reader.read_queries(container_path) {
            Ok(Some(queries)) if !queries.is_empty() => queries,
            Ok(_) => {
                tracing::info!(
                    "No Power Query / M code found in {}",
                    container_path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!("Error reading {}: {err:#}", container_path.display());
                return vec![LineageRecord::error(
                    container_path.to_path_buf(),
                    &format!("{err:#}"),
                )];
            }
        };

        queries
            .iter()
            .flat_map(|query| {
                self.analyzer.analyze(
                    container_path,
                    query.table_name.as_deref(),
                    &query.expression,
                )
            })
            .collect()
    }
}
