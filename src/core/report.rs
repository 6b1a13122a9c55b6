use std::collections::{BTreeMap, BTreeSet};

use super::classify::classify_object;
use super::record::{LineageRecord, NullsLast, ObjectType, SummaryRow};
use crate::formatters::Sheet;

pub const DETAILED_SHEET: &str = "Detailed";
pub const SUMMARY_SHEET: &str = "UniqueObjects";

pub const DETAILED_COLUMNS: &[&str] = &[
    "pbix_file",
    "table_name",
    "source_type",
    "server",
    "database",
    "object_name",
    "sql_snippet",
    "object_type",
];

pub const SUMMARY_COLUMNS: &[&str] = &[
    "server",
    "database",
    "object_name",
    "object_type",
    "pbix_files",
];

pub const DEFAULT_SUMMARY_DELIMITER: &str = "; ";

/// A lineage record with its derived object classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub record: LineageRecord,
    pub object_type: Option<ObjectType>,
}

/// Sorted detail rows plus the per-object summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub detailed: Vec<DetailRow>,
    pub summary: Vec<SummaryRow>,
}

type SummaryKey = (NullsLast<String>, NullsLast<String>, String, ObjectType);

impl Report {
    pub fn build(records: Vec<LineageRecord>, delimiter: &str) -> Self {
        let mut detailed: Vec<DetailRow> = records
            .into_iter()
            .map(|record| {
                let object_type = classify_object(record.object_name.as_deref());
                DetailRow {
                    record,
                    object_type,
                }
            })
            .collect();

        detailed.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let summary = summarize(&detailed, delimiter);
        Self { detailed, summary }
    }

    pub fn to_sheets(&self) -> Vec<Sheet> {
        let detailed = self
            .detailed
            .iter()
            .map(|row| {
                let record = &row.record;
                vec![
                    Some(record.container_path.to_string_lossy().into_owned()),
                    record.table_name.clone(),
                    Some(record.source_type.to_string()),
                    record.server.clone(),
                    record.database.clone(),
                    record.object_name.clone(),
                    record.snippet.clone(),
                    row.object_type.map(|t| t.to_string()),
                ]
            })
            .collect();

        let summary = self
            .summary
            .iter()
            .map(|row| {
                vec![
                    row.server.clone(),
                    row.database.clone(),
                    Some(row.object_name.clone()),
                    Some(row.object_type.to_string()),
                    Some(row.pbix_files.clone()),
                ]
            })
            .collect();

        vec![
            Sheet::new(DETAILED_SHEET, DETAILED_COLUMNS, detailed),
            Sheet::new(SUMMARY_SHEET, SUMMARY_COLUMNS, summary),
        ]
    }
}

impl DetailRow {
    /// (server, database, object_type, object_name, container path), nulls last.
    fn sort_key(
        &self,
    ) -> (
        NullsLast<&str>,
        NullsLast<&str>,
        NullsLast<ObjectType>,
        NullsLast<&str>,
        String,
    ) {
        let record = &self.record;
        (
            NullsLast(record.server.as_deref()),
            NullsLast(record.database.as_deref()),
            NullsLast(self.object_type),
            NullsLast(record.object_name.as_deref()),
            record.container_path.to_string_lossy().into_owned(),
        )
    }
}

fn summarize(detailed: &[DetailRow], delimiter: &str) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<SummaryKey, BTreeSet<String>> = BTreeMap::new();

    for row in detailed {
        let record = &row.record;
        let (Some(object_name), Some(object_type)) = (&record.object_name, row.object_type) else {
            continue;
        };

        let key = (
            NullsLast(record.server.clone()),
            NullsLast(record.database.clone()),
            object_name.clone(),
            object_type,
        );
        groups
            .entry(key)
            .or_default()
            .insert(record.container_basename());
    }

    groups
        .into_iter()
        .map(
            |((server, database, object_name, object_type), files)| SummaryRow {
                server: server.0,
                database: database.0,
                object_name,
                object_type,
                pbix_files: files.into_iter().collect::<Vec<_>>().join(delimiter),
            },
        )
        .collect()
}
